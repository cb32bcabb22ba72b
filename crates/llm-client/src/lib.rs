//! # LLM client abstraction
//!
//! Defines the [`LlmClient`] trait and an OpenAI-compatible implementation.
//! Used by the agent crate, which drives the tool-calling loop: each `chat`
//! call sends the conversation plus tool schemas and receives either a final
//! assistant message, tool-call requests, or both.

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

mod config;
mod openai_llm;

pub use config::EnvLlmConfig;
pub use openai_llm::OpenAILlmClient;

/// One message of a conversation. Serialized into checkpoint state, so the
/// shape must stay stable across saves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum ChatMessage {
    System {
        content: String,
    },
    User {
        content: String,
    },
    Assistant {
        content: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        tool_calls: Vec<ToolCallRequest>,
    },
    /// Output of one tool call, fed back to the model.
    Tool {
        content: String,
        tool_call_id: String,
    },
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self::System {
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::User {
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::Assistant {
            content: content.into(),
            tool_calls: Vec::new(),
        }
    }

    pub fn tool(content: impl Into<String>, tool_call_id: impl Into<String>) -> Self {
        Self::Tool {
            content: content.into(),
            tool_call_id: tool_call_id.into(),
        }
    }
}

/// A tool call requested by the model. `arguments` is the raw JSON string as
/// sent by the API; the dispatcher parses it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCallRequest {
    pub id: String,
    pub name: String,
    pub arguments: String,
}

/// A tool made available to the model: name, dispatch description, and a
/// JSON-schema parameter object.
#[derive(Debug, Clone)]
pub struct ToolSpec {
    pub name: String,
    pub description: String,
    pub parameters: serde_json::Value,
}

/// One assistant turn: final text and/or requested tool calls.
#[derive(Debug, Clone, Default)]
pub struct AssistantTurn {
    pub content: String,
    pub tool_calls: Vec<ToolCallRequest>,
}

impl AssistantTurn {
    /// True when the model requested at least one tool call.
    pub fn wants_tools(&self) -> bool {
        !self.tool_calls.is_empty()
    }
}

/// LLM client interface: one chat-completion round with optional tools.
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn chat(&self, messages: &[ChatMessage], tools: &[ToolSpec]) -> Result<AssistantTurn>;
}

/// Masks an API key for safe logging: first 7 chars + "***" + last 4 chars,
/// or just "***" when the key is too short to mask partially.
pub fn mask_token(token: &str) -> String {
    if token.len() <= 11 {
        return "***".to_string();
    }
    format!("{}***{}", &token[..7], &token[token.len() - 4..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mask_token_short_is_fully_hidden() {
        assert_eq!(mask_token(""), "***");
        assert_eq!(mask_token("sk-12345678"), "***");
    }

    #[test]
    fn mask_token_long_keeps_edges() {
        assert_eq!(mask_token("sk-abcdefghijklmnop"), "sk-abcd***mnop");
    }

    #[test]
    fn assistant_turn_wants_tools() {
        let turn = AssistantTurn {
            content: String::new(),
            tool_calls: vec![ToolCallRequest {
                id: "call_1".to_string(),
                name: "search_books".to_string(),
                arguments: "{}".to_string(),
            }],
        };
        assert!(turn.wants_tools());
        assert!(!AssistantTurn::default().wants_tools());
    }

    #[test]
    fn chat_message_roles_survive_serialization() {
        let messages = vec![
            ChatMessage::system("persona"),
            ChatMessage::user("find a dystopia"),
            ChatMessage::Assistant {
                content: String::new(),
                tool_calls: vec![ToolCallRequest {
                    id: "call_1".to_string(),
                    name: "get_books_by_genre".to_string(),
                    arguments: r#"{"genre":"dystopia"}"#.to_string(),
                }],
            },
            ChatMessage::tool("{\"count\":0}", "call_1"),
        ];
        let json = serde_json::to_string(&messages).unwrap();
        let back: Vec<ChatMessage> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, messages);
    }
}
