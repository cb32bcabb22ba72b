//! Tool-calling loop: one turn of conversation against the model, dispatching
//! requested tool calls until the model produces a plain reply.

use anyhow::Result;
use book_tools::Toolbox;
use llm_client::{ChatMessage, LlmClient, ToolSpec};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Upper bound on model rounds within one turn. Each round is either a batch
/// of tool calls or the final reply.
const MAX_ROUNDS: usize = 8;

/// Agent for one variant: model client, toolbox, and persona.
pub struct ReactAgent {
    llm: Arc<dyn LlmClient>,
    toolbox: Toolbox,
    system_prompt: String,
}

impl ReactAgent {
    pub fn new(llm: Arc<dyn LlmClient>, toolbox: Toolbox, system_prompt: impl Into<String>) -> Self {
        Self {
            llm,
            toolbox,
            system_prompt: system_prompt.into(),
        }
    }

    fn tool_specs(&self) -> Vec<ToolSpec> {
        self.toolbox
            .descriptors()
            .into_iter()
            .map(|d| ToolSpec {
                name: d.name.to_string(),
                description: d.description.to_string(),
                parameters: d.parameters,
            })
            .collect()
    }

    /// Runs one conversation turn. `history` is the thread state loaded from
    /// the checkpoint; the user message and every model/tool message produced
    /// here are appended to it. Returns the final reply text.
    #[instrument(skip(self, history, user_text))]
    pub async fn run(&self, history: &mut Vec<ChatMessage>, user_text: &str) -> Result<String> {
        if history.is_empty() {
            history.push(ChatMessage::system(self.system_prompt.clone()));
        }
        history.push(ChatMessage::user(user_text));

        let specs = self.tool_specs();

        for round in 0..MAX_ROUNDS {
            let turn = self.llm.chat(history, &specs).await?;

            if !turn.wants_tools() {
                history.push(ChatMessage::assistant(turn.content.clone()));
                return Ok(turn.content);
            }

            debug!(round, tool_calls = turn.tool_calls.len(), "Model requested tools");
            history.push(ChatMessage::Assistant {
                content: turn.content.clone(),
                tool_calls: turn.tool_calls.clone(),
            });

            for call in &turn.tool_calls {
                let args: Value = serde_json::from_str(&call.arguments).unwrap_or_else(|e| {
                    warn!(tool = %call.name, error = %e, "Malformed tool arguments");
                    json!({})
                });
                let result = self.toolbox.dispatch(&call.name, args).await?;
                history.push(ChatMessage::tool(result.to_string(), call.id.clone()));
            }
        }

        anyhow::bail!("Agent exceeded {} tool rounds without a final reply", MAX_ROUNDS)
    }
}
