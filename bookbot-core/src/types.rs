//! Core types: user, chat, message, handler response, and the Handler/Middleware traits.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User identity (id, username, names).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Chat (group or private) identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
}

/// A single inbound message with user, chat, and text content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Transport message id (Telegram numeric id as string).
    pub id: String,
    pub user: User,
    pub chat: Chat,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Transport message id parsed back to a number, when numeric.
    pub fn numeric_id(&self) -> Option<i32> {
        self.id.parse().ok()
    }
}

/// Handler result for the chain. `Reply(text)` carries the response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerResponse {
    /// Pass to the next handler.
    Continue,
    /// Stop the chain; no response body.
    Stop,
    /// Stop the chain and attach reply text.
    Reply(String),
}

/// Message handler: the first handler returning Stop or Reply ends the chain.
#[async_trait]
pub trait Handler: Send + Sync {
    async fn handle(&self, message: &Message) -> crate::error::Result<HandlerResponse>;
}

/// Middleware around the handler phase: `before` runs first (false stops the
/// chain), `after` runs in reverse order with the final response.
#[async_trait]
pub trait Middleware: Send + Sync {
    async fn before(&self, _message: &Message) -> crate::error::Result<bool> {
        Ok(true)
    }

    async fn after(
        &self,
        _message: &Message,
        _response: &HandlerResponse,
    ) -> crate::error::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_id_parses_transport_id() {
        let message = Message {
            id: "42".to_string(),
            user: User {
                id: 1,
                username: None,
                first_name: None,
                last_name: None,
            },
            chat: Chat { id: 7 },
            content: "hi".to_string(),
            created_at: Utc::now(),
        };
        assert_eq!(message.numeric_id(), Some(42));
    }

    #[test]
    fn numeric_id_rejects_non_numeric() {
        let message = Message {
            id: "abc".to_string(),
            user: User {
                id: 1,
                username: None,
                first_name: None,
                last_name: None,
            },
            chat: Chat { id: 7 },
            content: "hi".to_string(),
            created_at: Utc::now(),
        };
        assert_eq!(message.numeric_id(), None);
    }
}
