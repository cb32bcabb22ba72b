//! Bot abstraction for sending, deleting, and signalling on a chat transport.
//!
//! The trait is transport-agnostic; bookbot-telegram implements it via teloxide.
//! Tests substitute their own implementation to capture outbound traffic.

use crate::error::Result;
use crate::types::{Chat, Message};
use async_trait::async_trait;

/// Abstraction over the messaging transport.
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends a text message to the given chat.
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()>;

    /// Sends a reply to the given message (same chat).
    async fn reply_to(&self, message: &Message, text: &str) -> Result<()> {
        self.send_message(&message.chat, text).await
    }

    /// Sends a message and returns its transport id (for later deletion).
    async fn send_message_and_return_id(&self, chat: &Chat, text: &str) -> Result<String>;

    /// Sends a message offering a yes/no choice (a reply keyboard on
    /// transports that support one) and returns its transport id.
    async fn send_confirm_prompt(&self, chat: &Chat, text: &str) -> Result<String>;

    /// Deletes one message by transport id. Errors are for the caller to
    /// count or ignore; bulk deletion treats them as soft failures.
    async fn delete_message(&self, chat: &Chat, message_id: i32) -> Result<()>;

    /// Shows a "typing" indicator in the chat. Best-effort.
    async fn send_typing(&self, chat: &Chat) -> Result<()>;
}
