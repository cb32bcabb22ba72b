//! Access gate: only members of the corporate chat may use the bot.
//!
//! Runs as the first middleware, once per message, before any session or
//! agent logic. The help command is exempt. Any failure of the membership
//! query denies access, never allows.

use async_trait::async_trait;
use bookbot_core::{Message, Middleware, Result};
use teloxide::prelude::*;
use teloxide::types::{ChatId, ChatMemberStatus, UserId};
use tracing::warn;

use crate::texts;

/// Command allowed through without a membership check.
const EXEMPT_COMMAND: &str = "/help";

/// Membership statuses that grant access.
fn is_allowed_status(status: ChatMemberStatus) -> bool {
    matches!(
        status,
        ChatMemberStatus::Owner | ChatMemberStatus::Administrator | ChatMemberStatus::Member
    )
}

/// True for the designated help command (with or without a bot mention).
fn is_exempt(text: &str) -> bool {
    text.starts_with(EXEMPT_COMMAND)
}

/// Middleware checking sender membership in the corporate chat.
pub struct AccessGate {
    bot: teloxide::Bot,
    corporate_chat_id: i64,
}

impl AccessGate {
    pub fn new(bot: teloxide::Bot, corporate_chat_id: i64) -> Self {
        Self {
            bot,
            corporate_chat_id,
        }
    }

    async fn is_member(&self, user_id: i64) -> bool {
        match self
            .bot
            .get_chat_member(ChatId(self.corporate_chat_id), UserId(user_id as u64))
            .await
        {
            Ok(member) => is_allowed_status(member.kind.status()),
            Err(e) => {
                warn!(user_id, error = %e, "Membership check failed, denying access");
                false
            }
        }
    }
}

#[async_trait]
impl Middleware for AccessGate {
    async fn before(&self, message: &Message) -> Result<bool> {
        if is_exempt(&message.content) {
            return Ok(true);
        }
        if self.is_member(message.user.id).await {
            return Ok(true);
        }
        let _ = self
            .bot
            .send_message(ChatId(message.chat.id), texts::ACCESS_DENIED)
            .await;
        Ok(false)
    }
}
