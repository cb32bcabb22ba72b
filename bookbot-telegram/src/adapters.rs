//! Adapters between teloxide types and the core abstractions.
//!
//! [`TelegramMessageWrapper`] converts inbound teloxide messages to core
//! [`Message`]s; [`TelegramBotAdapter`] implements [`bookbot_core::Bot`] over
//! a teloxide bot so the router and tests stay transport-agnostic.

use async_trait::async_trait;
use bookbot_core::{Bot as CoreBot, BotError, Chat, Message, Result, User};
use teloxide::prelude::*;
use teloxide::types::{ChatAction, ChatId, KeyboardButton, KeyboardMarkup, MessageId, ParseMode};

/// Wraps a teloxide message for conversion to a core [`Message`].
pub struct TelegramMessageWrapper<'a>(pub &'a teloxide::types::Message);

impl<'a> TelegramMessageWrapper<'a> {
    pub fn to_core(&self) -> Message {
        Message {
            id: self.0.id.0.to_string(),
            user: self
                .0
                .from
                .as_ref()
                .map(|u| User {
                    id: u.id.0 as i64,
                    username: u.username.clone(),
                    first_name: Some(u.first_name.clone()),
                    last_name: u.last_name.clone(),
                })
                .unwrap_or(User {
                    id: 0,
                    username: None,
                    first_name: None,
                    last_name: None,
                }),
            chat: Chat { id: self.0.chat.id.0 },
            content: self.0.text().unwrap_or("").to_string(),
            created_at: chrono::Utc::now(),
        }
    }
}

/// Teloxide-backed implementation of the core [`Bot`](CoreBot) trait.
pub struct TelegramBotAdapter {
    bot: teloxide::Bot,
}

impl TelegramBotAdapter {
    pub fn new(bot: teloxide::Bot) -> Self {
        Self { bot }
    }

    /// The underlying teloxide bot, for direct API use where needed.
    pub fn inner(&self) -> &teloxide::Bot {
        &self.bot
    }
}

#[async_trait]
impl CoreBot for TelegramBotAdapter {
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        self.bot
            .send_message(ChatId(chat.id), text.to_string())
            .await
            .map_err(|e| BotError::Bot(e.to_string()))?;
        Ok(())
    }

    /// Tries Markdown first so the agent's formatting survives; falls back to
    /// plain text when the reply is not valid markup.
    async fn send_message_and_return_id(&self, chat: &Chat, text: &str) -> Result<String> {
        let markdown = self
            .bot
            .send_message(ChatId(chat.id), text.to_string())
            .parse_mode(ParseMode::Markdown)
            .await;
        let sent = match markdown {
            Ok(sent) => sent,
            Err(_) => self
                .bot
                .send_message(ChatId(chat.id), text.to_string())
                .await
                .map_err(|e| BotError::Bot(e.to_string()))?,
        };
        Ok(sent.id.0.to_string())
    }

    async fn send_confirm_prompt(&self, chat: &Chat, text: &str) -> Result<String> {
        let keyboard = KeyboardMarkup::new(vec![vec![
            KeyboardButton::new("yes"),
            KeyboardButton::new("no"),
        ]])
        .resize_keyboard()
        .one_time_keyboard();
        let sent = self
            .bot
            .send_message(ChatId(chat.id), text.to_string())
            .reply_markup(keyboard)
            .await
            .map_err(|e| BotError::Bot(e.to_string()))?;
        Ok(sent.id.0.to_string())
    }

    async fn delete_message(&self, chat: &Chat, message_id: i32) -> Result<()> {
        self.bot
            .delete_message(ChatId(chat.id), MessageId(message_id))
            .await
            .map_err(|e| BotError::Bot(e.to_string()))?;
        Ok(())
    }

    async fn send_typing(&self, chat: &Chat) -> Result<()> {
        self.bot
            .send_chat_action(ChatId(chat.id), ChatAction::Typing)
            .await
            .map_err(|e| BotError::Bot(e.to_string()))?;
        Ok(())
    }
}
