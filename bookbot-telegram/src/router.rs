//! Session router: resolves commands and free text into session lifecycle
//! operations and agent turns.
//!
//! One router instance serves all users; the session store, agent facade, and
//! transport bot are injected. Agent invocations run under a global semaphore
//! so a burst of messages cannot start an unbounded number of model calls.

use std::sync::atomic::Ordering;
use std::sync::Arc;

use agent::{AgentFacade, AgentVariant};
use async_trait::async_trait;
use bookbot_core::{Bot, BotError, Handler, HandlerResponse, Message, Result};
use chrono::Utc;
use tokio::sync::Semaphore;
use tracing::{error, info};

use crate::clear::{clear_recent_messages, CLEAR_WINDOW};
use crate::session::SessionStore;
use crate::texts;

/// Commands understood by the router.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Help,
    NewDialog,
    NewLibraryDialog,
    Clear,
    ConfirmYes,
    ConfirmNo,
}

impl Command {
    /// Parses message text into a command. A bot mention after the command
    /// ("/new@bookbot") is accepted; the yes/no confirmation words are
    /// matched case-insensitively on the whole message.
    pub fn parse(text: &str) -> Option<Command> {
        let first = text.split_whitespace().next()?;
        let bare = first.split('@').next().unwrap_or(first);
        match bare {
            "/start" => Some(Command::Start),
            "/help" => Some(Command::Help),
            "/new" => Some(Command::NewDialog),
            "/sber_new" => Some(Command::NewLibraryDialog),
            "/clear" => Some(Command::Clear),
            _ => match text.trim().to_lowercase().as_str() {
                "yes" => Some(Command::ConfirmYes),
                "no" => Some(Command::ConfirmNo),
                _ => None,
            },
        }
    }
}

/// Routes each inbound message to a session operation or an agent turn.
pub struct SessionRouter {
    bot: Arc<dyn Bot>,
    facade: Arc<AgentFacade>,
    sessions: Arc<SessionStore>,
    agent_permits: Arc<Semaphore>,
}

impl SessionRouter {
    pub fn new(
        bot: Arc<dyn Bot>,
        facade: Arc<AgentFacade>,
        sessions: Arc<SessionStore>,
        max_concurrent_agent_calls: usize,
    ) -> Self {
        Self {
            bot,
            facade,
            sessions,
            agent_permits: Arc::new(Semaphore::new(max_concurrent_agent_calls)),
        }
    }

    async fn begin_dialog(
        &self,
        message: &Message,
        variant: AgentVariant,
        notice: &str,
    ) -> Result<HandlerResponse> {
        let thread_id = self.sessions.begin(
            message.user.id,
            variant,
            message.created_at,
            message.numeric_id().unwrap_or(0),
        );
        info!(user_id = message.user.id, thread_id = %thread_id, ?variant, "New dialog");
        self.bot.reply_to(message, notice).await?;
        Ok(HandlerResponse::Reply(notice.to_string()))
    }

    /// Ordinary text: resolve (or silently start) the session and run one
    /// agent turn. On a facade error the user gets a generic notice and a
    /// fresh thread id, so a poisoned thread never wedges the conversation.
    async fn chat_turn(&self, message: &Message) -> Result<HandlerResponse> {
        let user_id = message.user.id;
        let message_id = message.numeric_id().unwrap_or(0);

        let (session, created) = self.sessions.ensure(user_id, message.created_at, message_id);
        if created {
            info!(user_id, thread_id = %session.thread_id, "Session started implicitly");
            self.bot.reply_to(message, texts::AUTO_STARTED).await?;
        }
        self.sessions.set_last_message(user_id, message_id);

        let _permit = self
            .agent_permits
            .acquire()
            .await
            .map_err(|e| BotError::Agent(e.to_string()))?;

        let _ = self.bot.send_typing(&message.chat).await;

        match self
            .facade
            .invoke(&message.content, &session.thread_id, session.variant)
            .await
        {
            Ok(reply) => {
                let sent_id = self
                    .bot
                    .send_message_and_return_id(&message.chat, &reply)
                    .await?;
                if let Ok(id) = sent_id.parse() {
                    self.sessions.set_last_message(user_id, id);
                }
                Ok(HandlerResponse::Reply(reply))
            }
            Err(e) => {
                error!(user_id, thread_id = %session.thread_id, error = %e, "Agent invocation failed");
                let _ = self.bot.reply_to(message, texts::AGENT_ERROR).await;
                let rotated = self.sessions.rotate_thread(user_id, Utc::now());
                info!(user_id, new_thread_id = ?rotated, "Thread rotated after failure");
                Ok(HandlerResponse::Stop)
            }
        }
    }

    async fn cmd_clear(&self, message: &Message) -> Result<HandlerResponse> {
        let user_id = message.user.id;
        self.sessions
            .ensure(user_id, message.created_at, message.numeric_id().unwrap_or(0));
        let confirm_id = self
            .bot
            .send_confirm_prompt(&message.chat, texts::CLEAR_CONFIRM)
            .await?;
        if let Ok(id) = confirm_id.parse() {
            self.sessions.set_pending_clear(user_id, id);
        }
        Ok(HandlerResponse::Stop)
    }

    async fn confirm_clear(&self, message: &Message) -> Result<HandlerResponse> {
        let user_id = message.user.id;
        let Some(confirm_id) = self.sessions.take_pending_clear(user_id) else {
            // Not answering a clear prompt; treat as ordinary text.
            return self.chat_turn(message).await;
        };
        let Some(session) = self.sessions.get(user_id) else {
            return Ok(HandlerResponse::Stop);
        };

        let _ = self.bot.delete_message(&message.chat, confirm_id).await;

        let last_id = message.numeric_id().unwrap_or(session.last_message_id);
        session.clear_cancel.store(false, Ordering::Relaxed);
        session.clearing.store(true, Ordering::Relaxed);
        let report = clear_recent_messages(
            self.bot.as_ref(),
            &message.chat,
            last_id,
            CLEAR_WINDOW,
            &session.clear_cancel,
        )
        .await;
        session.clearing.store(false, Ordering::Relaxed);

        let thread_id = self
            .sessions
            .begin(user_id, session.variant, Utc::now(), last_id);
        info!(user_id, thread_id = %thread_id, deleted = report.deleted, failed = report.failed, "Chat cleared");

        let done = texts::clear_done(report.deleted, report.failed);
        let sent_id = self
            .bot
            .send_message_and_return_id(&message.chat, &done)
            .await?;
        if let Ok(id) = sent_id.parse() {
            self.sessions.set_last_message(user_id, id);
        }
        Ok(HandlerResponse::Reply(done))
    }

    async fn cancel_clear(&self, message: &Message) -> Result<HandlerResponse> {
        let user_id = message.user.id;
        if let Some(confirm_id) = self.sessions.take_pending_clear(user_id) {
            let _ = self.bot.delete_message(&message.chat, confirm_id).await;
            self.bot.reply_to(message, texts::CLEAR_CANCELLED).await?;
            return Ok(HandlerResponse::Reply(texts::CLEAR_CANCELLED.to_string()));
        }
        if let Some(session) = self.sessions.get(user_id) {
            if session.clearing.load(Ordering::Relaxed) {
                session.clear_cancel.store(true, Ordering::Relaxed);
                self.bot.reply_to(message, texts::CLEAR_CANCELLED).await?;
                return Ok(HandlerResponse::Reply(texts::CLEAR_CANCELLED.to_string()));
            }
        }
        // No clear in sight; treat as ordinary text.
        self.chat_turn(message).await
    }
}

#[async_trait]
impl Handler for SessionRouter {
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let text = message.content.trim();
        if text.is_empty() {
            // Non-text or empty updates never reach the agent.
            return Ok(HandlerResponse::Stop);
        }

        match Command::parse(text) {
            Some(Command::Start) => {
                self.begin_dialog(message, AgentVariant::Default, texts::WELCOME)
                    .await
            }
            Some(Command::Help) => {
                self.bot.reply_to(message, texts::HELP).await?;
                Ok(HandlerResponse::Reply(texts::HELP.to_string()))
            }
            Some(Command::NewDialog) => {
                self.begin_dialog(message, AgentVariant::Default, texts::NEW_DIALOG)
                    .await
            }
            Some(Command::NewLibraryDialog) => {
                self.begin_dialog(message, AgentVariant::Library, texts::NEW_LIBRARY_DIALOG)
                    .await
            }
            Some(Command::Clear) => self.cmd_clear(message).await,
            Some(Command::ConfirmYes) => self.confirm_clear(message).await,
            Some(Command::ConfirmNo) => self.cancel_clear(message).await,
            None => self.chat_turn(message).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_commands() {
        assert_eq!(Command::parse("/start"), Some(Command::Start));
        assert_eq!(Command::parse("/help extra"), Some(Command::Help));
        assert_eq!(Command::parse("/new@bookbot"), Some(Command::NewDialog));
        assert_eq!(Command::parse("/sber_new"), Some(Command::NewLibraryDialog));
        assert_eq!(Command::parse("/clear"), Some(Command::Clear));
    }

    #[test]
    fn parse_confirmations_case_insensitive() {
        assert_eq!(Command::parse("yes"), Some(Command::ConfirmYes));
        assert_eq!(Command::parse("Yes"), Some(Command::ConfirmYes));
        assert_eq!(Command::parse("NO"), Some(Command::ConfirmNo));
    }

    #[test]
    fn parse_free_text_is_not_a_command() {
        assert_eq!(Command::parse("find me a dystopia"), None);
        assert_eq!(Command::parse("yes please"), None);
        assert_eq!(Command::parse("/unknown"), None);
    }
}
