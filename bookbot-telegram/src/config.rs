//! Bot configuration loaded from environment variables.

use anyhow::Result;
use std::env;

/// Telegram-layer configuration. Agent/model settings load separately via
/// [`agent::AgentConfig`].
pub struct BotConfig {
    pub bot_token: String,
    /// Chat whose members may use the bot. `None` disables the access gate.
    pub corporate_chat_id: Option<i64>,
    pub log_file: String,
    /// Cap on concurrently running agent invocations.
    pub max_concurrent_agent_calls: usize,
    /// Optional Telegram Bot API base URL; requests go there instead of the
    /// default servers (points tests at a mock server).
    pub telegram_api_url: Option<String>,
}

impl BotConfig {
    /// Loads from environment. When `token` is given it overrides `BOT_TOKEN`.
    pub fn load(token: Option<String>) -> Result<Self> {
        let bot_token = match token {
            Some(t) => t,
            None => env::var("BOT_TOKEN").map_err(|_| anyhow::anyhow!("BOT_TOKEN not set"))?,
        };
        let corporate_chat_id = env::var("CORPORATE_CHAT_ID")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .map(|s| {
                s.trim()
                    .parse::<i64>()
                    .map_err(|_| anyhow::anyhow!("CORPORATE_CHAT_ID must be a chat id: {:?}", s))
            })
            .transpose()?;
        let log_file = env::var("LOG_FILE").unwrap_or_else(|_| "logs/bookbot.log".to_string());
        let max_concurrent_agent_calls = env::var("MAX_CONCURRENT_AGENT_CALLS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(4);
        let telegram_api_url = env::var("TELEGRAM_API_URL")
            .or_else(|_| env::var("TELOXIDE_API_URL"))
            .ok();
        Ok(Self {
            bot_token,
            corporate_chat_id,
            log_file,
            max_concurrent_agent_calls,
            telegram_api_url,
        })
    }
}
