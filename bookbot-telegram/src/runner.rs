//! Long-poll runner: builds the handler chain and feeds it teloxide messages.
//!
//! Each message is handled in a spawned task so the poll loop keeps servicing
//! other users while an agent turn is in flight.

use std::sync::Arc;

use agent::{AgentConfig, AgentFacade};
use anyhow::Result;
use bookbot_core::init_tracing;
use handler_chain::HandlerChain;
use llm_client::OpenAILlmClient;
use teloxide::prelude::*;
use tracing::{error, info};

use crate::access::AccessGate;
use crate::adapters::{TelegramBotAdapter, TelegramMessageWrapper};
use crate::config::BotConfig;
use crate::router::SessionRouter;
use crate::session::SessionStore;

/// Builds the facade, session store, and handler chain from config.
fn build_chain(config: &BotConfig, agent_config: AgentConfig, bot: teloxide::Bot) -> HandlerChain {
    let llm = Arc::new(OpenAILlmClient::new(
        agent_config.llm.api_key.clone(),
        agent_config.llm.base_url.clone(),
        agent_config.llm.model.clone(),
    ));
    let facade = Arc::new(AgentFacade::new(
        llm,
        agent_config.database_url,
        agent_config.endpoints,
    ));
    let sessions = Arc::new(SessionStore::new());
    let adapter = Arc::new(TelegramBotAdapter::new(bot.clone()));

    let router = Arc::new(SessionRouter::new(
        adapter,
        facade,
        sessions,
        config.max_concurrent_agent_calls,
    ));

    let mut chain = HandlerChain::new();
    if let Some(chat_id) = config.corporate_chat_id {
        info!(corporate_chat_id = chat_id, "Access gate enabled");
        chain = chain.add_middleware(Arc::new(AccessGate::new(bot, chat_id)));
    }
    chain.add_handler(router)
}

/// Builds the teloxide bot, pointed at `telegram_api_url` when one is set.
fn build_telegram_bot(config: &BotConfig) -> teloxide::Bot {
    let bot = teloxide::Bot::new(config.bot_token.clone());
    match &config.telegram_api_url {
        Some(url_str) => match reqwest::Url::parse(url_str) {
            Ok(url) => bot.set_api_url(url),
            Err(e) => {
                error!(error = %e, url = %url_str, "Invalid TELEGRAM_API_URL, using default");
                bot
            }
        },
        None => bot,
    }
}

/// Main entry: init logging, build components, start the long-poll loop.
pub async fn run_bot(config: BotConfig) -> Result<()> {
    std::fs::create_dir_all("logs")?;
    init_tracing(&config.log_file)?;

    let agent_config = AgentConfig::from_env()?;
    let bot = build_telegram_bot(&config);
    let chain = build_chain(&config, agent_config, bot.clone());

    if let Ok(me) = bot.get_me().await {
        if let Some(username) = &me.user.username {
            info!(username = %username, "Bot identity confirmed");
        }
    }
    info!("Bot started");

    teloxide::repl(bot, move |_bot: Bot, msg: teloxide::types::Message| {
        let chain = chain.clone();
        async move {
            let core_msg = TelegramMessageWrapper(&msg).to_core();
            info!(
                user_id = core_msg.user.id,
                chat_id = core_msg.chat.id,
                message_id = %core_msg.id,
                "Received message"
            );
            // Handle in a spawned task so the poll loop is never blocked.
            tokio::spawn(async move {
                if let Err(e) = chain.handle(&core_msg).await {
                    error!(error = %e, user_id = core_msg.user.id, "Handler chain failed");
                }
            });
            Ok(())
        }
    })
    .await;

    Ok(())
}
