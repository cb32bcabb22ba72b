//! Agent configuration loaded from environment variables.

use anyhow::Result;
use llm_client::EnvLlmConfig;
use std::env;

use crate::facade::ToolEndpoints;

/// Everything an [`crate::AgentFacade`] needs: model credentials, checkpoint
/// store connection string, and data-source endpoints.
#[derive(Debug, Clone)]
pub struct AgentConfig {
    pub llm: EnvLlmConfig,
    pub database_url: String,
    pub endpoints: ToolEndpoints,
}

impl AgentConfig {
    /// Loads from environment. `OPENAI_API_KEY` is required; everything else
    /// has a default.
    pub fn from_env() -> Result<Self> {
        let llm = EnvLlmConfig::from_env()?;
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:./bookbot.db".to_string());
        let endpoints = ToolEndpoints {
            books_api_url: env::var("BOOKS_API_URL")
                .unwrap_or_else(|_| book_tools::DEFAULT_BOOKS_API_URL.to_string()),
            web_search_api_url: env::var("WEB_SEARCH_API_URL")
                .unwrap_or_else(|_| "https://searx.be".to_string()),
            library_api_url: env::var("LIBRARY_API_URL")
                .unwrap_or_else(|_| book_tools::DEFAULT_LIBRARY_API_URL.to_string()),
            shop_site: env::var("SHOP_SITE").unwrap_or_else(|_| "ozon.ru".to_string()),
        };
        Ok(Self {
            llm,
            database_url,
            endpoints,
        })
    }
}
