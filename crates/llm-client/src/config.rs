//! LLM configuration loaded from environment variables.

use anyhow::{Context, Result};
use std::env;

/// Model credentials and selection for an OpenAI-compatible API.
#[derive(Debug, Clone)]
pub struct EnvLlmConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
}

impl EnvLlmConfig {
    /// Loads `OPENAI_API_KEY` (required), `OPENAI_BASE_URL`, and `MODEL`.
    pub fn from_env() -> Result<Self> {
        let api_key = env::var("OPENAI_API_KEY").context("OPENAI_API_KEY not set")?;
        let base_url = env::var("OPENAI_BASE_URL")
            .unwrap_or_else(|_| "https://api.openai.com/v1".to_string());
        let model = env::var("MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string());
        Ok(Self {
            api_key,
            base_url,
            model,
        })
    }
}
