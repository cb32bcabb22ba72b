//! # agent
//!
//! Agent invocation facade over the tool-calling loop. **Public API:**
//! [`AgentFacade::invoke`]: given a user message, a thread id, and a
//! variant, returns the agent's final reply text. Conversation state lives in
//! the checkpoint store, addressed by thread id; a store connection is opened
//! and released around each invocation.

mod config;
mod facade;
mod react;

pub mod prompts;
pub mod toolset;

pub use config::AgentConfig;
pub use facade::{AgentFacade, ToolEndpoints};
pub use react::ReactAgent;

/// Which persona and toolset an invocation uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AgentVariant {
    /// General-purpose book finder: catalog search plus web search.
    #[default]
    Default,
    /// Corporate library assistant: library categories and books.
    Library,
    /// Standalone sales demo: store catalog and order creation.
    Sales,
}

impl AgentVariant {
    pub fn system_prompt(self) -> &'static str {
        match self {
            AgentVariant::Default => prompts::DEFAULT_SYSTEM_PROMPT,
            AgentVariant::Library => prompts::LIBRARY_SYSTEM_PROMPT,
            AgentVariant::Sales => prompts::SALES_SYSTEM_PROMPT,
        }
    }
}
