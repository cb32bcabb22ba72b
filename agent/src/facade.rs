//! **Public API of this crate.** The facade wires model client, toolboxes,
//! and checkpoint store into a single call per turn.

use anyhow::{Context, Result};
use checkpoint::CheckpointStore;
use llm_client::{ChatMessage, LlmClient};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};

use crate::toolset::{toolbox_for, ToolClients};
use crate::{AgentVariant, ReactAgent};

/// Base URLs and scoping for the external data sources.
#[derive(Debug, Clone)]
pub struct ToolEndpoints {
    pub books_api_url: String,
    pub web_search_api_url: String,
    pub library_api_url: String,
    pub shop_site: String,
}

/// Serialized thread state kept in the checkpoint store. Owned by this layer;
/// callers only ever see thread ids.
#[derive(Debug, Default, Serialize, Deserialize)]
struct ThreadState {
    messages: Vec<ChatMessage>,
}

/// Facade over one model client and the per-variant toolboxes.
pub struct AgentFacade {
    llm: Arc<dyn LlmClient>,
    database_url: String,
    clients: ToolClients,
}

impl AgentFacade {
    pub fn new(llm: Arc<dyn LlmClient>, database_url: impl Into<String>, endpoints: ToolEndpoints) -> Self {
        let clients = ToolClients {
            catalog: Arc::new(book_tools::BookCatalogClient::new(endpoints.books_api_url)),
            websearch: Arc::new(book_tools::WebSearchClient::new(endpoints.web_search_api_url)),
            library: Arc::new(book_tools::CorporateLibraryClient::new(endpoints.library_api_url)),
            shop_site: endpoints.shop_site,
        };
        Self {
            llm,
            database_url: database_url.into(),
            clients,
        }
    }

    /// Runs one conversation turn for `thread_id` and returns the final reply
    /// text. A checkpoint-store connection is opened for the duration of this
    /// call only. Failures propagate to the caller, which is expected to
    /// rotate the thread.
    #[instrument(skip(self, message_text))]
    pub async fn invoke(
        &self,
        message_text: &str,
        thread_id: &str,
        variant: AgentVariant,
    ) -> Result<String> {
        let store = CheckpointStore::connect(&self.database_url)
            .await
            .context("Connect checkpoint store")?;
        let result = self.invoke_with_store(&store, message_text, thread_id, variant).await;
        store.close().await;
        result
    }

    async fn invoke_with_store(
        &self,
        store: &CheckpointStore,
        message_text: &str,
        thread_id: &str,
        variant: AgentVariant,
    ) -> Result<String> {
        let mut state = match store.load(thread_id).await? {
            Some(cp) => serde_json::from_value::<ThreadState>(cp.state)
                .context("Deserialize thread state")?,
            None => ThreadState::default(),
        };

        let agent = ReactAgent::new(
            self.llm.clone(),
            toolbox_for(variant, &self.clients),
            variant.system_prompt(),
        );
        let reply = agent.run(&mut state.messages, message_text).await?;

        let checkpoint_id = store
            .save(thread_id, &serde_json::to_value(&state)?)
            .await
            .context("Save thread state")?;
        info!(
            thread_id,
            checkpoint_id = %checkpoint_id,
            message_count = state.messages.len(),
            "Turn completed"
        );

        Ok(reply)
    }
}
