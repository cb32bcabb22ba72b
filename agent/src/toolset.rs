//! Per-variant toolboxes built over shared adapter clients.

use std::sync::Arc;

use book_tools::tool::{
    AdditionalInformationTool, BookPurchaseLinksTool, BooksByGenreTool, BooksUniversalSearchTool,
    CreateOrderTool, LibraryBooksTool, LibraryCategoriesTool, StoreBooksTool,
};
use book_tools::{BookCatalogClient, CorporateLibraryClient, Toolbox, WebSearchClient};

use crate::AgentVariant;

/// Shared adapter clients the toolboxes are built from.
#[derive(Clone)]
pub struct ToolClients {
    pub catalog: Arc<BookCatalogClient>,
    pub websearch: Arc<WebSearchClient>,
    pub library: Arc<CorporateLibraryClient>,
    /// Shop host for purchase-link searches.
    pub shop_site: String,
}

/// Builds the toolbox for one variant.
pub fn toolbox_for(variant: AgentVariant, clients: &ToolClients) -> Toolbox {
    match variant {
        AgentVariant::Default => Toolbox::new(vec![
            Arc::new(BooksByGenreTool {
                client: clients.catalog.clone(),
            }),
            Arc::new(BooksUniversalSearchTool {
                client: clients.catalog.clone(),
            }),
            Arc::new(BookPurchaseLinksTool {
                client: clients.websearch.clone(),
                shop_site: clients.shop_site.clone(),
            }),
            Arc::new(AdditionalInformationTool {
                client: clients.websearch.clone(),
            }),
        ]),
        AgentVariant::Library => Toolbox::new(vec![
            Arc::new(LibraryCategoriesTool {
                client: clients.library.clone(),
            }),
            Arc::new(LibraryBooksTool {
                client: clients.library.clone(),
            }),
        ]),
        AgentVariant::Sales => Toolbox::new(vec![Arc::new(StoreBooksTool), Arc::new(CreateOrderTool)]),
    }
}
