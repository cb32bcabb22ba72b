//! Tool registry: the [`Tool`] trait, the closed [`ToolKind`] set, and the
//! [`Toolbox`] the agent loop dispatches against.
//!
//! Every tool is one of the [`ToolKind`] variants with a static name,
//! description, and parameter schema, so the routing contract can be checked
//! without invoking a model. Descriptions double as the model's dispatch
//! heuristic and name the fields of the returned records.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::info;

use crate::catalog::BookCatalogClient;
use crate::library::CorporateLibraryClient;
use crate::store;
use crate::websearch::WebSearchClient;

/// Static description of one tool, as handed to the model.
#[derive(Debug, Clone)]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub parameters: Value,
}

/// The closed set of tools this bot can register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    BooksByGenre,
    BooksUniversalSearch,
    BookPurchaseLinks,
    AdditionalInformation,
    LibraryCategories,
    LibraryBooks,
    StoreBooks,
    CreateOrder,
}

impl ToolKind {
    pub const ALL: [ToolKind; 8] = [
        ToolKind::BooksByGenre,
        ToolKind::BooksUniversalSearch,
        ToolKind::BookPurchaseLinks,
        ToolKind::AdditionalInformation,
        ToolKind::LibraryCategories,
        ToolKind::LibraryBooks,
        ToolKind::StoreBooks,
        ToolKind::CreateOrder,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ToolKind::BooksByGenre => "get_books_by_genre",
            ToolKind::BooksUniversalSearch => "get_books_universal_search",
            ToolKind::BookPurchaseLinks => "get_link_on_book",
            ToolKind::AdditionalInformation => "get_links_to_additional_information",
            ToolKind::LibraryCategories => "get_library_categories",
            ToolKind::LibraryBooks => "get_library_books",
            ToolKind::StoreBooks => "get_store_books",
            ToolKind::CreateOrder => "create_order",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ToolKind::BooksByGenre => {
                "Searches books by genre. Translate the genre to English before calling. \
                 If there are no results, call get_books_universal_search instead. \
                 Each book has title, authors, publishedDate, categories, publisher, \
                 description, buyLink, and optionally thumbnail."
            }
            ToolKind::BooksUniversalSearch => {
                "Searches books by any user request: title, author, genre, or description. \
                 Translate genre terms to English. Each book has title, authors, \
                 publishedDate, categories, publisher, description, buyLink, and \
                 optionally thumbnail."
            }
            ToolKind::BookPurchaseLinks => {
                "Finds links to buy a book. Use when the user asks where to purchase a \
                 book, and give every link found. Each result has title, link, and snippet."
            }
            ToolKind::AdditionalInformation => {
                "Use when the user wants additional information from external sources, or \
                 when there is no description available for a book. Give every result. \
                 Each result has title, link, and snippet."
            }
            ToolKind::LibraryCategories => {
                "Lists the genres available in the corporate library. Use when the user \
                 asks which categories of books the library has. Output: category names."
            }
            ToolKind::LibraryBooks => {
                "Returns the books of the corporate library. Give all of this data to the \
                 user. isReserved false means the book is available; link is the book's \
                 page on the library site, give it when the user asks for a link; \
                 description is the book description; all combines name, author, and category."
            }
            ToolKind::StoreBooks => {
                "Lists the books available in the store, with name, cost, author, \
                 description, reviews, and tags."
            }
            ToolKind::CreateOrder => {
                "Creates an order for a store book. Use only after the user confirms they \
                 want to buy the book."
            }
        }
    }

    /// JSON-schema parameter object for this tool.
    pub fn parameters(self) -> Value {
        match self {
            ToolKind::BooksByGenre => json!({
                "type": "object",
                "properties": {
                    "genre": {"type": "string", "description": "Book genre, in English"}
                },
                "required": ["genre"]
            }),
            ToolKind::BooksUniversalSearch => json!({
                "type": "object",
                "properties": {
                    "query": {"type": "string", "description": "Free-form search request"}
                },
                "required": ["query"]
            }),
            ToolKind::BookPurchaseLinks | ToolKind::AdditionalInformation => json!({
                "type": "object",
                "properties": {
                    "query": {"type": "string", "description": "Book title or author"}
                },
                "required": ["query"]
            }),
            ToolKind::LibraryCategories | ToolKind::LibraryBooks | ToolKind::StoreBooks => json!({
                "type": "object",
                "properties": {}
            }),
            ToolKind::CreateOrder => json!({
                "type": "object",
                "properties": {
                    "book_name": {"type": "string", "description": "Exact name of the store book"}
                },
                "required": ["book_name"]
            }),
        }
    }

    pub fn descriptor(self) -> ToolDescriptor {
        ToolDescriptor {
            name: self.name(),
            description: self.description(),
            parameters: self.parameters(),
        }
    }
}

/// A callable the agent may invoke mid-reasoning.
///
/// `call` returns degraded-but-valid values for absorbed upstream faults; an
/// `Err` propagates out of the whole agent invocation (used by the library
/// categories call, whose faults are not absorbed).
#[async_trait]
pub trait Tool: Send + Sync {
    fn kind(&self) -> ToolKind;

    async fn call(&self, args: Value) -> Result<Value>;
}

/// The set of tools for one agent variant, dispatchable by name.
#[derive(Clone)]
pub struct Toolbox {
    tools: Vec<Arc<dyn Tool>>,
}

impl Toolbox {
    pub fn new(tools: Vec<Arc<dyn Tool>>) -> Self {
        Self { tools }
    }

    pub fn descriptors(&self) -> Vec<ToolDescriptor> {
        self.tools.iter().map(|t| t.kind().descriptor()).collect()
    }

    pub fn kinds(&self) -> Vec<ToolKind> {
        self.tools.iter().map(|t| t.kind()).collect()
    }

    /// Dispatches one tool call by name. An unknown name becomes an
    /// error-shaped value so the model can recover in natural language.
    pub async fn dispatch(&self, name: &str, args: Value) -> Result<Value> {
        match self.tools.iter().find(|t| t.kind().name() == name) {
            Some(tool) => {
                info!(tool = name, args = %args, "Dispatching tool call");
                tool.call(args).await
            }
            None => Ok(json!({"error": format!("unknown tool: {}", name)})),
        }
    }
}

/// Extracts a required string argument; missing or non-string becomes "".
fn str_arg(args: &Value, key: &str) -> String {
    args.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

pub struct BooksByGenreTool {
    pub client: Arc<BookCatalogClient>,
}

#[async_trait]
impl Tool for BooksByGenreTool {
    fn kind(&self) -> ToolKind {
        ToolKind::BooksByGenre
    }

    async fn call(&self, args: Value) -> Result<Value> {
        Ok(self.client.search_by_genre(&str_arg(&args, "genre")).await)
    }
}

pub struct BooksUniversalSearchTool {
    pub client: Arc<BookCatalogClient>,
}

#[async_trait]
impl Tool for BooksUniversalSearchTool {
    fn kind(&self) -> ToolKind {
        ToolKind::BooksUniversalSearch
    }

    async fn call(&self, args: Value) -> Result<Value> {
        Ok(self.client.universal_search(&str_arg(&args, "query")).await)
    }
}

pub struct BookPurchaseLinksTool {
    pub client: Arc<WebSearchClient>,
    /// Shop host the purchase search is scoped to (e.g. "ozon.ru").
    pub shop_site: String,
}

#[async_trait]
impl Tool for BookPurchaseLinksTool {
    fn kind(&self) -> ToolKind {
        ToolKind::BookPurchaseLinks
    }

    async fn call(&self, args: Value) -> Result<Value> {
        Ok(self
            .client
            .search(&str_arg(&args, "query"), Some(&self.shop_site), true)
            .await)
    }
}

pub struct AdditionalInformationTool {
    pub client: Arc<WebSearchClient>,
}

#[async_trait]
impl Tool for AdditionalInformationTool {
    fn kind(&self) -> ToolKind {
        ToolKind::AdditionalInformation
    }

    async fn call(&self, args: Value) -> Result<Value> {
        Ok(self.client.search(&str_arg(&args, "query"), None, false).await)
    }
}

pub struct LibraryCategoriesTool {
    pub client: Arc<CorporateLibraryClient>,
}

#[async_trait]
impl Tool for LibraryCategoriesTool {
    fn kind(&self) -> ToolKind {
        ToolKind::LibraryCategories
    }

    async fn call(&self, _args: Value) -> Result<Value> {
        let categories = self.client.categories().await?;
        Ok(json!(categories))
    }
}

pub struct LibraryBooksTool {
    pub client: Arc<CorporateLibraryClient>,
}

#[async_trait]
impl Tool for LibraryBooksTool {
    fn kind(&self) -> ToolKind {
        ToolKind::LibraryBooks
    }

    async fn call(&self, _args: Value) -> Result<Value> {
        Ok(json!(self.client.books().await))
    }
}

pub struct StoreBooksTool;

#[async_trait]
impl Tool for StoreBooksTool {
    fn kind(&self) -> ToolKind {
        ToolKind::StoreBooks
    }

    async fn call(&self, _args: Value) -> Result<Value> {
        Ok(store::catalog_as_value())
    }
}

pub struct CreateOrderTool;

#[async_trait]
impl Tool for CreateOrderTool {
    fn kind(&self) -> ToolKind {
        ToolKind::CreateOrder
    }

    async fn call(&self, args: Value) -> Result<Value> {
        Ok(store::log_order(&str_arg(&args, "book_name")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_has_object_schema() {
        for kind in ToolKind::ALL {
            let params = kind.parameters();
            assert_eq!(params["type"], "object", "{:?}", kind);
            assert!(params.get("properties").is_some(), "{:?}", kind);
            assert!(!kind.name().is_empty());
            assert!(!kind.description().is_empty());
        }
    }

    #[test]
    fn tool_names_are_unique() {
        let mut names: Vec<&str> = ToolKind::ALL.iter().map(|k| k.name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), ToolKind::ALL.len());
    }

    #[tokio::test]
    async fn dispatch_unknown_tool_yields_error_value() {
        let toolbox = Toolbox::new(vec![Arc::new(StoreBooksTool)]);
        let result = toolbox.dispatch("no_such_tool", json!({})).await.unwrap();
        assert!(result["error"]
            .as_str()
            .unwrap()
            .contains("unknown tool"));
    }

    #[tokio::test]
    async fn dispatch_store_books_returns_catalog() {
        let toolbox = Toolbox::new(vec![Arc::new(StoreBooksTool)]);
        let result = toolbox
            .dispatch(ToolKind::StoreBooks.name(), json!({}))
            .await
            .unwrap();
        assert_eq!(result.as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn create_order_returns_null() {
        let toolbox = Toolbox::new(vec![Arc::new(CreateOrderTool)]);
        let result = toolbox
            .dispatch(ToolKind::CreateOrder.name(), json!({"book_name": "1984"}))
            .await
            .unwrap();
        assert!(result.is_null());
    }
}
