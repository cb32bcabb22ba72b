//! # book-tools
//!
//! Tool adapters over the external book data sources, plus the closed tool
//! registry handed to the agent loop:
//!
//! - [`catalog`] – book catalog search (by genre and universal)
//! - [`websearch`] – web search with optional site scoping
//! - [`library`] – corporate library categories and books
//! - [`store`] – in-memory sales-demo store and order creation
//! - [`tool`] – the [`Tool`] trait, [`ToolKind`] registry, and [`Toolbox`]
//!
//! Adapters are stateless and idempotent. Faults in catalog, web search, and
//! library-books calls are absorbed into error-shaped values the model can
//! react to in natural language; faults in the categories call propagate.

pub mod catalog;
pub mod library;
pub mod store;
pub mod tool;
pub mod websearch;

pub use catalog::{BookCatalogClient, DEFAULT_BOOKS_API_URL};
pub use library::{CorporateLibraryClient, LibraryError, DEFAULT_LIBRARY_API_URL};
pub use store::{demo_catalog, StoreBook};
pub use tool::{Tool, ToolDescriptor, ToolKind, Toolbox};
pub use websearch::WebSearchClient;
