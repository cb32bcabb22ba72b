//! Corporate library adapter: category list and book list from fixed paths.
//!
//! Book records must carry id, isReserved, name, author, category name, and
//! description; records missing any of them are dropped. Faults behave
//! asymmetrically: `categories` propagates, `books` degrades to an empty list.

use std::time::Duration;

use serde::Deserialize;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::warn;

pub const DEFAULT_LIBRARY_API_URL: &str = "https://api.book.benifits.ru/custom/api/v1";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Error, Debug)]
pub enum LibraryError {
    #[error("Library request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Unexpected library response: {0}")]
    Shape(String),
}

#[derive(Deserialize)]
struct Wrapped {
    body: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct RawCategory {
    name: String,
}

/// One library book record after validation; all fields are mandatory.
#[derive(Debug, Deserialize)]
struct RawBook {
    id: i64,
    #[serde(rename = "isReserved")]
    is_reserved: bool,
    name: String,
    author: String,
    category: RawCategory,
    description: String,
}

/// Client for the corporate library API.
#[derive(Clone)]
pub struct CorporateLibraryClient {
    http: reqwest::Client,
    base_url: String,
}

impl CorporateLibraryClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Fetches all category names joined with `" | "`. Faults propagate.
    pub async fn categories(&self) -> Result<String, LibraryError> {
        let wrapped: Wrapped = self
            .http
            .get(format!("{}/category/all", self.base_url))
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let names: Vec<String> = wrapped
            .body
            .iter()
            .map(|category| {
                serde_json::from_value::<RawCategory>(category.clone())
                    .map(|c| c.name)
                    .map_err(|e| LibraryError::Shape(e.to_string()))
            })
            .collect::<Result<_, _>>()?;

        Ok(names.join(" | "))
    }

    /// Fetches the book list. Records missing a mandatory field are dropped;
    /// any request or top-level parse fault degrades to an empty list.
    pub async fn books(&self) -> Vec<Value> {
        match self.fetch_books().await {
            Ok(books) => books,
            Err(e) => {
                warn!(error = %e, "Library books fetch failed, returning empty list");
                Vec::new()
            }
        }
    }

    async fn fetch_books(&self) -> Result<Vec<Value>, LibraryError> {
        let wrapped: Wrapped = self
            .http
            .get(format!("{}/books/", self.base_url))
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(parse_books(&self.base_url, &wrapped.body))
    }
}

/// Validates raw records and shapes the survivors for the agent.
fn parse_books(base_url: &str, records: &[Value]) -> Vec<Value> {
    records
        .iter()
        .filter_map(|record| serde_json::from_value::<RawBook>(record.clone()).ok())
        .map(|book| {
            json!({
                "id": book.id,
                "link": format!("{}/books/{}", base_url, book.id),
                "isReserved": book.is_reserved,
                "all": format!("{} | {} | {}", book.name, book.author, book.category.name),
                "description": book.description,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_record() -> Value {
        json!({
            "id": 7,
            "isReserved": false,
            "name": "The Master and Margarita",
            "author": "Mikhail Bulgakov",
            "category": {"name": "Classics"},
            "description": "The Devil visits Moscow."
        })
    }

    #[test]
    fn complete_record_is_kept_with_synthesized_link() {
        let books = parse_books(DEFAULT_LIBRARY_API_URL, &[complete_record()]);
        assert_eq!(books.len(), 1);
        assert_eq!(
            books[0]["link"],
            format!("{}/books/7", DEFAULT_LIBRARY_API_URL)
        );
        assert_eq!(books[0]["isReserved"], false);
        assert_eq!(
            books[0]["all"],
            "The Master and Margarita | Mikhail Bulgakov | Classics"
        );
    }

    #[test]
    fn record_missing_description_is_dropped() {
        let mut record = complete_record();
        record.as_object_mut().unwrap().remove("description");
        let books = parse_books(DEFAULT_LIBRARY_API_URL, &[record, complete_record()]);
        assert_eq!(books.len(), 1);
        assert_eq!(books[0]["id"], 7);
    }

    #[test]
    fn record_missing_category_name_is_dropped() {
        let mut record = complete_record();
        record["category"] = json!({});
        let books = parse_books(DEFAULT_LIBRARY_API_URL, &[record]);
        assert!(books.is_empty());
    }
}
