//! Book catalog search adapter (Google-Books-style volumes endpoint).
//!
//! Two operations share one parser: genre search scopes the query with
//! `subject:`, universal search sends it as-is. Missing fields are replaced
//! with placeholder strings rather than omitted, and failures come back as an
//! error-shaped value so the caller can keep reasoning over them.

use std::time::Duration;

use serde_json::{json, Value};
use tracing::warn;

pub const DEFAULT_BOOKS_API_URL: &str = "https://www.googleapis.com/books/v1/volumes";

/// Upper bound on parsed results per search.
const MAX_RESULTS: usize = 10;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const TITLE_FALLBACK: &str = "Title not specified";
const AUTHOR_FALLBACK: &str = "Author not specified";
const YEAR_FALLBACK: &str = "Year not specified";
const CATEGORY_FALLBACK: &str = "Genre not specified";
const PUBLISHER_FALLBACK: &str = "Publisher not specified";
const DESCRIPTION_FALLBACK: &str = "No description available";
const BUY_LINK_FALLBACK: &str = "Not available for purchase";

/// Client for the book catalog API.
#[derive(Clone)]
pub struct BookCatalogClient {
    http: reqwest::Client,
    base_url: String,
}

impl BookCatalogClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Searches books by genre. Returns `{count, books}` on success,
    /// `{error, count: 0, books: []}` when nothing was found or the call failed.
    pub async fn search_by_genre(&self, genre: &str) -> Value {
        let query = format!("subject:{}", genre);
        match self.fetch_volumes(&query).await {
            Ok(raw) => {
                let books = parse_volumes(&raw);
                if books.is_empty() {
                    json!({"error": "No books found", "count": 0, "books": []})
                } else {
                    json!({"count": books.len(), "books": books})
                }
            }
            Err(e) => {
                warn!(genre, error = %e, "Catalog genre search failed");
                json!({"error": e.to_string(), "count": 0, "books": []})
            }
        }
    }

    /// Searches books by any user request (title, author, genre, description).
    /// Same result shape as [`search_by_genre`](Self::search_by_genre), plus
    /// the original query echoed back.
    pub async fn universal_search(&self, query: &str) -> Value {
        match self.fetch_volumes(query).await {
            Ok(raw) => {
                let books = parse_volumes(&raw);
                json!({"query": query, "count": books.len(), "books": books})
            }
            Err(e) => {
                warn!(query, error = %e, "Catalog universal search failed");
                json!({"query": query, "error": e.to_string(), "count": 0, "books": []})
            }
        }
    }

    async fn fetch_volumes(&self, query: &str) -> Result<Value, reqwest::Error> {
        self.http
            .get(&self.base_url)
            .query(&[
                ("q", query),
                ("maxResults", &MAX_RESULTS.to_string()),
                ("printType", "books"),
            ])
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }
}

/// Extracts up to [`MAX_RESULTS`] book records from a raw volumes response.
fn parse_volumes(raw: &Value) -> Vec<Value> {
    let Some(items) = raw.get("items").and_then(Value::as_array) else {
        return Vec::new();
    };

    items
        .iter()
        .take(MAX_RESULTS)
        .map(|item| {
            let volume = item.get("volumeInfo").cloned().unwrap_or(Value::Null);
            let sale = item.get("saleInfo").cloned().unwrap_or(Value::Null);

            let buy_link = sale
                .get("buyLink")
                .or_else(|| volume.get("infoLink"))
                .and_then(Value::as_str)
                .unwrap_or(BUY_LINK_FALLBACK);

            let mut book = json!({
                "title": str_or(&volume, "title", TITLE_FALLBACK),
                "authors": list_or(&volume, "authors", AUTHOR_FALLBACK),
                "publishedDate": normalize_year(str_or(&volume, "publishedDate", YEAR_FALLBACK)),
                "categories": list_or(&volume, "categories", CATEGORY_FALLBACK),
                "publisher": str_or(&volume, "publisher", PUBLISHER_FALLBACK),
                "description": str_or(&volume, "description", DESCRIPTION_FALLBACK),
                "buyLink": buy_link,
            });

            if let Some(thumbnail) = volume
                .get("imageLinks")
                .and_then(|links| links.get("thumbnail"))
                .and_then(Value::as_str)
            {
                book["thumbnail"] = json!(thumbnail);
            }

            book
        })
        .collect()
}

fn str_or<'a>(value: &'a Value, key: &str, fallback: &'a str) -> &'a str {
    value.get(key).and_then(Value::as_str).unwrap_or(fallback)
}

fn list_or(value: &Value, key: &str, fallback: &str) -> Value {
    match value.get(key) {
        Some(Value::Array(items)) if !items.is_empty() => Value::Array(items.clone()),
        _ => json!([fallback]),
    }
}

/// Reduces a full publication date to the 4-digit year; a bare year (or any
/// string without a dash) passes through unchanged.
fn normalize_year(date: &str) -> &str {
    match date.split_once('-') {
        Some((year, _)) => year,
        None => date,
    }
}
