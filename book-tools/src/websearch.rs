//! Web search adapter.
//!
//! Targets a SearXNG-style JSON search endpoint (`GET {base}/search?q=...&
//! format=json`). Results are trimmed to `{title, link, snippet}`; the query
//! can be scoped to one site with a `site:` qualifier, and purchase-intent
//! searches get shopping phrasing prepended. Any failure is returned as an
//! error payload, never raised.

use std::time::Duration;

use serde::Deserialize;
use serde_json::{json, Value};
use tracing::warn;

const MAX_RESULTS: usize = 5;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<RawResult>,
}

#[derive(Deserialize)]
struct RawResult {
    #[serde(default)]
    title: String,
    #[serde(default)]
    url: String,
    #[serde(default)]
    content: String,
}

/// Client for the web search API.
#[derive(Clone)]
pub struct WebSearchClient {
    http: reqwest::Client,
    base_url: String,
}

impl WebSearchClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Runs a web search. `site` narrows results to one host; `buy_intent`
    /// phrases the query as a shopping search. Returns a list of
    /// `{title, link, snippet}` records, or `{"error": ...}` on any failure.
    pub async fn search(&self, query: &str, site: Option<&str>, buy_intent: bool) -> Value {
        let full_query = compose_query(query, site, buy_intent);
        match self.fetch(&full_query).await {
            Ok(response) => {
                let results: Vec<Value> = response
                    .results
                    .into_iter()
                    .take(MAX_RESULTS)
                    .map(|r| {
                        json!({
                            "title": r.title,
                            "link": r.url,
                            "snippet": r.content,
                        })
                    })
                    .collect();
                json!(results)
            }
            Err(e) => {
                warn!(query = %full_query, error = %e, "Web search failed");
                json!({"error": e.to_string()})
            }
        }
    }

    async fn fetch(&self, query: &str) -> Result<SearchResponse, reqwest::Error> {
        self.http
            .get(format!("{}/search", self.base_url))
            .query(&[("q", query), ("format", "json")])
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }
}

/// Builds the query string sent upstream.
fn compose_query(query: &str, site: Option<&str>, buy_intent: bool) -> String {
    match (site, buy_intent) {
        (Some(site), true) => format!("Buy the book {} site:{}", query, site),
        (Some(site), false) => format!("{} site:{}", query, site),
        (None, _) => query.to_string(),
    }
}
