//! HTTP-level tests for the tool adapters, using a mockito server in place of
//! the external APIs.

use book_tools::{BookCatalogClient, CorporateLibraryClient, WebSearchClient};
use serde_json::json;

/// **Test: Catalog search with zero upstream results.**
///
/// **Setup:** Volumes endpoint returns a body without `items`.
/// **Action:** `search_by_genre("dystopia")`.
/// **Expected:** Structured empty result, not an error propagation.
#[tokio::test]
async fn catalog_zero_results_is_structured_value() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/")
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"totalItems": 0}"#)
        .create_async()
        .await;

    let client = BookCatalogClient::new(server.url());
    let result = client.search_by_genre("dystopia").await;

    assert_eq!(result["count"], 0);
    assert_eq!(result["books"], json!([]));
    assert_eq!(result["error"], "No books found");
}

/// **Test: Catalog search parses volumes and normalizes dates.**
///
/// **Setup:** Volumes endpoint returns one complete and one sparse record.
/// **Action:** `universal_search("dystopia")`.
/// **Expected:** Two books; full date reduced to year; placeholders filled in.
#[tokio::test]
async fn catalog_parses_and_normalizes() {
    let mut server = mockito::Server::new_async().await;
    let body = json!({
        "items": [
            {
                "volumeInfo": {
                    "title": "1984",
                    "authors": ["George Orwell"],
                    "publishedDate": "1949-06-08",
                    "categories": ["Fiction"],
                    "publisher": "Secker & Warburg",
                    "description": "A dystopian novel.",
                    "infoLink": "http://info/1984"
                },
                "saleInfo": {"buyLink": "http://buy/1984"}
            },
            {"volumeInfo": {"title": "Untitled draft"}}
        ]
    });
    let _mock = server
        .mock("GET", "/")
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .create_async()
        .await;

    let client = BookCatalogClient::new(server.url());
    let result = client.universal_search("dystopia").await;

    assert_eq!(result["query"], "dystopia");
    assert_eq!(result["count"], 2);
    assert_eq!(result["books"][0]["publishedDate"], "1949");
    assert_eq!(result["books"][0]["buyLink"], "http://buy/1984");
    assert_eq!(result["books"][1]["authors"], json!(["Author not specified"]));
}

/// **Test: Catalog upstream failure degrades to an error value.**
#[tokio::test]
async fn catalog_http_error_is_absorbed() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/")
        .match_query(mockito::Matcher::Any)
        .with_status(500)
        .create_async()
        .await;

    let client = BookCatalogClient::new(server.url());
    let result = client.search_by_genre("dystopia").await;

    assert_eq!(result["count"], 0);
    assert!(result["error"].as_str().is_some());
}

/// **Test: Library books keep only complete records and synthesize links.**
#[tokio::test]
async fn library_books_filters_and_links() {
    let mut server = mockito::Server::new_async().await;
    let body = json!({
        "body": [
            {
                "id": 7,
                "isReserved": false,
                "name": "The Master and Margarita",
                "author": "Mikhail Bulgakov",
                "category": {"name": "Classics"},
                "description": "The Devil visits Moscow."
            },
            {
                "id": 8,
                "isReserved": true,
                "name": "No description",
                "author": "Unknown",
                "category": {"name": "Classics"}
            }
        ]
    });
    let _mock = server
        .mock("GET", "/books/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .create_async()
        .await;

    let client = CorporateLibraryClient::new(server.url());
    let books = client.books().await;

    assert_eq!(books.len(), 1);
    assert_eq!(books[0]["id"], 7);
    assert_eq!(books[0]["link"], format!("{}/books/7", server.url()));
}

/// **Test: Library books fault degrades to an empty list.**
#[tokio::test]
async fn library_books_fault_is_empty_list() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/books/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"unexpected": true}"#)
        .create_async()
        .await;

    let client = CorporateLibraryClient::new(server.url());
    assert!(client.books().await.is_empty());
}

/// **Test: Library categories joins names; faults propagate.**
#[tokio::test]
async fn library_categories_joined_and_faults_propagate() {
    let mut server = mockito::Server::new_async().await;
    let _ok = server
        .mock("GET", "/category/all")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"body": [{"name": "Classics"}, {"name": "Science"}]}"#)
        .create_async()
        .await;

    let client = CorporateLibraryClient::new(server.url());
    assert_eq!(client.categories().await.unwrap(), "Classics | Science");

    let mut broken = mockito::Server::new_async().await;
    let _err = broken
        .mock("GET", "/category/all")
        .with_status(502)
        .create_async()
        .await;

    let client = CorporateLibraryClient::new(broken.url());
    assert!(client.categories().await.is_err());
}

/// **Test: Web search maps fields and caps results at five.**
#[tokio::test]
async fn websearch_maps_and_caps_results() {
    let mut server = mockito::Server::new_async().await;
    let results: Vec<_> = (0..8)
        .map(|i| {
            json!({
                "title": format!("Result {}", i),
                "url": format!("http://example.com/{}", i),
                "content": "snippet"
            })
        })
        .collect();
    let _mock = server
        .mock("GET", "/search")
        .match_query(mockito::Matcher::UrlEncoded(
            "q".into(),
            "1984 Orwell site:ozon.ru".into(),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "results": results }).to_string())
        .create_async()
        .await;

    let client = WebSearchClient::new(server.url());
    let result = client.search("1984 Orwell", Some("ozon.ru"), false).await;

    let list = result.as_array().expect("expected result list");
    assert_eq!(list.len(), 5);
    assert_eq!(list[0]["title"], "Result 0");
    assert_eq!(list[0]["link"], "http://example.com/0");
    assert_eq!(list[0]["snippet"], "snippet");
}

/// **Test: Web search failure becomes an error payload.**
#[tokio::test]
async fn websearch_failure_is_error_payload() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/search")
        .match_query(mockito::Matcher::Any)
        .with_status(503)
        .create_async()
        .await;

    let client = WebSearchClient::new(server.url());
    let result = client.search("anything", None, false).await;

    assert!(result["error"].as_str().is_some());
}
