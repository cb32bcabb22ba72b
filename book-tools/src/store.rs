//! Sales-demo store: a small in-memory catalog and order creation.
//!
//! Order creation only logs; there is no persistence and no confirmation
//! payload beyond process output.

use serde::Serialize;
use serde_json::{json, Value};
use tracing::info;

/// A reader review attached to a store book.
#[derive(Debug, Clone, Serialize)]
pub struct Review {
    pub username: String,
    pub text: String,
}

/// One book sold by the demo store.
#[derive(Debug, Clone, Serialize)]
pub struct StoreBook {
    pub name: String,
    pub cost: f64,
    pub author: String,
    pub description: String,
    pub reviews: Vec<Review>,
    pub tags: Vec<String>,
}

/// The fixed demo catalog.
pub fn demo_catalog() -> Vec<StoreBook> {
    vec![
        StoreBook {
            name: "To Kill a Mockingbird".to_string(),
            cost: 10.99,
            author: "Harper Lee".to_string(),
            description: "Through the young eyes of Scout and Jem Finch, Harper Lee explores \
                          issues of race, class, and gender in a small Alabama town during the 1930s."
                .to_string(),
            reviews: vec![
                Review {
                    username: "John Doe".to_string(),
                    text: "A classic novel that still resonates today.".to_string(),
                },
                Review {
                    username: "Jane Doe".to_string(),
                    text: "A beautifully written story that explores the complexities of human nature."
                        .to_string(),
                },
            ],
            tags: vec![
                "classic".to_string(),
                "race".to_string(),
                "gender".to_string(),
                "small town".to_string(),
                "alabama".to_string(),
            ],
        },
        StoreBook {
            name: "The Catcher in the Rye".to_string(),
            cost: 12.99,
            author: "J.D. Salinger".to_string(),
            description: "Holden Caulfield navigates the challenges of adolescence in post-war \
                          New York City, grappling with alienation, rebellion, and the struggles of growing up."
                .to_string(),
            reviews: vec![
                Review {
                    username: "Bob Smith".to_string(),
                    text: "A relatable and poignant portrayal of teenage angst.".to_string(),
                },
                Review {
                    username: "Alice Johnson".to_string(),
                    text: "A classic coming-of-age story that still feels relevant today.".to_string(),
                },
            ],
            tags: vec![
                "coming-of-age".to_string(),
                "teenage angst".to_string(),
                "new york city".to_string(),
                "post-war".to_string(),
                "alienation".to_string(),
            ],
        },
        StoreBook {
            name: "1984".to_string(),
            cost: 9.99,
            author: "George Orwell".to_string(),
            description: "In a dystopian future, Winston Smith begins to question the totalitarian \
                          regime he lives under, and rebels against its all-pervasive surveillance and control."
                .to_string(),
            reviews: vec![
                Review {
                    username: "David Lee".to_string(),
                    text: "A haunting and thought-provoking warning about the dangers of government control."
                        .to_string(),
                },
                Review {
                    username: "Emily Chen".to_string(),
                    text: "A gripping and unsettling portrayal of a possible future.".to_string(),
                },
            ],
            tags: vec![
                "dystopian".to_string(),
                "totalitarian".to_string(),
                "surveillance".to_string(),
                "control".to_string(),
                "government control".to_string(),
            ],
        },
    ]
}

/// Serializes the demo catalog for the agent.
pub fn catalog_as_value() -> Value {
    json!(demo_catalog())
}

/// Logs a new order for `book_name`. Returns nothing to the agent.
pub fn log_order(book_name: &str) -> Value {
    info!(book_name, "New order created");
    Value::Null
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_catalog_has_three_books() {
        let catalog = demo_catalog();
        assert_eq!(catalog.len(), 3);
        assert!(catalog.iter().any(|b| b.name == "1984"));
    }

    #[test]
    fn catalog_serializes_with_reviews_and_tags() {
        let value = catalog_as_value();
        assert_eq!(value[2]["name"], "1984");
        assert_eq!(value[2]["cost"], 9.99);
        assert!(value[2]["tags"]
            .as_array()
            .unwrap()
            .contains(&json!("dystopian")));
    }

    #[test]
    fn order_returns_no_payload() {
        assert_eq!(log_order("1984"), Value::Null);
    }
}
