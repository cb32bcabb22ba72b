//! Integration tests for [`handler_chain::HandlerChain`].
//!
//! Covers: middleware before stopping the chain, Reply stopping the handler
//! phase and being passed to middleware after, and handlers executed in order.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use chrono::Utc;
use bookbot_core::{Chat, Handler, HandlerResponse, Message, Middleware, User};
use handler_chain::HandlerChain;

fn test_message(content: &str) -> Message {
    Message {
        id: "100".to_string(),
        content: content.to_string(),
        user: User {
            id: 123,
            username: Some("reader".to_string()),
            first_name: Some("Test".to_string()),
            last_name: None,
        },
        chat: Chat { id: 456 },
        created_at: Utc::now(),
    }
}

struct CountingHandler {
    handled: Arc<AtomicUsize>,
    response: HandlerResponse,
}

#[async_trait::async_trait]
impl Handler for CountingHandler {
    async fn handle(&self, _message: &Message) -> bookbot_core::Result<HandlerResponse> {
        self.handled.fetch_add(1, Ordering::SeqCst);
        Ok(self.response.clone())
    }
}

#[tokio::test]
async fn middleware_before_false_stops_chain() {
    struct DenyAll;

    #[async_trait::async_trait]
    impl Middleware for DenyAll {
        async fn before(&self, _message: &Message) -> bookbot_core::Result<bool> {
            Ok(false)
        }
    }

    let handled = Arc::new(AtomicUsize::new(0));
    let chain = HandlerChain::new()
        .add_middleware(Arc::new(DenyAll))
        .add_handler(Arc::new(CountingHandler {
            handled: handled.clone(),
            response: HandlerResponse::Continue,
        }));

    let result = chain.handle(&test_message("hello")).await.unwrap();

    assert_eq!(result, HandlerResponse::Stop);
    assert_eq!(handled.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn reply_ends_handler_phase_and_reaches_after() {
    let after_seen = Arc::new(AtomicUsize::new(0));

    struct CaptureAfter {
        after_seen: Arc<AtomicUsize>,
    }

    #[async_trait::async_trait]
    impl Middleware for CaptureAfter {
        async fn after(
            &self,
            _message: &Message,
            response: &HandlerResponse,
        ) -> bookbot_core::Result<()> {
            self.after_seen.fetch_add(1, Ordering::SeqCst);
            assert_eq!(response, &HandlerResponse::Reply("found a book".to_string()));
            Ok(())
        }
    }

    let not_reached = Arc::new(AtomicUsize::new(0));
    let chain = HandlerChain::new()
        .add_middleware(Arc::new(CaptureAfter {
            after_seen: after_seen.clone(),
        }))
        .add_handler(Arc::new(CountingHandler {
            handled: Arc::new(AtomicUsize::new(0)),
            response: HandlerResponse::Reply("found a book".to_string()),
        }))
        .add_handler(Arc::new(CountingHandler {
            handled: not_reached.clone(),
            response: HandlerResponse::Continue,
        }));

    let result = chain.handle(&test_message("find me a book")).await.unwrap();

    assert_eq!(result, HandlerResponse::Reply("found a book".to_string()));
    assert_eq!(after_seen.load(Ordering::SeqCst), 1);
    assert_eq!(not_reached.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn continue_falls_through_to_next_handler() {
    let first = Arc::new(AtomicUsize::new(0));
    let second = Arc::new(AtomicUsize::new(0));

    let chain = HandlerChain::new()
        .add_handler(Arc::new(CountingHandler {
            handled: first.clone(),
            response: HandlerResponse::Continue,
        }))
        .add_handler(Arc::new(CountingHandler {
            handled: second.clone(),
            response: HandlerResponse::Stop,
        }));

    let result = chain.handle(&test_message("anything")).await.unwrap();

    assert_eq!(result, HandlerResponse::Stop);
    assert_eq!(first.load(Ordering::SeqCst), 1);
    assert_eq!(second.load(Ordering::SeqCst), 1);
}
