//! # bookbot-core
//!
//! Core types and traits for the book-finder bot: [`Bot`], [`Handler`], [`Middleware`],
//! message and user types, error types, and tracing initialization.
//! Transport-agnostic; used by handler-chain, agent, and bookbot-telegram.

pub mod bot;
pub mod error;
pub mod logger;
pub mod types;

pub use bot::Bot;
pub use error::{BotError, HandlerError, Result};
pub use logger::init_tracing;
pub use types::{Chat, Handler, HandlerResponse, Message, Middleware, User};
