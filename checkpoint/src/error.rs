//! Checkpoint error types.

use thiserror::Error;

/// Errors that can occur when reading or writing checkpoints.
#[derive(Error, Debug)]
pub enum CheckpointError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
