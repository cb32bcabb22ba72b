//! Checkpoint store: latest conversation state per thread id, on SQLite.
//!
//! One row per thread; `save` replaces the previous checkpoint and stamps a
//! fresh checkpoint id. The agent facade opens a store per invocation and
//! closes it afterwards, so the pool is scoped to one turn.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::SqlitePool;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::CheckpointError;

/// The latest persisted state for one conversation thread.
#[derive(Debug, Clone)]
pub struct ThreadCheckpoint {
    pub thread_id: String,
    pub checkpoint_id: String,
    /// Opaque JSON payload; the agent layer owns its shape.
    pub state: serde_json::Value,
    pub updated_at: DateTime<Utc>,
}

/// Conversation checkpoint store over a SQLite database.
#[derive(Clone)]
pub struct CheckpointStore {
    pool: SqlitePool,
}

impl CheckpointStore {
    /// Connects to the database at `database_url` (e.g. `sqlite:./bookbot.db`),
    /// creating the file if missing, and ensures the schema exists.
    pub async fn connect(database_url: &str) -> Result<Self, CheckpointError> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePool::connect_with(options).await?;
        let store = Self { pool };
        store.setup().await?;
        Ok(store)
    }

    /// Creates the checkpoint table and index if they do not exist.
    pub async fn setup(&self) -> Result<(), CheckpointError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS checkpoints (
                thread_id TEXT PRIMARY KEY,
                checkpoint_id TEXT NOT NULL,
                state TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_checkpoints_updated_at ON checkpoints(updated_at)",
        )
        .execute(&self.pool)
        .await?;

        info!("Checkpoint schema ready");
        Ok(())
    }

    /// Saves `state` as the latest checkpoint for `thread_id`, replacing any
    /// previous one. Returns the new checkpoint id.
    pub async fn save(
        &self,
        thread_id: &str,
        state: &serde_json::Value,
    ) -> Result<String, CheckpointError> {
        let checkpoint_id = Uuid::new_v4().to_string();
        let payload = serde_json::to_string(state)?;

        sqlx::query(
            r#"
            INSERT INTO checkpoints (thread_id, checkpoint_id, state, updated_at)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(thread_id) DO UPDATE SET
                checkpoint_id = excluded.checkpoint_id,
                state = excluded.state,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(thread_id)
        .bind(&checkpoint_id)
        .bind(&payload)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        debug!(thread_id, checkpoint_id = %checkpoint_id, "Checkpoint saved");
        Ok(checkpoint_id)
    }

    /// Loads the latest checkpoint for `thread_id`, if any.
    pub async fn load(
        &self,
        thread_id: &str,
    ) -> Result<Option<ThreadCheckpoint>, CheckpointError> {
        let row: Option<(String, String, String, DateTime<Utc>)> = sqlx::query_as(
            "SELECT thread_id, checkpoint_id, state, updated_at FROM checkpoints WHERE thread_id = ?",
        )
        .bind(thread_id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some((thread_id, checkpoint_id, state, updated_at)) => Ok(Some(ThreadCheckpoint {
                thread_id,
                checkpoint_id,
                state: serde_json::from_str(&state)?,
                updated_at,
            })),
            None => Ok(None),
        }
    }

    /// Lists all thread ids, most recently updated first.
    pub async fn list_threads(&self) -> Result<Vec<String>, CheckpointError> {
        let rows: Vec<(String,)> =
            sqlx::query_as("SELECT thread_id FROM checkpoints ORDER BY updated_at DESC")
                .fetch_all(&self.pool)
                .await?;
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    /// Closes the underlying pool. Call when the scoped use of the store ends.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
