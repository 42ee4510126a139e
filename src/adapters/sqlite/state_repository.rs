//! SQLite implementation of the state repository port.
//!
//! One row per session key; the snapshot is stored as a JSON blob so the
//! persisted layout is identical across backends.

use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::domain::errors::PersistenceError;
use crate::domain::models::workflow_state::PersistedWorkflow;
use crate::domain::ports::StateRepository;

/// Session repository over a `workflow_sessions` table.
#[derive(Debug, Clone)]
pub struct SqliteStateRepository {
    pool: SqlitePool,
}

impl SqliteStateRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StateRepository for SqliteStateRepository {
    async fn load(&self, session_key: &str) -> Result<Option<PersistedWorkflow>, PersistenceError> {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT state FROM workflow_sessions WHERE session_key = ?1")
                .bind(session_key)
                .fetch_optional(&self.pool)
                .await?;

        row.map(|(json,)| serde_json::from_str(&json))
            .transpose()
            .map_err(PersistenceError::from)
    }

    async fn save(
        &self,
        session_key: &str,
        snapshot: &PersistedWorkflow,
    ) -> Result<(), PersistenceError> {
        let json = serde_json::to_string(snapshot)?;
        sqlx::query(
            "INSERT INTO workflow_sessions (session_key, state, updated_at)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(session_key) DO UPDATE SET
                state = excluded.state,
                updated_at = excluded.updated_at",
        )
        .bind(session_key)
        .bind(json)
        .bind(chrono::Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn clear(&self, session_key: &str) -> Result<(), PersistenceError> {
        sqlx::query("DELETE FROM workflow_sessions WHERE session_key = ?1")
            .bind(session_key)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
