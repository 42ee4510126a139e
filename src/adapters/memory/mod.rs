//! In-memory state repository.
//!
//! Backs tests and ephemeral embedders that do not want a database; the
//! session store's semantics are identical across backends.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::errors::PersistenceError;
use crate::domain::models::workflow_state::PersistedWorkflow;
use crate::domain::ports::StateRepository;

/// Map-backed repository, keyed by session key.
#[derive(Debug, Default)]
pub struct InMemoryStateRepository {
    entries: RwLock<HashMap<String, PersistedWorkflow>>,
}

impl InMemoryStateRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored sessions.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl StateRepository for InMemoryStateRepository {
    async fn load(&self, session_key: &str) -> Result<Option<PersistedWorkflow>, PersistenceError> {
        Ok(self.entries.read().await.get(session_key).cloned())
    }

    async fn save(
        &self,
        session_key: &str,
        snapshot: &PersistedWorkflow,
    ) -> Result<(), PersistenceError> {
        self.entries
            .write()
            .await
            .insert(session_key.to_string(), snapshot.clone());
        Ok(())
    }

    async fn clear(&self, session_key: &str) -> Result<(), PersistenceError> {
        self.entries.write().await.remove(session_key);
        Ok(())
    }
}
