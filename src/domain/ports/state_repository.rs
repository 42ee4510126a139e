//! Repository port for the session-scoped workflow slot.

use async_trait::async_trait;

use crate::domain::errors::PersistenceError;
use crate::domain::models::workflow_state::PersistedWorkflow;

/// Persistence port for workflow session snapshots.
///
/// The store is keyed by an explicit session key supplied by the caller,
/// so multiple concurrent workflow instances can coexist. Two writers on
/// the same key race with last-write-wins semantics; coordinating them is
/// out of scope.
#[async_trait]
pub trait StateRepository: Send + Sync {
    /// Load the snapshot stored under `session_key`, if any.
    async fn load(&self, session_key: &str) -> Result<Option<PersistedWorkflow>, PersistenceError>;

    /// Write the snapshot under `session_key`, replacing any previous one.
    async fn save(
        &self,
        session_key: &str,
        snapshot: &PersistedWorkflow,
    ) -> Result<(), PersistenceError>;

    /// Remove the snapshot stored under `session_key`.
    async fn clear(&self, session_key: &str) -> Result<(), PersistenceError>;
}
