//! Session store: persistence wrapper with never-throw semantics.
//!
//! Storage failures must not interrupt the workflow. Loads fall back to
//! the empty state, saves are logged-and-swallowed, and every mutation
//! persists synchronously before returning so a reload never loses more
//! than the most recent in-flight network call.

use std::sync::Arc;

use crate::domain::models::workflow_state::WorkflowState;
use crate::domain::ports::StateRepository;

/// Wraps a [`StateRepository`] with the engine's persistence contract.
pub struct SessionStore<R: StateRepository> {
    repo: Arc<R>,
}

impl<R: StateRepository> SessionStore<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Restore the state stored under `session_key`.
    ///
    /// A missing entry, a deserialization failure, or a backend error all
    /// yield the empty state; the failure is logged, never raised.
    pub async fn load(&self, session_key: &str) -> WorkflowState {
        match self.repo.load(session_key).await {
            Ok(Some(snapshot)) => WorkflowState::from_persisted(snapshot),
            Ok(None) => WorkflowState::empty(),
            Err(err) => {
                tracing::warn!(
                    session_key = %session_key,
                    error = %err,
                    "failed to load persisted workflow state, starting empty"
                );
                WorkflowState::empty()
            }
        }
    }

    /// Persist the current state. Failures are swallowed with a log; the
    /// workflow continues in memory only.
    pub async fn save(&self, session_key: &str, state: &WorkflowState) {
        if let Err(err) = self.repo.save(session_key, &state.to_persisted()).await {
            tracing::warn!(
                session_key = %session_key,
                error = %err,
                "failed to persist workflow state, continuing in memory"
            );
        }
    }

    /// Remove the persisted entry. Used on explicit start-over.
    pub async fn clear(&self, session_key: &str) {
        if let Err(err) = self.repo.clear(session_key).await {
            tracing::warn!(
                session_key = %session_key,
                error = %err,
                "failed to clear persisted workflow state"
            );
        }
    }

    /// Apply a mutation and persist before returning.
    pub async fn mutate<F>(&self, session_key: &str, state: &mut WorkflowState, f: F)
    where
        F: FnOnce(&mut WorkflowState),
    {
        f(state);
        self.save(session_key, state).await;
    }
}
