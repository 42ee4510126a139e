//! Domain errors for the guided workflow engine.

use thiserror::Error;
use uuid::Uuid;

use crate::domain::models::step::StepId;

/// Errors surfaced by the workflow engine and its collaborators.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// A step guard rejected the requested transition. The workflow state
    /// is unchanged; the message is suitable for inline display.
    #[error("validation failed: {0}")]
    Validation(String),

    /// An external generation call failed or returned malformed data.
    /// The step stays active; retry is always user-initiated.
    #[error("generation failed for step '{step}': {message}")]
    Generation { step: StepId, message: String },

    /// Storage read/write failed. Always caught inside the session store
    /// and logged; never exposed to the engine's callers.
    #[error("persistence error: {0}")]
    Persistence(String),

    /// A generation result arrived after the workflow instance was reset.
    /// Discarded silently by the engine; never reaches the UI layer.
    #[error("stale generation result for session {session_id}; discarded")]
    StaleSession { session_id: Uuid },
}

pub type WorkflowResult<T> = Result<T, WorkflowError>;

/// Errors from the state repository port.
///
/// Kept separate from [`WorkflowError`] so adapters do not depend on the
/// engine's taxonomy; the session store maps these to `Persistence` when
/// it logs them.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("storage backend error: {0}")]
    Backend(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<sqlx::Error> for PersistenceError {
    fn from(err: sqlx::Error) -> Self {
        PersistenceError::Backend(err.to_string())
    }
}

impl From<PersistenceError> for WorkflowError {
    fn from(err: PersistenceError) -> Self {
        WorkflowError::Persistence(err.to_string())
    }
}

/// Error from the generation service port. Carries only the human message;
/// the gateway attaches the failing step id when mapping into
/// [`WorkflowError::Generation`].
#[derive(Debug, Error)]
#[error("{message}")]
pub struct GenerationError {
    pub message: String,
}

impl GenerationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for GenerationError {
    fn from(err: reqwest::Error) -> Self {
        GenerationError::new(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_display() {
        let err = WorkflowError::Validation("select at least one motivation".to_string());
        assert_eq!(
            err.to_string(),
            "validation failed: select at least one motivation"
        );
    }

    #[test]
    fn test_generation_display_names_step() {
        let err = WorkflowError::Generation {
            step: StepId::Motivations,
            message: "upstream timed out".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "generation failed for step 'motivations': upstream timed out"
        );
    }

    #[test]
    fn test_persistence_error_maps_to_workflow_error() {
        let err: WorkflowError = PersistenceError::Backend("disk full".to_string()).into();
        assert!(matches!(err, WorkflowError::Persistence(_)));
        assert!(err.to_string().contains("disk full"));
    }
}
