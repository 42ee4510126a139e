//! Completion payload assembly.
//!
//! Built exactly once, when `advance()` is called on the terminal step.
//! Render submission itself is an external collaborator; the engine only
//! hands this record to the caller-supplied completion callback.

use serde::Serialize;
use uuid::Uuid;

use crate::domain::errors::{WorkflowError, WorkflowResult};
use crate::domain::models::brief::{AssetRef, BriefData, CopyVariation, Motivation, TemplateRef};
use crate::domain::models::workflow_state::{MatrixSummary, WorkflowState};

/// The final assembled record handed off for rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionPayload {
    pub session_id: Uuid,
    pub brief: BriefData,
    /// Selected motivations only, in generation order.
    pub motivations: Vec<Motivation>,
    /// Selected copy variations only, in generation order.
    pub copy_variations: Vec<CopyVariation>,
    pub assets: Vec<AssetRef>,
    pub template: TemplateRef,
    pub matrix: MatrixSummary,
}

impl CompletionPayload {
    /// Assemble the payload from final workflow state. Pure.
    ///
    /// The step guards make the missing-field cases unreachable through
    /// the engine; they are still reported as validation errors rather
    /// than panics.
    pub fn from_state(state: &WorkflowState) -> WorkflowResult<Self> {
        let brief = state
            .brief
            .clone()
            .ok_or_else(|| WorkflowError::Validation("no brief collected".to_string()))?;
        let template = state
            .selected_template
            .clone()
            .ok_or_else(|| WorkflowError::Validation("no template selected".to_string()))?;

        Ok(Self {
            session_id: state.session_id,
            brief,
            motivations: state.selected_motivations(),
            copy_variations: state.selected_copy(),
            assets: state.selected_assets.iter().cloned().collect(),
            template,
            matrix: state.matrix_summary(),
        })
    }
}
