//! Per-step handler table.
//!
//! Each step id maps to a handler carrying the advance guard, the
//! exit-time state touch-up, and the generation call required on entry.
//! The table replaces a step-index conditional: transitions look the
//! handler up and never branch on the index themselves.

use crate::domain::errors::{WorkflowError, WorkflowResult};
use crate::domain::models::brief::{BriefData, Motivation};
use crate::domain::models::step::StepId;
use crate::domain::models::workflow_state::WorkflowState;

/// A generation call to perform on entering a step.
///
/// Inputs are captured by value so the request can outlive the state
/// lock while the network call is in flight.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationRequest {
    Motivations { brief: BriefData },
    CopyVariations { motivations: Vec<Motivation> },
}

/// Capability interface for one workflow step.
pub trait StepHandler: Send + Sync {
    fn id(&self) -> StepId;

    /// Guard checked before leaving this step through `advance()`.
    fn validate(&self, state: &WorkflowState) -> WorkflowResult<()>;

    /// Applied to the state when the step is left through a successful
    /// advance.
    fn on_exit(&self, _state: &mut WorkflowState) {}

    /// Generation required on entering this step, when its payload is
    /// not already present. `None` means enter silently.
    fn on_enter(&self, _state: &WorkflowState) -> Option<GenerationRequest> {
        None
    }
}

fn guard(condition: bool, message: &str) -> WorkflowResult<()> {
    if condition {
        Ok(())
    } else {
        Err(WorkflowError::Validation(message.to_string()))
    }
}

struct UploadBriefHandler;

impl StepHandler for UploadBriefHandler {
    fn id(&self) -> StepId {
        StepId::UploadBrief
    }

    fn validate(&self, state: &WorkflowState) -> WorkflowResult<()> {
        guard(state.brief.is_some(), "upload and parse a brief first")
    }

    fn on_exit(&self, state: &mut WorkflowState) {
        // Advancing past the review screen is the confirmation act.
        state.brief_confirmed = true;
    }
}

struct MotivationsHandler;

impl StepHandler for MotivationsHandler {
    fn id(&self) -> StepId {
        StepId::Motivations
    }

    fn validate(&self, state: &WorkflowState) -> WorkflowResult<()> {
        guard(
            state.motivations.iter().any(|m| m.selected),
            "select at least one motivation",
        )
    }

    fn on_enter(&self, state: &WorkflowState) -> Option<GenerationRequest> {
        if !state.motivations.is_empty() {
            return None;
        }
        state
            .brief
            .clone()
            .map(|brief| GenerationRequest::Motivations { brief })
    }
}

struct CopyHandler;

impl StepHandler for CopyHandler {
    fn id(&self) -> StepId {
        StepId::Copy
    }

    fn validate(&self, state: &WorkflowState) -> WorkflowResult<()> {
        guard(
            state.copy_variations.iter().any(|c| c.selected),
            "select at least one copy variation",
        )
    }

    fn on_enter(&self, state: &WorkflowState) -> Option<GenerationRequest> {
        if !state.copy_variations.is_empty() {
            return None;
        }
        let motivations = state.selected_motivations();
        if motivations.is_empty() {
            return None;
        }
        Some(GenerationRequest::CopyVariations { motivations })
    }
}

struct AssetsHandler;

impl StepHandler for AssetsHandler {
    fn id(&self) -> StepId {
        StepId::Assets
    }

    fn validate(&self, state: &WorkflowState) -> WorkflowResult<()> {
        guard(
            !state.selected_assets.is_empty(),
            "select at least one asset",
        )
    }
}

struct TemplateHandler;

impl StepHandler for TemplateHandler {
    fn id(&self) -> StepId {
        StepId::Template
    }

    fn validate(&self, state: &WorkflowState) -> WorkflowResult<()> {
        guard(state.selected_template.is_some(), "pick a template")
    }
}

struct MatrixHandler;

impl StepHandler for MatrixHandler {
    fn id(&self) -> StepId {
        StepId::Matrix
    }

    fn validate(&self, state: &WorkflowState) -> WorkflowResult<()> {
        let summary = state.matrix_summary();
        guard(
            summary.selected_motivations > 0 && summary.selected_copy > 0,
            "the content matrix is empty",
        )
    }
}

struct RenderHandler;

impl StepHandler for RenderHandler {
    fn id(&self) -> StepId {
        StepId::Render
    }

    fn validate(&self, _state: &WorkflowState) -> WorkflowResult<()> {
        Ok(())
    }
}

static HANDLERS: [&'static dyn StepHandler; 7] = [
    &UploadBriefHandler,
    &MotivationsHandler,
    &CopyHandler,
    &AssetsHandler,
    &TemplateHandler,
    &MatrixHandler,
    &RenderHandler,
];

/// Look up the handler for a step.
pub fn handler_for(step: StepId) -> &'static dyn StepHandler {
    HANDLERS[step.index()]
}
