//! Workflow session state and its persisted snapshot.
//!
//! `WorkflowState` is the single mutable record for an active workflow
//! session. The session store owns it; everything else gets read access
//! plus the engine's narrow mutation API. `PersistedWorkflow` is the
//! JSON layout written to the session-scoped storage slot.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::models::brief::{AssetRef, BriefData, CopyVariation, Motivation, TemplateRef};
use crate::domain::models::step::StepId;

/// Display status of a single step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    Pending,
    Active,
    Completed,
    Error,
}

/// Pseudo-states wrapping the step machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowPhase {
    NotStarted,
    InProgress,
    Complete,
}

/// Derived counts for the content matrix. Recomputed, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatrixSummary {
    pub selected_motivations: usize,
    pub selected_copy: usize,
    pub selected_assets: usize,
    pub template_id: Option<TemplateRef>,
}

/// State of one active workflow session.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowState {
    /// Instance identity; rotated on reset so late generation results
    /// from an abandoned session can be recognized and discarded.
    pub session_id: Uuid,
    pub phase: WorkflowPhase,
    /// Invariant: `0 <= active_step < StepId::ALL.len()`.
    pub active_step: usize,
    /// One status per catalog entry; at most one `Active`.
    pub statuses: Vec<StepStatus>,
    pub brief: Option<BriefData>,
    pub brief_confirmed: bool,
    pub motivations: Vec<Motivation>,
    pub copy_variations: Vec<CopyVariation>,
    pub selected_assets: BTreeSet<AssetRef>,
    pub selected_template: Option<TemplateRef>,
    /// Inline message attached to an active step after a failed
    /// generation call. Transient; never persisted.
    pub generation_error: Option<String>,
}

impl WorkflowState {
    /// Fresh, not-yet-started state with a new session identity.
    pub fn empty() -> Self {
        Self {
            session_id: Uuid::new_v4(),
            phase: WorkflowPhase::NotStarted,
            active_step: 0,
            statuses: vec![StepStatus::Pending; StepId::ALL.len()],
            brief: None,
            brief_confirmed: false,
            motivations: Vec::new(),
            copy_variations: Vec::new(),
            selected_assets: BTreeSet::new(),
            selected_template: None,
            generation_error: None,
        }
    }

    /// The currently active step id.
    pub fn active_step_id(&self) -> StepId {
        StepId::from_index(self.active_step).unwrap_or(StepId::UploadBrief)
    }

    /// Status of the given step.
    pub fn status(&self, step: StepId) -> StepStatus {
        self.statuses[step.index()]
    }

    /// Move the active marker to `index`, clearing any other `Active`
    /// entry so at most one step is active at a time.
    pub fn activate(&mut self, index: usize) {
        debug_assert!(index < self.statuses.len());
        for status in &mut self.statuses {
            if *status == StepStatus::Active {
                *status = StepStatus::Pending;
            }
        }
        self.active_step = index;
        self.statuses[index] = StepStatus::Active;
    }

    /// Motivations the user has selected, in generation order.
    pub fn selected_motivations(&self) -> Vec<Motivation> {
        self.motivations.iter().filter(|m| m.selected).cloned().collect()
    }

    /// Copy variations the user has selected, in generation order.
    pub fn selected_copy(&self) -> Vec<CopyVariation> {
        self.copy_variations.iter().filter(|c| c.selected).cloned().collect()
    }

    /// Derived matrix counts.
    pub fn matrix_summary(&self) -> MatrixSummary {
        MatrixSummary {
            selected_motivations: self.motivations.iter().filter(|m| m.selected).count(),
            selected_copy: self.copy_variations.iter().filter(|c| c.selected).count(),
            selected_assets: self.selected_assets.len(),
            template_id: self.selected_template.clone(),
        }
    }

    /// Snapshot for persistence.
    pub fn to_persisted(&self) -> PersistedWorkflow {
        PersistedWorkflow {
            session_id: self.session_id,
            active_step: self.active_step,
            brief_data: self.brief.clone(),
            motivations: self.motivations.clone(),
            copy_variations: self.copy_variations.clone(),
            brief_confirmed: self.brief_confirmed,
            selected_assets: self.selected_assets.iter().cloned().collect(),
            selected_template: self.selected_template.clone(),
        }
    }

    /// Restore from a persisted snapshot.
    ///
    /// Step statuses are derived rather than stored: steps before the
    /// active index are `Completed`, the active index is `Active`, the
    /// rest are `Pending`. An out-of-range index is clamped to the last
    /// step rather than rejected.
    pub fn from_persisted(persisted: PersistedWorkflow) -> Self {
        let last = StepId::ALL.len() - 1;
        let active = persisted.active_step.min(last);
        let statuses = (0..StepId::ALL.len())
            .map(|i| {
                if i < active {
                    StepStatus::Completed
                } else if i == active {
                    StepStatus::Active
                } else {
                    StepStatus::Pending
                }
            })
            .collect();

        Self {
            session_id: persisted.session_id,
            phase: WorkflowPhase::InProgress,
            active_step: active,
            statuses,
            brief: persisted.brief_data,
            brief_confirmed: persisted.brief_confirmed,
            motivations: persisted.motivations,
            copy_variations: persisted.copy_variations,
            selected_assets: persisted.selected_assets.into_iter().collect(),
            selected_template: persisted.selected_template,
            generation_error: None,
        }
    }
}

impl Default for WorkflowState {
    fn default() -> Self {
        Self::empty()
    }
}

/// JSON layout of the session-scoped storage slot.
///
/// Key names follow the dashboard's persisted contract: `activeStep`,
/// `briefData`, `motivations`, `copyVariations`, `briefConfirmed`, with
/// `selectedAssets`, `selectedTemplate` and `sessionId` carried so a
/// reloaded session keeps its selections and identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedWorkflow {
    /// Entries written before session identities existed get a fresh one.
    #[serde(default = "Uuid::new_v4")]
    pub session_id: Uuid,
    pub active_step: usize,
    pub brief_data: Option<BriefData>,
    pub motivations: Vec<Motivation>,
    pub copy_variations: Vec<CopyVariation>,
    pub brief_confirmed: bool,
    #[serde(default)]
    pub selected_assets: Vec<AssetRef>,
    #[serde(default)]
    pub selected_template: Option<TemplateRef>,
}
