//! Step transition controller for the guided workflow.
//!
//! The engine owns the session state behind an async lock and drives it
//! through the step catalog: guarded advances, display-only retreats,
//! jumps to completed steps, and the generation call tied to entering a
//! step. Every mutation persists through the session store before the
//! operation returns. The only suspension point is the await on the
//! generation gateway; the lock is released while a call is in flight so
//! progress polling and reset stay responsive.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::errors::{WorkflowError, WorkflowResult};
use crate::domain::models::brief::{
    AssetRef, BriefDocument, CopyVariation, Motivation, TemplateRef,
};
use crate::domain::models::completion::CompletionPayload;
use crate::domain::models::step::{step_catalog, StepId};
use crate::domain::models::workflow_state::{
    MatrixSummary, StepStatus, WorkflowPhase, WorkflowState,
};
use crate::domain::ports::{Clock, GenerationService, NoticeSeverity, Notifier, StateRepository};
use crate::services::generation_gateway::{GenerationGateway, GenerationProgress};
use crate::services::session_store::SessionStore;
use crate::services::step_handlers::{handler_for, GenerationRequest};

/// Result of an `advance()` call.
#[derive(Debug)]
pub enum AdvanceOutcome {
    /// The workflow moved to the given step (any required generation has
    /// completed and its payload is in the state).
    Advanced { step: StepId },
    /// The terminal step finished; the completion payload was assembled
    /// and handed to the completion callback.
    Completed(CompletionPayload),
    /// A reset occurred while the generation call was in flight; the
    /// stale result was dropped silently.
    Discarded,
}

/// Caller-supplied callback receiving the completion payload.
pub type CompletionHandler = Box<dyn Fn(&CompletionPayload) + Send + Sync>;

/// Status of one catalog entry, for display.
#[derive(Debug, Clone, Serialize)]
pub struct StepStatusEntry {
    pub id: StepId,
    pub label: &'static str,
    pub status: StepStatus,
}

/// Point-in-time summary of the workflow session.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowStatusSummary {
    pub session_id: Uuid,
    pub phase: WorkflowPhase,
    pub active_step: usize,
    pub total_steps: usize,
    pub steps: Vec<StepStatusEntry>,
    pub generation: Option<GenerationProgress>,
    pub generation_error: Option<String>,
}

enum GeneratedPayload {
    Motivations(Vec<Motivation>),
    Copy(Vec<CopyVariation>),
}

/// The guided workflow engine.
pub struct WorkflowEngine<R: StateRepository, G: GenerationService> {
    store: SessionStore<R>,
    gateway: GenerationGateway<G>,
    notifier: Arc<dyn Notifier>,
    session_key: String,
    state: RwLock<WorkflowState>,
    on_complete: Option<CompletionHandler>,
}

impl<R: StateRepository, G: GenerationService> WorkflowEngine<R, G> {
    /// Build an engine for `session_key`, restoring any persisted state.
    pub async fn restore(
        repo: Arc<R>,
        service: Arc<G>,
        notifier: Arc<dyn Notifier>,
        clock: Arc<dyn Clock>,
        session_key: impl Into<String>,
    ) -> Self {
        let session_key = session_key.into();
        let store = SessionStore::new(repo);
        let state = store.load(&session_key).await;
        Self {
            store,
            gateway: GenerationGateway::new(service, clock),
            notifier,
            session_key,
            state: RwLock::new(state),
            on_complete: None,
        }
    }

    /// Attach the completion callback invoked with the final payload.
    #[must_use]
    pub fn with_completion_handler(mut self, handler: CompletionHandler) -> Self {
        self.on_complete = Some(handler);
        self
    }

    pub fn session_key(&self) -> &str {
        &self.session_key
    }

    // ========================================================================
    // Transitions
    // ========================================================================

    /// Begin the workflow: step 0 becomes active. Idempotent once started.
    pub async fn start(&self) -> WorkflowResult<()> {
        let mut state = self.state.write().await;
        if state.phase == WorkflowPhase::NotStarted {
            self.store
                .mutate(&self.session_key, &mut state, |s| {
                    s.phase = WorkflowPhase::InProgress;
                    s.activate(0);
                })
                .await;
            tracing::info!(session = %state.session_id, "workflow started");
        }
        Ok(())
    }

    /// Advance past the current step.
    ///
    /// The current step's guard runs first; a guard failure leaves the
    /// state untouched. On the terminal step the completion payload is
    /// assembled instead of incrementing past bounds. Entering a step
    /// whose generated content is missing drives the generation call
    /// inline; on failure the step stays active with the error attached.
    pub async fn advance(&self) -> WorkflowResult<AdvanceOutcome> {
        if self.gateway.is_busy() {
            return Err(self.reject("generation in progress"));
        }

        let (entered, request, session_id) = {
            let mut state = self.state.write().await;
            match state.phase {
                WorkflowPhase::NotStarted => return Err(self.reject("workflow not started")),
                WorkflowPhase::Complete => {
                    return Err(self.reject("workflow already complete"))
                }
                WorkflowPhase::InProgress => {}
            }

            let current = state.active_step_id();
            let handler = handler_for(current);
            if let Err(err) = handler.validate(&state) {
                if let WorkflowError::Validation(message) = &err {
                    self.notifier.notify(message, NoticeSeverity::Warning);
                }
                return Err(err);
            }

            if current.is_terminal() {
                let payload = CompletionPayload::from_state(&state)?;
                self.store
                    .mutate(&self.session_key, &mut state, |s| {
                        s.statuses[current.index()] = StepStatus::Completed;
                        s.phase = WorkflowPhase::Complete;
                    })
                    .await;
                tracing::info!(session = %state.session_id, "workflow complete");
                self.notifier.notify("workflow complete", NoticeSeverity::Success);
                if let Some(on_complete) = &self.on_complete {
                    on_complete(&payload);
                }
                return Ok(AdvanceOutcome::Completed(payload));
            }

            let next = state.active_step + 1;
            self.store
                .mutate(&self.session_key, &mut state, |s| {
                    let exited = s.active_step;
                    handler.on_exit(s);
                    s.statuses[exited] = StepStatus::Completed;
                    s.activate(next);
                    s.generation_error = None;
                })
                .await;

            let entered = state.active_step_id();
            tracing::info!(
                session = %state.session_id,
                from = %current,
                to = %entered,
                "workflow advanced"
            );
            (entered, handler_for(entered).on_enter(&state), state.session_id)
        };

        match request {
            Some(request) => self.run_generation(entered, request, session_id).await,
            None => Ok(AdvanceOutcome::Advanced { step: entered }),
        }
    }

    /// Go back one step. Display-only: collected data is never cleared.
    pub async fn retreat(&self) -> WorkflowResult<()> {
        if self.gateway.is_busy() {
            return Err(self.reject("generation in progress"));
        }
        let mut state = self.state.write().await;
        if state.phase != WorkflowPhase::InProgress {
            return Err(self.reject("workflow not started"));
        }
        if state.active_step == 0 {
            return Err(self.reject("already at the first step"));
        }
        let previous = state.active_step - 1;
        self.store
            .mutate(&self.session_key, &mut state, |s| {
                s.activate(previous);
                s.generation_error = None;
            })
            .await;
        Ok(())
    }

    /// Jump to a previously completed step (step-indicator clicks).
    /// Skipping ahead is never permitted.
    pub async fn jump_to(&self, step: StepId) -> WorkflowResult<()> {
        if self.gateway.is_busy() {
            return Err(self.reject("generation in progress"));
        }
        let mut state = self.state.write().await;
        if state.phase != WorkflowPhase::InProgress {
            return Err(self.reject("workflow not started"));
        }
        if step.index() == state.active_step {
            return Ok(());
        }
        if state.status(step) != StepStatus::Completed {
            return Err(self.reject("can only jump to a completed step"));
        }
        self.store
            .mutate(&self.session_key, &mut state, |s| {
                s.activate(step.index());
                s.generation_error = None;
            })
            .await;
        Ok(())
    }

    /// Discard all state and the persisted slot; back to not-started with
    /// a fresh session identity.
    pub async fn reset(&self) {
        let mut state = self.state.write().await;
        let old = state.session_id;
        *state = WorkflowState::empty();
        self.store.clear(&self.session_key).await;
        tracing::info!(old_session = %old, new_session = %state.session_id, "workflow reset");
    }

    // ========================================================================
    // Generation
    // ========================================================================

    /// Upload a brief document and store the parsed result wholesale.
    /// Only valid on the first step; implicitly starts the workflow.
    pub async fn upload_brief(&self, document: BriefDocument) -> WorkflowResult<()> {
        let session_id = {
            let mut state = self.state.write().await;
            if state.phase == WorkflowPhase::NotStarted {
                self.store
                    .mutate(&self.session_key, &mut state, |s| {
                        s.phase = WorkflowPhase::InProgress;
                        s.activate(0);
                    })
                    .await;
            }
            if state.active_step_id() != StepId::UploadBrief {
                return Err(self.reject("brief can only be uploaded on the first step"));
            }
            state.session_id
        };

        match self.gateway.parse_brief(session_id, &document).await {
            Ok(brief) => {
                let mut state = self.state.write().await;
                if state.session_id != session_id {
                    tracing::debug!(
                        stale_session = %session_id,
                        "discarding parsed brief for abandoned session"
                    );
                    return Ok(());
                }
                self.store
                    .mutate(&self.session_key, &mut state, |s| {
                        s.brief = Some(brief);
                        s.brief_confirmed = false;
                        s.generation_error = None;
                    })
                    .await;
                self.notifier.notify("brief parsed", NoticeSeverity::Success);
                Ok(())
            }
            Err(err) => self.record_generation_failure(session_id, err).await.map(|_| ()),
        }
    }

    /// User-initiated retry of the current step's generation call.
    pub async fn regenerate(&self) -> WorkflowResult<()> {
        if self.gateway.is_busy() {
            return Err(self.reject("generation in progress"));
        }
        let (step, request, session_id) = {
            let state = self.state.read().await;
            if state.phase != WorkflowPhase::InProgress {
                return Err(self.reject("workflow not started"));
            }
            let step = state.active_step_id();
            let Some(request) = handler_for(step).on_enter(&state) else {
                return Err(self.reject("nothing to generate for this step"));
            };
            (step, request, state.session_id)
        };
        self.run_generation(step, request, session_id).await.map(|_| ())
    }

    async fn run_generation(
        &self,
        step: StepId,
        request: GenerationRequest,
        session_id: Uuid,
    ) -> WorkflowResult<AdvanceOutcome> {
        let result = match request {
            GenerationRequest::Motivations { brief } => self
                .gateway
                .generate_motivations(session_id, &brief)
                .await
                .map(GeneratedPayload::Motivations),
            GenerationRequest::CopyVariations { motivations } => self
                .gateway
                .generate_copy(session_id, &motivations)
                .await
                .map(GeneratedPayload::Copy),
        };

        match result {
            Ok(payload) => {
                let mut state = self.state.write().await;
                if state.session_id != session_id {
                    tracing::debug!(
                        stale_session = %session_id,
                        step = %step,
                        "discarding generation result for abandoned session"
                    );
                    return Ok(AdvanceOutcome::Discarded);
                }
                let message = match &payload {
                    GeneratedPayload::Motivations(_) => "motivations generated",
                    GeneratedPayload::Copy(_) => "copy variations generated",
                };
                self.store
                    .mutate(&self.session_key, &mut state, |s| match payload {
                        GeneratedPayload::Motivations(motivations) => {
                            s.motivations = motivations;
                        }
                        GeneratedPayload::Copy(copy) => s.copy_variations = copy,
                    })
                    .await;
                self.notifier.notify(message, NoticeSeverity::Success);
                Ok(AdvanceOutcome::Advanced { step })
            }
            Err(err) => self.record_generation_failure(session_id, err).await,
        }
    }

    /// Attach a generation failure to the active step, unless the session
    /// was reset while the call was in flight (then the failure is moot
    /// and dropped with the rest of the stale result).
    async fn record_generation_failure(
        &self,
        session_id: Uuid,
        err: WorkflowError,
    ) -> WorkflowResult<AdvanceOutcome> {
        let mut state = self.state.write().await;
        if state.session_id != session_id {
            tracing::debug!(stale_session = %session_id, "dropping failure for abandoned session");
            return Ok(AdvanceOutcome::Discarded);
        }
        let message = match &err {
            WorkflowError::Generation { message, .. } => message.clone(),
            other => other.to_string(),
        };
        self.store
            .mutate(&self.session_key, &mut state, |s| {
                s.generation_error = Some(message.clone());
            })
            .await;
        self.notifier.notify(&message, NoticeSeverity::Error);
        Err(err)
    }

    // ========================================================================
    // Narrow mutation API
    // ========================================================================

    /// Mark the parsed brief as reviewed.
    pub async fn confirm_brief(&self) -> WorkflowResult<()> {
        let mut state = self.state.write().await;
        if state.brief.is_none() {
            return Err(self.reject("upload and parse a brief first"));
        }
        self.store
            .mutate(&self.session_key, &mut state, |s| s.brief_confirmed = true)
            .await;
        Ok(())
    }

    /// Set the selected flag on one motivation.
    pub async fn set_motivation_selected(
        &self,
        id: &str,
        selected: bool,
    ) -> WorkflowResult<()> {
        let mut state = self.state.write().await;
        let Some(index) = state.motivations.iter().position(|m| m.id == id) else {
            return Err(self.reject(&format!("unknown motivation id: {id}")));
        };
        self.store
            .mutate(&self.session_key, &mut state, |s| {
                s.motivations[index].selected = selected;
            })
            .await;
        Ok(())
    }

    /// Set the selected flag on one copy variation.
    pub async fn set_copy_selected(&self, id: &str, selected: bool) -> WorkflowResult<()> {
        let mut state = self.state.write().await;
        let Some(index) = state.copy_variations.iter().position(|c| c.id == id) else {
            return Err(self.reject(&format!("unknown copy variation id: {id}")));
        };
        self.store
            .mutate(&self.session_key, &mut state, |s| {
                s.copy_variations[index].selected = selected;
            })
            .await;
        Ok(())
    }

    /// Add an asset reference. Only valid on the asset-selection step.
    pub async fn select_asset(&self, asset: AssetRef) -> WorkflowResult<()> {
        let mut state = self.state.write().await;
        if state.active_step_id() != StepId::Assets {
            return Err(self.reject("assets can only be changed on the asset selection step"));
        }
        self.store
            .mutate(&self.session_key, &mut state, |s| {
                s.selected_assets.insert(asset);
            })
            .await;
        Ok(())
    }

    /// Remove an asset reference. Only valid on the asset-selection step.
    pub async fn deselect_asset(&self, asset: &AssetRef) -> WorkflowResult<()> {
        let mut state = self.state.write().await;
        if state.active_step_id() != StepId::Assets {
            return Err(self.reject("assets can only be changed on the asset selection step"));
        }
        self.store
            .mutate(&self.session_key, &mut state, |s| {
                s.selected_assets.remove(asset);
            })
            .await;
        Ok(())
    }

    /// Set (or overwrite) the render template. Only valid on the
    /// template step.
    pub async fn set_template(&self, template: TemplateRef) -> WorkflowResult<()> {
        let mut state = self.state.write().await;
        if state.active_step_id() != StepId::Template {
            return Err(self.reject("the template can only be changed on the template step"));
        }
        self.store
            .mutate(&self.session_key, &mut state, |s| {
                s.selected_template = Some(template);
            })
            .await;
        Ok(())
    }

    // ========================================================================
    // Read API
    // ========================================================================

    /// Snapshot of the current state.
    pub async fn state(&self) -> WorkflowState {
        self.state.read().await.clone()
    }

    /// Derived matrix counts.
    pub async fn matrix_summary(&self) -> MatrixSummary {
        self.state.read().await.matrix_summary()
    }

    /// Simulated progress of the outstanding generation call, if any.
    pub fn generation_progress(&self) -> Option<GenerationProgress> {
        self.gateway.progress()
    }

    /// Display summary: phase, per-step statuses, progress, inline error.
    pub async fn status(&self) -> WorkflowStatusSummary {
        let state = self.state.read().await;
        let steps = step_catalog()
            .iter()
            .map(|def| StepStatusEntry {
                id: def.id,
                label: def.label,
                status: state.status(def.id),
            })
            .collect();
        WorkflowStatusSummary {
            session_id: state.session_id,
            phase: state.phase,
            active_step: state.active_step,
            total_steps: step_catalog().len(),
            steps,
            generation: self.gateway.progress(),
            generation_error: state.generation_error.clone(),
        }
    }

    fn reject(&self, message: &str) -> WorkflowError {
        self.notifier.notify(message, NoticeSeverity::Warning);
        WorkflowError::Validation(message.to_string())
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::adapters::memory::InMemoryStateRepository;
    use crate::domain::errors::GenerationError;
    use crate::domain::models::brief::BriefData;
    use crate::domain::ports::{ManualClock, NullNotifier};

    struct CannedService;

    #[async_trait]
    impl GenerationService for CannedService {
        async fn parse_brief(
            &self,
            document: &BriefDocument,
        ) -> Result<BriefData, GenerationError> {
            Ok(BriefData {
                title: document.file_name.trim_end_matches(".pdf").to_string(),
                objective: "Awareness".to_string(),
                audience: "Developers".to_string(),
                key_messages: vec![],
                platforms: vec!["Instagram".to_string()],
                budget: None,
                timeline: None,
            })
        }

        async fn generate_motivations(
            &self,
            _brief: &BriefData,
        ) -> Result<Vec<Motivation>, GenerationError> {
            Ok(vec![Motivation {
                id: "m1".to_string(),
                title: "Speed".to_string(),
                description: "Ship faster".to_string(),
                score: 0.8,
                selected: false,
            }])
        }

        async fn generate_copy(
            &self,
            _motivations: &[Motivation],
        ) -> Result<Vec<CopyVariation>, GenerationError> {
            Ok(vec![CopyVariation {
                id: "c1".to_string(),
                text: "Launch now".to_string(),
                platform: "Instagram".to_string(),
                selected: false,
            }])
        }
    }

    async fn engine() -> WorkflowEngine<InMemoryStateRepository, CannedService> {
        WorkflowEngine::restore(
            Arc::new(InMemoryStateRepository::new()),
            Arc::new(CannedService),
            Arc::new(NullNotifier),
            Arc::new(ManualClock::new()),
            "wf_test",
        )
        .await
    }

    #[tokio::test]
    async fn test_advance_before_start_is_rejected() {
        let engine = engine().await;
        let err = engine.advance().await.unwrap_err();
        assert_eq!(err.to_string(), "validation failed: workflow not started");
    }

    #[tokio::test]
    async fn test_start_is_idempotent() {
        let engine = engine().await;
        engine.start().await.unwrap();
        let first = engine.state().await;
        engine.start().await.unwrap();
        let second = engine.state().await;
        assert_eq!(first, second);
        assert_eq!(second.status(StepId::UploadBrief), StepStatus::Active);
    }

    #[tokio::test]
    async fn test_advance_without_brief_is_rejected() {
        let engine = engine().await;
        engine.start().await.unwrap();
        let err = engine.advance().await.unwrap_err();
        assert!(matches!(err, WorkflowError::Validation(_)));
        assert_eq!(engine.state().await.active_step, 0);
    }

    #[tokio::test]
    async fn test_upload_then_advance_completes_step_zero() {
        let engine = engine().await;
        engine
            .upload_brief(BriefDocument::new(
                "Q3 Launch.pdf",
                "application/pdf",
                vec![1, 2, 3],
            ))
            .await
            .unwrap();

        let state = engine.state().await;
        assert_eq!(state.brief.as_ref().unwrap().title, "Q3 Launch");

        let outcome = engine.advance().await.unwrap();
        assert!(matches!(
            outcome,
            AdvanceOutcome::Advanced {
                step: StepId::Motivations
            }
        ));

        let state = engine.state().await;
        assert_eq!(state.active_step, 1);
        assert_eq!(state.status(StepId::UploadBrief), StepStatus::Completed);
        assert!(state.brief_confirmed, "advancing past review confirms the brief");
        assert_eq!(state.motivations.len(), 1, "entry generation ran");
    }

    #[tokio::test]
    async fn test_status_summary_reports_catalog_and_phase() {
        let engine = engine().await;
        engine.start().await.unwrap();

        let status = engine.status().await;
        assert_eq!(status.phase, WorkflowPhase::InProgress);
        assert_eq!(status.active_step, 0);
        assert_eq!(status.total_steps, 7);
        assert_eq!(status.steps.len(), 7);
        assert_eq!(status.steps[0].status, StepStatus::Active);
        assert!(status.generation.is_none());
        assert!(status.generation_error.is_none());
    }

    #[tokio::test]
    async fn test_confirm_brief_requires_a_parsed_brief() {
        let engine = engine().await;
        engine.start().await.unwrap();
        assert!(engine.confirm_brief().await.is_err());

        engine
            .upload_brief(BriefDocument::new("brief.pdf", "application/pdf", vec![]))
            .await
            .unwrap();
        engine.confirm_brief().await.unwrap();
        assert!(engine.state().await.brief_confirmed);
    }

    #[tokio::test]
    async fn test_matrix_summary_is_derived_from_selections() {
        let engine = engine().await;
        engine
            .upload_brief(BriefDocument::new("brief.pdf", "application/pdf", vec![]))
            .await
            .unwrap();
        engine.advance().await.unwrap();
        engine.set_motivation_selected("m1", true).await.unwrap();

        let summary = engine.matrix_summary().await;
        assert_eq!(summary.selected_motivations, 1);
        assert_eq!(summary.selected_copy, 0);
        assert!(summary.template_id.is_none());
    }

    #[tokio::test]
    async fn test_asset_changes_rejected_off_step() {
        let engine = engine().await;
        engine.start().await.unwrap();
        let err = engine.select_asset(AssetRef::new("asset-1")).await.unwrap_err();
        assert!(err.to_string().contains("asset selection step"));
    }
}
