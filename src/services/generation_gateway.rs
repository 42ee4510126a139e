//! Async generation gateway.
//!
//! Wraps the [`GenerationService`] port with the engine's single-flight
//! rule (at most one outstanding generation call system-wide) and the
//! simulated progress estimate that drives the UI's progress indicator.
//! Progress is a time-based estimate, not a remote measurement: it rises
//! monotonically toward 99% and snaps to 100% when the response lands.
//! There is no automatic retry; a failed call is retried only when the
//! user asks for it.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde::Serialize;
use uuid::Uuid;

use crate::domain::errors::{GenerationError, WorkflowError, WorkflowResult};
use crate::domain::models::brief::{BriefData, BriefDocument, CopyVariation, Motivation};
use crate::domain::models::step::{step_definition, StepId};
use crate::domain::ports::{Clock, GenerationService};

/// Simulated progress of the outstanding (or just-settled) call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationProgress {
    pub step: StepId,
    /// 0–99 while in flight, 100 once the response has landed.
    pub percent: u8,
    pub elapsed_secs: u64,
    pub remaining_secs: u64,
}

#[derive(Debug, Clone, Copy)]
enum GatewayPhase {
    Idle,
    InFlight {
        step: StepId,
        started: Duration,
        estimated: Duration,
    },
    Settled {
        step: StepId,
        elapsed: Duration,
    },
}

/// Gateway in front of the external generation endpoints.
pub struct GenerationGateway<G: GenerationService> {
    service: Arc<G>,
    clock: Arc<dyn Clock>,
    phase: Mutex<GatewayPhase>,
}

impl<G: GenerationService> GenerationGateway<G> {
    pub fn new(service: Arc<G>, clock: Arc<dyn Clock>) -> Self {
        Self {
            service,
            clock,
            phase: Mutex::new(GatewayPhase::Idle),
        }
    }

    /// Whether a generation call is currently outstanding.
    pub fn is_busy(&self) -> bool {
        matches!(
            *self.phase.lock().expect("gateway lock poisoned"),
            GatewayPhase::InFlight { .. }
        )
    }

    /// Current simulated progress, if a call is in flight or just settled.
    pub fn progress(&self) -> Option<GenerationProgress> {
        let phase = self.phase.lock().expect("gateway lock poisoned");
        match *phase {
            GatewayPhase::Idle => None,
            GatewayPhase::InFlight {
                step,
                started,
                estimated,
            } => {
                let elapsed = self.clock.monotonic().saturating_sub(started);
                let percent = if estimated.is_zero() {
                    99
                } else {
                    let ratio = elapsed.as_secs_f64() / estimated.as_secs_f64();
                    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                    let pct = (ratio * 100.0).floor() as u8;
                    pct.min(99)
                };
                Some(GenerationProgress {
                    step,
                    percent,
                    elapsed_secs: elapsed.as_secs(),
                    remaining_secs: estimated.saturating_sub(elapsed).as_secs(),
                })
            }
            GatewayPhase::Settled { step, elapsed } => Some(GenerationProgress {
                step,
                percent: 100,
                elapsed_secs: elapsed.as_secs(),
                remaining_secs: 0,
            }),
        }
    }

    /// Parse an uploaded brief. One call per workflow at a time.
    pub async fn parse_brief(
        &self,
        session_id: Uuid,
        document: &BriefDocument,
    ) -> WorkflowResult<BriefData> {
        self.begin(StepId::UploadBrief, session_id)?;
        let result = self.service.parse_brief(document).await;
        self.settle(StepId::UploadBrief);
        Self::map_result(StepId::UploadBrief, result)
    }

    /// Generate motivation candidates from the brief.
    pub async fn generate_motivations(
        &self,
        session_id: Uuid,
        brief: &BriefData,
    ) -> WorkflowResult<Vec<Motivation>> {
        self.begin(StepId::Motivations, session_id)?;
        let result = self.service.generate_motivations(brief).await;
        self.settle(StepId::Motivations);
        Self::map_result(StepId::Motivations, result)
    }

    /// Generate copy variations from the selected motivations.
    pub async fn generate_copy(
        &self,
        session_id: Uuid,
        motivations: &[Motivation],
    ) -> WorkflowResult<Vec<CopyVariation>> {
        self.begin(StepId::Copy, session_id)?;
        let result = self.service.generate_copy(motivations).await;
        self.settle(StepId::Copy);
        Self::map_result(StepId::Copy, result)
    }

    fn begin(&self, step: StepId, session_id: Uuid) -> WorkflowResult<()> {
        let mut phase = self.phase.lock().expect("gateway lock poisoned");
        if matches!(*phase, GatewayPhase::InFlight { .. }) {
            return Err(WorkflowError::Validation(
                "generation in progress".to_string(),
            ));
        }
        let estimated = Duration::from_secs(step_definition(step).estimated_duration_secs);
        *phase = GatewayPhase::InFlight {
            step,
            started: self.clock.monotonic(),
            estimated,
        };
        tracing::debug!(step = %step, session = %session_id, "generation call started");
        Ok(())
    }

    fn settle(&self, step: StepId) {
        let mut phase = self.phase.lock().expect("gateway lock poisoned");
        let elapsed = match *phase {
            GatewayPhase::InFlight { started, .. } => {
                self.clock.monotonic().saturating_sub(started)
            }
            _ => Duration::ZERO,
        };
        *phase = GatewayPhase::Settled { step, elapsed };
        tracing::debug!(step = %step, elapsed_secs = elapsed.as_secs(), "generation call settled");
    }

    fn map_result<T>(step: StepId, result: Result<T, GenerationError>) -> WorkflowResult<T> {
        result.map_err(|err| {
            tracing::warn!(step = %step, error = %err, "generation call failed");
            WorkflowError::Generation {
                step,
                message: err.message,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use tokio::sync::Notify;

    use super::*;
    use crate::domain::ports::ManualClock;

    /// Service whose motivation call blocks until released, so tests can
    /// observe the in-flight window deterministically.
    struct GatedService {
        started: Notify,
        release: Notify,
    }

    impl GatedService {
        fn new() -> Self {
            Self {
                started: Notify::new(),
                release: Notify::new(),
            }
        }
    }

    #[async_trait]
    impl GenerationService for GatedService {
        async fn parse_brief(
            &self,
            _document: &BriefDocument,
        ) -> Result<BriefData, GenerationError> {
            Err(GenerationError::new("not under test"))
        }

        async fn generate_motivations(
            &self,
            _brief: &BriefData,
        ) -> Result<Vec<Motivation>, GenerationError> {
            self.started.notify_one();
            self.release.notified().await;
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
            Err(GenerationError::new("upstream unavailable"))
        }
    }

    fn sample_brief() -> BriefData {
        BriefData {
            title: "Q3 Launch".to_string(),
            objective: "Awareness".to_string(),
            audience: "Developers".to_string(),
            key_messages: vec![],
            platforms: vec![],
            budget: None,
            timeline: None,
        }
    }

    #[tokio::test]
    async fn test_idle_gateway_reports_no_progress() {
        let gateway = GenerationGateway::new(
            Arc::new(GatedService::new()),
            Arc::new(ManualClock::new()),
        );
        assert!(!gateway.is_busy());
        assert_eq!(gateway.progress(), None);
    }

    #[tokio::test]
    async fn test_second_call_rejected_while_first_pending() {
        let service = Arc::new(GatedService::new());
        let clock = Arc::new(ManualClock::new());
        let gateway = Arc::new(GenerationGateway::new(service.clone(), clock));
        let session = Uuid::new_v4();

        let pending = {
            let gateway = gateway.clone();
            let brief = sample_brief();
            tokio::spawn(async move { gateway.generate_motivations(session, &brief).await })
        };
        service.started.notified().await;

        assert!(gateway.is_busy());
        let err = gateway
            .generate_copy(session, &[])
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "validation failed: generation in progress");

        service.release.notify_one();
        let motivations = pending.await.unwrap().unwrap();
        assert_eq!(motivations.len(), 1);
        assert!(!gateway.is_busy());
    }

    #[tokio::test]
    async fn test_progress_is_monotonic_and_caps_at_99() {
        let service = Arc::new(GatedService::new());
        let clock = Arc::new(ManualClock::new());
        let gateway = Arc::new(GenerationGateway::new(service.clone(), clock.clone()));
        let session = Uuid::new_v4();

        let pending = {
            let gateway = gateway.clone();
            let brief = sample_brief();
            tokio::spawn(async move { gateway.generate_motivations(session, &brief).await })
        };
        service.started.notified().await;

        // Motivations step is estimated at 45s.
        let p0 = gateway.progress().expect("in flight");
        assert_eq!(p0.percent, 0);
        assert_eq!(p0.step, StepId::Motivations);

        clock.advance(Duration::from_secs(9));
        let p1 = gateway.progress().expect("in flight");
        assert_eq!(p1.percent, 20);
        assert_eq!(p1.remaining_secs, 36);

        clock.advance(Duration::from_secs(300));
        let p2 = gateway.progress().expect("in flight");
        assert_eq!(p2.percent, 99, "estimate never claims completion");

        service.release.notify_one();
        pending.await.unwrap().unwrap();

        let settled = gateway.progress().expect("settled");
        assert_eq!(settled.percent, 100);
        assert_eq!(settled.remaining_secs, 0);
    }

    #[tokio::test]
    async fn test_failure_maps_to_generation_error_and_frees_gateway() {
        let gateway = GenerationGateway::new(
            Arc::new(GatedService::new()),
            Arc::new(ManualClock::new()),
        );
        let err = gateway
            .generate_copy(Uuid::new_v4(), &[])
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            WorkflowError::Generation {
                step: StepId::Copy,
                ..
            }
        ));
        assert!(err.to_string().contains("upstream unavailable"));
        assert!(!gateway.is_busy());
        // A failed call still settles so the next attempt is allowed.
        assert_eq!(gateway.progress().map(|p| p.percent), Some(100));
    }
}
