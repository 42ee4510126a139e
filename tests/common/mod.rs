//! Shared fixtures for the integration test suites.
#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Notify;

use airwave::adapters::memory::InMemoryStateRepository;
use airwave::adapters::notify::RecordingNotifier;
use airwave::domain::ports::{ManualClock, Notifier};
use airwave::{
    BriefData, BriefDocument, CopyVariation, GenerationError, GenerationService, Motivation,
    WorkflowEngine,
};

/// Deterministic generation service with per-call failure switches.
///
/// A failure switch trips once: the next call fails and the switch
/// resets, so user-initiated retries succeed.
#[derive(Default)]
pub struct ScriptedService {
    pub fail_next_parse: AtomicBool,
    pub fail_next_motivations: AtomicBool,
    pub fail_next_copy: AtomicBool,
    pub parse_calls: AtomicUsize,
    pub motivation_calls: AtomicUsize,
    pub copy_calls: AtomicUsize,
}

impl ScriptedService {
    pub fn new() -> Self {
        Self::default()
    }

    fn trip(flag: &AtomicBool) -> bool {
        flag.swap(false, Ordering::SeqCst)
    }
}

#[async_trait]
impl GenerationService for ScriptedService {
    async fn parse_brief(&self, document: &BriefDocument) -> Result<BriefData, GenerationError> {
        self.parse_calls.fetch_add(1, Ordering::SeqCst);
        if Self::trip(&self.fail_next_parse) {
            return Err(GenerationError::new("brief parsing service unavailable"));
        }
        Ok(BriefData {
            title: document
                .file_name
                .trim_end_matches(".pdf")
                .to_string(),
            objective: "Grow Q3 signups".to_string(),
            audience: "Growth-stage marketing teams".to_string(),
            key_messages: vec!["Launch faster".to_string(), "Measure everything".to_string()],
            platforms: vec!["Instagram".to_string(), "LinkedIn".to_string()],
            budget: Some("$50k".to_string()),
            timeline: Some("6 weeks".to_string()),
        })
    }

    async fn generate_motivations(
        &self,
        _brief: &BriefData,
    ) -> Result<Vec<Motivation>, GenerationError> {
        self.motivation_calls.fetch_add(1, Ordering::SeqCst);
        if Self::trip(&self.fail_next_motivations) {
            return Err(GenerationError::new("motivation service unavailable"));
        }
        Ok(vec![
            Motivation {
                id: "m1".to_string(),
                title: "Speed to market".to_string(),
                description: "Position the product as the fastest path to launch".to_string(),
                score: 0.92,
                selected: false,
            },
            Motivation {
                id: "m2".to_string(),
                title: "Proof through numbers".to_string(),
                description: "Lead with measurable campaign outcomes".to_string(),
                score: 0.81,
                selected: false,
            },
            Motivation {
                id: "m3".to_string(),
                title: "Creative confidence".to_string(),
                description: "Emphasize on-brand output at scale".to_string(),
                score: 0.64,
                selected: false,
            },
        ])
    }

    async fn generate_copy(
        &self,
        motivations: &[Motivation],
    ) -> Result<Vec<CopyVariation>, GenerationError> {
        self.copy_calls.fetch_add(1, Ordering::SeqCst);
        if Self::trip(&self.fail_next_copy) {
            return Err(GenerationError::new("copy service unavailable"));
        }
        Ok(motivations
            .iter()
            .enumerate()
            .flat_map(|(i, m)| {
                [
                    CopyVariation {
                        id: format!("c{}-ig", i + 1),
                        text: format!("{} - launch it on Instagram", m.title),
                        platform: "Instagram".to_string(),
                        selected: false,
                    },
                    CopyVariation {
                        id: format!("c{}-li", i + 1),
                        text: format!("{} - tell the story on LinkedIn", m.title),
                        platform: "LinkedIn".to_string(),
                        selected: false,
                    },
                ]
            })
            .collect())
    }
}

/// Generation service whose motivation call blocks until released, for
/// observing the in-flight window and stale-session discards.
#[derive(Default)]
pub struct GatedService {
    pub inner: ScriptedService,
    pub started: Notify,
    pub release: Notify,
}

impl GatedService {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GenerationService for GatedService {
    async fn parse_brief(&self, document: &BriefDocument) -> Result<BriefData, GenerationError> {
        self.inner.parse_brief(document).await
    }

    async fn generate_motivations(
        &self,
        brief: &BriefData,
    ) -> Result<Vec<Motivation>, GenerationError> {
        self.started.notify_one();
        self.release.notified().await;
        self.inner.generate_motivations(brief).await
    }

    async fn generate_copy(
        &self,
        motivations: &[Motivation],
    ) -> Result<Vec<CopyVariation>, GenerationError> {
        self.inner.generate_copy(motivations).await
    }
}

pub fn sample_document() -> BriefDocument {
    BriefDocument::new("Q3 Launch.pdf", "application/pdf", b"%PDF-1.7 stub".to_vec())
}

/// Engine over an in-memory repository and the given service.
pub async fn engine_with<G: GenerationService>(
    repo: Arc<InMemoryStateRepository>,
    service: Arc<G>,
    notifier: Arc<RecordingNotifier>,
) -> WorkflowEngine<InMemoryStateRepository, G> {
    let notifier: Arc<dyn Notifier> = notifier;
    WorkflowEngine::restore(repo, service, notifier, Arc::new(ManualClock::new()), "wf_it").await
}
