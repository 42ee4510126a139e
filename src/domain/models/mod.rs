//! Domain models for the guided workflow.

pub mod brief;
pub mod completion;
pub mod config;
pub mod step;
pub mod workflow_state;

pub use brief::{AssetRef, BriefData, BriefDocument, CopyVariation, Motivation, TemplateRef};
pub use completion::CompletionPayload;
pub use config::{Config, DatabaseConfig, GenerationConfig, LoggingConfig};
pub use step::{step_catalog, step_definition, StepDefinition, StepId};
pub use workflow_state::{
    MatrixSummary, PersistedWorkflow, StepStatus, WorkflowPhase, WorkflowState,
};
