//! AIrWAVE - Guided Campaign Workflow Engine
//!
//! Drives a user through the ordered "brief to render" content-creation
//! sequence: upload brief, generate motivations, generate copy, select
//! assets, pick template, populate matrix, render. Progress persists
//! across restarts, and the asynchronous AI-generation calls between
//! steps are coordinated with a single-flight guard and a simulated
//! progress estimate.
//!
//! # Architecture
//!
//! The crate follows Clean Architecture / Hexagonal Architecture
//! principles:
//!
//! - **Domain Layer** (`domain`): Pure models, ports, and errors
//! - **Service Layer** (`services`): The workflow engine, session store,
//!   and generation gateway
//! - **Adapters Layer** (`adapters`): SQLite/in-memory persistence, the
//!   HTTP generation client, and notifier sinks
//! - **Infrastructure Layer** (`infrastructure`): Configuration loading
//!   and logging bootstrap
//! - **CLI Layer** (`cli`): Command-line interface
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use airwave::adapters::http::HttpGenerationClient;
//! use airwave::adapters::notify::TracingNotifier;
//! use airwave::adapters::sqlite::{create_pool, init_schema, SqliteStateRepository};
//! use airwave::domain::ports::SystemClock;
//! use airwave::services::WorkflowEngine;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let pool = create_pool("sqlite:.airwave/sessions.db", None).await?;
//!     init_schema(&pool).await?;
//!     let engine = WorkflowEngine::restore(
//!         Arc::new(SqliteStateRepository::new(pool)),
//!         Arc::new(HttpGenerationClient::new(
//!             "http://localhost:4010",
//!             std::time::Duration::from_secs(120),
//!         )?),
//!         Arc::new(TracingNotifier),
//!         Arc::new(SystemClock::new()),
//!         "airwave_workflow_state",
//!     )
//!     .await;
//!     engine.start().await?;
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::errors::{GenerationError, PersistenceError, WorkflowError, WorkflowResult};
pub use domain::models::{
    step_catalog, AssetRef, BriefData, BriefDocument, CompletionPayload, Config, CopyVariation,
    MatrixSummary, Motivation, PersistedWorkflow, StepDefinition, StepId, StepStatus, TemplateRef,
    WorkflowPhase, WorkflowState,
};
pub use domain::ports::{
    Clock, GenerationService, NoticeSeverity, Notifier, StateRepository, SystemClock,
};
pub use infrastructure::{ConfigError, ConfigLoader};
pub use services::{
    AdvanceOutcome, GenerationGateway, GenerationProgress, SessionStore, WorkflowEngine,
    WorkflowStatusSummary,
};
