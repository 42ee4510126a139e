//! Service layer: the workflow engine and its supporting services.

pub mod generation_gateway;
pub mod session_store;
pub mod step_handlers;
pub mod workflow_engine;

pub use generation_gateway::{GenerationGateway, GenerationProgress};
pub use session_store::SessionStore;
pub use step_handlers::{handler_for, GenerationRequest, StepHandler};
pub use workflow_engine::{
    AdvanceOutcome, CompletionHandler, StepStatusEntry, WorkflowEngine, WorkflowStatusSummary,
};
