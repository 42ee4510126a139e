//! Ports (trait interfaces) the engine depends on.

pub mod clock;
pub mod generation;
pub mod notifier;
pub mod state_repository;

pub use clock::{Clock, ManualClock, SystemClock};
pub use generation::GenerationService;
pub use notifier::{NoticeSeverity, Notifier, NullNotifier};
pub use state_repository::StateRepository;
