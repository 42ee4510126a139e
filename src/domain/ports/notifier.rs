//! Notification sink port.
//!
//! The core reports validation failures, generation outcomes, and
//! completion through this capability; rendering the notification is the
//! embedding UI's concern.

use serde::{Deserialize, Serialize};

/// Severity of a user-facing notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeSeverity {
    Info,
    Success,
    Warning,
    Error,
}

/// Generic notification capability.
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str, severity: NoticeSeverity);
}

/// No-op notifier for embedders that surface errors themselves.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&self, _message: &str, _severity: NoticeSeverity) {}
}
