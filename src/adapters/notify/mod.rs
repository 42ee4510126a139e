//! Notifier adapters.

use std::sync::Mutex;

use crate::domain::ports::{NoticeSeverity, Notifier};

/// Notifier that routes notices to the tracing subscriber. Default sink
/// for headless embedders and the CLI.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, message: &str, severity: NoticeSeverity) {
        match severity {
            NoticeSeverity::Info | NoticeSeverity::Success => {
                tracing::info!(notice = %message, "workflow notice");
            }
            NoticeSeverity::Warning => tracing::warn!(notice = %message, "workflow notice"),
            NoticeSeverity::Error => tracing::error!(notice = %message, "workflow notice"),
        }
    }
}

/// Notifier that records every notice, for asserting on user-visible
/// messages in tests.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<(String, NoticeSeverity)>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// All notices recorded so far, in order.
    pub fn notices(&self) -> Vec<(String, NoticeSeverity)> {
        self.notices.lock().expect("notifier lock poisoned").clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str, severity: NoticeSeverity) {
        self.notices
            .lock()
            .expect("notifier lock poisoned")
            .push((message.to_string(), severity));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_notifier_keeps_order() {
        let notifier = RecordingNotifier::new();
        notifier.notify("first", NoticeSeverity::Info);
        notifier.notify("second", NoticeSeverity::Error);

        let notices = notifier.notices();
        assert_eq!(notices.len(), 2);
        assert_eq!(notices[0], ("first".to_string(), NoticeSeverity::Info));
        assert_eq!(notices[1], ("second".to_string(), NoticeSeverity::Error));
    }

    #[test]
    fn test_tracing_notifier_accepts_all_severities() {
        let notifier = TracingNotifier;
        for severity in [
            NoticeSeverity::Info,
            NoticeSeverity::Success,
            NoticeSeverity::Warning,
            NoticeSeverity::Error,
        ] {
            notifier.notify("notice", severity);
        }
    }
}
