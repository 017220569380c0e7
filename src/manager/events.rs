//! Transition lifecycle events.

use web_time::Instant;

/// What happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// A transition began.
    Start,
    /// Throttled progress report.
    Progress,
    /// A transition finished.
    Complete,
    /// A transition failed.
    Error,
    /// A transition was cancelled.
    Cancel,
}

/// One lifecycle notification delivered to subscribers.
#[derive(Debug, Clone)]
pub struct TransitionEvent {
    /// What happened.
    pub kind: EventKind,
    /// The transition this event concerns.
    pub transition_id: String,
    /// Progress at emission time.
    pub progress: f32,
    /// When the event was emitted (host clock).
    pub timestamp: Instant,
    /// Extra payload, e.g. `{"error": "..."}` on failures.
    pub data: Option<serde_json::Value>,
}

impl TransitionEvent {
    pub(crate) fn new(
        kind: EventKind,
        transition_id: &str,
        progress: f32,
        timestamp: Instant,
    ) -> Self {
        Self {
            kind,
            transition_id: transition_id.to_owned(),
            progress,
            timestamp,
            data: None,
        }
    }

    pub(crate) fn with_error(mut self, message: &str) -> Self {
        self.data = Some(serde_json::json!({ "error": message }));
        self
    }
}
