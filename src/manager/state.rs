//! Reducer-driven transition state.

use std::collections::VecDeque;

use crate::transition::TransitionConfig;

/// Observable state of the transition manager.
///
/// Invariant: `current.is_some() == is_active`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransitionState {
    /// Whether a transition is running (or paused mid-run).
    pub is_active: bool,
    /// Overall progress of the running transition in [0, 1].
    pub progress: f32,
    /// Config of the running (or paused) transition.
    pub current: Option<TransitionConfig>,
    /// Transitions awaiting execution, FIFO.
    pub queue: VecDeque<TransitionConfig>,
    /// Whether the running transition is paused.
    pub is_paused: bool,
    /// Message from the most recent failed transition.
    pub error: Option<String>,
}

/// State machine input. Every mutation of [`TransitionState`] goes
/// through [`reduce`].
#[derive(Debug, Clone)]
pub enum TransitionAction {
    /// Begin running a transition.
    Start(TransitionConfig),
    /// Record overall progress.
    Progress(f32),
    /// The running transition finished.
    Complete,
    /// The running transition failed.
    Error(String),
    /// Abort the running transition and drop the queue.
    Cancel,
    /// Freeze the running transition.
    Pause,
    /// Unfreeze a paused transition.
    Resume,
    /// Append a transition to the queue.
    Queue(TransitionConfig),
}

/// Apply one action. Pure except for moving configs in and out of the
/// queue.
pub fn reduce(state: &mut TransitionState, action: TransitionAction) {
    match action {
        TransitionAction::Start(config) => {
            state.is_active = true;
            state.current = Some(config);
            state.progress = 0.0;
            state.error = None;
        }
        TransitionAction::Progress(progress) => {
            state.progress = progress;
        }
        TransitionAction::Complete => {
            state.is_active = false;
            state.current = None;
            state.progress = 1.0;
            // The queue pump starts the head without removing it, so the
            // completed entry is dropped here.
            let _ = state.queue.pop_front();
        }
        TransitionAction::Error(message) => {
            state.is_active = false;
            state.current = None;
            state.error = Some(message);
        }
        TransitionAction::Cancel => {
            state.is_active = false;
            state.current = None;
            state.progress = 0.0;
            state.queue.clear();
        }
        TransitionAction::Pause => {
            state.is_paused = true;
        }
        TransitionAction::Resume => {
            state.is_paused = false;
        }
        TransitionAction::Queue(config) => {
            state.queue.push_back(config);
        }
    }
}
