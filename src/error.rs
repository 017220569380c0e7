//! Crate-level error types.

use std::fmt;

use web_time::Duration;

/// Errors produced by the anima crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnimaError {
    /// A transition config was rejected before any sub-effect started.
    InvalidConfig(String),
    /// A sub-effect failed while a transition was running.
    Effect(String),
    /// A transition exceeded its duration plus the configured grace
    /// period without completing (stalled host clock or runaway effect).
    Deadline {
        /// The transition that was abandoned.
        transition_id: String,
        /// How long the transition had been running when it was abandoned.
        elapsed: Duration,
    },
    /// Resource pool allocation failure.
    PoolExhausted {
        /// Requested allocation size in bytes.
        requested: usize,
        /// Pool capacity in bytes.
        max_usage: usize,
    },
    /// TOML preset parsing/serialization failure.
    PresetParse(String),
}

impl fmt::Display for AnimaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfig(msg) => {
                write!(f, "invalid transition config: {msg}")
            }
            Self::Effect(msg) => write!(f, "sub-effect error: {msg}"),
            Self::Deadline {
                transition_id,
                elapsed,
            } => write!(
                f,
                "transition {transition_id} exceeded its deadline after \
                 {elapsed:?}"
            ),
            Self::PoolExhausted {
                requested,
                max_usage,
            } => write!(
                f,
                "pool exhausted: requested {requested} bytes with a \
                 {max_usage}-byte capacity"
            ),
            Self::PresetParse(msg) => {
                write!(f, "preset parse error: {msg}")
            }
        }
    }
}

impl std::error::Error for AnimaError {}
