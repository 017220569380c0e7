// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits (thresholds in clippy.toml)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Anatomical body-system transition and animation engine.
//!
//! Anima animates transitions between anatomical body systems: camera
//! flights along configurable paths, particle effects, overlay blending,
//! inter-system connection swarms, and Polish-language label narration,
//! all coordinated by a single state machine.
//!
//! # Key entry points
//!
//! - [`manager::SystemTransitionManager`] - orchestrates the full
//!   transition lifecycle
//! - [`transition::TransitionConfig`] - describes one transition
//!   ([`transition::create_system_transition`] builds a sensible default,
//!   [`transition::presets`] ship tuned variants)
//! - [`body_system::BodySystem`] - the anatomical data model
//! - [`frame::AnimationFrameManager`] - host-driven frame scheduling
//!
//! # Architecture
//!
//! The manager owns every sub-effect of the active transition and drives
//! them from a single host-supplied clock: each `tick(now)` advances the
//! frame scheduler, the camera animator, and the particle, overlay, glow,
//! and label effects, then emits throttled progress events to listeners.
//! All effect state is computed on the CPU; the optional `gpu` feature
//! adds wgpu presentation of the same state.

pub mod body_system;
pub mod camera;
pub mod capabilities;
pub mod connection;
pub mod easing;
pub mod error;
pub mod frame;
#[cfg(feature = "gpu")]
pub mod gpu;
pub mod labels;
pub mod manager;
pub mod memory;
pub mod overlay;
pub mod particles;
pub mod transition;
