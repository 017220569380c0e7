//! Particle simulation for transition effects.
//!
//! A [`ParticleSystem`] maintains a bounded pool of [`Particle`]s whose
//! spawn randomization and per-tick force field are selected by the
//! effect's [`ParticleEffectKind`]. Simulation runs at a fixed 16 ms
//! timestep per update, driven by injected timestamps.

mod effect;
mod system;

pub use effect::{effects, ParticleEffect, ParticleEffectKind};
use glam::Vec3;
pub use system::{ParticleSystem, EFFECT_PROGRESS_WINDOW};

/// One simulated particle.
///
/// Created with kind-specific randomized position/velocity, mutated every
/// simulation tick, and dropped from the pool once `life` reaches zero.
#[derive(Debug, Clone)]
pub struct Particle {
    /// Pool-unique identifier.
    pub id: u64,
    /// World-space position.
    pub position: Vec3,
    /// Velocity, integrated each tick.
    pub velocity: Vec3,
    /// Acceleration, reassigned by the force field each tick.
    pub acceleration: Vec3,
    /// Remaining life in [0, 1]; the particle dies at 0.
    pub life: f32,
    /// Lifetime in seconds; life decays by `dt / max_life` per tick.
    pub max_life: f32,
    /// Render size.
    pub size: f32,
    /// RGB color.
    pub color: [f32; 3],
    /// Render opacity, tracks `life`.
    pub opacity: f32,
    /// Recent positions for trail rendering (trail effect only).
    pub trail: Vec<Vec3>,
    /// Billboard rotation in radians.
    pub rotation: f32,
    /// Rotation speed in radians per second.
    pub angular_velocity: f32,
}
