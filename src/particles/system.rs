//! Fixed-timestep particle pool simulation.

use glam::Vec3;
use web_time::{Duration, Instant};

use super::{Particle, ParticleEffect, ParticleEffectKind};

/// Simulation timestep per update call, in seconds.
const DT: f32 = 0.016;

/// Maximum retained trail positions per particle.
const TRAIL_CAP: usize = 15;

/// Window over which [`ParticleSystem::progress`] ramps from 0 to 1,
/// independent of the effect's own duration.
pub const EFFECT_PROGRESS_WINDOW: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SystemState {
    Idle,
    Running,
    Completed,
}

/// A pool of particles simulated with a fixed 16 ms timestep.
///
/// The pool is seeded to `effect.count` particles on [`start`], refilled
/// back to that count as particles die, and hard-capped at twice it.
/// Timestamps are injected; each [`update`] call advances the simulation
/// by exactly one timestep.
///
/// [`start`]: ParticleSystem::start
/// [`update`]: ParticleSystem::update
#[derive(Debug)]
pub struct ParticleSystem {
    effect: ParticleEffect,
    particles: Vec<Particle>,
    state: SystemState,
    start_time: Option<Instant>,
    duration: Duration,
    last_emission: Duration,
    emission_interval: Duration,
    camera_offset: Vec3,
    next_id: u64,
}

impl ParticleSystem {
    /// System for `effect`, idle until started.
    #[must_use]
    pub fn new(effect: ParticleEffect) -> Self {
        // Emission rate scales with pool size: count*2 emissions/second.
        let per_second = (effect.count.max(1) * 2) as f64;
        Self {
            effect,
            particles: Vec::new(),
            state: SystemState::Idle,
            start_time: None,
            duration: Duration::ZERO,
            last_emission: Duration::ZERO,
            emission_interval: Duration::from_secs_f64(1.0 / per_second),
            camera_offset: Vec3::ZERO,
            next_id: 0,
        }
    }

    /// Seed the pool and begin simulating for `duration`.
    pub fn start(&mut self, now: Instant, duration: Duration) {
        self.particles.clear();
        self.next_id = 0;
        for _ in 0..self.effect.count {
            let particle = self.spawn();
            self.particles.push(particle);
        }
        self.state = SystemState::Running;
        self.start_time = Some(now);
        self.duration = duration;
        self.last_emission = Duration::ZERO;
    }

    /// Stop simulating and drop all particles.
    pub fn stop(&mut self) {
        self.state = SystemState::Idle;
        self.start_time = None;
        self.particles.clear();
    }

    /// Whether the simulation is running.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.state == SystemState::Running
    }

    /// Whether the effect ran for its full duration.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.state == SystemState::Completed
    }

    /// Live particles, for rendering.
    #[must_use]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// World-space offset for camera-following effects. Applied on top of
    /// simulated positions when `effect.follow_camera` is set.
    pub fn set_camera_position(&mut self, position: Vec3) {
        if self.effect.follow_camera {
            self.camera_offset = position * 0.1;
        }
    }

    /// The offset currently applied for camera-following effects.
    #[must_use]
    pub fn camera_offset(&self) -> Vec3 {
        self.camera_offset
    }

    /// Time-based progress over the standard 2 s window, clamped to 1.
    /// Reports 0 before [`start`] and 1 after completion.
    ///
    /// [`start`]: ParticleSystem::start
    #[must_use]
    pub fn progress(&self, now: Instant) -> f32 {
        match (self.state, self.start_time) {
            (SystemState::Running, Some(start)) => {
                let elapsed = now.saturating_duration_since(start);
                (elapsed.as_secs_f32()
                    / EFFECT_PROGRESS_WINDOW.as_secs_f32())
                .min(1.0)
            }
            (SystemState::Completed, _) => 1.0,
            _ => 0.0,
        }
    }

    /// Advance the simulation by one timestep: emit, integrate forces,
    /// cull the dead, refill the pool. Returns progress over the effect's
    /// duration.
    pub fn update(&mut self, now: Instant) -> f32 {
        let Some(start) = self.start_time else {
            return 0.0;
        };
        if self.state != SystemState::Running {
            return if self.state == SystemState::Completed {
                1.0
            } else {
                0.0
            };
        }
        let elapsed = now.saturating_duration_since(start);

        self.emit(elapsed);
        self.integrate(elapsed);
        self.particles.retain(|p| p.life > 0.0);
        while self.particles.len() < self.effect.count {
            let particle = self.spawn();
            self.particles.push(particle);
        }

        if elapsed >= self.duration && !self.duration.is_zero() {
            self.state = SystemState::Completed;
            return 1.0;
        }
        if self.duration.is_zero() {
            self.state = SystemState::Completed;
            return 1.0;
        }
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    /// Add a batch of particles when the emission interval has elapsed,
    /// never exceeding twice the configured count.
    fn emit(&mut self, elapsed: Duration) {
        if elapsed.saturating_sub(self.last_emission)
            < self.emission_interval
        {
            return;
        }
        self.last_emission = elapsed;
        let batch = (self.effect.count / 20).max(1);
        let cap = self.effect.count * 2;
        for _ in 0..batch {
            if self.particles.len() >= cap {
                break;
            }
            let particle = self.spawn();
            self.particles.push(particle);
        }
    }

    fn integrate(&mut self, elapsed: Duration) {
        let t = elapsed.as_secs_f32();
        // Connection forces need every other particle's position.
        let positions: Vec<Vec3> = if self.effect.kind
            == ParticleEffectKind::Connection
        {
            self.particles.iter().map(|p| p.position).collect()
        } else {
            Vec::new()
        };

        let kind = self.effect.kind;
        let is_trail = kind == ParticleEffectKind::Trail;
        for (i, p) in self.particles.iter_mut().enumerate() {
            apply_forces(kind, p, t, i, &positions);
            let acceleration = p.acceleration;
            p.velocity += acceleration * DT;
            let velocity = p.velocity;
            p.position += velocity * DT;
            p.rotation += p.angular_velocity * DT;

            if is_trail {
                let position = p.position;
                p.trail.push(position);
                if p.trail.len() > TRAIL_CAP {
                    let _ = p.trail.remove(0);
                }
            }

            p.life -= DT / p.max_life;
            p.opacity = p.life.max(0.0);
        }
    }

    fn spawn(&mut self) -> Particle {
        let id = self.next_id;
        self.next_id += 1;
        let effect = &self.effect;
        let position = match effect.kind {
            ParticleEffectKind::Trail => Vec3::ZERO,
            ParticleEffectKind::Spark => centered(2.0),
            ParticleEffectKind::Flow => {
                let xy = centered(0.5);
                Vec3::new(xy.x, xy.y, 0.0)
            }
            ParticleEffectKind::Connection => centered(1.0),
        };
        Particle {
            id,
            position,
            velocity: centered(effect.speed),
            acceleration: Vec3::ZERO,
            life: 1.0,
            max_life: effect.lifetime.as_secs_f32(),
            size: effect.size,
            color: effect.color,
            opacity: 1.0,
            trail: Vec::new(),
            rotation: rand::random::<f32>() * std::f32::consts::TAU,
            angular_velocity: (rand::random::<f32>() - 0.5) * 0.1,
        }
    }
}

/// Uniform random vector with each component in `[-scale/2, scale/2]`.
fn centered(scale: f32) -> Vec3 {
    Vec3::new(
        (rand::random::<f32>() - 0.5) * scale,
        (rand::random::<f32>() - 0.5) * scale,
        (rand::random::<f32>() - 0.5) * scale,
    )
}

/// Reassign a particle's acceleration from its effect's force field.
/// `t` is seconds since the effect started; `positions` holds every
/// particle's position and is only populated for connection effects.
fn apply_forces(
    kind: ParticleEffectKind,
    p: &mut Particle,
    t: f32,
    index: usize,
    positions: &[Vec3],
) {
    match kind {
        ParticleEffectKind::Trail => {
            // Spring toward origin plus turbulence.
            p.acceleration = p.position * -0.05
                + Vec3::new(
                    (rand::random::<f32>() - 0.5) * 0.1,
                    (rand::random::<f32>() - 0.5) * 0.1,
                    (rand::random::<f32>() - 0.5) * 0.1,
                );
        }
        ParticleEffectKind::Spark => {
            p.acceleration = Vec3::new(0.0, -0.1, 0.0);
            p.velocity *= 0.98;
            if rand::random::<f32>() < 0.02 {
                p.velocity += centered(0.2);
            }
        }
        ParticleEffectKind::Flow => {
            p.acceleration = Vec3::new(
                t.sin() * 0.05,
                0.02,
                t.cos() * 0.05,
            );
        }
        ParticleEffectKind::Connection => {
            let target = Vec3::new(
                (t * 2.0).sin() * 0.5,
                p.position.y,
                (t * 2.0).cos() * 0.5,
            );
            p.acceleration = Vec3::new(
                (target.x - p.position.x) * 0.02,
                0.0,
                (target.z - p.position.z) * 0.02,
            );
            for (j, other) in positions.iter().enumerate() {
                if j == index {
                    continue;
                }
                let delta = *other - p.position;
                let dist = delta.length();
                if dist > 0.0 && dist < 0.2 {
                    let force = 0.01 / (dist * dist + 0.01);
                    p.acceleration += delta / dist * force;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particles::effects;

    fn start_at() -> Instant {
        Instant::now()
    }

    #[test]
    fn test_pool_seeded_to_count_and_capped() {
        let mut system = ParticleSystem::new(effects::trail());
        let start = start_at();
        system.start(start, Duration::from_millis(2000));
        assert_eq!(system.particles().len(), 50);

        let _ = system.update(start + Duration::from_millis(16));
        let len = system.particles().len();
        assert!(
            (50..=100).contains(&len),
            "pool size {len} outside [count, 2*count]"
        );
    }

    #[test]
    fn test_pool_never_exceeds_twice_count() {
        let mut system = ParticleSystem::new(effects::spark());
        let start = start_at();
        system.start(start, Duration::from_millis(10_000));
        for i in 1..200 {
            let _ = system.update(start + Duration::from_millis(16 * i));
            assert!(system.particles().len() <= 200);
        }
    }

    #[test]
    fn test_seeded_particles_die_within_lifetime() {
        let mut effect = effects::trail();
        effect.lifetime = Duration::from_millis(160);
        let mut system = ParticleSystem::new(effect);
        let start = start_at();
        system.start(start, Duration::from_millis(10_000));
        let seeded: Vec<u64> =
            system.particles().iter().map(|p| p.id).collect();

        // 0.16 s lifetime at a 16 ms timestep is 10 ticks.
        for i in 1..=11 {
            let _ = system.update(start + Duration::from_millis(16 * i));
        }
        for p in system.particles() {
            assert!(
                !seeded.contains(&p.id),
                "seed particle {} outlived its lifetime",
                p.id
            );
        }
        // Refill keeps the pool at count.
        assert!(system.particles().len() >= 50);
    }

    #[test]
    fn test_trail_length_capped() {
        let mut system = ParticleSystem::new(effects::trail());
        let start = start_at();
        system.start(start, Duration::from_millis(60_000));
        for i in 1..40 {
            let _ = system.update(start + Duration::from_millis(16 * i));
        }
        for p in system.particles() {
            assert!(p.trail.len() <= TRAIL_CAP);
        }
    }

    #[test]
    fn test_non_trail_particles_have_no_trail() {
        let mut system = ParticleSystem::new(effects::flow());
        let start = start_at();
        system.start(start, Duration::from_millis(60_000));
        for i in 1..10 {
            let _ = system.update(start + Duration::from_millis(16 * i));
        }
        assert!(system.particles().iter().all(|p| p.trail.is_empty()));
    }

    #[test]
    fn test_progress_window_is_fixed() {
        let mut system = ParticleSystem::new(effects::flow());
        let start = start_at();
        system.start(start, Duration::from_millis(8000));
        assert_eq!(system.progress(start), 0.0);
        let half = system.progress(start + Duration::from_millis(1000));
        assert!((half - 0.5).abs() < 1e-3);
        assert_eq!(
            system.progress(start + Duration::from_millis(3000)),
            1.0
        );
    }

    #[test]
    fn test_completion_after_duration() {
        let mut system = ParticleSystem::new(effects::spark());
        let start = start_at();
        system.start(start, Duration::from_millis(1500));
        assert!(system.is_animating());
        let p = system.update(start + Duration::from_millis(1500));
        assert_eq!(p, 1.0);
        assert!(system.is_complete());
        assert!(!system.is_animating());
    }

    #[test]
    fn test_stop_clears_pool() {
        let mut system = ParticleSystem::new(effects::connection());
        let start = start_at();
        system.start(start, Duration::from_millis(2500));
        assert!(!system.particles().is_empty());
        system.stop();
        assert!(system.particles().is_empty());
        assert!(!system.is_animating());
        assert_eq!(system.progress(start + Duration::from_secs(1)), 0.0);
    }

    #[test]
    fn test_camera_offset_only_for_follow_effects() {
        let mut trail = ParticleSystem::new(effects::trail());
        trail.set_camera_position(Vec3::new(10.0, 0.0, 0.0));
        assert_eq!(trail.camera_offset(), Vec3::new(1.0, 0.0, 0.0));

        let mut spark = ParticleSystem::new(effects::spark());
        spark.set_camera_position(Vec3::new(10.0, 0.0, 0.0));
        assert_eq!(spark.camera_offset(), Vec3::ZERO);
    }

    #[test]
    fn test_spark_damping_and_gravity() {
        let mut system = ParticleSystem::new(effects::spark());
        let start = start_at();
        system.start(start, Duration::from_millis(60_000));
        for i in 1..60 {
            let _ = system.update(start + Duration::from_millis(16 * i));
        }
        // Gravity dominates after a second of damping: the pool's mean
        // vertical velocity must be negative.
        let mean_vy: f32 = system
            .particles()
            .iter()
            .map(|p| p.velocity.y)
            .sum::<f32>()
            / system.particles().len() as f32;
        assert!(mean_vy < 0.0, "mean vy {mean_vy} not pulled down");
    }
}
