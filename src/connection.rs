//! Inter-system connection visualization.
//!
//! A [`SystemConnection`] describes an animated link between organs of
//! two body systems. [`ConnectionVisualizer`] drives one lightweight
//! particle swarm per connection: particles chase a point sliding along
//! the connection path, offset by organic jitter.

use glam::Vec3;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use web_time::{Duration, Instant};

use crate::body_system::BodySystem;

/// Retained trail positions per connection particle.
const TRAIL_CAP: usize = 10;

/// Progress window for [`ConnectionVisualizer::progress`].
const PROGRESS_WINDOW: Duration = Duration::from_millis(3000);

/// Physiological category of a connection, which selects its color.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum ConnectionKind {
    /// Nerve signaling pathways.
    Neural,
    /// Blood supply and drainage.
    Vascular,
    /// Endocrine signaling.
    Hormonal,
    /// Systems cooperating in one physiological function.
    Functional,
    /// Physical adjacency or support.
    Structural,
}

impl ConnectionKind {
    /// RGB color for particles of this connection kind.
    #[must_use]
    pub fn color(self) -> [f32; 3] {
        match self {
            Self::Neural => [1.0, 1.0, 0.0],
            Self::Vascular => [1.0, 0.0, 0.502],
            Self::Hormonal => [0.0, 1.0, 1.0],
            Self::Functional => [1.0, 0.502, 0.0],
            Self::Structural => [1.0, 1.0, 1.0],
        }
    }

    /// Classify a relationship name (English or Polish) into a kind.
    /// Unmatched names are structural.
    #[must_use]
    pub fn from_relationship(name: &str) -> Self {
        let lower = name.to_lowercase();
        if lower.contains("nervous") || lower.contains("nerwowy") {
            Self::Neural
        } else if lower.contains("vascular") || lower.contains("naczyniowy")
        {
            Self::Vascular
        } else if lower.contains("hormonal") || lower.contains("hormon") {
            Self::Hormonal
        } else if lower.contains("functional") || lower.contains("funkcj") {
            Self::Functional
        } else {
            Self::Structural
        }
    }
}

/// Path animation style (currently only affects metadata).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum PathAnimation {
    /// Particles stream continuously along the path.
    #[default]
    Flow,
    /// Particles surge in waves.
    Pulse,
    /// No path-level animation.
    Static,
}

/// Geometric path a connection's particles travel along.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConnectionPath {
    /// Ordered polyline vertices.
    pub points: Vec<Vec3>,
    /// Arc strength hint for renderers that curve the polyline.
    pub curvature: f32,
    /// Path-level animation style.
    pub animation: PathAnimation,
    /// Travel speed multiplier.
    pub speed: f32,
}

impl Default for ConnectionPath {
    fn default() -> Self {
        Self {
            points: vec![
                Vec3::ZERO,
                Vec3::splat(0.5),
                Vec3::ONE,
            ],
            curvature: 0.5,
            animation: PathAnimation::Flow,
            speed: 1.0,
        }
    }
}

impl ConnectionPath {
    /// Piecewise-linear lookup along the polyline at `progress` in [0, 1].
    ///
    /// Empty paths resolve to the origin, single-point paths to that
    /// point. `progress == 1` lands exactly on the last point.
    #[must_use]
    pub fn point_along(&self, progress: f32) -> Vec3 {
        let points = &self.points;
        match points.len() {
            0 => Vec3::ZERO,
            1 => points[0],
            n => {
                let p = progress.clamp(0.0, 1.0);
                let segments = (n - 1) as f32;
                let index =
                    ((p * segments) as usize).min(n - 2);
                let local = p * segments - index as f32;
                points[index].lerp(points[index + 1], local)
            }
        }
    }
}

/// An animated link between organs of two body systems.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemConnection {
    /// Stable identifier.
    pub id: String,
    /// Organ the connection originates from.
    pub source_organ_id: String,
    /// Organ the connection leads to.
    pub target_organ_id: String,
    /// Connection strength in [0, 1]; sizes the particle swarm.
    pub strength: f32,
    /// Physiological category.
    pub kind: ConnectionKind,
    /// Geometry the swarm travels along.
    pub path: ConnectionPath,
}

/// One particle of a connection swarm.
#[derive(Debug, Clone)]
pub struct ConnectionParticle {
    /// World-space position.
    pub position: Vec3,
    /// Remaining life; the particle dies at 0.
    pub life: f32,
    /// Render size.
    pub size: f32,
    /// RGB color, from the connection kind.
    pub color: [f32; 3],
    /// Recent positions for trail rendering.
    pub trail: Vec<Vec3>,
}

/// Per-connection swarm: `floor(strength*20)+5` particles chasing the
/// path.
#[derive(Debug)]
struct ConnectionSwarm {
    connection: SystemConnection,
    particles: Vec<ConnectionParticle>,
    progress: f32,
}

impl ConnectionSwarm {
    fn new(connection: SystemConnection) -> Self {
        let count =
            (connection.strength.clamp(0.0, 1.0) * 20.0) as usize + 5;
        let spawn = connection.path.point_along(0.0);
        let color = connection.kind.color();
        let particles = (0..count)
            .map(|_| ConnectionParticle {
                position: spawn,
                life: 1.0,
                size: 0.02 + rand::random::<f32>() * 0.03,
                color,
                trail: Vec::new(),
            })
            .collect();
        Self {
            connection,
            particles,
            progress: 0.0,
        }
    }

    fn update(&mut self, progress: f32) {
        self.progress = progress;
        for (i, p) in self.particles.iter_mut().enumerate() {
            // Each particle trails the previous one by a tenth of the
            // path, wrapping at the end.
            let path_progress = (progress + i as f32 * 0.1) % 1.0;
            let target = self.connection.path.point_along(path_progress);
            p.position += (target - p.position) * 0.1;
            p.position.x += (progress * 2.0 + i as f32).sin() * 0.01;
            p.position.y += (progress * 1.5 + i as f32).cos() * 0.01;

            let position = p.position;
            p.trail.push(position);
            if p.trail.len() > TRAIL_CAP {
                let _ = p.trail.remove(0);
            }
            p.life -= 0.016;
        }
        self.particles.retain(|p| p.life > 0.0);
    }

    fn stop(&mut self) {
        self.particles.clear();
    }
}

/// Animates every connection's particle swarm against injected
/// timestamps.
#[derive(Debug)]
pub struct ConnectionVisualizer {
    swarms: FxHashMap<String, ConnectionSwarm>,
    order: Vec<String>,
    start_time: Option<Instant>,
    duration: Duration,
    animating: bool,
    completed: bool,
}

impl ConnectionVisualizer {
    /// Build one swarm per connection, idle until started.
    #[must_use]
    pub fn new(connections: Vec<SystemConnection>) -> Self {
        let mut swarms = FxHashMap::default();
        let mut order = Vec::with_capacity(connections.len());
        for connection in connections {
            order.push(connection.id.clone());
            let _ = swarms.insert(
                connection.id.clone(),
                ConnectionSwarm::new(connection),
            );
        }
        Self {
            swarms,
            order,
            start_time: None,
            duration: Duration::ZERO,
            animating: false,
            completed: false,
        }
    }

    /// Begin animating every swarm for `duration`.
    pub fn start(&mut self, now: Instant, duration: Duration) {
        self.animating = true;
        self.completed = false;
        self.start_time = Some(now);
        self.duration = duration;
    }

    /// Stop without completing and drop all swarm particles.
    pub fn stop(&mut self) {
        self.animating = false;
        self.start_time = None;
        for swarm in self.swarms.values_mut() {
            swarm.stop();
        }
    }

    /// Whether the swarms are animating.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.animating
    }

    /// Whether the visualizer ran for its full duration.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.completed
    }

    /// Time-based progress over the standard 3 s window.
    #[must_use]
    pub fn progress(&self, now: Instant) -> f32 {
        if self.completed {
            return 1.0;
        }
        let Some(start) = (self.animating)
            .then_some(self.start_time)
            .flatten()
        else {
            return 0.0;
        };
        let elapsed = now.saturating_duration_since(start);
        (elapsed.as_secs_f32() / PROGRESS_WINDOW.as_secs_f32()).min(1.0)
    }

    /// Advance every swarm to the overall progress at `now` and return it.
    pub fn update(&mut self, now: Instant) -> f32 {
        let Some(start) = self.start_time else {
            return if self.completed { 1.0 } else { 0.0 };
        };
        if !self.animating {
            return if self.completed { 1.0 } else { 0.0 };
        }
        let elapsed = now.saturating_duration_since(start);
        let progress = if self.duration.is_zero() {
            1.0
        } else {
            (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
        };
        for swarm in self.swarms.values_mut() {
            swarm.update(progress);
        }
        if progress >= 1.0 {
            self.animating = false;
            self.completed = true;
        }
        progress
    }

    /// Connection ids with a live swarm, in construction order.
    #[must_use]
    pub fn active_connections(&self) -> Vec<&str> {
        self.order
            .iter()
            .filter(|id| self.swarms.contains_key(id.as_str()))
            .map(String::as_str)
            .collect()
    }

    /// Current particle positions per connection, for rendering.
    #[must_use]
    pub fn particle_positions(&self) -> FxHashMap<String, Vec<Vec3>> {
        self.swarms
            .iter()
            .map(|(id, swarm)| {
                (
                    id.clone(),
                    swarm
                        .particles
                        .iter()
                        .map(|p| p.position)
                        .collect(),
                )
            })
            .collect()
    }

    /// All live particles of one connection.
    #[must_use]
    pub fn particles(&self, connection_id: &str) -> &[ConnectionParticle] {
        self.swarms
            .get(connection_id)
            .map_or(&[], |s| &s.particles)
    }
}

/// Derive connections between two systems from their shared anatomical
/// relationships. Each shared relationship links the systems' first
/// organs with strength 0.7 over the standard three-point path.
#[must_use]
pub fn generate_system_connections(
    source: &BodySystem,
    target: &BodySystem,
) -> Vec<SystemConnection> {
    source
        .connections
        .iter()
        .enumerate()
        .filter(|(_, relationship)| {
            target.connections.contains(relationship)
        })
        .map(|(index, relationship)| SystemConnection {
            id: format!("connection-{}-{}-{index}", source.id, target.id),
            source_organ_id: source
                .organs
                .first()
                .map_or_else(|| "unknown".to_owned(), |o| o.id.clone()),
            target_organ_id: target
                .organs
                .first()
                .map_or_else(|| "unknown".to_owned(), |o| o.id.clone()),
            strength: 0.7,
            kind: ConnectionKind::from_relationship(relationship),
            path: ConnectionPath::default(),
        })
        .collect()
}
