//! Particle effect configuration and presets.

use serde::{Deserialize, Serialize};
use web_time::Duration;

/// Selects the spawn region and force field of a particle effect.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum ParticleEffectKind {
    /// Particles spring back toward the origin with mild turbulence and
    /// leave position trails.
    Trail,
    /// Burst particles under gravity with velocity damping and random
    /// impulses.
    Spark,
    /// Slow upward drift with a sinusoidal current in the XZ plane.
    Flow,
    /// Particles orbit a moving target and weakly attract each other.
    Connection,
}

/// Static configuration for one particle effect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParticleEffect {
    /// Spawn/force behavior.
    pub kind: ParticleEffectKind,
    /// Target pool size; the live pool is refilled to this count and
    /// capped at twice it.
    pub count: usize,
    /// Render size of each particle.
    pub size: f32,
    /// Initial speed scale applied to spawn velocity.
    pub speed: f32,
    /// Base RGB color.
    pub color: [f32; 3],
    /// Per-particle lifetime.
    pub lifetime: Duration,
    /// Offset the whole effect by a fraction of the camera position.
    pub follow_camera: bool,
}

impl Default for ParticleEffect {
    fn default() -> Self {
        effects::trail()
    }
}

/// Stock effect configurations matching the built-in transition styles.
pub mod effects {
    use super::{ParticleEffect, ParticleEffectKind};
    use web_time::Duration;

    /// White camera-following trail, 50 particles over 2 s.
    #[must_use]
    pub fn trail() -> ParticleEffect {
        ParticleEffect {
            kind: ParticleEffectKind::Trail,
            count: 50,
            size: 0.02,
            speed: 0.5,
            color: [1.0, 1.0, 1.0],
            lifetime: Duration::from_millis(2000),
            follow_camera: true,
        }
    }

    /// Yellow spark burst, 100 particles over 1.5 s.
    #[must_use]
    pub fn spark() -> ParticleEffect {
        ParticleEffect {
            kind: ParticleEffectKind::Spark,
            count: 100,
            size: 0.03,
            speed: 1.0,
            color: [1.0, 1.0, 0.0],
            lifetime: Duration::from_millis(1500),
            follow_camera: false,
        }
    }

    /// Cyan ambient flow, 30 particles over 3 s.
    #[must_use]
    pub fn flow() -> ParticleEffect {
        ParticleEffect {
            kind: ParticleEffectKind::Flow,
            count: 30,
            size: 0.025,
            speed: 0.3,
            color: [0.0, 1.0, 1.0],
            lifetime: Duration::from_millis(3000),
            follow_camera: false,
        }
    }

    /// Magenta inter-system connection swarm, 75 particles over 2.5 s.
    #[must_use]
    pub fn connection() -> ParticleEffect {
        ParticleEffect {
            kind: ParticleEffectKind::Connection,
            count: 75,
            size: 0.02,
            speed: 0.4,
            color: [1.0, 0.0, 1.0],
            lifetime: Duration::from_millis(2500),
            follow_camera: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_have_expected_counts() {
        assert_eq!(effects::trail().count, 50);
        assert_eq!(effects::spark().count, 100);
        assert_eq!(effects::flow().count, 30);
        assert_eq!(effects::connection().count, 75);
    }

    #[test]
    fn test_only_trail_follows_camera() {
        assert!(effects::trail().follow_camera);
        assert!(!effects::spark().follow_camera);
        assert!(!effects::flow().follow_camera);
        assert!(!effects::connection().follow_camera);
    }

    #[test]
    fn test_kind_serde_camel_case() {
        let json =
            serde_json::to_string(&ParticleEffectKind::Connection).unwrap();
        assert_eq!(json, "\"connection\"");
    }
}
