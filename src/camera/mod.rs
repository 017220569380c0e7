//! Camera path animation.
//!
//! A [`CameraPath`] is a non-empty ordered sequence of timed
//! [`CameraWaypoint`]s plus a [`CameraPathKind`] that layers a
//! kind-specific motion transform on top of plain waypoint interpolation.
//! [`CameraPathAnimator`] walks the sequence against injected timestamps.

mod animator;
pub mod paths;

pub use animator::{AnimatorState, CameraPathAnimator, CameraState};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use web_time::Duration;

use crate::easing::Easing;

/// One keyframe in a camera path. Durations are additive: waypoint N ends
/// at the sum of durations 0..=N.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraWaypoint {
    /// Target camera position at waypoint end.
    pub position: Vec3,
    /// Target camera rotation (Euler angles, radians) at waypoint end.
    pub rotation: Vec3,
    /// Target camera zoom at waypoint end.
    pub zoom: f32,
    /// Time to travel this segment.
    pub duration: Duration,
    /// Easing applied to this segment's local progress.
    pub easing: Easing,
}

/// Post-interpolation motion transform layered over the waypoint walk.
///
/// Each variant carries its own parameters; `Linear` applies nothing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "type")]
pub enum CameraPathKind {
    /// Plain waypoint interpolation.
    Linear,
    /// Circle around the origin in the XZ plane, one revolution per
    /// transition.
    Orbital {
        /// Orbit radius.
        radius: f32,
    },
    /// Inward spiral: radius shrinks to zero while height rises, sweeping
    /// `turns` revolutions.
    Spiral {
        /// Starting radius.
        radius: f32,
        /// Revolutions over the transition.
        turns: f32,
        /// Final height.
        height: f32,
    },
    /// Decaying handheld-style jitter plus smoothed rotation toward the
    /// path's rotation settings.
    Cinematic {
        /// Peak jitter amplitude (decays to zero at completion).
        shake_amplitude: f32,
    },
    /// Vertical arc between endpoints with proportional roll.
    Curved {
        /// Peak height of the arc.
        curvature: f32,
    },
}

impl CameraPathKind {
    /// Orbital motion with the standard radius.
    pub const ORBITAL: Self = Self::Orbital { radius: 2.0 };
    /// Spiral motion with the standard radius/turns/height.
    pub const SPIRAL: Self = Self::Spiral {
        radius: 2.0,
        turns: 2.0,
        height: 2.0,
    };
    /// Cinematic motion with the standard jitter amplitude.
    pub const CINEMATIC: Self = Self::Cinematic {
        shake_amplitude: 0.02,
    };
    /// Curved motion with the standard arc height.
    pub const CURVED: Self = Self::Curved { curvature: 0.5 };
}

/// Rotation settings applied by cinematic motion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RotationSettings {
    /// Target pitch offset (radians).
    pub pitch: f32,
    /// Target yaw offset (radians).
    pub yaw: f32,
    /// Target roll offset (radians).
    pub roll: f32,
    /// How strongly progress pulls rotation toward the target, in [0, 1].
    pub smoothness: f32,
}

impl Default for RotationSettings {
    fn default() -> Self {
        Self {
            pitch: 0.0,
            yaw: 0.0,
            roll: 0.0,
            smoothness: 0.8,
        }
    }
}

/// Camera zoom envelope over the whole path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomSettings {
    /// Zoom at path start.
    pub start: f32,
    /// Zoom at path end.
    pub end: f32,
    /// Smoothing factor in [0, 1].
    pub smoothness: f32,
}

impl Default for ZoomSettings {
    fn default() -> Self {
        Self {
            start: 1.0,
            end: 1.0,
            smoothness: 0.5,
        }
    }
}

/// A complete camera path: waypoints plus the kind-specific overlay.
///
/// Invariant: `waypoints` is non-empty for a path that animates; an empty
/// path completes immediately with progress 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraPath {
    /// Motion transform layered over waypoint interpolation.
    pub kind: CameraPathKind,
    /// Ordered keyframes with additive durations.
    pub waypoints: Vec<CameraWaypoint>,
    /// Rotation settings consumed by cinematic motion.
    pub rotation: RotationSettings,
    /// Zoom envelope.
    pub zoom: ZoomSettings,
}

impl CameraPath {
    /// Total duration across all waypoints.
    #[must_use]
    pub fn total_duration(&self) -> Duration {
        self.waypoints.iter().map(|w| w.duration).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_duration_is_additive() {
        let path = paths::linear(
            Vec3::ZERO,
            Vec3::ONE,
            Duration::from_millis(2000),
        );
        assert_eq!(path.total_duration(), Duration::from_millis(2000));
        assert_eq!(path.waypoints.len(), 2);
        assert_eq!(path.waypoints[0].duration, Duration::from_millis(1000));
        assert_eq!(path.waypoints[1].duration, Duration::from_millis(1000));
    }

    #[test]
    fn test_kind_serde_tagging() {
        let kind = CameraPathKind::SPIRAL;
        let json = serde_json::to_string(&kind).unwrap();
        assert!(json.contains("\"type\":\"spiral\""));
        let back: CameraPathKind = serde_json::from_str(&json).unwrap();
        assert_eq!(back, kind);
    }
}
