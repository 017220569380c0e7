//! Factory functions for common camera paths.
//!
//! Each factory produces a ready-to-animate [`CameraPath`] with the
//! standard waypoint layout for its motion style.

use glam::Vec3;
use web_time::Duration;

use super::{
    CameraPath, CameraPathKind, CameraWaypoint, RotationSettings,
    ZoomSettings,
};
use crate::easing::Easing;

/// Straight two-waypoint path from `from` to `to`, split evenly:
/// ease-out on departure, ease-in on arrival.
#[must_use]
pub fn linear(from: Vec3, to: Vec3, duration: Duration) -> CameraPath {
    let half = duration / 2;
    CameraPath {
        kind: CameraPathKind::Linear,
        waypoints: vec![
            CameraWaypoint {
                position: from,
                rotation: Vec3::ZERO,
                zoom: 1.0,
                duration: half,
                easing: Easing::EaseOut,
            },
            CameraWaypoint {
                position: to,
                rotation: Vec3::ZERO,
                zoom: 1.0,
                duration: half,
                easing: Easing::EaseIn,
            },
        ],
        rotation: RotationSettings::default(),
        zoom: ZoomSettings::default(),
    }
}

/// One full orbit around `center` at `radius`.
#[must_use]
pub fn orbital(center: Vec3, radius: f32, duration: Duration) -> CameraPath {
    CameraPath {
        kind: CameraPathKind::Orbital { radius },
        waypoints: vec![CameraWaypoint {
            position: center + Vec3::new(radius, 0.0, 0.0),
            rotation: Vec3::ZERO,
            zoom: 1.0,
            duration,
            easing: Easing::Linear,
        }],
        rotation: RotationSettings {
            smoothness: 0.9,
            ..Default::default()
        },
        zoom: ZoomSettings {
            start: 1.0,
            end: 1.0,
            smoothness: 1.0,
        },
    }
}

/// Dramatic two-stage reveal: high approach, then close-in with yaw.
#[must_use]
pub fn cinematic(target: Vec3, duration: Duration) -> CameraPath {
    CameraPath {
        kind: CameraPathKind::CINEMATIC,
        waypoints: vec![
            CameraWaypoint {
                position: target + Vec3::new(0.0, 3.0, 2.0),
                rotation: Vec3::new(-0.5, 0.0, 0.0),
                zoom: 0.8,
                duration: duration.mul_f64(0.4),
                easing: Easing::EaseOut,
            },
            CameraWaypoint {
                position: target + Vec3::ONE,
                rotation: Vec3::new(-0.2, 0.3, 0.0),
                zoom: 1.2,
                duration: duration.mul_f64(0.6),
                easing: Easing::EaseInOut,
            },
        ],
        rotation: RotationSettings {
            pitch: 0.2,
            yaw: 0.3,
            roll: 0.0,
            smoothness: 0.7,
        },
        zoom: ZoomSettings {
            start: 0.8,
            end: 1.2,
            smoothness: 0.6,
        },
    }
}

/// Spiral approach toward `target` starting `radius` away.
#[must_use]
pub fn spiral(target: Vec3, radius: f32, duration: Duration) -> CameraPath {
    CameraPath {
        kind: CameraPathKind::Spiral {
            radius,
            turns: 2.0,
            height: 2.0,
        },
        waypoints: vec![CameraWaypoint {
            position: target + Vec3::new(0.0, 0.0, radius),
            rotation: Vec3::new(-0.3, 0.0, 0.0),
            zoom: 0.5,
            duration,
            easing: Easing::EaseInOut,
        }],
        rotation: RotationSettings {
            pitch: 0.3,
            yaw: 0.0,
            roll: 0.0,
            smoothness: 0.8,
        },
        zoom: ZoomSettings {
            start: 0.5,
            end: 1.5,
            smoothness: 0.7,
        },
    }
}

/// Gentle arc from `from` to `to` lifted by `curve_height` at the
/// midpoint.
#[must_use]
pub fn curved(
    from: Vec3,
    to: Vec3,
    curve_height: f32,
    duration: Duration,
) -> CameraPath {
    let half = duration / 2;
    let midpoint = (from + to) / 2.0 + Vec3::new(0.0, curve_height, 0.0);
    CameraPath {
        kind: CameraPathKind::Curved {
            curvature: curve_height * 0.5,
        },
        waypoints: vec![
            CameraWaypoint {
                position: from,
                rotation: Vec3::ZERO,
                zoom: 1.0,
                duration: half,
                easing: Easing::EaseOut,
            },
            CameraWaypoint {
                position: midpoint,
                rotation: Vec3::ZERO,
                zoom: 1.0,
                duration: half,
                easing: Easing::EaseIn,
            },
            CameraWaypoint {
                position: to,
                rotation: Vec3::ZERO,
                zoom: 1.0,
                duration: half,
                easing: Easing::EaseIn,
            },
        ],
        rotation: RotationSettings {
            smoothness: 0.9,
            ..Default::default()
        },
        zoom: ZoomSettings {
            start: 1.0,
            end: 1.0,
            smoothness: 1.0,
        },
    }
}
