//! Waypoint-walking camera animator.

use glam::Vec3;
use web_time::{Duration, Instant};

use super::{CameraPath, CameraPathKind, CameraWaypoint};

/// The interpolated camera at a point in time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    /// World-space position.
    pub position: Vec3,
    /// Euler rotation in radians.
    pub rotation: Vec3,
    /// Zoom factor.
    pub zoom: f32,
}

impl CameraState {
    fn at_waypoint(waypoint: &CameraWaypoint) -> Self {
        Self {
            position: waypoint.position,
            rotation: waypoint.rotation,
            zoom: waypoint.zoom,
        }
    }
}

impl Default for CameraState {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 5.0),
            rotation: Vec3::ZERO,
            zoom: 1.0,
        }
    }
}

/// Animator lifecycle: `Idle → Animating → Completed`, with `stop()`
/// returning to `Idle` from any state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimatorState {
    /// Not started, or stopped before completion.
    Idle,
    /// Walking the waypoint sequence.
    Animating,
    /// The full waypoint duration has elapsed.
    Completed,
}

/// Interpolates camera position/rotation/zoom along a sequence of timed
/// waypoints, with a path-kind-specific motion overlay.
///
/// Reads but never mutates its [`CameraPath`]; all time comes from the
/// caller, so the animator is deterministic under test.
#[derive(Debug)]
pub struct CameraPathAnimator {
    path: CameraPath,
    total_duration: Duration,
    start_time: Option<Instant>,
    state: AnimatorState,
    current: CameraState,
}

impl CameraPathAnimator {
    /// Animator positioned at the path's first waypoint (or the default
    /// camera for an empty path).
    #[must_use]
    pub fn new(path: CameraPath) -> Self {
        let current = path
            .waypoints
            .first()
            .map_or_else(CameraState::default, CameraState::at_waypoint);
        let total_duration = path.total_duration();
        Self {
            path,
            total_duration,
            start_time: None,
            state: AnimatorState::Idle,
            current,
        }
    }

    /// Begin animating at `now`. A path with no waypoints completes
    /// immediately. Starting an already-animating animator is a no-op.
    pub fn start(&mut self, now: Instant) {
        if self.state == AnimatorState::Animating {
            return;
        }
        self.start_time = Some(now);
        self.state = if self.path.waypoints.is_empty() {
            AnimatorState::Completed
        } else {
            AnimatorState::Animating
        };
    }

    /// Stop without completing. A late tick after `stop()` is ignored.
    pub fn stop(&mut self) {
        self.state = AnimatorState::Idle;
        self.start_time = None;
    }

    /// Whether the animator is currently walking waypoints.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.state == AnimatorState::Animating
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> AnimatorState {
        self.state
    }

    /// The most recently computed camera state.
    #[must_use]
    pub fn current_state(&self) -> CameraState {
        self.current
    }

    /// Overall waypoint-sequence progress in [0, 1]: elapsed time over
    /// total path duration. Reports 0 when idle and 1 once completed.
    #[must_use]
    pub fn progress(&self, now: Instant) -> f32 {
        match self.state {
            AnimatorState::Idle => 0.0,
            AnimatorState::Completed => 1.0,
            AnimatorState::Animating => {
                let Some(start) = self.start_time else {
                    return 0.0;
                };
                if self.total_duration.is_zero() {
                    return 1.0;
                }
                let elapsed = now.saturating_duration_since(start);
                (elapsed.as_secs_f32() / self.total_duration.as_secs_f32())
                    .min(1.0)
            }
        }
    }

    /// Advance the camera to `now`. Returns the current segment's local
    /// progress; the animator transitions to `Completed` once elapsed
    /// time passes the total path duration.
    pub fn update(&mut self, now: Instant) -> f32 {
        if self.state != AnimatorState::Animating {
            return if self.state == AnimatorState::Completed {
                1.0
            } else {
                0.0
            };
        }
        let Some(start) = self.start_time else {
            return 0.0;
        };
        let elapsed = now.saturating_duration_since(start);
        let progress = self.update_camera_position(elapsed);
        if elapsed >= self.total_duration {
            self.state = AnimatorState::Completed;
        }
        progress
    }

    /// Walk waypoints accumulating durations until `elapsed` falls inside
    /// a segment, interpolate toward the next waypoint with that
    /// segment's easing, then layer the path-kind motion on top.
    ///
    /// Returns the segment-local progress; past the last waypoint the
    /// walk returns 1.
    fn update_camera_position(&mut self, elapsed: Duration) -> f32 {
        if self.path.waypoints.is_empty() {
            return 1.0;
        }

        let mut accumulated = Duration::ZERO;
        let mut segment: Option<(usize, f32)> = None;

        for (i, waypoint) in self.path.waypoints.iter().enumerate() {
            accumulated += waypoint.duration;
            if elapsed <= accumulated {
                let segment_start = accumulated - waypoint.duration;
                let local = if waypoint.duration.is_zero() {
                    1.0
                } else {
                    (elapsed - segment_start).as_secs_f32()
                        / waypoint.duration.as_secs_f32()
                };
                segment = Some((i, local));
                break;
            }
        }

        let Some((index, local_progress)) = segment else {
            return 1.0;
        };

        let current = &self.path.waypoints[index];
        let target = self
            .path
            .waypoints
            .get(index + 1)
            .unwrap_or(current);

        let eased = current.easing.evaluate(local_progress);
        self.current = CameraState {
            position: current.position.lerp(target.position, eased),
            rotation: current.rotation.lerp(target.rotation, eased),
            zoom: current.zoom + (target.zoom - current.zoom) * eased,
        };
        self.apply_path_kind(eased);

        local_progress
    }

    /// Layer the kind-specific motion transform onto the interpolated
    /// state. `progress` is the eased segment-local progress.
    fn apply_path_kind(&mut self, progress: f32) {
        use std::f32::consts::TAU;

        match self.path.kind {
            CameraPathKind::Linear => {}
            CameraPathKind::Orbital { radius } => {
                let angle = progress * TAU;
                self.current.position.x = angle.cos() * radius;
                self.current.position.z = angle.sin() * radius;
                self.current.rotation.y = angle;
            }
            CameraPathKind::Spiral {
                radius,
                turns,
                height,
            } => {
                let r = radius * (1.0 - progress);
                let angle = progress * turns * TAU;
                self.current.position.x = angle.cos() * r;
                self.current.position.y = height * progress;
                self.current.position.z = angle.sin() * r;
                self.current.rotation.y = angle;
            }
            CameraPathKind::Cinematic { shake_amplitude } => {
                let shake = (rand::random::<f32>() - 0.5)
                    * shake_amplitude
                    * (1.0 - progress);
                self.current.position.x += shake;
                self.current.position.y += shake * 0.5;

                let pull = progress * self.path.rotation.smoothness;
                self.current.rotation.x += self.path.rotation.pitch * pull;
                self.current.rotation.y += self.path.rotation.yaw * pull;
                self.current.rotation.z += self.path.rotation.roll * pull;
            }
            CameraPathKind::Curved { curvature } => {
                let bump = (progress * std::f32::consts::PI).sin() * curvature;
                self.current.position.y += bump;
                self.current.rotation.z += bump * 0.1;
            }
        }
    }
}
