//! Overlay transition effects.
//!
//! An overlay is a screen-space layer (color wash, anatomical diagram)
//! blended over the 3D scene during a transition. [`OverlayTransitionEffect`]
//! derives an [`OverlayState`] from elapsed time using the curve selected
//! by [`OverlayEffectKind`]; the GPU overlay pass consumes the same state
//! so both render paths agree.

use serde::{Deserialize, Serialize};
use web_time::{Duration, Instant};

/// Animation style for an anatomical overlay.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum AnatomicalAnimation {
    /// Opacity oscillates at 2 Hz over the transition.
    Pulse,
    /// Opacity ramps linearly.
    #[default]
    Glow,
    /// Horizontal sinusoidal sweep at constant opacity.
    Flow,
}

/// A system-specific anatomical overlay layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnatomicalOverlay {
    /// Identifier of the body system this overlay depicts.
    pub system_id: String,
    /// RGB tint.
    pub color: [f32; 3],
    /// Peak opacity.
    pub opacity: f32,
    /// Animation style.
    pub animation: AnatomicalAnimation,
}

impl Default for AnatomicalOverlay {
    fn default() -> Self {
        Self {
            system_id: String::new(),
            color: [1.0, 1.0, 1.0],
            opacity: 0.7,
            animation: AnatomicalAnimation::Glow,
        }
    }
}

/// Selects the opacity/transform curve of an overlay effect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "type")]
pub enum OverlayEffectKind {
    /// Linear opacity ramp with slight scale growth.
    Fade,
    /// Opacity rises then falls (`sin(pπ)`) with slight rotation drift.
    Blend,
    /// Slides in from off-screen left; opacity ramps at double speed.
    Slide,
    /// Scale 0.5 to 1 with linear opacity ramp.
    Zoom,
    /// Curve chosen by the embedded overlay's animation style.
    Anatomical {
        /// The anatomical layer being animated.
        overlay: AnatomicalOverlay,
    },
}

/// Compositing mode for the overlay layer.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum BlendMode {
    /// Straight alpha compositing.
    #[default]
    Normal,
    /// Darkening multiply blend.
    Multiply,
    /// Lightening screen blend.
    Screen,
    /// Contrast-preserving overlay blend.
    Overlay,
    /// Gentler overlay variant.
    SoftLight,
}

/// Static configuration for one overlay effect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OverlayEffect {
    /// Opacity/transform curve.
    pub kind: OverlayEffectKind,
    /// Target opacity the curves ramp toward.
    pub opacity: f32,
    /// Compositing mode.
    pub blend_mode: BlendMode,
}

impl Default for OverlayEffect {
    fn default() -> Self {
        Self {
            kind: OverlayEffectKind::Fade,
            opacity: 0.8,
            blend_mode: BlendMode::Normal,
        }
    }
}

/// Derived per-tick overlay render state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayState {
    /// Current opacity.
    pub opacity: f32,
    /// Uniform scale factor.
    pub scale: f32,
    /// Rotation in radians.
    pub rotation: f32,
    /// Screen-space offset in percent of viewport width/height.
    pub position: [f32; 2],
    /// Compositing mode, fixed per effect.
    pub blend_mode: BlendMode,
}

impl OverlayState {
    fn hidden(blend_mode: BlendMode) -> Self {
        Self {
            opacity: 0.0,
            scale: 1.0,
            rotation: 0.0,
            position: [0.0, 0.0],
            blend_mode,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EffectState {
    Idle,
    Running,
    Completed,
}

/// Animates an [`OverlayEffect`] over a fixed duration against injected
/// timestamps.
#[derive(Debug)]
pub struct OverlayTransitionEffect {
    effect: OverlayEffect,
    state: EffectState,
    start_time: Option<Instant>,
    duration: Duration,
    current: OverlayState,
}

impl OverlayTransitionEffect {
    /// Effect animator, hidden until started.
    #[must_use]
    pub fn new(effect: OverlayEffect) -> Self {
        let blend_mode = effect.blend_mode;
        Self {
            effect,
            state: EffectState::Idle,
            start_time: None,
            duration: Duration::ZERO,
            current: OverlayState::hidden(blend_mode),
        }
    }

    /// Begin animating at `now` for `duration`.
    pub fn start(&mut self, now: Instant, duration: Duration) {
        self.state = EffectState::Running;
        self.start_time = Some(now);
        self.duration = duration;
        self.current = OverlayState::hidden(self.effect.blend_mode);
    }

    /// Stop animating and hide the overlay.
    pub fn stop(&mut self) {
        self.state = EffectState::Idle;
        self.start_time = None;
        self.current = OverlayState::hidden(self.effect.blend_mode);
    }

    /// Whether the effect is animating.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.state == EffectState::Running
    }

    /// Whether the effect ran for its full duration.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.state == EffectState::Completed
    }

    /// Current render state, as of the last [`update`].
    ///
    /// [`update`]: OverlayTransitionEffect::update
    #[must_use]
    pub fn state(&self) -> OverlayState {
        self.current
    }

    /// Progress in [0, 1]. Reports 0 while idle and 1 once completed.
    #[must_use]
    pub fn progress(&self, now: Instant) -> f32 {
        match (self.state, self.start_time) {
            (EffectState::Running, Some(start)) => {
                if self.duration.is_zero() {
                    return 1.0;
                }
                let elapsed = now.saturating_duration_since(start);
                (elapsed.as_secs_f32() / self.duration.as_secs_f32())
                    .min(1.0)
            }
            (EffectState::Completed, _) => 1.0,
            _ => 0.0,
        }
    }

    /// Recompute the overlay state for `now` and return progress.
    pub fn update(&mut self, now: Instant) -> f32 {
        if self.state != EffectState::Running {
            return self.progress(now);
        }
        let progress = self.progress(now);
        self.current = evaluate(&self.effect, progress);
        if progress >= 1.0 {
            self.state = EffectState::Completed;
        }
        progress
    }
}

/// Pure curve evaluation: overlay render state at `progress`.
#[must_use]
pub fn evaluate(effect: &OverlayEffect, progress: f32) -> OverlayState {
    let p = progress.clamp(0.0, 1.0);
    let mut state = OverlayState::hidden(effect.blend_mode);
    match &effect.kind {
        OverlayEffectKind::Fade => {
            state.opacity = p * effect.opacity;
            state.scale = 1.0 + 0.1 * p;
        }
        OverlayEffectKind::Blend => {
            state.opacity = (p * std::f32::consts::PI).sin()
                * effect.opacity;
            state.rotation = p * 0.1;
        }
        OverlayEffectKind::Slide => {
            state.position[0] = (p - 1.0) * 100.0;
            state.opacity = (p * 2.0).min(1.0) * effect.opacity;
        }
        OverlayEffectKind::Zoom => {
            state.scale = 0.5 + 0.5 * p;
            state.opacity = p * effect.opacity;
        }
        OverlayEffectKind::Anatomical { overlay } => {
            match overlay.animation {
                AnatomicalAnimation::Pulse => {
                    state.opacity = overlay.opacity
                        * (0.5
                            + 0.5
                                * (p * std::f32::consts::PI * 4.0).sin());
                }
                AnatomicalAnimation::Glow => {
                    state.opacity = p * overlay.opacity;
                }
                AnatomicalAnimation::Flow => {
                    state.opacity = overlay.opacity;
                    state.position[0] =
                        (p * std::f32::consts::TAU).sin() * 20.0;
                }
            }
        }
    }
    state
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_to(effect: OverlayEffect, progress: f32) -> OverlayState {
        let mut e = OverlayTransitionEffect::new(effect);
        let start = Instant::now();
        e.start(start, Duration::from_millis(1000));
        let _ = e.update(start + Duration::from_secs_f32(progress));
        e.state()
    }

    #[test]
    fn test_fade_ramps_opacity_and_scale() {
        let state = run_to(OverlayEffect::default(), 0.5);
        assert!((state.opacity - 0.4).abs() < 1e-3);
        assert!((state.scale - 1.05).abs() < 1e-3);
    }

    #[test]
    fn test_blend_peaks_at_midpoint() {
        let effect = OverlayEffect {
            kind: OverlayEffectKind::Blend,
            opacity: 1.0,
            blend_mode: BlendMode::Screen,
        };
        let mid = evaluate(&effect, 0.5);
        assert!((mid.opacity - 1.0).abs() < 1e-4);
        let end = evaluate(&effect, 1.0);
        assert!(end.opacity.abs() < 1e-4);
        assert!((end.rotation - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_slide_enters_from_left_with_fast_opacity() {
        let effect = OverlayEffect {
            kind: OverlayEffectKind::Slide,
            opacity: 1.0,
            blend_mode: BlendMode::Normal,
        };
        let start = evaluate(&effect, 0.0);
        assert_eq!(start.position[0], -100.0);
        let quarter = evaluate(&effect, 0.25);
        assert!((quarter.opacity - 0.5).abs() < 1e-4);
        let late = evaluate(&effect, 0.75);
        assert_eq!(late.opacity, 1.0);
        assert_eq!(evaluate(&effect, 1.0).position[0], 0.0);
    }

    #[test]
    fn test_zoom_scale_range() {
        let effect = OverlayEffect {
            kind: OverlayEffectKind::Zoom,
            opacity: 1.0,
            blend_mode: BlendMode::Normal,
        };
        assert_eq!(evaluate(&effect, 0.0).scale, 0.5);
        assert_eq!(evaluate(&effect, 1.0).scale, 1.0);
    }

    #[test]
    fn test_anatomical_pulse_oscillates() {
        let effect = OverlayEffect {
            kind: OverlayEffectKind::Anatomical {
                overlay: AnatomicalOverlay {
                    animation: AnatomicalAnimation::Pulse,
                    opacity: 1.0,
                    ..Default::default()
                },
            },
            opacity: 1.0,
            blend_mode: BlendMode::Normal,
        };
        // Two full cycles over the transition: peaks at p=1/8 and 5/8.
        assert!((evaluate(&effect, 0.125).opacity - 1.0).abs() < 1e-3);
        assert!((evaluate(&effect, 0.625).opacity - 1.0).abs() < 1e-3);
        assert!((evaluate(&effect, 0.0).opacity - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_anatomical_flow_sweeps_horizontally() {
        let effect = OverlayEffect {
            kind: OverlayEffectKind::Anatomical {
                overlay: AnatomicalOverlay {
                    animation: AnatomicalAnimation::Flow,
                    opacity: 0.7,
                    ..Default::default()
                },
            },
            opacity: 1.0,
            blend_mode: BlendMode::Normal,
        };
        let quarter = evaluate(&effect, 0.25);
        assert!((quarter.position[0] - 20.0).abs() < 1e-3);
        assert_eq!(quarter.opacity, 0.7);
    }

    #[test]
    fn test_lifecycle_completion() {
        let mut e = OverlayTransitionEffect::new(OverlayEffect::default());
        let start = Instant::now();
        assert_eq!(e.progress(start), 0.0);
        e.start(start, Duration::from_millis(500));
        let _ = e.update(start + Duration::from_millis(500));
        assert!(e.is_complete());
        assert_eq!(e.progress(start + Duration::from_secs(2)), 1.0);
        e.stop();
        assert_eq!(e.state().opacity, 0.0);
    }

    #[test]
    fn test_zero_duration_completes_immediately() {
        let mut e = OverlayTransitionEffect::new(OverlayEffect::default());
        let start = Instant::now();
        e.start(start, Duration::ZERO);
        assert_eq!(e.update(start), 1.0);
        assert!(e.is_complete());
    }
}
