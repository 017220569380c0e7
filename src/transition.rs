//! Transition configuration.
//!
//! A [`TransitionConfig`] fully specifies one transition between two body
//! systems and is immutable once the transition starts. Configs come from
//! [`create_system_transition`] (sensible defaults derived from the two
//! systems), from the stock [`presets`], or from TOML.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use web_time::{Duration, Instant};

use crate::body_system::BodySystem;
use crate::camera::{
    paths, CameraPath, CameraPathKind, CameraWaypoint, RotationSettings,
    ZoomSettings,
};
use crate::easing::Easing;
use crate::error::AnimaError;
use crate::labels::{
    label_configs, PolishLabel, PolishLabelConfig, VoiceOverConfig,
};
use crate::overlay::{
    AnatomicalAnimation, AnatomicalOverlay, BlendMode, OverlayEffect,
    OverlayEffectKind,
};
use crate::particles::{effects, ParticleEffect};

/// Oscillation style for a glow effect.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum GlowAnimation {
    /// 2 Hz intensity oscillation.
    #[default]
    Pulse,
    /// Slow 1 Hz swell.
    Breathe,
}

/// Highlight glow applied to the target system during a transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GlowEffect {
    /// Whether the glow runs at all.
    pub enabled: bool,
    /// Body system id the glow attaches to.
    pub target_system: String,
    /// Peak intensity.
    pub intensity: f32,
    /// RGB glow color.
    pub color: [f32; 3],
    /// Glow falloff radius.
    pub radius: f32,
    /// Oscillation style.
    pub animation: GlowAnimation,
}

impl Default for GlowEffect {
    fn default() -> Self {
        Self {
            enabled: true,
            target_system: String::new(),
            intensity: 0.8,
            color: [0.0, 1.0, 0.533],
            radius: 0.5,
            animation: GlowAnimation::Pulse,
        }
    }
}

/// Animates a [`GlowEffect`]'s intensity over a fixed duration.
#[derive(Debug)]
pub struct GlowAnimator {
    effect: GlowEffect,
    start_time: Option<Instant>,
    duration: Duration,
    animating: bool,
    completed: bool,
    intensity: f32,
}

impl GlowAnimator {
    /// Animator for `effect`, dark until started.
    #[must_use]
    pub fn new(effect: GlowEffect) -> Self {
        Self {
            effect,
            start_time: None,
            duration: Duration::ZERO,
            animating: false,
            completed: false,
            intensity: 0.0,
        }
    }

    /// Begin oscillating. A disabled effect completes immediately.
    pub fn start(&mut self, now: Instant, duration: Duration) {
        self.animating = self.effect.enabled;
        self.completed = !self.effect.enabled;
        self.start_time = Some(now);
        self.duration = duration;
        self.intensity = 0.0;
    }

    /// Stop without completing and extinguish the glow.
    pub fn stop(&mut self) {
        self.animating = false;
        self.start_time = None;
        self.intensity = 0.0;
    }

    /// Whether the glow ran for its full duration.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.completed
    }

    /// Oscillating intensity as of the last update.
    #[must_use]
    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    /// Advance the oscillator and return progress.
    pub fn update(&mut self, now: Instant) -> f32 {
        if !self.animating {
            return if self.completed { 1.0 } else { 0.0 };
        }
        let Some(start) = self.start_time else {
            return 0.0;
        };
        let elapsed = now.saturating_duration_since(start);
        let progress = if self.duration.is_zero() {
            1.0
        } else {
            (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
        };
        let cycles = match self.effect.animation {
            GlowAnimation::Pulse => 2.0,
            GlowAnimation::Breathe => 1.0,
        };
        let wave =
            (progress * std::f32::consts::TAU * cycles).sin() * 0.5 + 0.5;
        self.intensity = self.effect.intensity * wave;
        if progress >= 1.0 {
            self.animating = false;
            self.completed = true;
            self.intensity = 0.0;
        }
        progress
    }
}

/// Accessibility controls honored by [`create_system_transition`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AccessibilityConfig {
    /// Replace motion-heavy effects with a plain linear move.
    pub reduce_motion: bool,
    /// Prefer high-contrast presentation.
    pub high_contrast: bool,
    /// Announce transitions to screen readers.
    pub screen_reader: bool,
    /// Allow keyboard control of the transition.
    pub keyboard_navigation: bool,
    /// Announcement text for assistive technology.
    pub alternative_text: String,
    /// Narrate what is happening on screen.
    pub descriptive_audio: bool,
}

impl Default for AccessibilityConfig {
    fn default() -> Self {
        Self {
            reduce_motion: false,
            high_contrast: false,
            screen_reader: true,
            keyboard_navigation: true,
            alternative_text: String::new(),
            descriptive_audio: true,
        }
    }
}

/// Rendering budget for one transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PerformanceConfig {
    /// Frame rate the host aims for.
    pub target_fps: u32,
    /// Let the host degrade quality under load.
    pub adaptive_quality: bool,
    /// Particle effect counts are clamped to this.
    pub max_particles: usize,
    /// Resolution scale for effect rendering.
    pub render_scale: f32,
    /// Allow level-of-detail swaps on anatomy meshes.
    pub enable_lod: bool,
    /// Memory pool limit in bytes.
    pub memory_limit: usize,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            target_fps: 60,
            adaptive_quality: true,
            max_particles: 100,
            render_scale: 1.0,
            enable_lod: true,
            memory_limit: 256 * 1024 * 1024,
        }
    }
}

/// Everything one transition needs, immutable once started.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitionConfig {
    /// Unique transition identifier.
    pub id: String,
    /// System the transition leaves.
    pub source_system_id: String,
    /// System the transition arrives at.
    pub target_system_id: String,
    /// Nominal duration; sub-effects may run longer.
    pub duration: Duration,
    /// Overall easing reported through progress events.
    pub easing: Easing,
    /// Camera flight.
    pub camera_path: CameraPath,
    /// Screen-space overlay blend.
    pub overlay_effect: OverlayEffect,
    /// Optional particle effect.
    #[serde(default)]
    pub particle_effect: Option<ParticleEffect>,
    /// Optional glow on the target system.
    #[serde(default)]
    pub glow_effect: Option<GlowEffect>,
    /// Optional label sequence.
    #[serde(default)]
    pub polish_labels: Option<PolishLabelConfig>,
    /// Optional narration voice for the labels.
    #[serde(default)]
    pub voice_over: Option<VoiceOverConfig>,
    /// Accessibility controls.
    #[serde(default)]
    pub accessibility: AccessibilityConfig,
    /// Rendering budget.
    #[serde(default)]
    pub performance: PerformanceConfig,
}

impl TransitionConfig {
    /// Parse a config from TOML.
    ///
    /// # Errors
    ///
    /// Returns [`AnimaError::PresetParse`] on malformed TOML.
    pub fn from_toml(text: &str) -> Result<Self, AnimaError> {
        toml::from_str(text)
            .map_err(|e| AnimaError::PresetParse(e.to_string()))
    }

    /// Serialize the config to TOML.
    ///
    /// # Errors
    ///
    /// Returns [`AnimaError::PresetParse`] if serialization fails.
    pub fn to_toml(&self) -> Result<String, AnimaError> {
        toml::to_string_pretty(self)
            .map_err(|e| AnimaError::PresetParse(e.to_string()))
    }

    /// Validate the parts the engine relies on.
    ///
    /// # Errors
    ///
    /// Returns [`AnimaError::InvalidConfig`] for an empty id or zero
    /// duration.
    pub fn validate(&self) -> Result<(), AnimaError> {
        if self.id.is_empty() {
            return Err(AnimaError::InvalidConfig(
                "transition id is empty".to_owned(),
            ));
        }
        if self.duration.is_zero() {
            return Err(AnimaError::InvalidConfig(format!(
                "transition {} has zero duration",
                self.id
            )));
        }
        Ok(())
    }
}

/// Build a default transition between two systems: cinematic camera,
/// fade overlay, trail particles, pulsing glow on the target, and one
/// narrated label naming the target system.
///
/// `accessibility.reduce_motion` swaps the camera for a plain linear
/// move and drops particles; `performance.max_particles` clamps the
/// particle count.
#[must_use]
pub fn create_system_transition(
    source: &BodySystem,
    target: &BodySystem,
) -> TransitionConfig {
    let camera_path = CameraPath {
        kind: CameraPathKind::CINEMATIC,
        waypoints: vec![
            CameraWaypoint {
                position: Vec3::new(0.0, 0.0, 5.0),
                rotation: Vec3::ZERO,
                zoom: 1.0,
                duration: Duration::from_millis(1000),
                easing: Easing::EaseOut,
            },
            CameraWaypoint {
                position: Vec3::new(2.0, 1.0, 3.0),
                rotation: Vec3::new(0.2, 0.5, 0.0),
                zoom: 1.2,
                duration: Duration::from_millis(1000),
                easing: Easing::EaseIn,
            },
        ],
        rotation: RotationSettings::default(),
        zoom: ZoomSettings {
            start: 1.0,
            end: 1.2,
            smoothness: 0.5,
        },
    };

    let label = PolishLabel {
        id: target.id.clone(),
        text: target.polish_name.clone(),
        pronunciation: Some(target.polish_name.to_lowercase()),
        translation: target.name.clone(),
        show_duration: Duration::from_millis(1500),
    };

    let mut config = TransitionConfig {
        id: format!("transition-{}-to-{}", source.id, target.id),
        source_system_id: source.id.clone(),
        target_system_id: target.id.clone(),
        duration: Duration::from_millis(2000),
        easing: Easing::EaseInOutCubic,
        camera_path,
        overlay_effect: OverlayEffect {
            kind: OverlayEffectKind::Fade,
            opacity: 0.7,
            blend_mode: BlendMode::SoftLight,
        },
        particle_effect: Some(effects::trail()),
        glow_effect: Some(GlowEffect {
            target_system: target.id.clone(),
            ..Default::default()
        }),
        polish_labels: Some(label_configs::educational(vec![label])),
        voice_over: None,
        accessibility: AccessibilityConfig {
            alternative_text: format!(
                "Transition from {} to {}",
                source.polish_name, target.polish_name
            ),
            ..Default::default()
        },
        performance: PerformanceConfig::default(),
    };
    apply_constraints(&mut config);
    config
}

/// Clamp a config to its own accessibility/performance settings.
pub fn apply_constraints(config: &mut TransitionConfig) {
    if config.accessibility.reduce_motion {
        let from = config
            .camera_path
            .waypoints
            .first()
            .map_or(Vec3::new(0.0, 0.0, 5.0), |w| w.position);
        let to = config
            .camera_path
            .waypoints
            .last()
            .map_or(Vec3::ZERO, |w| w.position);
        config.camera_path = paths::linear(from, to, config.duration);
        config.particle_effect = None;
    }
    if let Some(effect) = &mut config.particle_effect {
        effect.count = effect.count.min(config.performance.max_particles);
    }
}

/// Stock transitions mirroring the application's built-in styles.
pub mod presets {
    use glam::Vec3;
    use web_time::Duration;

    use super::{
        apply_constraints, create_system_transition, AnatomicalAnimation,
        AnatomicalOverlay, BlendMode, GlowAnimation, GlowEffect,
        OverlayEffect, OverlayEffectKind, PerformanceConfig,
        TransitionConfig,
    };
    use crate::body_system::BodySystem;
    use crate::camera::paths;
    use crate::easing::Easing;
    use crate::labels::voices;
    use crate::particles::{effects, ParticleEffect};

    /// 1.5 s cinematic move with a light fade and a small trail.
    #[must_use]
    pub fn quick(source: &BodySystem, target: &BodySystem) -> TransitionConfig {
        let mut config = create_system_transition(source, target);
        config.id = format!("quick-{}-to-{}", source.id, target.id);
        config.duration = Duration::from_millis(1500);
        config.easing = Easing::EaseInOut;
        config.camera_path =
            paths::cinematic(Vec3::ZERO, config.duration);
        config.overlay_effect = OverlayEffect {
            kind: OverlayEffectKind::Fade,
            opacity: 0.6,
            blend_mode: BlendMode::Normal,
        };
        config.particle_effect = Some(ParticleEffect {
            count: 30,
            ..effects::trail()
        });
        config.glow_effect = None;
        config.polish_labels = None;
        apply_constraints(&mut config);
        config
    }

    /// 3 s orbital tour with anatomical overlay, flow particles, and
    /// narrated labels.
    #[must_use]
    pub fn educational(
        source: &BodySystem,
        target: &BodySystem,
    ) -> TransitionConfig {
        let mut config = create_system_transition(source, target);
        config.id = format!("educational-{}-to-{}", source.id, target.id);
        config.duration = Duration::from_millis(3000);
        config.easing = Easing::EaseInOutCubic;
        config.camera_path =
            paths::orbital(Vec3::ZERO, 3.0, config.duration);
        config.overlay_effect = OverlayEffect {
            kind: OverlayEffectKind::Anatomical {
                overlay: AnatomicalOverlay {
                    system_id: target.id.clone(),
                    color: [0.0, 1.0, 0.533],
                    opacity: 0.7,
                    animation: AnatomicalAnimation::Pulse,
                },
            },
            opacity: 0.7,
            blend_mode: BlendMode::Normal,
        };
        config.particle_effect = Some(ParticleEffect {
            count: 40,
            ..effects::flow()
        });
        config.voice_over = Some(voices::polish_female());
        apply_constraints(&mut config);
        config
    }

    /// 4 s spiral with blend overlay, sparks, and a breathing glow.
    #[must_use]
    pub fn cinematic(
        source: &BodySystem,
        target: &BodySystem,
    ) -> TransitionConfig {
        let mut config = create_system_transition(source, target);
        config.id = format!("cinematic-{}-to-{}", source.id, target.id);
        config.duration = Duration::from_millis(4000);
        config.easing = Easing::EaseInOutQuart;
        config.camera_path =
            paths::spiral(Vec3::ZERO, 4.0, config.duration);
        config.overlay_effect = OverlayEffect {
            kind: OverlayEffectKind::Blend,
            opacity: 0.8,
            blend_mode: BlendMode::SoftLight,
        };
        config.particle_effect = Some(ParticleEffect {
            count: 80,
            ..effects::spark()
        });
        config.glow_effect = Some(GlowEffect {
            enabled: true,
            target_system: target.id.clone(),
            intensity: 1.0,
            color: [1.0, 0.0, 0.502],
            radius: 1.0,
            animation: GlowAnimation::Breathe,
        });
        config.polish_labels = None;
        apply_constraints(&mut config);
        config
    }

    /// 1 s linear move tuned for low-power devices.
    #[must_use]
    pub fn mobile(
        source: &BodySystem,
        target: &BodySystem,
    ) -> TransitionConfig {
        let mut config = create_system_transition(source, target);
        config.id = format!("mobile-{}-to-{}", source.id, target.id);
        config.duration = Duration::from_millis(1000);
        config.easing = Easing::EaseOut;
        config.camera_path = paths::linear(
            Vec3::new(0.0, 0.0, 2.0),
            Vec3::ZERO,
            config.duration,
        );
        config.overlay_effect = OverlayEffect {
            kind: OverlayEffectKind::Fade,
            opacity: 0.4,
            blend_mode: BlendMode::Normal,
        };
        config.particle_effect = Some(ParticleEffect {
            count: 20,
            ..effects::trail()
        });
        config.glow_effect = None;
        config.polish_labels = None;
        config.performance = PerformanceConfig {
            target_fps: 30,
            adaptive_quality: true,
            max_particles: 50,
            render_scale: 0.7,
            enable_lod: true,
            memory_limit: 128 * 1024 * 1024,
        };
        apply_constraints(&mut config);
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body_system::Organ;

    fn system(id: &str, name: &str, polish: &str) -> BodySystem {
        BodySystem {
            id: id.to_owned(),
            name: name.to_owned(),
            polish_name: polish.to_owned(),
            connections: vec![],
            organs: vec![Organ {
                id: format!("{id}-organ"),
                name: name.to_owned(),
                polish_name: polish.to_owned(),
            }],
        }
    }

    fn pair() -> (BodySystem, BodySystem) {
        (
            system("cardiovascular", "Cardiovascular", "Układ sercowo-naczyniowy"),
            system("nervous", "Nervous", "Układ nerwowy"),
        )
    }

    #[test]
    fn test_default_transition_shape() {
        let (source, target) = pair();
        let config = create_system_transition(&source, &target);
        assert_eq!(config.duration, Duration::from_millis(2000));
        assert_eq!(config.easing, Easing::EaseInOutCubic);
        assert_eq!(config.camera_path.waypoints.len(), 2);
        assert_eq!(config.camera_path.kind, CameraPathKind::CINEMATIC);
        assert_eq!(
            config.particle_effect.as_ref().unwrap().count,
            50
        );
        let labels = config.polish_labels.as_ref().unwrap();
        assert_eq!(labels.labels[0].text, "Układ nerwowy");
        assert_eq!(labels.labels[0].translation, "Nervous");
        assert!(config
            .accessibility
            .alternative_text
            .contains("Układ nerwowy"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_reduce_motion_strips_effects() {
        let (source, target) = pair();
        let mut config = create_system_transition(&source, &target);
        config.accessibility.reduce_motion = true;
        apply_constraints(&mut config);
        assert_eq!(config.camera_path.kind, CameraPathKind::Linear);
        assert!(config.particle_effect.is_none());
    }

    #[test]
    fn test_max_particles_clamps_count() {
        let (source, target) = pair();
        let mut config = presets::cinematic(&source, &target);
        config.performance.max_particles = 25;
        apply_constraints(&mut config);
        assert_eq!(config.particle_effect.unwrap().count, 25);
    }

    #[test]
    fn test_presets_differ_in_pace() {
        let (source, target) = pair();
        assert_eq!(
            presets::quick(&source, &target).duration,
            Duration::from_millis(1500)
        );
        assert_eq!(
            presets::educational(&source, &target).duration,
            Duration::from_millis(3000)
        );
        assert_eq!(
            presets::cinematic(&source, &target).duration,
            Duration::from_millis(4000)
        );
        let mobile = presets::mobile(&source, &target);
        assert_eq!(mobile.duration, Duration::from_millis(1000));
        assert_eq!(mobile.performance.target_fps, 30);
        assert_eq!(mobile.performance.memory_limit, 128 * 1024 * 1024);
    }

    #[test]
    fn test_toml_round_trip() {
        let (source, target) = pair();
        let config = presets::educational(&source, &target);
        let text = config.to_toml().unwrap();
        let back = TransitionConfig::from_toml(&text).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_invalid_toml_is_a_preset_error() {
        let err = TransitionConfig::from_toml("not = [valid").unwrap_err();
        assert!(matches!(err, AnimaError::PresetParse(_)));
    }

    #[test]
    fn test_validate_rejects_zero_duration() {
        let (source, target) = pair();
        let mut config = create_system_transition(&source, &target);
        config.duration = Duration::ZERO;
        assert!(matches!(
            config.validate(),
            Err(AnimaError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_glow_animator_oscillates_and_completes() {
        let mut glow = GlowAnimator::new(GlowEffect::default());
        let start = Instant::now();
        glow.start(start, Duration::from_millis(1000));

        // Pulse peaks a quarter of the way through the first cycle.
        let _ = glow.update(start + Duration::from_millis(125));
        assert!((glow.intensity() - 0.8).abs() < 1e-3);

        let progress = glow.update(start + Duration::from_millis(1000));
        assert_eq!(progress, 1.0);
        assert!(glow.is_complete());
        assert_eq!(glow.intensity(), 0.0);
    }

    #[test]
    fn test_disabled_glow_completes_immediately() {
        let mut glow = GlowAnimator::new(GlowEffect {
            enabled: false,
            ..Default::default()
        });
        glow.start(Instant::now(), Duration::from_millis(1000));
        assert!(glow.is_complete());
    }
}
