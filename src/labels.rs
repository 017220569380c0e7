//! Polish label sequencing and narration.
//!
//! During an educational transition, labels are revealed one at a time:
//! a 500 ms fade-in, a hold for the label's own duration, then a 300 ms
//! fade-out. Fades are scheduled on the shared [`AnimationFrameManager`]
//! so the orchestrator's cancellation choke point covers them. Narration
//! goes through the [`Narrator`] trait; no speech engine is bundled.

use std::cell::Cell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use web_time::{Duration, Instant};

use crate::easing::Easing;
use crate::frame::{AnimationFrameManager, FrameId};

/// Fade-in duration for each label.
const SHOW_DURATION: Duration = Duration::from_millis(500);

/// Fade-out duration for each label.
const HIDE_DURATION: Duration = Duration::from_millis(300);

/// One timed anatomical label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolishLabel {
    /// Stable identifier.
    pub id: String,
    /// Polish text.
    pub text: String,
    /// Optional phonetic spelling, narrated after the text.
    #[serde(default)]
    pub pronunciation: Option<String>,
    /// English translation.
    pub translation: String,
    /// How long the label stays fully visible between fades.
    pub show_duration: Duration,
}

/// Visual reveal style for labels.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum LabelAnimation {
    /// Opacity fade.
    #[default]
    Fade,
    /// Slide in from the anchor edge.
    Slide,
    /// Characters appear one by one.
    Typewriter,
}

/// Screen anchor for the label layer.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum LabelPosition {
    /// Top of the viewport.
    Top,
    /// Viewport center.
    #[default]
    Center,
    /// Bottom of the viewport.
    Bottom,
}

/// Label presentation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PolishLabelConfig {
    /// Master toggle; when false the sequence completes immediately.
    pub show_labels: bool,
    /// Labels revealed in order during the transition.
    pub labels: Vec<PolishLabel>,
    /// Reveal style.
    pub animation: LabelAnimation,
    /// Font size in points.
    pub font_size: f32,
    /// RGB text color.
    pub color: [f32; 3],
    /// Screen anchor.
    pub position: LabelPosition,
}

impl Default for PolishLabelConfig {
    fn default() -> Self {
        label_configs::educational(Vec::new())
    }
}

/// Stock label configurations.
pub mod label_configs {
    use super::{
        LabelAnimation, LabelPosition, PolishLabel, PolishLabelConfig,
    };

    /// Centered fades at a readable size.
    #[must_use]
    pub fn educational(labels: Vec<PolishLabel>) -> PolishLabelConfig {
        PolishLabelConfig {
            show_labels: true,
            labels,
            animation: LabelAnimation::Fade,
            font_size: 24.0,
            color: [1.0, 1.0, 1.0],
            position: LabelPosition::Center,
        }
    }

    /// Small slide-in labels anchored at the top.
    #[must_use]
    pub fn minimal(labels: Vec<PolishLabel>) -> PolishLabelConfig {
        PolishLabelConfig {
            show_labels: true,
            labels,
            animation: LabelAnimation::Slide,
            font_size: 18.0,
            color: [1.0, 1.0, 1.0],
            position: LabelPosition::Top,
        }
    }

    /// Large typewriter labels for close study.
    #[must_use]
    pub fn detailed(labels: Vec<PolishLabel>) -> PolishLabelConfig {
        PolishLabelConfig {
            show_labels: true,
            labels,
            animation: LabelAnimation::Typewriter,
            font_size: 28.0,
            color: [1.0, 1.0, 1.0],
            position: LabelPosition::Center,
        }
    }
}

/// Narration voice settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VoiceOverConfig {
    /// Whether narration runs at all.
    pub enabled: bool,
    /// BCP-47 language code, e.g. `"pl"`.
    pub language: String,
    /// Voice name or category understood by the narrator.
    pub voice: String,
    /// Speech rate multiplier.
    pub speed: f32,
    /// Pitch multiplier.
    pub pitch: f32,
    /// Volume in [0, 1].
    pub volume: f32,
}

impl Default for VoiceOverConfig {
    fn default() -> Self {
        voices::polish_female()
    }
}

/// Stock voice configurations.
pub mod voices {
    use super::VoiceOverConfig;

    /// Slightly slowed Polish female voice.
    #[must_use]
    pub fn polish_female() -> VoiceOverConfig {
        VoiceOverConfig {
            enabled: true,
            language: "pl".to_owned(),
            voice: "female".to_owned(),
            speed: 0.9,
            pitch: 1.0,
            volume: 0.8,
        }
    }

    /// Polish male voice at normal rate.
    #[must_use]
    pub fn polish_male() -> VoiceOverConfig {
        VoiceOverConfig {
            enabled: true,
            language: "pl".to_owned(),
            voice: "male".to_owned(),
            speed: 1.0,
            pitch: 0.9,
            volume: 0.8,
        }
    }

    /// English female voice used for translations.
    #[must_use]
    pub fn english_female() -> VoiceOverConfig {
        VoiceOverConfig {
            enabled: true,
            language: "en".to_owned(),
            voice: "female".to_owned(),
            speed: 1.0,
            pitch: 1.1,
            volume: 0.7,
        }
    }
}

/// Speaks label text. Implementations must be non-blocking; narration
/// quality is out of the engine's hands.
pub trait Narrator {
    /// Speak `text` with the given voice settings.
    fn speak(&mut self, text: &str, config: &VoiceOverConfig);
}

/// Default narrator: logs what would be spoken.
#[derive(Debug, Default)]
pub struct LogNarrator;

impl Narrator for LogNarrator {
    fn speak(&mut self, text: &str, config: &VoiceOverConfig) {
        log::info!(
            "narrate [{}/{} x{:.1}]: {text}",
            config.language,
            config.voice,
            config.speed
        );
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Showing(FrameId),
    Holding,
    Hiding(FrameId),
    Completed,
}

/// Sequences labels through show/hold/hide against injected timestamps.
///
/// Fade frames run on the caller's [`AnimationFrameManager`]; every
/// method that can schedule or retire frames takes it as a parameter.
pub struct PolishLabelAnimator {
    config: PolishLabelConfig,
    voice: Option<VoiceOverConfig>,
    narrator: Box<dyn Narrator>,
    opacity: Rc<Cell<f32>>,
    index: usize,
    phase: Phase,
    phase_started: Instant,
}

impl PolishLabelAnimator {
    /// Animator for `config`, idle until started.
    #[must_use]
    pub fn new(
        config: PolishLabelConfig,
        voice: Option<VoiceOverConfig>,
    ) -> Self {
        Self {
            config,
            voice,
            narrator: Box::new(LogNarrator),
            opacity: Rc::new(Cell::new(0.0)),
            index: 0,
            phase: Phase::Idle,
            phase_started: Instant::now(),
        }
    }

    /// Replace the narrator used for voice-over.
    pub fn set_narrator(&mut self, narrator: Box<dyn Narrator>) {
        self.narrator = narrator;
    }

    /// Begin the label sequence. An empty label list completes
    /// immediately.
    pub fn start(
        &mut self,
        now: Instant,
        frames: &mut AnimationFrameManager,
    ) {
        self.index = 0;
        if self.config.labels.is_empty() || !self.config.show_labels {
            self.phase = Phase::Completed;
            return;
        }
        self.begin_show(now, frames);
    }

    /// Cancel the sequence and hide the current label.
    pub fn stop(&mut self, frames: &mut AnimationFrameManager) {
        match self.phase {
            Phase::Showing(id) | Phase::Hiding(id) => {
                let _ = frames.cancel_frame(id);
            }
            _ => {}
        }
        self.phase = Phase::Idle;
        self.opacity.set(0.0);
    }

    /// Whether a label is currently showing, holding, or hiding.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        !matches!(self.phase, Phase::Idle | Phase::Completed)
    }

    /// Whether every label has been shown and hidden.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.phase == Phase::Completed
    }

    /// The label currently being shown, if any.
    #[must_use]
    pub fn current_label(&self) -> Option<&PolishLabel> {
        if self.is_animating() {
            self.config.labels.get(self.index)
        } else {
            None
        }
    }

    /// Opacity of the current label in [0, 1], updated by fade frames.
    #[must_use]
    pub fn opacity(&self) -> f32 {
        self.opacity.get()
    }

    /// Fraction of labels fully processed. Empty sequences report 1.
    #[must_use]
    pub fn progress(&self) -> f32 {
        if self.config.labels.is_empty() || self.phase == Phase::Completed {
            return 1.0;
        }
        (self.index as f32 / self.config.labels.len() as f32).min(1.0)
    }

    /// Advance the phase machine. The caller is expected to have ticked
    /// `frames` for this timestamp already.
    pub fn update(
        &mut self,
        now: Instant,
        frames: &mut AnimationFrameManager,
    ) {
        match self.phase {
            Phase::Idle | Phase::Completed => {}
            Phase::Showing(_) => {
                if now.saturating_duration_since(self.phase_started)
                    >= SHOW_DURATION
                {
                    self.narrate();
                    self.phase = Phase::Holding;
                    self.phase_started = now;
                }
            }
            Phase::Holding => {
                let hold = self.config.labels[self.index].show_duration;
                if now.saturating_duration_since(self.phase_started)
                    >= hold
                {
                    self.begin_hide(now, frames);
                }
            }
            Phase::Hiding(_) => {
                if now.saturating_duration_since(self.phase_started)
                    >= HIDE_DURATION
                {
                    self.index += 1;
                    if self.index >= self.config.labels.len() {
                        self.phase = Phase::Completed;
                        self.opacity.set(0.0);
                    } else {
                        self.begin_show(now, frames);
                    }
                }
            }
        }
    }

    fn begin_show(
        &mut self,
        now: Instant,
        frames: &mut AnimationFrameManager,
    ) {
        let opacity = Rc::clone(&self.opacity);
        let id = frames.request_frame(
            now,
            SHOW_DURATION,
            Easing::EaseOut,
            move |p| opacity.set(p),
        );
        self.phase = Phase::Showing(id);
        self.phase_started = now;
    }

    fn begin_hide(
        &mut self,
        now: Instant,
        frames: &mut AnimationFrameManager,
    ) {
        let opacity = Rc::clone(&self.opacity);
        let id = frames.request_frame(
            now,
            HIDE_DURATION,
            Easing::EaseIn,
            move |p| opacity.set(1.0 - p),
        );
        self.phase = Phase::Hiding(id);
        self.phase_started = now;
    }

    /// Speak the current label: Polish text with pronunciation, then the
    /// English translation.
    fn narrate(&mut self) {
        let Some(voice) = self.voice.clone() else {
            return;
        };
        if !voice.enabled {
            return;
        }
        let label = &self.config.labels[self.index];
        let polish = match &label.pronunciation {
            Some(p) => format!("{}. Wymowa: {p}", label.text),
            None => label.text.clone(),
        };
        self.narrator.speak(&polish, &voice);
        let english = voices::english_female();
        self.narrator.speak(&label.translation, &english);
    }
}

impl std::fmt::Debug for PolishLabelAnimator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PolishLabelAnimator")
            .field("labels", &self.config.labels.len())
            .field("index", &self.index)
            .field("phase", &self.phase)
            .finish_non_exhaustive()
    }
}
