//! Transition orchestration.
//!
//! [`SystemTransitionManager`] owns the frame scheduler, the memory
//! pool, a FIFO queue of pending transitions, and the reducer-driven
//! [`TransitionState`]. The host drives it with [`tick`] once per frame;
//! completion, cancellation, and failure are reported synchronously as
//! [`TransitionOutcome`] values and through subscribed listeners.
//!
//! [`tick`]: SystemTransitionManager::tick

mod events;
mod state;

pub use events::{EventKind, TransitionEvent};
use rustc_hash::FxHashMap;
pub use state::{reduce, TransitionAction, TransitionState};
use web_time::{Duration, Instant};

use crate::camera::{AnimatorState, CameraPathAnimator, CameraState};
use crate::error::AnimaError;
use crate::frame::AnimationFrameManager;
use crate::labels::PolishLabelAnimator;
use crate::memory::{MemoryManager, ResourceKind};
use crate::overlay::{OverlayState, OverlayTransitionEffect};
use crate::particles::ParticleSystem;
use crate::transition::{GlowAnimator, TransitionConfig};

/// Minimum interval between progress events.
const PROGRESS_EMISSION_INTERVAL: Duration = Duration::from_millis(16);

/// Bytes reserved per particle for GPU instance data. Doubled for the
/// emission headroom above the configured count.
const PARTICLE_INSTANCE_SIZE: usize = 48;

/// How one transition ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionOutcome {
    /// Every sub-effect finished.
    Completed {
        /// The transition that finished.
        transition_id: String,
    },
    /// The host cancelled the transition mid-run.
    Cancelled {
        /// The transition that was cancelled.
        transition_id: String,
    },
    /// The transition failed or exceeded its deadline.
    Failed {
        /// The transition that failed.
        transition_id: String,
        /// Human-readable failure description.
        error: String,
    },
}

/// Subscription handle returned by
/// [`SystemTransitionManager::add_listener`].
pub type ListenerId = u64;

type Listener = Box<dyn FnMut(&TransitionEvent)>;

/// Sub-effects of the running transition, constructed per start and
/// dropped on completion.
struct ActiveTransition {
    config: TransitionConfig,
    camera: CameraPathAnimator,
    overlay: OverlayTransitionEffect,
    particles: Option<ParticleSystem>,
    glow: Option<GlowAnimator>,
    labels: Option<PolishLabelAnimator>,
    started: Instant,
    /// The longest sub-effect duration, used for the stall deadline.
    total_duration: Duration,
}

impl ActiveTransition {
    fn buffer_key(&self) -> String {
        format!("particles-{}", self.config.id)
    }

    fn all_complete(&self) -> bool {
        self.camera.state() == AnimatorState::Completed
            && self.overlay.is_complete()
            && self.particles.as_ref().is_none_or(ParticleSystem::is_complete)
            && self.glow.as_ref().is_none_or(GlowAnimator::is_complete)
            && self
                .labels
                .as_ref()
                .is_none_or(PolishLabelAnimator::is_complete)
    }

    fn stop_all(&mut self, frames: &mut AnimationFrameManager) {
        self.camera.stop();
        self.overlay.stop();
        if let Some(particles) = &mut self.particles {
            particles.stop();
        }
        if let Some(glow) = &mut self.glow {
            glow.stop();
        }
        if let Some(labels) = &mut self.labels {
            labels.stop(frames);
        }
    }
}

/// Orchestrates transitions: one active at a time, the rest queued FIFO.
///
/// All timing is injected through `now` parameters, so tests drive the
/// manager deterministically.
pub struct SystemTransitionManager {
    state: TransitionState,
    frames: AnimationFrameManager,
    memory: MemoryManager,
    listeners: FxHashMap<ListenerId, Listener>,
    next_listener: ListenerId,
    active: Option<ActiveTransition>,
    /// Extra time past the transition's own duration before a stalled
    /// transition fails. `None` lets it run indefinitely.
    deadline_grace: Option<Duration>,
    last_progress_emit: Option<Instant>,
}

impl SystemTransitionManager {
    /// Manager with the default memory pool capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_memory_limit(crate::memory::DEFAULT_MAX_USAGE)
    }

    /// Create a manager whose memory pool is capped at `limit` bytes.
    #[must_use]
    pub fn with_memory_limit(limit: usize) -> Self {
        Self {
            state: TransitionState::default(),
            frames: AnimationFrameManager::new(),
            memory: MemoryManager::with_capacity(limit),
            listeners: FxHashMap::default(),
            next_listener: 0,
            active: None,
            deadline_grace: None,
            last_progress_emit: None,
        }
    }

    /// Fail transitions that run `grace` past their own duration.
    /// `None` (the default) disables the deadline.
    pub fn set_deadline_grace(&mut self, grace: Option<Duration>) {
        self.deadline_grace = grace;
    }

    /// Observable reducer state.
    #[must_use]
    pub fn state(&self) -> &TransitionState {
        &self.state
    }

    /// The effect staging memory pool.
    #[must_use]
    pub fn memory(&self) -> &MemoryManager {
        &self.memory
    }

    /// Camera state of the running transition, if any.
    #[must_use]
    pub fn camera_state(&self) -> Option<CameraState> {
        self.active.as_ref().map(|a| a.camera.current_state())
    }

    /// Overlay render state of the running transition, if any.
    #[must_use]
    pub fn overlay_state(&self) -> Option<OverlayState> {
        self.active.as_ref().map(|a| a.overlay.state())
    }

    /// Subscribe to lifecycle events. Listeners are invoked synchronously
    /// during [`tick`](Self::tick) and the start/cancel calls.
    pub fn add_listener(
        &mut self,
        listener: impl FnMut(&TransitionEvent) + 'static,
    ) -> ListenerId {
        self.next_listener += 1;
        let _ = self
            .listeners
            .insert(self.next_listener, Box::new(listener));
        self.next_listener
    }

    /// Drop a subscription. Returns `true` if it was still registered.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(&id).is_some()
    }

    /// Append a transition to the queue. The next [`tick`](Self::tick)
    /// with the manager idle and unpaused starts it.
    pub fn queue_transition(&mut self, config: TransitionConfig) {
        reduce(&mut self.state, TransitionAction::Queue(config));
    }

    /// Start a transition immediately. A transition already running is
    /// stopped and its effect buffer released first.
    ///
    /// Configuration problems and pool exhaustion surface both as the
    /// returned error and as an error event; the manager stays idle and
    /// usable.
    ///
    /// # Errors
    ///
    /// Returns [`AnimaError::InvalidConfig`] for a rejected config and
    /// [`AnimaError::PoolExhausted`] when the particle buffer cannot be
    /// allocated.
    pub fn start_transition(
        &mut self,
        config: TransitionConfig,
        now: Instant,
    ) -> Result<(), AnimaError> {
        if let Some(mut previous) = self.active.take() {
            self.frames.cancel_all_frames();
            previous.stop_all(&mut self.frames);
            let _ = self
                .memory
                .release(ResourceKind::Buffer, &previous.buffer_key());
        }

        let id = config.id.clone();
        reduce(&mut self.state, TransitionAction::Start(config.clone()));
        self.emit(TransitionEvent::new(EventKind::Start, &id, 0.0, now));

        if let Err(err) = self.build_active(config, now) {
            let message = err.to_string();
            reduce(
                &mut self.state,
                TransitionAction::Error(message.clone()),
            );
            self.emit(
                TransitionEvent::new(EventKind::Error, &id, 0.0, now)
                    .with_error(&message),
            );
            return Err(err);
        }
        self.last_progress_emit = None;
        Ok(())
    }

    /// Cancel whatever is running and clear the queue. The single frame
    /// cancellation choke point. Idempotent: returns `None` when idle,
    /// but the queue and progress are reset either way.
    pub fn cancel_transition(
        &mut self,
        now: Instant,
    ) -> Option<TransitionOutcome> {
        self.frames.cancel_all_frames();
        let outcome = self.active.take().map(|mut active| {
            active.stop_all(&mut self.frames);
            let _ = self
                .memory
                .release(ResourceKind::Buffer, &active.buffer_key());
            let progress = self.state.progress;
            let id = active.config.id.clone();
            self.emit(TransitionEvent::new(
                EventKind::Cancel,
                &id,
                progress,
                now,
            ));
            TransitionOutcome::Cancelled { transition_id: id }
        });
        reduce(&mut self.state, TransitionAction::Cancel);
        outcome
    }

    /// Pause the running transition, retaining its config for
    /// [`resume_transition`](Self::resume_transition).
    pub fn pause_transition(&mut self) {
        if let Some(mut active) = self.active.take() {
            self.frames.cancel_all_frames();
            active.stop_all(&mut self.frames);
            let _ = self
                .memory
                .release(ResourceKind::Buffer, &active.buffer_key());
        }
        reduce(&mut self.state, TransitionAction::Pause);
    }

    /// Restart the paused transition from the beginning.
    ///
    /// # Errors
    ///
    /// Propagates [`start_transition`](Self::start_transition) errors;
    /// resuming with nothing paused is an `Ok` no-op.
    pub fn resume_transition(
        &mut self,
        now: Instant,
    ) -> Result<(), AnimaError> {
        let Some(config) = self.state.current.clone() else {
            return Ok(());
        };
        reduce(&mut self.state, TransitionAction::Resume);
        self.start_transition(config, now)
    }

    /// Advance everything to `now`.
    ///
    /// Ticks the frame scheduler, updates every sub-effect of the running
    /// transition, emits progress on a 16 ms cadence, enforces the stall
    /// deadline, pumps the queue, and reports how the running transition
    /// ended, if it did.
    pub fn tick(&mut self, now: Instant) -> Option<TransitionOutcome> {
        self.frames.tick(now);

        let mut outcome = None;
        if self.active.is_some() {
            outcome = self.update_active(now);
        }

        // Queue pump: the reducer drops the head on completion, so the
        // head is started in place.
        if !self.state.is_active
            && !self.state.is_paused
            && !self.state.queue.is_empty()
        {
            let next = self.state.queue[0].clone();
            let _ = self.start_transition(next, now);
        }
        outcome
    }

    fn build_active(
        &mut self,
        config: TransitionConfig,
        now: Instant,
    ) -> Result<(), AnimaError> {
        config.validate()?;

        let particles = match &config.particle_effect {
            Some(effect) => {
                let bytes =
                    effect.count * 2 * PARTICLE_INSTANCE_SIZE;
                self.memory.try_allocate(
                    ResourceKind::Buffer,
                    &format!("particles-{}", config.id),
                    bytes,
                )?;
                Some(ParticleSystem::new(effect.clone()))
            }
            None => None,
        };

        let mut camera =
            CameraPathAnimator::new(config.camera_path.clone());
        let mut overlay =
            OverlayTransitionEffect::new(config.overlay_effect.clone());
        let mut glow = config.glow_effect.clone().map(GlowAnimator::new);
        let mut labels = config.polish_labels.clone().map(|labels| {
            PolishLabelAnimator::new(labels, config.voice_over.clone())
        });
        let mut particles = particles;

        camera.start(now);
        overlay.start(now, config.duration);
        if let Some(particles) = &mut particles {
            particles.start(now, config.duration);
        }
        if let Some(glow) = &mut glow {
            glow.start(now, config.duration);
        }
        if let Some(labels) = &mut labels {
            labels.start(now, &mut self.frames);
        }

        let total_duration = config
            .duration
            .max(config.camera_path.total_duration());
        self.active = Some(ActiveTransition {
            config,
            camera,
            overlay,
            particles,
            glow,
            labels,
            started: now,
            total_duration,
        });
        Ok(())
    }

    fn update_active(
        &mut self,
        now: Instant,
    ) -> Option<TransitionOutcome> {
        let active = self.active.as_mut()?;

        let _ = active.camera.update(now);
        let _ = active.overlay.update(now);
        if let Some(particles) = &mut active.particles {
            particles.set_camera_position(
                active.camera.current_state().position,
            );
            let _ = particles.update(now);
        }
        if let Some(glow) = &mut active.glow {
            let _ = glow.update(now);
        }
        if let Some(labels) = &mut active.labels {
            labels.update(now, &mut self.frames);
        }

        // Overall progress follows the camera animator.
        let progress = active.camera.progress(now);
        let id = active.config.id.clone();

        if active.all_complete() {
            let key = active.buffer_key();
            let _ = self.memory.release(ResourceKind::Buffer, &key);
            self.active = None;
            reduce(&mut self.state, TransitionAction::Progress(1.0));
            reduce(&mut self.state, TransitionAction::Complete);
            self.emit(TransitionEvent::new(
                EventKind::Complete,
                &id,
                1.0,
                now,
            ));
            return Some(TransitionOutcome::Completed {
                transition_id: id,
            });
        }

        if let Some(grace) = self.deadline_grace {
            let elapsed = now.saturating_duration_since(active.started);
            if elapsed > active.total_duration + grace {
                let err = AnimaError::Deadline {
                    transition_id: id.clone(),
                    elapsed,
                };
                let message = err.to_string();
                let mut active = self.active.take()?;
                self.frames.cancel_all_frames();
                active.stop_all(&mut self.frames);
                let _ = self
                    .memory
                    .release(ResourceKind::Buffer, &active.buffer_key());
                reduce(
                    &mut self.state,
                    TransitionAction::Error(message.clone()),
                );
                self.emit(
                    TransitionEvent::new(
                        EventKind::Error,
                        &id,
                        progress,
                        now,
                    )
                    .with_error(&message),
                );
                return Some(TransitionOutcome::Failed {
                    transition_id: id,
                    error: message,
                });
            }
        }

        let due = self
            .last_progress_emit
            .is_none_or(|last| {
                now.saturating_duration_since(last)
                    >= PROGRESS_EMISSION_INTERVAL
            });
        if due {
            reduce(
                &mut self.state,
                TransitionAction::Progress(progress),
            );
            self.emit(TransitionEvent::new(
                EventKind::Progress,
                &id,
                progress,
                now,
            ));
            self.last_progress_emit = Some(now);
        }
        None
    }

    fn emit(&mut self, event: TransitionEvent) {
        for listener in self.listeners.values_mut() {
            listener(&event);
        }
        log::debug!(
            "transition {} {:?} at {:.3}",
            event.transition_id,
            event.kind,
            event.progress
        );
    }
}

impl Default for SystemTransitionManager {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SystemTransitionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SystemTransitionManager")
            .field("is_active", &self.state.is_active)
            .field("queued", &self.state.queue.len())
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::body_system::BodySystem;
    use crate::particles::effects;
    use crate::transition::{create_system_transition, presets};

    fn system(id: &str) -> BodySystem {
        BodySystem {
            id: id.to_owned(),
            name: id.to_owned(),
            polish_name: format!("Układ {id}"),
            connections: vec![],
            organs: vec![],
        }
    }

    fn barebones(id: &str, duration_ms: u64) -> TransitionConfig {
        let mut config = create_system_transition(
            &system("source"),
            &system("target"),
        );
        config.id = id.to_owned();
        config.duration = Duration::from_millis(duration_ms);
        // Keep only camera + overlay so completion tracks duration.
        config.particle_effect = None;
        config.glow_effect = None;
        config.polish_labels = None;
        // Two waypoints splitting the duration evenly.
        for wp in &mut config.camera_path.waypoints {
            wp.duration = Duration::from_millis(duration_ms / 2);
        }
        config
    }

    fn collect_events(
        manager: &mut SystemTransitionManager,
    ) -> Rc<RefCell<Vec<(EventKind, f32)>>> {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        let _ = manager.add_listener(move |e| {
            sink.borrow_mut().push((e.kind, e.progress));
        });
        events
    }

    fn run_until_outcome(
        manager: &mut SystemTransitionManager,
        start: Instant,
        step_ms: u64,
        max_steps: u64,
    ) -> Option<TransitionOutcome> {
        for i in 1..=max_steps {
            if let Some(outcome) =
                manager.tick(start + Duration::from_millis(step_ms * i))
            {
                return Some(outcome);
            }
        }
        None
    }

    #[test]
    fn test_transition_runs_to_completion() {
        let mut manager = SystemTransitionManager::new();
        let events = collect_events(&mut manager);
        let start = Instant::now();

        manager
            .start_transition(barebones("t1", 200), start)
            .unwrap();
        assert!(manager.state().is_active);

        let outcome = run_until_outcome(&mut manager, start, 16, 20);
        assert_eq!(
            outcome,
            Some(TransitionOutcome::Completed {
                transition_id: "t1".to_owned()
            })
        );
        assert!(!manager.state().is_active);
        assert_eq!(manager.state().progress, 1.0);

        let events = events.borrow();
        assert_eq!(events.first().unwrap().0, EventKind::Start);
        assert_eq!(events.last().unwrap(), &(EventKind::Complete, 1.0));
        assert!(events
            .iter()
            .any(|(kind, _)| *kind == EventKind::Progress));
    }

    #[test]
    fn test_full_preset_completes_and_releases_memory() {
        let mut manager = SystemTransitionManager::new();
        let start = Instant::now();
        let config = presets::quick(&system("a"), &system("b"));
        manager.start_transition(config, start).unwrap();
        assert!(manager.memory().current_usage() > 0);

        // Quick preset is 1.5 s; labels are absent, particles and glow
        // share the duration.
        let outcome = run_until_outcome(&mut manager, start, 16, 120);
        assert!(matches!(
            outcome,
            Some(TransitionOutcome::Completed { .. })
        ));
        assert_eq!(manager.memory().current_usage(), 0);
    }

    #[test]
    fn test_queue_is_fifo() {
        let mut manager = SystemTransitionManager::new();
        let events = collect_events(&mut manager);
        let start = Instant::now();

        manager.queue_transition(barebones("first", 100));
        manager.queue_transition(barebones("second", 100));
        assert!(!manager.state().is_active);

        // First tick pumps the queue head.
        let _ = manager.tick(start);
        assert!(manager.state().is_active);
        assert_eq!(
            manager.state().current.as_ref().unwrap().id,
            "first"
        );

        let outcome = run_until_outcome(&mut manager, start, 16, 50);
        assert!(matches!(
            outcome,
            Some(TransitionOutcome::Completed { transition_id }) if transition_id == "first"
        ));
        // The completing tick already pumped the second transition.
        assert_eq!(
            manager.state().current.as_ref().unwrap().id,
            "second"
        );

        let started: Vec<bool> = events
            .borrow()
            .iter()
            .filter(|(kind, _)| *kind == EventKind::Start)
            .map(|_| true)
            .collect();
        assert_eq!(started.len(), 2);
    }

    #[test]
    fn test_cancel_is_idempotent_and_clears_queue() {
        let mut manager = SystemTransitionManager::new();
        let start = Instant::now();
        manager
            .start_transition(barebones("t1", 1000), start)
            .unwrap();
        manager.queue_transition(barebones("t2", 1000));
        let _ = manager.tick(start + Duration::from_millis(100));

        let first = manager
            .cancel_transition(start + Duration::from_millis(200));
        assert_eq!(
            first,
            Some(TransitionOutcome::Cancelled {
                transition_id: "t1".to_owned()
            })
        );
        assert!(manager.state().queue.is_empty());
        assert_eq!(manager.state().progress, 0.0);

        let second = manager
            .cancel_transition(start + Duration::from_millis(300));
        assert_eq!(second, None);

        // A cancelled manager is reusable.
        manager
            .start_transition(barebones("t3", 100), start)
            .unwrap();
        assert!(manager.state().is_active);
    }

    #[test]
    fn test_cancel_while_idle_clears_queue() {
        let mut manager = SystemTransitionManager::new();
        let start = Instant::now();
        manager.queue_transition(barebones("queued", 100));

        // Nothing running yet, but cancel still flushes the queue.
        let outcome = manager.cancel_transition(start);
        assert_eq!(outcome, None);
        assert!(manager.state().queue.is_empty());
        assert!(!manager.state().is_active);
        assert_eq!(manager.state().progress, 0.0);

        // Nothing left for the pump to start.
        let _ = manager.tick(start + Duration::from_millis(16));
        assert!(!manager.state().is_active);
    }

    #[test]
    fn test_restart_releases_previous_particle_buffer() {
        let mut manager = SystemTransitionManager::new();
        let start = Instant::now();

        let mut first = barebones("first", 1000);
        first.particle_effect = Some(effects::trail());
        manager.start_transition(first, start).unwrap();
        assert!(manager.memory().current_usage() > 0);

        let mut second = barebones("second", 1000);
        let effect = effects::spark();
        let second_bytes = effect.count * 2 * PARTICLE_INSTANCE_SIZE;
        second.particle_effect = Some(effect);
        manager
            .start_transition(second, start + Duration::from_millis(100))
            .unwrap();

        // Only the new transition's buffer remains in the pool.
        assert_eq!(manager.memory().current_usage(), second_bytes);
        assert_eq!(
            manager.state().current.as_ref().unwrap().id,
            "second"
        );
    }

    #[test]
    fn test_pause_and_resume_restart_transition() {
        let mut manager = SystemTransitionManager::new();
        let start = Instant::now();
        manager
            .start_transition(barebones("t1", 400), start)
            .unwrap();
        let _ = manager.tick(start + Duration::from_millis(100));

        manager.pause_transition();
        assert!(manager.state().is_paused);
        assert!(manager.state().current.is_some());

        // Paused: ticks do nothing, the queue does not pump.
        let idle =
            manager.tick(start + Duration::from_millis(10_000));
        assert_eq!(idle, None);

        let resume_at = start + Duration::from_millis(500);
        manager.resume_transition(resume_at).unwrap();
        assert!(!manager.state().is_paused);
        assert!(manager.state().is_active);

        let outcome =
            run_until_outcome(&mut manager, resume_at, 16, 40);
        assert!(matches!(
            outcome,
            Some(TransitionOutcome::Completed { .. })
        ));
    }

    #[test]
    fn test_invalid_config_fails_and_leaves_manager_idle() {
        let mut manager = SystemTransitionManager::new();
        let events = collect_events(&mut manager);
        let start = Instant::now();

        let result =
            manager.start_transition(barebones("t1", 0), start);
        assert!(matches!(result, Err(AnimaError::InvalidConfig(_))));
        assert!(!manager.state().is_active);
        assert!(manager.state().error.is_some());
        assert_eq!(
            events.borrow().last().unwrap().0,
            EventKind::Error
        );

        // Not wedged: a valid transition still starts.
        manager
            .start_transition(barebones("t2", 100), start)
            .unwrap();
        assert!(manager.state().is_active);
        assert!(manager.state().error.is_none());
    }

    #[test]
    fn test_pool_exhaustion_fails_transition() {
        let mut manager =
            SystemTransitionManager::with_memory_limit(1024);
        let start = Instant::now();
        let config =
            presets::cinematic(&system("a"), &system("b"));
        // 80 spark particles need 80*2*48 bytes, over the 1 KiB cap.
        let result = manager.start_transition(config, start);
        assert!(matches!(
            result,
            Err(AnimaError::PoolExhausted { .. })
        ));
        assert!(!manager.state().is_active);
    }

    #[test]
    fn test_deadline_grace_fails_stalled_transition() {
        let mut manager = SystemTransitionManager::new();
        manager
            .set_deadline_grace(Some(Duration::from_millis(500)));
        let start = Instant::now();

        // Labels hold far longer than the transition duration, so the
        // camera finishes but the transition as a whole stalls.
        let mut config = barebones("t1", 200);
        config.polish_labels = Some(
            crate::labels::label_configs::educational(vec![
                crate::labels::PolishLabel {
                    id: "l".to_owned(),
                    text: "Serce".to_owned(),
                    pronunciation: None,
                    translation: "Heart".to_owned(),
                    show_duration: Duration::from_secs(60),
                },
            ]),
        );
        manager.start_transition(config, start).unwrap();

        let outcome = run_until_outcome(&mut manager, start, 100, 20);
        match outcome {
            Some(TransitionOutcome::Failed {
                transition_id,
                error,
            }) => {
                assert_eq!(transition_id, "t1");
                assert!(error.contains("deadline"), "{error}");
            }
            other => panic!("expected deadline failure, got {other:?}"),
        }
        assert!(!manager.state().is_active);
        assert!(manager.state().error.is_some());
    }

    #[test]
    fn test_progress_emission_cadence() {
        let mut manager = SystemTransitionManager::new();
        let events = collect_events(&mut manager);
        let start = Instant::now();
        manager
            .start_transition(barebones("t1", 1000), start)
            .unwrap();

        let _ = manager.tick(start + Duration::from_millis(16));
        let _ = manager.tick(start + Duration::from_millis(20));
        let _ = manager.tick(start + Duration::from_millis(24));
        let _ = manager.tick(start + Duration::from_millis(32));

        let progress_events = events
            .borrow()
            .iter()
            .filter(|(kind, _)| *kind == EventKind::Progress)
            .count();
        // Emitted at 16 and 32 only; 20 and 24 fall inside the window.
        assert_eq!(progress_events, 2);
    }

    #[test]
    fn test_removed_listener_stops_receiving() {
        let mut manager = SystemTransitionManager::new();
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        let id = manager.add_listener(move |e| {
            sink.borrow_mut().push(e.kind);
        });

        assert!(manager.remove_listener(id));
        assert!(!manager.remove_listener(id));

        let start = Instant::now();
        manager
            .start_transition(barebones("t1", 100), start)
            .unwrap();
        assert!(events.borrow().is_empty());
    }
}
