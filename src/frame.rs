//! Cancellable per-frame callback scheduling.
//!
//! [`AnimationFrameManager`] is a pure multiplexer over the host clock:
//! callers register a duration-bounded callback, the host drives
//! [`tick`](AnimationFrameManager::tick) once per frame, and each callback
//! receives its own eased progress until it finishes or is cancelled.
//! No two frames share state.

use rustc_hash::FxHashMap;
use web_time::{Duration, Instant};

use crate::easing::Easing;

/// Handle to a scheduled frame, used for cancellation.
pub type FrameId = u64;

type FrameCallback = Box<dyn FnMut(f32)>;

/// One scheduled animation, destroyed once elapsed time reaches its
/// duration or it is explicitly cancelled.
struct FrameRecord {
    start_time: Instant,
    duration: Duration,
    easing: Easing,
    callback: FrameCallback,
}

/// Schedules per-frame callbacks against a host clock.
///
/// The manager owns no clock of its own; the host passes `now` into
/// [`request_frame`](Self::request_frame) and [`tick`](Self::tick), which
/// keeps every consumer deterministic under test.
#[derive(Default)]
pub struct AnimationFrameManager {
    frames: FxHashMap<FrameId, FrameRecord>,
    next_id: FrameId,
    /// Scratch buffer of frames that completed during the current tick.
    finished: Vec<FrameId>,
}

impl AnimationFrameManager {
    /// Create an empty frame manager.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a callback to run each tick for `duration`, receiving
    /// eased progress in [0, 1]. Returns a handle for cancellation.
    pub fn request_frame(
        &mut self,
        now: Instant,
        duration: Duration,
        easing: Easing,
        callback: impl FnMut(f32) + 'static,
    ) -> FrameId {
        self.next_id += 1;
        let id = self.next_id;
        let _ = self.frames.insert(
            id,
            FrameRecord {
                start_time: now,
                duration,
                easing,
                callback: Box::new(callback),
            },
        );
        id
    }

    /// Cancel a scheduled frame. A pending tick for it becomes a no-op.
    /// Returns `true` if the frame was still active.
    pub fn cancel_frame(&mut self, id: FrameId) -> bool {
        self.frames.remove(&id).is_some()
    }

    /// Cancel every scheduled frame. This is the single cancellation
    /// choke point used by the orchestrator.
    pub fn cancel_all_frames(&mut self) {
        self.frames.clear();
    }

    /// Number of frames still scheduled.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.frames.len()
    }

    /// Advance every scheduled frame to `now`.
    ///
    /// Each callback receives `easing(clamp(elapsed/duration, 0, 1))`;
    /// frames whose raw progress reached 1 are removed after their final
    /// callback. Zero-duration frames complete on their first tick.
    pub fn tick(&mut self, now: Instant) {
        self.finished.clear();

        for (id, frame) in &mut self.frames {
            let elapsed = now.saturating_duration_since(frame.start_time);
            let raw_progress = if frame.duration.is_zero() {
                1.0
            } else {
                (elapsed.as_secs_f32() / frame.duration.as_secs_f32())
                    .clamp(0.0, 1.0)
            };

            (frame.callback)(frame.easing.evaluate(raw_progress));

            if raw_progress >= 1.0 {
                self.finished.push(*id);
            }
        }

        for id in &self.finished {
            let _ = self.frames.remove(id);
        }
    }
}

impl std::fmt::Debug for AnimationFrameManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimationFrameManager")
            .field("active_frames", &self.frames.len())
            .field("next_id", &self.next_id)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;

    #[test]
    fn test_frame_progress_and_completion() {
        let mut mgr = AnimationFrameManager::new();
        let start = Instant::now();
        let last = Rc::new(Cell::new(-1.0f32));

        let last_cb = Rc::clone(&last);
        let _id = mgr.request_frame(
            start,
            Duration::from_millis(100),
            Easing::Linear,
            move |p| last_cb.set(p),
        );

        mgr.tick(start + Duration::from_millis(50));
        assert!((last.get() - 0.5).abs() < 0.01);
        assert_eq!(mgr.active_count(), 1);

        mgr.tick(start + Duration::from_millis(100));
        assert!((last.get() - 1.0).abs() < 1e-6);
        assert_eq!(mgr.active_count(), 0);

        // A tick after completion is a no-op.
        last.set(-1.0);
        mgr.tick(start + Duration::from_millis(200));
        assert_eq!(last.get(), -1.0);
    }

    #[test]
    fn test_easing_applied() {
        let mut mgr = AnimationFrameManager::new();
        let start = Instant::now();
        let last = Rc::new(Cell::new(0.0f32));

        let last_cb = Rc::clone(&last);
        let _id = mgr.request_frame(
            start,
            Duration::from_millis(100),
            Easing::EaseIn,
            move |p| last_cb.set(p),
        );

        mgr.tick(start + Duration::from_millis(50));
        // easeIn(0.5) = 0.25
        assert!((last.get() - 0.25).abs() < 0.01);
    }

    #[test]
    fn test_cancel_makes_tick_a_noop() {
        let mut mgr = AnimationFrameManager::new();
        let start = Instant::now();
        let calls = Rc::new(Cell::new(0u32));

        let calls_cb = Rc::clone(&calls);
        let id = mgr.request_frame(
            start,
            Duration::from_secs(1),
            Easing::Linear,
            move |_| calls_cb.set(calls_cb.get() + 1),
        );

        assert!(mgr.cancel_frame(id));
        assert!(!mgr.cancel_frame(id));

        mgr.tick(start + Duration::from_millis(500));
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_cancel_all_frames() {
        let mut mgr = AnimationFrameManager::new();
        let start = Instant::now();

        for _ in 0..3 {
            let _ = mgr.request_frame(
                start,
                Duration::from_secs(1),
                Easing::Linear,
                |_| {},
            );
        }
        assert_eq!(mgr.active_count(), 3);

        mgr.cancel_all_frames();
        assert_eq!(mgr.active_count(), 0);
    }

    #[test]
    fn test_zero_duration_completes_immediately() {
        let mut mgr = AnimationFrameManager::new();
        let start = Instant::now();
        let last = Rc::new(Cell::new(0.0f32));

        let last_cb = Rc::clone(&last);
        let _id = mgr.request_frame(
            start,
            Duration::ZERO,
            Easing::Linear,
            move |p| last_cb.set(p),
        );

        mgr.tick(start);
        assert_eq!(last.get(), 1.0);
        assert_eq!(mgr.active_count(), 0);
    }

    #[test]
    fn test_independent_frames() {
        let mut mgr = AnimationFrameManager::new();
        let start = Instant::now();
        let a = Rc::new(Cell::new(0.0f32));
        let b = Rc::new(Cell::new(0.0f32));

        let a_cb = Rc::clone(&a);
        let _ = mgr.request_frame(
            start,
            Duration::from_millis(100),
            Easing::Linear,
            move |p| a_cb.set(p),
        );
        let b_cb = Rc::clone(&b);
        let _ = mgr.request_frame(
            start,
            Duration::from_millis(200),
            Easing::Linear,
            move |p| b_cb.set(p),
        );

        mgr.tick(start + Duration::from_millis(100));
        assert!((a.get() - 1.0).abs() < 1e-6);
        assert!((b.get() - 0.5).abs() < 0.01);
        assert_eq!(mgr.active_count(), 1);
    }
}
