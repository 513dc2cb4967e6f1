//! Wrap-aware horizontal scrolling.
//!
//! # Responsibility
//! - Accumulate the session scroll offset used to normalize exports.
//! - Shift every top-level copy and fold it back into the wrap window.
//! - Turn wheel, drag and scrollbar-thumb input into scroll deltas.
//!
//! # Invariants
//! - `offset` is never wrapped.
//! - After `scroll_by`, every top-level x lies in `[-doc_width, doc_width]`.
//! - Copies of one pair stay `doc_width` apart modulo `2 * doc_width`.

use super::coords::wrap_x;
use super::scene::Scene;
use log::trace;

/// Accumulated horizontal scroll state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollEngine {
    offset: i64,
}

impl ScrollEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from a known offset, e.g. when rebuilding a scene.
    pub fn with_offset(offset: i64) -> Self {
        Self { offset }
    }

    pub fn offset(&self) -> i64 {
        self.offset
    }

    /// Shifts the whole strip by `delta` pixels.
    ///
    /// Primal and twin copies are shifted and wrapped independently. Only
    /// `delta` modulo `2 * doc_width` moves entities, so any delta is applied
    /// in one step. The offset saturates at the `i64` bounds.
    pub fn scroll_by(&mut self, scene: &mut Scene, delta: i64, doc_width: i64) {
        if delta == 0 {
            return;
        }
        self.offset = self.offset.saturating_add(delta);
        let shift = delta.rem_euclid(doc_width.max(1).saturating_mul(2));
        for pair in scene.pairs_mut() {
            if !pair.primal().kind.is_top_level() {
                continue;
            }
            pair.update(|visual| {
                visual.position.x = wrap_x(visual.position.x.saturating_add(shift), doc_width);
            });
        }
        trace!(
            "event=scroll module=timeline status=ok delta={} offset={}",
            delta,
            self.offset
        );
    }
}

/// Fixed-step delta for one wheel notch.
///
/// Only the sign of `wheel_dy` matters; zero produces no scroll.
pub fn wheel_delta(wheel_dy: f64, step_px: i64) -> i64 {
    if wheel_dy > 0.0 {
        step_px
    } else if wheel_dy < 0.0 {
        -step_px
    } else {
        0
    }
}

/// Delta for a scrollbar-thumb movement.
///
/// The thumb track spans one year, so moving the thumb by the track width
/// scrolls one full document width the other way.
pub fn thumb_delta(thumb_dx: i64, track_width: i64, doc_width: i64) -> i64 {
    let track_width = track_width.max(1);
    -((thumb_dx as f64 * doc_width as f64 / track_width as f64).round() as i64)
}

/// Tracks the last sampled pointer x while dragging.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DragTracker {
    last_x: Option<i64>,
}

impl DragTracker {
    pub fn begin(x: i64) -> Self {
        Self { last_x: Some(x) }
    }

    /// Returns the movement since the previous sample and records `x`.
    ///
    /// An idle tracker starts sampling and reports no movement.
    pub fn sample(&mut self, x: i64) -> i64 {
        let delta = self.last_x.map_or(0, |last| x - last);
        self.last_x = Some(x);
        delta
    }

    pub fn is_active(&self) -> bool {
        self.last_x.is_some()
    }

    pub fn end(&mut self) {
        self.last_x = None;
    }
}

#[cfg(test)]
mod tests {
    use super::{thumb_delta, wheel_delta, DragTracker};

    #[test]
    fn wheel_uses_fixed_step_in_wheel_direction() {
        assert_eq!(wheel_delta(3.5, 5), 5);
        assert_eq!(wheel_delta(-120.0, 5), -5);
        assert_eq!(wheel_delta(0.0, 5), 0);
    }

    #[test]
    fn thumb_delta_is_inverted_and_scaled() {
        assert_eq!(thumb_delta(10, 500, 1000), -20);
        assert_eq!(thumb_delta(-25, 1000, 1000), 25);
    }

    #[test]
    fn drag_tracker_reports_movement_since_last_sample() {
        let mut tracker = DragTracker::begin(100);
        assert_eq!(tracker.sample(130), 30);
        assert_eq!(tracker.sample(120), -10);
        tracker.end();
        assert!(!tracker.is_active());
        assert_eq!(tracker.sample(50), 0);
    }
}
