//! `MotionAccumulator`: Integrates relative motion into a trail offset.
//!
//! The accumulator tracks the pointer's offset from the virtual center and
//! appends a [`TrailPoint`] for every delta. Once per frame the scheduler
//! asks it whether the offset must snap back to the center (recenter),
//! which also inserts a break into the trail.

use super::buffer::TrailBuffer;
use super::point::{ClickEvent, ClickPhase, MouseButton, TrailPoint};
use crate::config::Config;
use crate::geometry::{CanvasSize, Vec2};
use std::time::Instant;
use tracing::debug;

/// Why a recenter happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecenterReason {
    /// No movement or click for longer than the recenter timeout.
    Inactivity,
    /// The offset left the canvas half-extents.
    OutOfBounds,
    /// Both conditions held in the same frame.
    Both,
}

/// Running offset from the virtual center plus activity tracking.
#[derive(Debug, Clone)]
pub struct MotionAccumulator {
    /// Current offset; equals the last point since the last break.
    offset: Vec2,
    /// Time of the last movement or click.
    last_activity: Instant,
}

impl MotionAccumulator {
    /// Create an accumulator at the virtual center.
    pub const fn new(now: Instant) -> Self {
        Self {
            offset: Vec2::ZERO,
            last_activity: now,
        }
    }

    /// Current offset from the virtual center.
    #[inline]
    pub const fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Time of the last recorded activity.
    #[inline]
    pub const fn last_activity(&self) -> Instant {
        self.last_activity
    }

    /// Apply a relative motion delta captured at `at`.
    ///
    /// The delta is scaled by `multiplier`, added to the offset, and a point
    /// at the new offset is appended to `buffer`.
    pub fn apply_delta(
        &mut self,
        dx: i32,
        dy: i32,
        multiplier: f64,
        at: Instant,
        buffer: &mut TrailBuffer,
    ) -> TrailPoint {
        let delta = Vec2::new(f64::from(dx), f64::from(dy)) * multiplier;
        self.offset = self.offset + delta;
        self.note_activity(at);

        let point = TrailPoint::new(self.offset, at);
        buffer.push_point(point);
        point
    }

    /// Record a click at the current offset.
    pub fn record_click(
        &mut self,
        button: MouseButton,
        phase: ClickPhase,
        at: Instant,
        buffer: &mut TrailBuffer,
    ) -> ClickEvent {
        self.note_activity(at);
        let click = ClickEvent {
            pos: self.offset,
            button,
            t: at,
            phase,
        };
        buffer.push_click(click);
        click
    }

    /// Record movement or click activity at `at`.
    #[inline]
    pub fn note_activity(&mut self, at: Instant) {
        if at > self.last_activity {
            self.last_activity = at;
        }
    }

    /// Run the per-frame recenter checks.
    ///
    /// Two independent conditions are checked:
    /// - auto-recenter is enabled and the time since the last activity
    ///   exceeds the timeout (this also restarts the activity timer);
    /// - `|offset.x| > W/2` or `|offset.y| > H/2` for the live canvas size
    ///   (skipped while the canvas has no area). A non-finite offset
    ///   always counts as out of bounds.
    ///
    /// If either holds, the offset snaps to `(0, 0)` and a single break is
    /// appended to `buffer`.
    pub fn check_recenter(
        &mut self,
        now: Instant,
        canvas: CanvasSize,
        config: &Config,
        buffer: &mut TrailBuffer,
    ) -> Option<RecenterReason> {
        let idle = config.auto_recenter_enabled
            && now.saturating_duration_since(self.last_activity) > config.recenter_timeout();
        let out_of_bounds =
            !self.offset.is_finite() || (!canvas.is_empty() && canvas.is_out_of_bounds(self.offset));

        let reason = match (idle, out_of_bounds) {
            (false, false) => return None,
            (true, false) => RecenterReason::Inactivity,
            (false, true) => RecenterReason::OutOfBounds,
            (true, true) => RecenterReason::Both,
        };

        if idle {
            self.last_activity = now;
        }

        debug!(?reason, offset = ?self.offset, ?canvas, "recentering trail");
        self.offset = Vec2::ZERO;
        buffer.push_break();
        Some(reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trail::TrailEntry;
    use std::time::Duration;

    fn points(buffer: &TrailBuffer) -> Vec<Vec2> {
        buffer
            .entries()
            .filter_map(TrailEntry::as_point)
            .map(|p| p.pos)
            .collect()
    }

    #[test]
    fn test_apply_delta_with_multiplier() {
        let now = Instant::now();
        let mut acc = MotionAccumulator::new(now);
        let mut buffer = TrailBuffer::new();

        for _ in 0..3 {
            acc.apply_delta(5, 0, 2.0, now, &mut buffer);
        }

        assert_eq!(
            points(&buffer),
            vec![Vec2::new(10.0, 0.0), Vec2::new(20.0, 0.0), Vec2::new(30.0, 0.0)]
        );
        assert_eq!(acc.offset(), Vec2::new(30.0, 0.0));
    }

    #[test]
    fn test_offset_matches_last_point() {
        let now = Instant::now();
        let mut acc = MotionAccumulator::new(now);
        let mut buffer = TrailBuffer::new();
        acc.apply_delta(3, -4, 1.0, now, &mut buffer);
        acc.apply_delta(-1, 2, 1.0, now, &mut buffer);
        assert_eq!(buffer.last_point().unwrap().pos, acc.offset());
    }

    #[test]
    fn test_click_at_current_offset() {
        let now = Instant::now();
        let mut acc = MotionAccumulator::new(now);
        let mut buffer = TrailBuffer::new();
        acc.apply_delta(7, 1, 1.0, now, &mut buffer);
        let click = acc.record_click(MouseButton::Right, ClickPhase::Released, now, &mut buffer);
        assert_eq!(click.pos, Vec2::new(7.0, 1.0));
        assert_eq!(buffer.click_count(), 1);
    }

    #[test]
    fn test_recenter_out_of_bounds() {
        let now = Instant::now();
        let mut acc = MotionAccumulator::new(now);
        let mut buffer = TrailBuffer::new();
        let config = Config::default();
        let canvas = CanvasSize::new(800, 600);

        acc.apply_delta(410, 0, 1.0, now, &mut buffer);
        let reason = acc.check_recenter(now, canvas, &config, &mut buffer);

        assert_eq!(reason, Some(RecenterReason::OutOfBounds));
        assert_eq!(acc.offset(), Vec2::ZERO);
        assert_eq!(buffer.entries().last(), Some(&TrailEntry::Break));
    }

    #[test]
    fn test_no_recenter_on_boundary() {
        let now = Instant::now();
        let mut acc = MotionAccumulator::new(now);
        let mut buffer = TrailBuffer::new();
        acc.apply_delta(400, -300, 1.0, now, &mut buffer);

        let reason = acc.check_recenter(now, CanvasSize::new(800, 600), &Config::default(), &mut buffer);
        assert_eq!(reason, None);
        assert_eq!(acc.offset(), Vec2::new(400.0, -300.0));
        assert_eq!(buffer.break_count(), 0);
    }

    #[test]
    fn test_recenter_inactivity() {
        let start = Instant::now();
        let mut acc = MotionAccumulator::new(start);
        let mut buffer = TrailBuffer::new();
        let config = Config::default();
        acc.apply_delta(10, 10, 1.0, start, &mut buffer);

        let later = start + Duration::from_secs_f64(config.recenter_timeout_seconds + 0.5);
        let reason = acc.check_recenter(later, CanvasSize::new(800, 600), &config, &mut buffer);

        assert_eq!(reason, Some(RecenterReason::Inactivity));
        assert_eq!(acc.offset(), Vec2::ZERO);
        assert_eq!(acc.last_activity(), later);
        assert_eq!(buffer.break_count(), 1);

        // Timer restarted: no second recenter in the same instant
        assert_eq!(acc.check_recenter(later, CanvasSize::new(800, 600), &config, &mut buffer), None);
    }

    #[test]
    fn test_inactivity_disabled() {
        let start = Instant::now();
        let mut acc = MotionAccumulator::new(start);
        let mut buffer = TrailBuffer::new();
        let config = Config {
            auto_recenter_enabled: false,
            ..Config::default()
        };

        let later = start + Duration::from_secs(60);
        assert_eq!(acc.check_recenter(later, CanvasSize::new(800, 600), &config, &mut buffer), None);
    }

    #[test]
    fn test_both_conditions_single_break() {
        let start = Instant::now();
        let mut acc = MotionAccumulator::new(start);
        let mut buffer = TrailBuffer::new();
        let config = Config::default();
        acc.apply_delta(0, 500, 1.0, start, &mut buffer);

        let later = start + Duration::from_secs(10);
        let reason = acc.check_recenter(later, CanvasSize::new(800, 600), &config, &mut buffer);
        assert_eq!(reason, Some(RecenterReason::Both));
        assert_eq!(buffer.break_count(), 1);
    }

    #[test]
    fn test_empty_canvas_skips_bounds() {
        let now = Instant::now();
        let mut acc = MotionAccumulator::new(now);
        let mut buffer = TrailBuffer::new();
        acc.apply_delta(50, 0, 1.0, now, &mut buffer);
        assert_eq!(acc.check_recenter(now, CanvasSize::new(0, 0), &Config::default(), &mut buffer), None);
    }

    #[test]
    fn test_non_finite_offset_recenters() {
        let now = Instant::now();
        let mut acc = MotionAccumulator::new(now);
        let mut buffer = TrailBuffer::new();
        let config = Config::default();

        acc.apply_delta(5, 0, 1e308, now, &mut buffer);
        acc.apply_delta(-5, 0, 1e308, now, &mut buffer);
        assert!(acc.offset().x.is_nan());

        let reason = acc.check_recenter(now, CanvasSize::new(800, 600), &config, &mut buffer);
        assert_eq!(reason, Some(RecenterReason::OutOfBounds));
        assert_eq!(acc.offset(), Vec2::ZERO);

        acc.apply_delta(3, 4, 1.0, now, &mut buffer);
        assert_eq!(acc.offset(), Vec2::new(3.0, 4.0));

        // Even with no canvas area to compare against
        acc.apply_delta(5, 0, f64::INFINITY, now, &mut buffer);
        let reason = acc.check_recenter(now, CanvasSize::new(0, 0), &config, &mut buffer);
        assert_eq!(reason, Some(RecenterReason::OutOfBounds));
        assert_eq!(acc.offset(), Vec2::ZERO);
    }
}
