//! Trail records: points, breaks and click events.
//!
//! All records are immutable once created and carry their capture time.

use crate::geometry::Vec2;
use std::time::{Duration, Instant};

/// A captured pointer position, relative to the virtual center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailPoint {
    /// Offset from the virtual center.
    pub pos: Vec2,
    /// Capture time.
    pub t: Instant,
}

impl TrailPoint {
    /// Create a new trail point.
    #[inline]
    pub const fn new(pos: Vec2, t: Instant) -> Self {
        Self { pos, t }
    }

    /// Age of the point at `now` (zero if captured after `now`).
    #[inline]
    pub fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.t)
    }
}

/// One slot in the trail history.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrailEntry {
    /// A captured position.
    Point(TrailPoint),
    /// Discontinuity marker inserted by a recenter.
    Break,
}

impl TrailEntry {
    /// The point, if this entry is one.
    #[inline]
    pub const fn as_point(&self) -> Option<&TrailPoint> {
        match self {
            Self::Point(p) => Some(p),
            Self::Break => None,
        }
    }

    /// Check if this entry is a break.
    #[inline]
    pub const fn is_break(&self) -> bool {
        matches!(self, Self::Break)
    }
}

/// Mouse button reported by a click.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left (primary) button.
    Left,
    /// Right (secondary) button.
    Right,
}

/// Whether a click event is a press or a release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClickPhase {
    /// Button went down.
    Pressed,
    /// Button went up.
    Released,
}

impl ClickPhase {
    /// Phase from a "pressed" flag.
    #[inline]
    pub const fn from_pressed(pressed: bool) -> Self {
        if pressed {
            Self::Pressed
        } else {
            Self::Released
        }
    }
}

/// A button press or release, placed at the trail offset current at the time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClickEvent {
    /// Offset from the virtual center.
    pub pos: Vec2,
    /// Button involved.
    pub button: MouseButton,
    /// Capture time.
    pub t: Instant,
    /// Press or release.
    pub phase: ClickPhase,
}

impl ClickEvent {
    /// Age of the click at `now`.
    #[inline]
    pub fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.t)
    }
}
