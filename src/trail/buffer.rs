//! `TrailBuffer`: Time-windowed trail history.
//!
//! Points and breaks are kept in arrival order in one sequence; clicks are
//! kept in a parallel sequence. Both are append-only during capture and
//! filtered (never reordered) by [`TrailBuffer::prune`] once per frame.

use super::point::{ClickEvent, TrailEntry, TrailPoint};
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Counts of entries removed by one prune pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PruneStats {
    /// Expired points removed.
    pub points: usize,
    /// Orphaned breaks removed.
    pub breaks: usize,
    /// Expired clicks removed.
    pub clicks: usize,
}

impl PruneStats {
    /// Total number of removed entries.
    #[inline]
    pub const fn total(&self) -> usize {
        self.points + self.breaks + self.clicks
    }
}

/// Ordered trail history plus click history.
#[derive(Debug, Clone, Default)]
pub struct TrailBuffer {
    /// Points and breaks in arrival order.
    entries: VecDeque<TrailEntry>,
    /// Clicks in arrival order.
    clicks: VecDeque<ClickEvent>,
}

impl TrailBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty buffer with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            clicks: VecDeque::new(),
        }
    }

    /// Append a point.
    ///
    /// Timestamps must be non-decreasing; a point stamped earlier than the
    /// last point is clamped to the last point's time.
    pub fn push_point(&mut self, mut point: TrailPoint) {
        if let Some(last) = self.last_point() {
            if point.t < last.t {
                point.t = last.t;
            }
        }
        self.entries.push_back(TrailEntry::Point(point));
    }

    /// Append a break (discontinuity marker).
    pub fn push_break(&mut self) {
        self.entries.push_back(TrailEntry::Break);
    }

    /// Append a click.
    pub fn push_click(&mut self, click: ClickEvent) {
        self.clicks.push_back(click);
    }

    /// All points and breaks, oldest first.
    pub fn entries(&self) -> impl ExactSizeIterator<Item = &TrailEntry> + '_ {
        self.entries.iter()
    }

    /// All clicks, oldest first.
    pub fn clicks(&self) -> impl ExactSizeIterator<Item = &ClickEvent> + '_ {
        self.clicks.iter()
    }

    /// Number of points and breaks.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if there are no points, breaks or clicks.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty() && self.clicks.is_empty()
    }

    /// Number of points (breaks excluded).
    pub fn point_count(&self) -> usize {
        self.entries.iter().filter(|e| !e.is_break()).count()
    }

    /// Number of breaks.
    pub fn break_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_break()).count()
    }

    /// Number of clicks.
    #[inline]
    pub fn click_count(&self) -> usize {
        self.clicks.len()
    }

    /// The most recent point, ignoring any trailing break.
    pub fn last_point(&self) -> Option<&TrailPoint> {
        self.entries.iter().rev().find_map(TrailEntry::as_point)
    }

    /// Remove everything.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.clicks.clear();
    }

    /// Evict expired points and clicks.
    ///
    /// Removes every point and click with `now - t > lifespan`, keeping the
    /// relative order of survivors. A break is dropped once no point
    /// survives on either side of it (between it and the neighbouring
    /// breaks or the ends of the sequence). Pruning twice with the same
    /// arguments removes nothing the second time.
    pub fn prune(&mut self, now: Instant, lifespan: Duration) -> PruneStats {
        let mut stats = PruneStats::default();

        let before = self.entries.len();
        self.entries.retain(|entry| match entry {
            TrailEntry::Point(p) => p.age(now) <= lifespan,
            TrailEntry::Break => true,
        });
        stats.points = before - self.entries.len();

        let before = self.clicks.len();
        self.clicks.retain(|c| c.age(now) <= lifespan);
        stats.clicks = before - self.clicks.len();

        stats.breaks = self.drop_orphan_breaks();
        stats
    }

    /// Drop breaks with no point immediately before or after them.
    fn drop_orphan_breaks(&mut self) -> usize {
        if !self.entries.iter().any(TrailEntry::is_break) {
            return 0;
        }

        let before = self.entries.len();
        let mut kept: VecDeque<TrailEntry> = VecDeque::with_capacity(before);
        let mut iter = self.entries.drain(..).peekable();

        while let Some(entry) = iter.next() {
            if entry.is_break() {
                let point_before = matches!(kept.back(), Some(TrailEntry::Point(_)));
                let point_after = matches!(iter.peek(), Some(TrailEntry::Point(_)));
                if !point_before && !point_after {
                    continue;
                }
            }
            kept.push_back(entry);
        }
        drop(iter);

        self.entries = kept;
        before - self.entries.len()
    }
}
