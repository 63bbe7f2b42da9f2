//! Segmentation: Split trail history into continuous strokes.

use super::point::{TrailEntry, TrailPoint};

/// A maximal run of points with no break in between.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Stroke {
    /// Points in capture order.
    pub points: Vec<TrailPoint>,
}

impl Stroke {
    /// Create a stroke from points.
    #[inline]
    pub const fn new(points: Vec<TrailPoint>) -> Self {
        Self { points }
    }

    /// Number of points.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the stroke has no points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Build strokes from a snapshot of trail entries.
///
/// Single pass: points accumulate into the current stroke, which is flushed
/// at each break and at the end. Empty runs are never emitted, so a
/// sequence of only breaks yields no strokes.
pub fn build_strokes<'a, I>(entries: I) -> Vec<Stroke>
where
    I: IntoIterator<Item = &'a TrailEntry>,
{
    let mut strokes = Vec::new();
    let mut current: Vec<TrailPoint> = Vec::new();

    for entry in entries {
        match entry {
            TrailEntry::Point(p) => current.push(*p),
            TrailEntry::Break => {
                if !current.is_empty() {
                    strokes.push(Stroke::new(std::mem::take(&mut current)));
                }
            }
        }
    }

    if !current.is_empty() {
        strokes.push(Stroke::new(current));
    }

    strokes
}
