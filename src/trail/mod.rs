//! Trail module: Motion history and its segmentation into strokes.
//!
//! This module contains:
//! - [`TrailPoint`], [`TrailEntry`], [`ClickEvent`]: Immutable history records
//! - [`TrailBuffer`]: Time-windowed history of points, breaks and clicks
//! - [`MotionAccumulator`]: Integrates relative deltas and decides recenters
//! - [`build_strokes`]: Splits the history into break-free [`Stroke`]s

mod accumulator;
mod buffer;
mod point;
mod segment;

pub use accumulator::{MotionAccumulator, RecenterReason};
pub use buffer::{PruneStats, TrailBuffer};
pub use point::{ClickEvent, ClickPhase, MouseButton, TrailEntry, TrailPoint};
pub use segment::{build_strokes, Stroke};
