//! Geometry module: Value types for trail coordinates.
//!
//! This module contains:
//! - [`Vec2`]: A 2D point/vector in canvas pixels
//! - [`BBox`]: An axis-aligned bounding box (oval extents)
//! - [`CanvasSize`]: Live canvas dimensions and the virtual center

mod bbox;
mod vec2;

pub use bbox::{BBox, CanvasSize};
pub use vec2::Vec2;
