//! Draw primitives emitted by the renderers.

use crate::color::Rgb;
use crate::config::CursorAlignment;
use crate::geometry::{BBox, Vec2};
use std::path::PathBuf;
use std::sync::Arc;

/// Which point of an image sits at its draw position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Anchor {
    /// Image center.
    #[default]
    Center,
    /// Top-left corner.
    NorthWest,
    /// Top-right corner.
    NorthEast,
    /// Bottom-left corner.
    SouthWest,
    /// Bottom-right corner.
    SouthEast,
}

impl Anchor {
    /// Top-left corner of a `width` x `height` image anchored at `pos`.
    pub fn top_left(self, pos: Vec2, width: f64, height: f64) -> Vec2 {
        match self {
            Self::Center => Vec2::new(pos.x - width / 2.0, pos.y - height / 2.0),
            Self::NorthWest => pos,
            Self::NorthEast => Vec2::new(pos.x - width, pos.y),
            Self::SouthWest => Vec2::new(pos.x, pos.y - height),
            Self::SouthEast => Vec2::new(pos.x - width, pos.y - height),
        }
    }
}

impl From<CursorAlignment> for Anchor {
    fn from(alignment: CursorAlignment) -> Self {
        match alignment {
            CursorAlignment::Center => Self::Center,
            CursorAlignment::TopLeft => Self::NorthWest,
            CursorAlignment::TopRight => Self::NorthEast,
            CursorAlignment::BottomLeft => Self::SouthWest,
            CursorAlignment::BottomRight => Self::SouthEast,
        }
    }
}

/// A loaded, scaled substitute image.
///
/// The pixels belong to the image loader; the canvas looks them up by path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Glyph {
    /// Source image path.
    pub path: PathBuf,
    /// Scaled width in pixels.
    pub width: u32,
    /// Scaled height in pixels.
    pub height: u32,
}

/// One primitive draw operation in absolute canvas coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Open polyline of constant width.
    Polyline {
        /// Vertices in order.
        points: Vec<Vec2>,
        /// Stroke color.
        color: Rgb,
        /// Stroke width in pixels.
        width: f64,
    },
    /// Closed, filled polygon.
    Polygon {
        /// Vertices in order; the last connects back to the first.
        points: Vec<Vec2>,
        /// Fill color.
        color: Rgb,
    },
    /// Filled oval inscribed in a box.
    Oval {
        /// Bounding box.
        bbox: BBox,
        /// Fill and outline color.
        color: Rgb,
    },
    /// Substitute image.
    Image {
        /// Draw position.
        pos: Vec2,
        /// Image to draw.
        glyph: Arc<Glyph>,
        /// Which point of the image sits at `pos`.
        anchor: Anchor,
    },
}

impl DrawCommand {
    /// Number of vertices (1 for ovals and images).
    pub fn vertex_count(&self) -> usize {
        match self {
            Self::Polyline { points, .. } | Self::Polygon { points, .. } => points.len(),
            Self::Oval { .. } | Self::Image { .. } => 1,
        }
    }
}
