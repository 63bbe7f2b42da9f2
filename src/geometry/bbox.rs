//! `BBox` and `CanvasSize`: Rectangle primitives for markers and bounds checks.

use super::Vec2;

/// An axis-aligned bounding box defined by its corners.
///
/// Click markers are described as ovals inscribed in a `BBox`.
#[derive(Clone, Copy, PartialEq, Default)]
pub struct BBox {
    /// Left edge.
    pub x0: f64,
    /// Top edge.
    pub y0: f64,
    /// Right edge.
    pub x1: f64,
    /// Bottom edge.
    pub y1: f64,
}

impl BBox {
    /// Create a new bounding box from its corners.
    #[inline]
    pub const fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Box of a circle with the given center and radius.
    #[inline]
    pub fn around(center: Vec2, radius: f64) -> Self {
        Self::new(
            center.x - radius,
            center.y - radius,
            center.x + radius,
            center.y + radius,
        )
    }

    /// Width of the box.
    #[inline]
    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    /// Height of the box.
    #[inline]
    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }

    /// Center of the box.
    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new((self.x0 + self.x1) / 2.0, (self.y0 + self.y1) / 2.0)
    }

    /// Check if the box has no area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }
}

impl std::fmt::Debug for BBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "BBox({:.1}, {:.1} .. {:.1}, {:.1})",
            self.x0, self.y0, self.x1, self.y1
        )
    }
}

/// Live canvas dimensions in pixels.
///
/// Queried from the canvas every frame since the window may resize.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CanvasSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl CanvasSize {
    /// Create a new canvas size.
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// The virtual center: all trail offsets are relative to this point.
    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(f64::from(self.width) / 2.0, f64::from(self.height) / 2.0)
    }

    /// Half-extents `(W/2, H/2)` used by the out-of-bounds recenter check.
    #[inline]
    pub fn half_extents(&self) -> Vec2 {
        self.center()
    }

    /// Check if an offset from the virtual center is outside the canvas.
    ///
    /// True exactly when `|x| > W/2` or `|y| > H/2`, or when either
    /// component is NaN.
    #[inline]
    pub fn is_out_of_bounds(&self, offset: Vec2) -> bool {
        let half = self.half_extents();
        offset.x.is_nan() || offset.y.is_nan() || offset.x.abs() > half.x || offset.y.abs() > half.y
    }

    /// Check if the canvas has no drawable area.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl std::fmt::Debug for CanvasSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bbox_around() {
        let b = BBox::around(Vec2::new(10.0, 20.0), 5.0);
        assert_eq!(b, BBox::new(5.0, 15.0, 15.0, 25.0));
        assert_eq!(b.width(), 10.0);
        assert_eq!(b.height(), 10.0);
        assert_eq!(b.center(), Vec2::new(10.0, 20.0));
    }

    #[test]
    fn test_bbox_empty() {
        assert!(BBox::around(Vec2::ZERO, 0.0).is_empty());
        assert!(!BBox::around(Vec2::ZERO, 1.0).is_empty());
    }

    #[test]
    fn test_canvas_center() {
        let size = CanvasSize::new(800, 600);
        assert_eq!(size.center(), Vec2::new(400.0, 300.0));
    }

    #[test]
    fn test_out_of_bounds() {
        let size = CanvasSize::new(800, 600);
        assert!(!size.is_out_of_bounds(Vec2::new(400.0, 0.0)));
        assert!(size.is_out_of_bounds(Vec2::new(410.0, 0.0)));
        assert!(size.is_out_of_bounds(Vec2::new(-401.0, 0.0)));
        assert!(!size.is_out_of_bounds(Vec2::new(0.0, -300.0)));
        assert!(size.is_out_of_bounds(Vec2::new(0.0, 300.5)));
        assert!(size.is_out_of_bounds(Vec2::new(f64::NAN, 0.0)));
        assert!(size.is_out_of_bounds(Vec2::new(0.0, f64::INFINITY)));
    }
}
