//! Stroke geometry: Turns strokes into polylines and filled polygons.
//!
//! # Fade Law
//!
//! A point's rendered width shrinks linearly with age:
//!
//! ```text
//! width(age) = line_width * clamp(1 - age / lifespan, 0, 1)
//! ```
//!
//! It is `line_width` at age zero and exactly zero once `age >= lifespan`.
//!
//! # Ribbon Construction
//!
//! ```text
//!   right chain  r0 ──── r1 ──── r2          p_i ± perp_i * width_i / 2
//!                │       │       │
//!   points       p0 ──── p1 ──── p2
//!                │       │       │
//!   left chain   l0 ──── l1 ──── l2
//!
//!   smooth_fade:  one polygon  r0 r1 r2 l2 l1 l0
//!   jagged_fade:  one quad per pair  l0 r0 r1 l1,  l1 r1 r2 l2
//! ```

use super::primitive::DrawCommand;
use crate::color::Rgb;
use crate::config::{Config, LineStyle};
use crate::geometry::Vec2;
use crate::trail::{Stroke, TrailPoint};
use std::time::{Duration, Instant};

/// Width of a point of the given age under the fade law.
#[inline]
pub fn fade_width(base_width: f64, age: Duration, lifespan: Duration) -> f64 {
    if lifespan.is_zero() {
        return 0.0;
    }
    let factor = (1.0 - age.as_secs_f64() / lifespan.as_secs_f64()).clamp(0.0, 1.0);
    base_width * factor
}

/// Insert `steps - 1` linearly interpolated points between each pair.
///
/// Timestamps are interpolated too, so interpolated points fade
/// consistently with their neighbours. `steps <= 1` returns the input.
pub fn subdivide(points: &[TrailPoint], steps: u32) -> Vec<TrailPoint> {
    if steps <= 1 || points.len() < 2 {
        return points.to_vec();
    }

    let mut out = Vec::with_capacity((points.len() - 1) * steps as usize + 1);
    for pair in points.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let span = b.t.saturating_duration_since(a.t);
        for i in 0..steps {
            let frac = f64::from(i) / f64::from(steps);
            out.push(TrailPoint::new(a.pos.lerp(b.pos, frac), a.t + span.mul_f64(frac)));
        }
    }
    if let Some(last) = points.last() {
        out.push(*last);
    }
    out
}

/// Per-frame stroke renderer.
///
/// Built once per frame from the config snapshot; the style is resolved
/// here and dispatched with a single match per stroke.
#[derive(Debug, Clone)]
pub struct StrokeRenderer {
    /// Drawing algorithm.
    style: LineStyle,
    /// Base width in pixels.
    line_width: f64,
    /// Trail color.
    color: Rgb,
    /// Fade lifespan.
    lifespan: Duration,
    /// Sub-segment interpolation steps.
    smoothing_steps: u32,
    /// Virtual center in canvas coordinates.
    center: Vec2,
    /// Frame time.
    now: Instant,
}

impl StrokeRenderer {
    /// Create a renderer for one frame.
    pub fn new(config: &Config, center: Vec2, now: Instant) -> Self {
        Self {
            style: config.line_style,
            line_width: config.line_width,
            color: config.line_color,
            lifespan: config.lifespan(),
            smoothing_steps: config.smoothing_steps.max(1),
            center,
            now,
        }
    }

    /// The style this renderer draws with.
    pub const fn style(&self) -> LineStyle {
        self.style
    }

    /// Render one stroke into a new command list.
    pub fn render(&self, stroke: &Stroke) -> Vec<DrawCommand> {
        let mut out = Vec::new();
        self.render_into(stroke, &mut out);
        out
    }

    /// Render one stroke, appending commands to `out`.
    pub fn render_into(&self, stroke: &Stroke, out: &mut Vec<DrawCommand>) {
        if stroke.len() < 2 {
            return;
        }

        let smoothed;
        let points: &[TrailPoint] = if self.style.smooths() && self.smoothing_steps > 1 {
            smoothed = subdivide(&stroke.points, self.smoothing_steps);
            &smoothed
        } else {
            &stroke.points
        };

        match self.style {
            LineStyle::Uniform => self.uniform(points, out),
            LineStyle::SmoothFade => self.smooth_fade(points, out),
            LineStyle::JaggedFade => self.jagged_fade(points, out),
        }
    }

    #[inline]
    fn half_width(&self, point: &TrailPoint) -> f64 {
        fade_width(self.line_width, point.age(self.now), self.lifespan) / 2.0
    }

    #[inline]
    fn to_canvas(&self, offset: Vec2) -> Vec2 {
        self.center + offset
    }

    /// Constant-width polyline, no fade.
    fn uniform(&self, points: &[TrailPoint], out: &mut Vec<DrawCommand>) {
        out.push(DrawCommand::Polyline {
            points: points.iter().map(|p| self.to_canvas(p.pos)).collect(),
            color: self.color,
            width: self.line_width,
        });
    }

    /// One closed ribbon: right chain forward, left chain reversed.
    fn smooth_fade(&self, points: &[TrailPoint], out: &mut Vec<DrawCommand>) {
        // Drop coincident neighbours; they have no direction.
        let mut kept: Vec<&TrailPoint> = Vec::with_capacity(points.len());
        for p in points {
            if kept.last().map_or(true, |last| last.pos != p.pos) {
                kept.push(p);
            }
        }
        if kept.len() < 2 {
            return;
        }

        let mut right = Vec::with_capacity(kept.len());
        let mut left = Vec::with_capacity(kept.len());
        let mut max_half = 0.0_f64;

        for i in 0..kept.len() {
            let (from, to) = if i == 0 { (kept[0], kept[1]) } else { (kept[i - 1], kept[i]) };
            let Some(perp) = (to.pos - from.pos).unit_perpendicular() else {
                continue;
            };
            let half = self.half_width(kept[i]);
            max_half = max_half.max(half);

            let pos = self.to_canvas(kept[i].pos);
            right.push(pos + perp * half);
            left.push(pos - perp * half);
        }

        if max_half <= 0.0 {
            return;
        }

        right.extend(left.into_iter().rev());
        if right.len() > 2 {
            out.push(DrawCommand::Polygon {
                points: right,
                color: self.color,
            });
        }
    }

    /// One trapezoid per adjacent pair, widths from each endpoint's age.
    fn jagged_fade(&self, points: &[TrailPoint], out: &mut Vec<DrawCommand>) {
        for pair in points.windows(2) {
            let (p1, p2) = (&pair[0], &pair[1]);
            let Some(perp) = (p2.pos - p1.pos).unit_perpendicular() else {
                continue;
            };
            let h1 = self.half_width(p1);
            let h2 = self.half_width(p2);
            if h1 <= 0.0 && h2 <= 0.0 {
                continue;
            }

            let a = self.to_canvas(p1.pos);
            let b = self.to_canvas(p2.pos);
            out.push(DrawCommand::Polygon {
                points: vec![a - perp * h1, a + perp * h1, b + perp * h2, b - perp * h2],
                color: self.color,
            });
        }
    }
}
