//! Click markers and the cursor glyph.
//!
//! Each click category (button x phase) draws either a configured
//! substitute image or, when no image resolves, a filled circle of the
//! category's color and radius. Image resolution goes through a
//! [`GlyphCache`] so a broken path is reported once, not every frame.

use super::primitive::{Anchor, DrawCommand, Glyph};
use crate::config::{Config, CursorAlignment, ImageOverride};
use crate::error::GlyphError;
use crate::geometry::{BBox, Vec2};
use crate::trail::ClickEvent;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

/// Loads substitute images.
pub trait GlyphSource {
    /// Load the image at `path`, scaled by `scale`.
    fn load(&self, path: &Path, scale: f64) -> Result<Glyph, GlyphError>;
}

/// A source with no images; every lookup fails and markers fall back to
/// shapes.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoGlyphs;

impl GlyphSource for NoGlyphs {
    fn load(&self, path: &Path, _scale: f64) -> Result<Glyph, GlyphError> {
        Err(GlyphError::NotFound(path.to_path_buf()))
    }
}

/// In-memory image registry keyed by path.
///
/// Stores each image's native size; loading scales it.
#[derive(Debug, Clone, Default)]
pub struct GlyphAtlas {
    sizes: HashMap<PathBuf, (u32, u32)>,
}

impl GlyphAtlas {
    /// Create an empty atlas.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an image of native size `width` x `height`.
    pub fn insert(&mut self, path: impl Into<PathBuf>, width: u32, height: u32) {
        self.sizes.insert(path.into(), (width, height));
    }

    /// Builder form of [`GlyphAtlas::insert`].
    #[must_use]
    pub fn with(mut self, path: impl Into<PathBuf>, width: u32, height: u32) -> Self {
        self.insert(path, width, height);
        self
    }
}

impl GlyphSource for GlyphAtlas {
    #[allow(clippy::cast_sign_loss)]
    fn load(&self, path: &Path, scale: f64) -> Result<Glyph, GlyphError> {
        let &(w, h) = self
            .sizes
            .get(path)
            .ok_or_else(|| GlyphError::NotFound(path.to_path_buf()))?;

        if !(scale.is_finite() && scale > 0.0) {
            return Err(GlyphError::Decode {
                path: path.to_path_buf(),
                reason: format!("invalid scale {scale}"),
            });
        }

        let scaled = |n: u32| ((f64::from(n) * scale).round() as u32).max(1);
        Ok(Glyph {
            path: path.to_path_buf(),
            width: scaled(w),
            height: scaled(h),
        })
    }
}

/// Memoizing wrapper around a [`GlyphSource`].
///
/// Both successes and failures are cached per (path, scale); a failure is
/// logged the first time only. Call [`GlyphCache::invalidate`] after the
/// image settings change.
#[derive(Debug)]
pub struct GlyphCache<S> {
    source: S,
    entries: HashMap<(PathBuf, u64), Option<Arc<Glyph>>>,
}

impl<S: GlyphSource> GlyphCache<S> {
    /// Wrap a source.
    pub fn new(source: S) -> Self {
        Self {
            source,
            entries: HashMap::new(),
        }
    }

    /// Resolve an override, loading it on first use.
    pub fn resolve(&mut self, image: &ImageOverride) -> Option<Arc<Glyph>> {
        let key = (image.path.clone(), image.scale.to_bits());
        if let Some(cached) = self.entries.get(&key) {
            return cached.clone();
        }

        let loaded = match self.source.load(&image.path, image.scale) {
            Ok(glyph) => {
                debug!(path = %image.path.display(), width = glyph.width, height = glyph.height, "glyph loaded");
                Some(Arc::new(glyph))
            }
            Err(e) => {
                warn!(error = %e, "falling back to shape marker");
                None
            }
        };
        self.entries.insert(key, loaded.clone());
        loaded
    }

    /// Forget every cached result.
    pub fn invalidate(&mut self) {
        self.entries.clear();
    }

    /// Number of cached lookups.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The wrapped source.
    pub const fn source(&self) -> &S {
        &self.source
    }
}

/// Per-frame click and cursor renderer.
#[derive(Debug, Clone)]
pub struct ClickRenderer<'a> {
    config: &'a Config,
    center: Vec2,
}

impl<'a> ClickRenderer<'a> {
    /// Create a renderer for one frame.
    pub const fn new(config: &'a Config, center: Vec2) -> Self {
        Self { config, center }
    }

    /// Append one marker per click, oldest first.
    pub fn render_clicks<'c, I, S>(&self, clicks: I, glyphs: &mut GlyphCache<S>, out: &mut Vec<DrawCommand>)
    where
        I: IntoIterator<Item = &'c ClickEvent>,
        S: GlyphSource,
    {
        for click in clicks {
            out.push(self.marker(click, glyphs));
        }
    }

    /// Marker for a single click.
    pub fn marker<S: GlyphSource>(&self, click: &ClickEvent, glyphs: &mut GlyphCache<S>) -> DrawCommand {
        let style = self.config.marker(click.button, click.phase);
        let pos = self.center + click.pos;

        if let Some(glyph) = style.image.as_ref().and_then(|img| glyphs.resolve(img)) {
            return DrawCommand::Image {
                pos,
                glyph,
                anchor: Anchor::Center,
            };
        }

        DrawCommand::Oval {
            bbox: BBox::around(pos, style.radius),
            color: style.color,
        }
    }

    /// Cursor glyph at the current offset.
    ///
    /// Draws nothing unless a cursor image is enabled and resolves.
    pub fn cursor<S: GlyphSource>(&self, offset: Vec2, glyphs: &mut GlyphCache<S>) -> Option<DrawCommand> {
        let image = self.config.cursor_image()?;
        let glyph = glyphs.resolve(&image)?;
        Some(DrawCommand::Image {
            pos: self.center + offset,
            glyph,
            anchor: Anchor::from(self.config.cursor_alignment),
        })
    }

    /// Configured cursor alignment.
    pub const fn alignment(&self) -> CursorAlignment {
        self.config.cursor_alignment
    }
}
