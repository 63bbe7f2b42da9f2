//! Render module: Per-frame geometry for the trail, clicks and cursor.
//!
//! Nothing here rasterizes. Renderers turn trail state into
//! [`DrawCommand`]s which a [`Canvas`] implementation paints.
//!
//! - [`StrokeRenderer`]: Uniform / smooth-fade / jagged-fade stroke geometry
//! - [`ClickRenderer`]: Click markers and the cursor glyph
//! - [`GlyphCache`]: Memoized substitute-image resolution

mod canvas;
mod click;
mod primitive;
mod stroke;

pub use canvas::{Canvas, Frame, RecordingCanvas};
pub use click::{ClickRenderer, GlyphAtlas, GlyphCache, GlyphSource, NoGlyphs};
pub use primitive::{Anchor, DrawCommand, Glyph};
pub use stroke::{fade_width, subdivide, StrokeRenderer};
