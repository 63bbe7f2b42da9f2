//! # Mousetrail
//!
//! A fading pointer-motion trail engine with click markers.
//!
//! Relative pointer motion is integrated into an offset from a virtual
//! center, kept in a time-windowed history and re-rendered every frame as
//! strokes whose width tapers with age.
//!
//! ## Core Concepts
//!
//! - **Trail history**: Points and breaks in arrival order, pruned by age
//! - **Recentering**: The offset snaps back to the center after inactivity
//!   or when it leaves the canvas, splitting the trail with a break
//! - **Stroke styles**: Uniform polyline, smooth fading ribbon, or a chain
//!   of fading trapezoids
//! - **Actor model**: Capture pushes events over a channel; the render
//!   thread owns all state and paints at a fixed cadence
//!
//! ## Example
//!
//! ```rust,ignore
//! use mousetrail::{Config, NoGlyphs, RecordingCanvas, TrailEngine};
//! use std::time::Instant;
//!
//! let mut engine = TrailEngine::new(Config::default(), RecordingCanvas::new(800, 600), NoGlyphs);
//! let sink = engine.input_sink();
//! sink.on_motion_delta(5, 0);
//! sink.on_motion_delta(5, 2);
//!
//! let stats = engine.tick(Instant::now())?;
//! assert_eq!(stats.strokes, 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod actor;
pub mod color;
pub mod config;
pub mod error;
pub mod geometry;
pub mod render;
pub mod trail;

// Re-exports for convenience
pub use actor::{EngineHandle, FrameStats, InputEvent, InputSink, InputSource, TerminalMouseSource, TrailEngine};
pub use color::Rgb;
pub use config::{Config, ConfigChanges, ConfigStore, ConfigValue, CursorAlignment, LineStyle};
pub use error::{CanvasError, ConfigError, GlyphError, InputError};
pub use geometry::{BBox, CanvasSize, Vec2};
pub use render::{Canvas, ClickRenderer, DrawCommand, GlyphAtlas, GlyphCache, GlyphSource, NoGlyphs, RecordingCanvas, StrokeRenderer};
pub use trail::{build_strokes, MotionAccumulator, Stroke, TrailBuffer, TrailPoint};
