//! Actor Model: Message-passing between capture and rendering.
//!
//! Two logical activities run concurrently and share nothing but channels:
//! - **Input side**: An [`InputSource`] (or any capture callback holding an
//!   [`InputSink`]) pushes stamped events without ever blocking
//! - **Render thread**: [`TrailEngine`] owns all trail state, drains the
//!   channels at tick boundaries and paints each frame
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   InputEvent (bounded, try_send)   ┌──────────────┐
//! │ Input Source │ ─────────────────────────────────▶ │              │
//! └──────────────┘                                    │ TrailEngine  │ ──▶ Canvas
//!                                                     │ (render tick)│
//! ┌──────────────┐   ControlCommand                   │              │
//! │ EngineHandle │ ─────────────────────────────────▶ │              │
//! └──────────────┘                                    └──────────────┘
//! ```

mod engine;
mod input;
mod messages;

pub use engine::{EngineHandle, FrameStats, TrailEngine, INPUT_CHANNEL_CAPACITY};
pub use input::{InputSink, InputSource, MouseDeltas, TerminalMouseSource};
pub use messages::{ControlCommand, InputEvent};
