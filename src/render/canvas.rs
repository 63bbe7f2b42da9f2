//! Canvas: The painting surface the frame scheduler draws into.
//!
//! Implementations own the actual window/surface. [`RecordingCanvas`]
//! keeps every presented frame in memory, for tests and headless runs.

use super::primitive::DrawCommand;
use crate::color::Rgb;
use crate::error::CanvasError;
use crate::geometry::CanvasSize;

/// A surface that paints primitive draw commands.
///
/// Every method may fail with [`CanvasError::Unavailable`] once the surface
/// is gone; the frame scheduler then stops without rescheduling.
pub trait Canvas {
    /// Live surface size in pixels.
    fn size(&self) -> Result<CanvasSize, CanvasError>;

    /// Start a frame by filling the surface with the background color.
    fn clear(&mut self, background: Rgb) -> Result<(), CanvasError>;

    /// Paint one primitive.
    fn draw(&mut self, command: &DrawCommand) -> Result<(), CanvasError>;

    /// Finish the frame.
    fn present(&mut self) -> Result<(), CanvasError> {
        Ok(())
    }
}

/// One presented frame.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Frame {
    /// Background the frame was cleared to.
    pub background: Rgb,
    /// Commands in paint order.
    pub commands: Vec<DrawCommand>,
}

/// Canvas that records frames instead of painting them.
#[derive(Debug, Clone)]
pub struct RecordingCanvas {
    /// Reported size.
    size: CanvasSize,
    /// Frame being drawn.
    current: Frame,
    /// Presented frames, oldest first.
    frames: Vec<Frame>,
    /// Keep at most this many presented frames.
    max_frames: usize,
    /// Whether the canvas has been closed.
    closed: bool,
}

impl RecordingCanvas {
    /// Create a recording canvas of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: CanvasSize::new(width, height),
            current: Frame::default(),
            frames: Vec::new(),
            max_frames: 64,
            closed: false,
        }
    }

    /// Keep at most `max` presented frames (older ones are discarded).
    #[must_use]
    pub fn with_history(mut self, max: usize) -> Self {
        self.max_frames = max.max(1);
        self
    }

    /// Simulate a window resize.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.size = CanvasSize::new(width, height);
    }

    /// Simulate the window being destroyed.
    pub fn close(&mut self) {
        self.closed = true;
    }

    /// Presented frames, oldest first.
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// The most recently presented frame.
    pub fn last_frame(&self) -> Option<&Frame> {
        self.frames.last()
    }

    /// Commands drawn since the last `clear`, not yet presented.
    pub fn pending(&self) -> &[DrawCommand] {
        &self.current.commands
    }

    const fn check_open(&self) -> Result<(), CanvasError> {
        if self.closed {
            Err(CanvasError::Unavailable)
        } else {
            Ok(())
        }
    }
}

impl Canvas for RecordingCanvas {
    fn size(&self) -> Result<CanvasSize, CanvasError> {
        self.check_open()?;
        Ok(self.size)
    }

    fn clear(&mut self, background: Rgb) -> Result<(), CanvasError> {
        self.check_open()?;
        self.current = Frame {
            background,
            commands: Vec::new(),
        };
        Ok(())
    }

    fn draw(&mut self, command: &DrawCommand) -> Result<(), CanvasError> {
        self.check_open()?;
        self.current.commands.push(command.clone());
        Ok(())
    }

    fn present(&mut self) -> Result<(), CanvasError> {
        self.check_open()?;
        if self.frames.len() >= self.max_frames {
            self.frames.remove(0);
        }
        self.frames.push(std::mem::take(&mut self.current));
        Ok(())
    }
}
