//! Message types for actor communication.
//!
//! These enums define the protocol between the capture side and the
//! render thread.

use crate::config::ConfigValue;
use crate::trail::MouseButton;
use std::time::Instant;

/// Events sent from an input source to the render thread.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Relative pointer displacement.
    MotionDelta {
        /// Horizontal delta in device units.
        dx: i32,
        /// Vertical delta in device units.
        dy: i32,
        /// Capture time.
        at: Instant,
    },

    /// Button press or release.
    ///
    /// The position is informational; markers are placed at the trail's
    /// current offset.
    Click {
        /// Absolute X reported by the source.
        x: i32,
        /// Absolute Y reported by the source.
        y: i32,
        /// Button involved.
        button: MouseButton,
        /// `true` on press, `false` on release.
        pressed: bool,
        /// Capture time.
        at: Instant,
    },
}

/// Commands sent to the render thread, applied at tick boundaries.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlCommand {
    /// Merge named settings; they take effect on the next tick.
    ApplyConfig(Vec<(String, ConfigValue)>),
    /// Stop the frame loop.
    Shutdown,
}
