//! Input: Capture-side hand-off to the render thread.
//!
//! Capture callbacks run in a context the render loop does not control.
//! [`InputSink`] stamps each notification and pushes it into a bounded
//! channel without blocking; if the channel is full the event is dropped
//! and counted. The render thread drains the channel at the start of each
//! tick.
//!
//! [`TerminalMouseSource`] is a concrete [`InputSource`] that polls
//! crossterm mouse events on a dedicated thread.

use super::messages::InputEvent;
use crate::error::InputError;
use crate::trail::MouseButton;
use crossbeam_channel::{Sender, TrySendError};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers, MouseEventKind};
use crossterm::{execute, terminal};
use std::io;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Non-blocking producer handle for capture callbacks.
///
/// Cheap to clone; every clone feeds the same render thread.
#[derive(Debug, Clone)]
pub struct InputSink {
    tx: Sender<InputEvent>,
    dropped: Arc<AtomicU64>,
}

impl InputSink {
    pub(crate) fn new(tx: Sender<InputEvent>) -> Self {
        Self {
            tx,
            dropped: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Relative motion notification.
    #[inline]
    pub fn on_motion_delta(&self, dx: i32, dy: i32) {
        self.send(InputEvent::MotionDelta {
            dx,
            dy,
            at: Instant::now(),
        });
    }

    /// Button press/release notification.
    #[inline]
    pub fn on_click(&self, x: i32, y: i32, button: MouseButton, pressed: bool) {
        self.send(InputEvent::Click {
            x,
            y,
            button,
            pressed,
            at: Instant::now(),
        });
    }

    /// Forward an already stamped event.
    ///
    /// Returns `false` if the event was dropped.
    pub fn send(&self, event: InputEvent) -> bool {
        match self.tx.try_send(event) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                let n = self.dropped.fetch_add(1, Ordering::Relaxed) + 1;
                debug!(dropped = n, "input channel full, event dropped");
                false
            }
            Err(TrySendError::Disconnected(_)) => false,
        }
    }

    /// Events dropped so far because the channel was full.
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }
}

/// Something that produces motion deltas and clicks.
///
/// `start` must return promptly; capture happens on the source's own
/// thread or callback context and is delivered through the sink.
pub trait InputSource {
    /// Begin capturing into `sink`.
    fn start(&mut self, sink: InputSink) -> Result<(), InputError>;

    /// Stop capturing. After this returns no more events are sent.
    fn stop(&mut self);
}

/// Converts absolute terminal mouse positions into relative deltas.
///
/// The first movement only seeds the last position. Middle button and
/// scroll events are ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct MouseDeltas {
    last: Option<(i32, i32)>,
}

impl MouseDeltas {
    /// Create a tracker with no known position.
    pub const fn new() -> Self {
        Self { last: None }
    }

    /// Feed one crossterm mouse event.
    pub fn feed(&mut self, mouse: &event::MouseEvent, sink: &InputSink) {
        let x = i32::from(mouse.column);
        let y = i32::from(mouse.row);

        match mouse.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                if let Some((lx, ly)) = self.last {
                    let (dx, dy) = (x - lx, y - ly);
                    if dx != 0 || dy != 0 {
                        sink.on_motion_delta(dx, dy);
                    }
                }
                self.last = Some((x, y));
            }
            MouseEventKind::Down(button) => {
                if let Some(button) = convert_button(button) {
                    sink.on_click(x, y, button, true);
                }
            }
            MouseEventKind::Up(button) => {
                if let Some(button) = convert_button(button) {
                    sink.on_click(x, y, button, false);
                }
            }
            _ => {}
        }
    }
}

const fn convert_button(button: event::MouseButton) -> Option<MouseButton> {
    match button {
        event::MouseButton::Left => Some(MouseButton::Left),
        event::MouseButton::Right => Some(MouseButton::Right),
        event::MouseButton::Middle => None,
    }
}

/// Terminal mouse capture on a dedicated thread.
///
/// Enables raw mode and mouse reporting on start and restores the
/// terminal on stop. Esc, `q` or Ctrl+C set the quit flag.
pub struct TerminalMouseSource {
    /// Poll timeout between shutdown checks.
    poll_timeout: Duration,
    /// Handle to the capture thread.
    handle: Option<JoinHandle<()>>,
    /// Flag to signal shutdown.
    shutdown: Arc<AtomicBool>,
    /// Set when the user asked to quit.
    quit: Arc<AtomicBool>,
}

impl TerminalMouseSource {
    /// Create a source polling with the given timeout.
    pub fn new(poll_timeout: Duration) -> Self {
        Self {
            poll_timeout,
            handle: None,
            shutdown: Arc::new(AtomicBool::new(false)),
            quit: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Check if the user pressed a quit key.
    pub fn quit_requested(&self) -> bool {
        self.quit.load(Ordering::Relaxed)
    }

    /// Shared quit flag, for polling from another thread.
    pub fn quit_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.quit)
    }

    fn run_loop(sink: &InputSink, shutdown: &AtomicBool, quit: &AtomicBool, poll_timeout: Duration) {
        let mut deltas = MouseDeltas::new();

        while !shutdown.load(Ordering::Relaxed) {
            match event::poll(poll_timeout) {
                Ok(true) => match event::read() {
                    Ok(Event::Mouse(mouse)) => deltas.feed(&mouse, sink),
                    Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                        let ctrl_c = key.code == KeyCode::Char('c')
                            && key.modifiers.contains(KeyModifiers::CONTROL);
                        if ctrl_c || matches!(key.code, KeyCode::Esc | KeyCode::Char('q')) {
                            quit.store(true, Ordering::Relaxed);
                        }
                    }
                    Ok(_) => {}
                    Err(e) => warn!(error = %e, "terminal read failed"),
                },
                Ok(false) => {}
                Err(e) => {
                    warn!(error = %e, "terminal poll failed, stopping capture");
                    break;
                }
            }
        }
    }
}

impl Default for TerminalMouseSource {
    fn default() -> Self {
        Self::new(Duration::from_millis(10))
    }
}

impl InputSource for TerminalMouseSource {
    fn start(&mut self, sink: InputSink) -> Result<(), InputError> {
        if self.handle.is_some() {
            return Err(InputError::AlreadyStarted);
        }

        terminal::enable_raw_mode()?;
        execute!(io::stdout(), event::EnableMouseCapture)?;

        self.shutdown.store(false, Ordering::Relaxed);
        let shutdown = Arc::clone(&self.shutdown);
        let quit = Arc::clone(&self.quit);
        let poll_timeout = self.poll_timeout;

        let handle = thread::Builder::new()
            .name("mousetrail-input".to_string())
            .spawn(move || Self::run_loop(&sink, &shutdown, &quit, poll_timeout));

        match handle {
            Ok(handle) => {
                self.handle = Some(handle);
                debug!("terminal mouse capture started");
                Ok(())
            }
            Err(e) => {
                let _ = execute!(io::stdout(), event::DisableMouseCapture);
                let _ = terminal::disable_raw_mode();
                Err(e.into())
            }
        }
    }

    fn stop(&mut self) {
        let Some(handle) = self.handle.take() else {
            return;
        };

        self.shutdown.store(true, Ordering::Relaxed);
        let _ = handle.join();

        let _ = execute!(io::stdout(), event::DisableMouseCapture);
        let _ = terminal::disable_raw_mode();
        debug!("terminal mouse capture stopped");
    }
}

impl Drop for TerminalMouseSource {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::bounded;

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> event::MouseEvent {
        event::MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_sink_drops_when_full() {
        let (tx, rx) = bounded(2);
        let sink = InputSink::new(tx);

        sink.on_motion_delta(1, 1);
        sink.on_motion_delta(2, 2);
        sink.on_motion_delta(3, 3);

        assert_eq!(sink.dropped(), 1);
        assert_eq!(rx.len(), 2);
        assert!(matches!(rx.try_recv(), Ok(InputEvent::MotionDelta { dx: 1, dy: 1, .. })));
    }

    #[test]
    fn test_sink_clones_share_counter() {
        let (tx, _rx) = bounded(0);
        let sink = InputSink::new(tx);
        let other = sink.clone();
        other.on_click(0, 0, MouseButton::Left, true);
        assert_eq!(sink.dropped(), 1);
    }

    #[test]
    fn test_first_move_only_seeds() {
        let (tx, rx) = bounded(16);
        let sink = InputSink::new(tx);
        let mut deltas = MouseDeltas::new();

        deltas.feed(&mouse(MouseEventKind::Moved, 10, 5), &sink);
        assert!(rx.is_empty());

        deltas.feed(&mouse(MouseEventKind::Moved, 13, 4), &sink);
        deltas.feed(&mouse(MouseEventKind::Drag(event::MouseButton::Left), 13, 4), &sink);
        deltas.feed(&mouse(MouseEventKind::Moved, 12, 6), &sink);

        let got: Vec<(i32, i32)> = rx
            .try_iter()
            .map(|e| match e {
                InputEvent::MotionDelta { dx, dy, .. } => (dx, dy),
                other => panic!("unexpected {other:?}"),
            })
            .collect();
        assert_eq!(got, vec![(3, -1), (-1, 2)]);
    }

    #[test]
    fn test_buttons() {
        let (tx, rx) = bounded(16);
        let sink = InputSink::new(tx);
        let mut deltas = MouseDeltas::new();

        deltas.feed(&mouse(MouseEventKind::Down(event::MouseButton::Right), 1, 2), &sink);
        deltas.feed(&mouse(MouseEventKind::Up(event::MouseButton::Middle), 1, 2), &sink);
        deltas.feed(&mouse(MouseEventKind::ScrollUp, 1, 2), &sink);
        deltas.feed(&mouse(MouseEventKind::Up(event::MouseButton::Right), 1, 2), &sink);

        let got: Vec<(MouseButton, bool)> = rx
            .try_iter()
            .map(|e| match e {
                InputEvent::Click { button, pressed, .. } => (button, pressed),
                other => panic!("unexpected {other:?}"),
            })
            .collect();
        assert_eq!(got, vec![(MouseButton::Right, true), (MouseButton::Right, false)]);
    }
}
