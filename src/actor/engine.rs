//! Engine: The frame scheduler that owns the trail and paints it.
//!
//! `TrailEngine` is the render-side actor. It exclusively owns the
//! [`TrailBuffer`] and [`MotionAccumulator`]; capture callbacks reach it
//! only through the input channel, and settings only through the control
//! channel. Both are drained at tick boundaries, so a tick always works on
//! a consistent snapshot.
//!
//! Each tick:
//! 1. apply pending settings
//! 2. drain input into the accumulator and buffer
//! 3. recenter check against the live canvas size
//! 4. prune expired points, breaks and clicks
//! 5. build strokes and paint: background, strokes, clicks and cursor
//!
//! The next tick starts `frame_interval` after the current one finished.

use super::input::{InputSink, InputSource};
use super::messages::{ControlCommand, InputEvent};
use crate::config::{Config, ConfigChanges, ConfigValue};
use crate::error::{CanvasError, InputError};
use crate::render::{Canvas, ClickRenderer, DrawCommand, GlyphCache, GlyphSource, StrokeRenderer};
use crate::trail::{build_strokes, ClickPhase, MotionAccumulator, RecenterReason, TrailBuffer};
use crossbeam_channel::{bounded, unbounded, Receiver, RecvTimeoutError, Sender};
use std::io;
use std::thread::{self, JoinHandle};
use std::time::Instant;
use tracing::{debug, info, trace, warn};

/// Capacity of the capture hand-off channel.
pub const INPUT_CHANNEL_CAPACITY: usize = 4096;

/// What one tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameStats {
    /// Frame number (starts at 0).
    pub frame: u64,
    /// Input events drained this tick.
    pub input_events: usize,
    /// Strokes painted.
    pub strokes: usize,
    /// Click markers painted.
    pub clicks: usize,
    /// Draw commands issued (background clear excluded).
    pub commands: usize,
    /// Points evicted by pruning.
    pub pruned_points: usize,
    /// Clicks evicted by pruning.
    pub pruned_clicks: usize,
    /// Recenter fired this tick, and why.
    pub recentered: Option<RecenterReason>,
}

/// Cloneable control handle for a running engine.
#[derive(Debug, Clone)]
pub struct EngineHandle {
    control_tx: Sender<ControlCommand>,
}

impl EngineHandle {
    /// Merge named settings; they take effect on the next tick.
    ///
    /// Returns `false` if the engine is gone.
    pub fn apply_config<I, K>(&self, updates: I) -> bool
    where
        I: IntoIterator<Item = (K, ConfigValue)>,
        K: Into<String>,
    {
        let updates = updates.into_iter().map(|(k, v)| (k.into(), v)).collect();
        self.control_tx.send(ControlCommand::ApplyConfig(updates)).is_ok()
    }

    /// Ask the frame loop to stop after the current tick.
    pub fn shutdown(&self) -> bool {
        self.control_tx.send(ControlCommand::Shutdown).is_ok()
    }
}

/// Frame scheduler owning the trail state and the canvas.
pub struct TrailEngine<C, S> {
    /// Live settings, replaced only at tick boundaries.
    config: Config,
    /// Painting surface.
    canvas: C,
    /// Resolved substitute images.
    glyphs: GlyphCache<S>,
    /// Trail history.
    buffer: TrailBuffer,
    /// Running offset.
    motion: MotionAccumulator,
    /// Capture side of the input channel (cloned into sinks).
    input_sink: InputSink,
    /// Render side of the input channel.
    input_rx: Receiver<InputEvent>,
    /// Control channel.
    control_tx: Sender<ControlCommand>,
    control_rx: Receiver<ControlCommand>,
    /// Settings received while sleeping, applied at the next tick.
    pending: Vec<(String, ConfigValue)>,
    /// Scratch command list, reused across frames.
    commands: Vec<DrawCommand>,
    /// Frame counter.
    frame: u64,
    /// Cleared by a shutdown command.
    running: bool,
}

impl<C: Canvas, S: GlyphSource> TrailEngine<C, S> {
    /// Create an engine painting into `canvas`.
    pub fn new(config: Config, canvas: C, glyph_source: S) -> Self {
        let (input_tx, input_rx) = bounded(INPUT_CHANNEL_CAPACITY);
        let (control_tx, control_rx) = unbounded();

        Self {
            config,
            canvas,
            glyphs: GlyphCache::new(glyph_source),
            buffer: TrailBuffer::with_capacity(256),
            motion: MotionAccumulator::new(Instant::now()),
            input_sink: InputSink::new(input_tx),
            input_rx,
            control_tx,
            control_rx,
            pending: Vec::new(),
            commands: Vec::with_capacity(64),
            frame: 0,
            running: true,
        }
    }

    /// Producer handle for capture callbacks.
    pub fn input_sink(&self) -> InputSink {
        self.input_sink.clone()
    }

    /// Control handle for settings updates and shutdown.
    pub fn handle(&self) -> EngineHandle {
        EngineHandle {
            control_tx: self.control_tx.clone(),
        }
    }

    /// Current settings.
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Trail history.
    pub const fn buffer(&self) -> &TrailBuffer {
        &self.buffer
    }

    /// Motion accumulator.
    pub const fn motion(&self) -> &MotionAccumulator {
        &self.motion
    }

    /// The canvas.
    pub const fn canvas(&self) -> &C {
        &self.canvas
    }

    /// The canvas, mutably.
    pub fn canvas_mut(&mut self) -> &mut C {
        &mut self.canvas
    }

    /// Consume the engine, returning the canvas.
    pub fn into_canvas(self) -> C {
        self.canvas
    }

    /// Frames completed so far.
    pub const fn frame_count(&self) -> u64 {
        self.frame
    }

    /// Check if no shutdown has been requested.
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Run one frame at `now`.
    ///
    /// # Errors
    ///
    /// Returns the canvas error that aborted the frame. After
    /// [`CanvasError::Unavailable`] the loop must not be rescheduled.
    pub fn tick(&mut self, now: Instant) -> Result<FrameStats, CanvasError> {
        self.apply_control();

        let input_events = self.drain_input();

        let size = self.canvas.size()?;
        let recentered = self
            .motion
            .check_recenter(now, size, &self.config, &mut self.buffer);

        let pruned = self.buffer.prune(now, self.config.lifespan());
        let strokes = build_strokes(self.buffer.entries());

        let center = size.center();
        self.commands.clear();

        let stroke_renderer = StrokeRenderer::new(&self.config, center, now);
        for stroke in &strokes {
            stroke_renderer.render_into(stroke, &mut self.commands);
        }

        let click_renderer = ClickRenderer::new(&self.config, center);
        let cursor = click_renderer.cursor(self.motion.offset(), &mut self.glyphs);
        if !self.config.cursor_on_top {
            self.commands.extend(cursor.clone());
        }
        click_renderer.render_clicks(self.buffer.clicks(), &mut self.glyphs, &mut self.commands);
        if self.config.cursor_on_top {
            self.commands.extend(cursor);
        }

        self.canvas.clear(self.config.canvas_bg_color)?;
        for command in &self.commands {
            self.canvas.draw(command)?;
        }
        self.canvas.present()?;

        let stats = FrameStats {
            frame: self.frame,
            input_events,
            strokes: strokes.len(),
            clicks: self.buffer.click_count(),
            commands: self.commands.len(),
            pruned_points: pruned.points,
            pruned_clicks: pruned.clicks,
            recentered,
        };
        self.frame += 1;

        trace!(?stats, "frame");
        Ok(stats)
    }

    /// Run the frame loop until shutdown or until the canvas goes away.
    pub fn run(&mut self) {
        info!(interval_ms = self.config.frame_interval, "frame loop started");

        while self.running {
            match self.tick(Instant::now()) {
                Ok(_) => {}
                Err(CanvasError::Unavailable) => {
                    info!(frame = self.frame, "canvas unavailable, stopping frame loop");
                    break;
                }
                Err(e) => warn!(error = %e, frame = self.frame, "frame aborted"),
            }

            if !self.running {
                break;
            }
            self.sleep_until_next_tick();
        }

        info!(frames = self.frame, "frame loop stopped");
    }

    /// Start `source`, run the frame loop, then stop the source.
    ///
    /// The source is stopped before this returns, so no capture callback
    /// outlives the loop.
    pub fn run_with_source<I: InputSource + ?Sized>(&mut self, source: &mut I) -> Result<(), InputError> {
        source.start(self.input_sink())?;
        self.run();
        source.stop();
        Ok(())
    }

    /// Wait out the frame interval, watching the control channel.
    fn sleep_until_next_tick(&mut self) {
        let deadline = Instant::now() + self.config.frame_interval();

        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return;
            }
            match self.control_rx.recv_timeout(remaining) {
                Ok(ControlCommand::ApplyConfig(updates)) => self.pending.extend(updates),
                Ok(ControlCommand::Shutdown) | Err(RecvTimeoutError::Disconnected) => {
                    self.running = false;
                    return;
                }
                Err(RecvTimeoutError::Timeout) => return,
            }
        }
    }

    /// Merge queued settings.
    fn apply_control(&mut self) {
        while let Ok(command) = self.control_rx.try_recv() {
            match command {
                ControlCommand::ApplyConfig(updates) => self.pending.extend(updates),
                ControlCommand::Shutdown => self.running = false,
            }
        }

        if self.pending.is_empty() {
            return;
        }

        let pending = std::mem::take(&mut self.pending);
        let changes = self
            .config
            .apply(pending.iter().map(|(k, v)| (k.as_str(), v)));

        if changes.intersects(ConfigChanges::CLICKS | ConfigChanges::CURSOR) {
            self.glyphs.invalidate();
        }
        if !changes.is_empty() {
            debug!(?changes, "settings applied");
        }
    }

    /// Feed every queued input event into the accumulator.
    fn drain_input(&mut self) -> usize {
        let mut count = 0;
        while let Ok(event) = self.input_rx.try_recv() {
            match event {
                InputEvent::MotionDelta { dx, dy, at } => {
                    self.motion.apply_delta(
                        dx,
                        dy,
                        self.config.coordinate_multiplier,
                        at,
                        &mut self.buffer,
                    );
                }
                InputEvent::Click {
                    button, pressed, at, ..
                } => {
                    self.motion
                        .record_click(button, ClickPhase::from_pressed(pressed), at, &mut self.buffer);
                }
            }
            count += 1;
        }
        count
    }
}

impl<C, S> TrailEngine<C, S>
where
    C: Canvas + Send + 'static,
    S: GlyphSource + Send + 'static,
{
    /// Run the frame loop on a dedicated thread.
    ///
    /// The thread returns the engine when the loop ends.
    pub fn spawn(mut self) -> io::Result<JoinHandle<Self>> {
        thread::Builder::new()
            .name("mousetrail-render".to_string())
            .spawn(move || {
                self.run();
                self
            })
    }
}
