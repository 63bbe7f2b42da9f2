//! Scripted trail: Drive the frame loop headless from a synthetic input source.
//!
//! Run with `RUST_LOG=mousetrail=debug` to see recenters and settings changes.

use mousetrail::actor::{InputSink, InputSource, TrailEngine};
use mousetrail::config::{Config, ConfigValue};
use mousetrail::error::InputError;
use mousetrail::render::{DrawCommand, NoGlyphs, RecordingCanvas};
use mousetrail::trail::MouseButton;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::info;

/// Walks the pointer in a widening spiral and clicks every so often.
struct SpiralSource {
    handle: Option<JoinHandle<()>>,
    shutdown: Arc<AtomicBool>,
}

impl SpiralSource {
    fn new() -> Self {
        Self {
            handle: None,
            shutdown: Arc::new(AtomicBool::new(false)),
        }
    }
}

impl InputSource for SpiralSource {
    fn start(&mut self, sink: InputSink) -> Result<(), InputError> {
        let shutdown = Arc::clone(&self.shutdown);
        let handle = thread::Builder::new()
            .name("spiral-input".to_string())
            .spawn(move || {
                let mut step = 0u32;
                while !shutdown.load(Ordering::Relaxed) {
                    let angle = f64::from(step) * 0.15;
                    let radius = 2.0 + f64::from(step % 200) * 0.05;
                    sink.on_motion_delta((angle.cos() * radius) as i32, (angle.sin() * radius) as i32);
                    if step % 40 == 0 {
                        sink.on_click(0, 0, MouseButton::Left, true);
                    }
                    if step % 40 == 5 {
                        sink.on_click(0, 0, MouseButton::Left, false);
                    }
                    step += 1;
                    thread::sleep(Duration::from_millis(4));
                }
            })?;
        self.handle = Some(handle);
        Ok(())
    }

    fn stop(&mut self) {
        self.shutdown.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("mousetrail=info")),
        )
        .init();

    let canvas = RecordingCanvas::new(800, 600).with_history(8);
    let mut engine = TrailEngine::new(Config::default(), canvas, NoGlyphs);
    let handle = engine.handle();

    // Switch styles and finally stop from a "settings UI" thread
    let ui = thread::spawn(move || {
        thread::sleep(Duration::from_millis(600));
        handle.apply_config([("line_style", ConfigValue::from("jagged_fade"))]);
        thread::sleep(Duration::from_millis(600));
        handle.apply_config([
            ("line_style", ConfigValue::from("original")),
            ("line_color", ConfigValue::from("#ff8800")),
        ]);
        thread::sleep(Duration::from_millis(600));
        handle.shutdown();
    });

    let mut source = SpiralSource::new();
    engine.run_with_source(&mut source)?;
    let _ = ui.join();

    info!(frames = engine.frame_count(), "done");
    if let Some(frame) = engine.canvas().last_frame() {
        let polygons = frame
            .commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Polygon { .. }))
            .count();
        println!(
            "last frame: {} commands ({} polygons), background {}",
            frame.commands.len(),
            polygons,
            frame.background
        );
    }
    Ok(())
}
