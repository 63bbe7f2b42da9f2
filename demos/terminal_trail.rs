//! Terminal trail: Follow the terminal mouse with a fading trail.
//!
//! Each terminal cell is one canvas pixel. Move the mouse (or drag) to
//! draw, click to drop markers, press `q` or Esc to quit.

use crossterm::style::{Color, Print, SetBackgroundColor, SetForegroundColor};
use crossterm::{cursor, execute, queue, terminal};
use mousetrail::actor::{TerminalMouseSource, TrailEngine};
use mousetrail::color::Rgb;
use mousetrail::config::{Config, LineStyle};
use mousetrail::error::CanvasError;
use mousetrail::geometry::{CanvasSize, Vec2};
use mousetrail::render::{Canvas, DrawCommand, NoGlyphs};
use std::io::{self, Write};
use std::sync::atomic::Ordering;
use std::thread;
use std::time::Duration;

/// Plots draw commands as colored cells.
///
/// Output for a frame is accumulated and flushed in one write.
struct TerminalCanvas {
    out: Vec<u8>,
    size: CanvasSize,
}

impl TerminalCanvas {
    fn new() -> io::Result<Self> {
        let (w, h) = terminal::size()?;
        Ok(Self {
            out: Vec::with_capacity(16 * 1024),
            size: CanvasSize::new(u32::from(w), u32::from(h)),
        })
    }

    fn plot(&mut self, p: Vec2, glyph: char, color: Rgb) -> io::Result<()> {
        let (x, y) = (p.x.round(), p.y.round());
        if x < 0.0 || y < 0.0 || x >= f64::from(self.size.width) || y >= f64::from(self.size.height) {
            return Ok(());
        }
        queue!(
            self.out,
            cursor::MoveTo(x as u16, y as u16),
            SetForegroundColor(to_color(color)),
            Print(glyph)
        )
    }

    /// Plot a line by stepping one cell at a time.
    fn line(&mut self, a: Vec2, b: Vec2, glyph: char, color: Rgb) -> io::Result<()> {
        let steps = (b - a).length().ceil().max(1.0) as u32;
        for i in 0..=steps {
            self.plot(a.lerp(b, f64::from(i) / f64::from(steps)), glyph, color)?;
        }
        Ok(())
    }
}

const fn to_color(c: Rgb) -> Color {
    Color::Rgb { r: c.r, g: c.g, b: c.b }
}

fn backend(e: &io::Error) -> CanvasError {
    CanvasError::Backend(e.to_string())
}

impl Canvas for TerminalCanvas {
    fn size(&self) -> Result<CanvasSize, CanvasError> {
        Ok(self.size)
    }

    fn clear(&mut self, background: Rgb) -> Result<(), CanvasError> {
        // Pick up terminal resizes once per frame
        let (w, h) = terminal::size().map_err(|e| backend(&e))?;
        self.size = CanvasSize::new(u32::from(w), u32::from(h));

        self.out.clear();
        queue!(
            self.out,
            SetBackgroundColor(to_color(background)),
            terminal::Clear(terminal::ClearType::All)
        )
        .map_err(|e| backend(&e))
    }

    fn draw(&mut self, command: &DrawCommand) -> Result<(), CanvasError> {
        let result = match command {
            DrawCommand::Polyline { points, color, .. } => points
                .windows(2)
                .try_for_each(|w| self.line(w[0], w[1], '•', *color)),
            DrawCommand::Polygon { points, color } => {
                let n = points.len();
                (0..n).try_for_each(|i| self.line(points[i], points[(i + 1) % n], '█', *color))
            }
            DrawCommand::Oval { bbox, color } => self.plot(bbox.center(), 'o', *color),
            DrawCommand::Image { pos, .. } => self.plot(*pos, '@', Rgb::WHITE),
        };
        result.map_err(|e| backend(&e))
    }

    fn present(&mut self) -> Result<(), CanvasError> {
        let mut stdout = io::stdout().lock();
        stdout.write_all(&self.out).map_err(|e| backend(&e))?;
        stdout.flush().map_err(|e| backend(&e))
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config {
        line_style: LineStyle::JaggedFade,
        line_width: 2.0,
        line_lifespan: 1.0,
        ..Config::default()
    };

    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen, cursor::Hide)?;

    let canvas = TerminalCanvas::new()?;
    let mut engine = TrailEngine::new(config, canvas, NoGlyphs);
    let mut source = TerminalMouseSource::default();

    // Turn the quit key into an engine shutdown
    let handle = engine.handle();
    let quit = source.quit_flag();
    let quit_done = source.quit_flag();
    let watcher = thread::spawn(move || {
        while !quit.load(Ordering::Relaxed) {
            thread::sleep(Duration::from_millis(20));
        }
        handle.shutdown();
    });

    let result = engine.run_with_source(&mut source);
    quit_done.store(true, Ordering::Relaxed);

    execute!(stdout, SetBackgroundColor(Color::Reset), cursor::Show, terminal::LeaveAlternateScreen)?;
    let _ = watcher.join();
    result?;

    println!("{} frames rendered", engine.frame_count());
    Ok(())
}
