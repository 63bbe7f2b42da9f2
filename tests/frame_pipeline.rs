//! End-to-end frames: input events in, draw commands out.

use mousetrail::actor::{InputEvent, TrailEngine};
use mousetrail::config::{Config, ConfigValue, LineStyle};
use mousetrail::geometry::Vec2;
use mousetrail::render::{DrawCommand, GlyphAtlas, NoGlyphs, RecordingCanvas};
use mousetrail::trail::{MouseButton, RecenterReason};
use std::time::{Duration, Instant};

fn engine_with(config: Config) -> TrailEngine<RecordingCanvas, NoGlyphs> {
    TrailEngine::new(config, RecordingCanvas::new(800, 600), NoGlyphs)
}

fn polygon_vertices(commands: &[DrawCommand]) -> Vec<usize> {
    commands
        .iter()
        .filter_map(|c| match c {
            DrawCommand::Polygon { points, .. } => Some(points.len()),
            _ => None,
        })
        .collect()
}

#[test]
fn test_scaled_deltas_render_as_ribbon() {
    let mut engine = engine_with(Config {
        coordinate_multiplier: 2.0,
        ..Config::default()
    });
    let sink = engine.input_sink();
    for _ in 0..3 {
        sink.on_motion_delta(5, 0);
    }

    let stats = engine.tick(Instant::now()).unwrap();
    assert_eq!(stats.strokes, 1);
    assert_eq!(engine.motion().offset(), Vec2::new(30.0, 0.0));

    // Three fresh points, one ribbon with two chains of three
    let frame = engine.canvas().last_frame().unwrap();
    assert_eq!(polygon_vertices(&frame.commands), vec![6]);
}

#[test]
fn test_each_style_end_to_end() {
    let cases = [
        (LineStyle::Uniform, "original"),
        (LineStyle::SmoothFade, "smooth_fade"),
        (LineStyle::JaggedFade, "jagged_fade"),
    ];

    for (style, name) in cases {
        let mut engine = engine_with(Config::default());
        engine.handle().apply_config([("line_style", ConfigValue::from(name))]);
        let sink = engine.input_sink();
        sink.on_motion_delta(10, 0);
        sink.on_motion_delta(0, 10);
        sink.on_motion_delta(-10, 0);

        engine.tick(Instant::now()).unwrap();
        assert_eq!(engine.config().line_style, style);

        let commands = &engine.canvas().last_frame().unwrap().commands;
        match style {
            LineStyle::Uniform => {
                assert!(matches!(&commands[..], [DrawCommand::Polyline { points, .. }] if points.len() == 3));
            }
            LineStyle::SmoothFade => assert_eq!(polygon_vertices(commands), vec![6]),
            LineStyle::JaggedFade => assert_eq!(polygon_vertices(commands), vec![4, 4]),
        }
    }
}

#[test]
fn test_recenter_splits_strokes() {
    let mut engine = engine_with(Config::default());
    let sink = engine.input_sink();
    sink.on_motion_delta(200, 0);
    sink.on_motion_delta(150, 0);
    sink.on_motion_delta(100, 0);

    let first = engine.tick(Instant::now()).unwrap();
    assert_eq!(first.recentered, Some(RecenterReason::OutOfBounds));
    assert_eq!(engine.motion().offset(), Vec2::ZERO);

    sink.on_motion_delta(0, 20);
    sink.on_motion_delta(0, 20);
    let second = engine.tick(Instant::now()).unwrap();
    assert_eq!(second.recentered, None);
    assert_eq!(second.strokes, 2);

    // The new stroke starts at the first delta after the recenter
    assert_eq!(engine.motion().offset(), Vec2::new(0.0, 40.0));
}

#[test]
fn test_inactivity_recenter_then_fade_out() {
    let mut engine = engine_with(Config::default());
    let sink = engine.input_sink();
    sink.on_motion_delta(30, 30);
    sink.on_motion_delta(30, 30);
    let start = Instant::now();
    engine.tick(start).unwrap();

    let idle = start + Duration::from_millis(2500);
    let stats = engine.tick(idle).unwrap();
    assert_eq!(stats.recentered, Some(RecenterReason::Inactivity));
    assert_eq!(stats.pruned_points, 2);
    assert_eq!(stats.strokes, 0);

    // Nothing left to keep the break alive
    assert!(engine.buffer().is_empty());
}

#[test]
fn test_clicks_expire_with_lifespan() {
    let mut engine = engine_with(Config::default());
    let sink = engine.input_sink();
    sink.on_click(5, 5, MouseButton::Left, true);
    sink.on_click(5, 5, MouseButton::Left, false);

    let start = Instant::now();
    let stats = engine.tick(start).unwrap();
    assert_eq!(stats.clicks, 2);
    assert_eq!(stats.commands, 2);

    let stats = engine.tick(start + Duration::from_secs(1)).unwrap();
    assert_eq!(stats.pruned_clicks, 2);
    assert_eq!(stats.commands, 0);
}

#[test]
fn test_click_images_replace_markers() {
    let config = Config {
        right_click_image_enabled: true,
        right_click_image_path: Some("right.png".into()),
        ..Config::default()
    };
    let atlas = GlyphAtlas::new().with("right.png", 24, 24);
    let mut engine = TrailEngine::new(config, RecordingCanvas::new(800, 600), atlas);
    let sink = engine.input_sink();
    sink.on_click(0, 0, MouseButton::Right, true);
    sink.on_click(0, 0, MouseButton::Left, true);

    engine.tick(Instant::now()).unwrap();
    let commands = &engine.canvas().last_frame().unwrap().commands;
    assert!(matches!(commands[0], DrawCommand::Image { pos, .. } if pos == Vec2::new(400.0, 300.0)));
    assert!(matches!(commands[1], DrawCommand::Oval { .. }));

    // Disabling the override falls back to shapes on the next frame
    engine
        .handle()
        .apply_config([("right_click_image_enabled", ConfigValue::from(false))]);
    engine.tick(Instant::now()).unwrap();
    let commands = &engine.canvas().last_frame().unwrap().commands;
    assert!(commands.iter().all(|c| matches!(c, DrawCommand::Oval { .. })));
}

#[test]
fn test_resize_changes_center_and_bounds() {
    let mut engine = engine_with(Config::default());
    engine.canvas_mut().resize(200, 100);
    let sink = engine.input_sink();
    sink.on_motion_delta(60, 0);

    let stats = engine.tick(Instant::now()).unwrap();
    assert_eq!(stats.recentered, None);

    sink.on_motion_delta(50, 0);
    let stats = engine.tick(Instant::now()).unwrap();
    assert_eq!(stats.recentered, Some(RecenterReason::OutOfBounds));
}

#[test]
fn test_jagged_quads_taper_toward_newest() {
    let mut engine = engine_with(Config {
        line_style: LineStyle::JaggedFade,
        ..Config::default()
    });
    let sink = engine.input_sink();
    let base = Instant::now();
    for i in 0..3 {
        assert!(sink.send(InputEvent::MotionDelta {
            dx: 10,
            dy: 0,
            at: base + Duration::from_millis(250 * i),
        }));
    }

    engine.tick(base + Duration::from_millis(500)).unwrap();
    let commands = &engine.canvas().last_frame().unwrap().commands;
    assert_eq!(polygon_vertices(commands), vec![4, 4]);

    // Half-width above the center line at each end of each quad
    let spans: Vec<(f64, f64)> = commands
        .iter()
        .filter_map(|c| match c {
            DrawCommand::Polygon { points, .. } => Some((points[1].y - 300.0, points[2].y - 300.0)),
            _ => None,
        })
        .collect();
    for &(older, newer) in &spans {
        assert!(older < newer, "quad does not taper: {older} vs {newer}");
    }
    assert!((spans[0].1 - spans[1].0).abs() < 1e-9);
    assert!((spans[1].1 - 2.0).abs() < 1e-9);
}
