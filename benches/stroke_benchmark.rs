//! Stroke geometry benchmark: Measure per-frame polygon construction.
//!
//! Target: < 50µs for a 500-point stroke in every style

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use mousetrail::config::{Config, LineStyle};
use mousetrail::geometry::Vec2;
use mousetrail::render::{subdivide, StrokeRenderer};
use mousetrail::trail::{Stroke, TrailPoint};
use std::time::{Duration, Instant};

/// A wavy stroke whose points span the whole lifespan.
fn create_test_stroke(len: u32, base: Instant) -> Stroke {
    let points = (0..len)
        .map(|i| {
            let x = f64::from(i) * 2.0;
            let y = (f64::from(i) * 0.1).sin() * 40.0;
            TrailPoint::new(Vec2::new(x, y), base + Duration::from_micros(u64::from(i) * 1000))
        })
        .collect();
    Stroke::new(points)
}

fn stroke_styles(c: &mut Criterion) {
    let base = Instant::now();
    let stroke = create_test_stroke(500, base);
    let now = base + Duration::from_millis(500);

    let mut group = c.benchmark_group("stroke_500");
    for style in [LineStyle::Uniform, LineStyle::SmoothFade, LineStyle::JaggedFade] {
        let config = Config {
            line_style: style,
            ..Config::default()
        };
        let renderer = StrokeRenderer::new(&config, Vec2::new(400.0, 300.0), now);

        group.bench_with_input(BenchmarkId::from_parameter(style.as_str()), &stroke, |b, stroke| {
            let mut out = Vec::with_capacity(512);
            b.iter(|| {
                out.clear();
                renderer.render_into(black_box(stroke), &mut out);
                out.len()
            })
        });
    }
    group.finish();
}

fn stroke_smoothing(c: &mut Criterion) {
    let base = Instant::now();
    let stroke = create_test_stroke(200, base);

    let mut group = c.benchmark_group("subdivide_200");
    for steps in [1u32, 4, 16] {
        group.bench_with_input(BenchmarkId::from_parameter(steps), &steps, |b, &steps| {
            b.iter(|| subdivide(black_box(&stroke.points), steps))
        });
    }
    group.finish();
}

criterion_group!(benches, stroke_styles, stroke_smoothing);
criterion_main!(benches);
