#![allow(clippy::expect_used, clippy::unwrap_used, missing_docs)]
//! Benchmark for chart layout and rasterization.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use trazar::expr::ExpressionEvaluator;
use trazar::output::PngEncoder;
use trazar::render::ChartRenderer;
use trazar::spec::{PlotOptions, PlotSpec, PlotSpecBuilder};

fn spec_with_points(n: usize) -> PlotSpec {
    let eval = ExpressionEvaluator::new()
        .num_points(n)
        .evaluate("sin(x) * exp(-x^2 / 20)", -10.0, 10.0)
        .expect("evaluation should succeed");

    PlotSpecBuilder::new()
        .build("sin(x) * exp(-x^2 / 20)", eval.x, eval.y, PlotOptions::new())
        .expect("builder should produce valid result")
}

fn render_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");

    for size in [100, 1_000, 10_000] {
        let spec = spec_with_points(size);
        let renderer = ChartRenderer::new();

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| {
                renderer
                    .to_framebuffer(black_box(&spec))
                    .expect("framebuffer conversion should succeed")
            });
        });
    }

    group.finish();
}

fn png_encode_benchmark(c: &mut Criterion) {
    let spec = spec_with_points(1_000);
    let fb = ChartRenderer::new()
        .to_framebuffer(&spec)
        .expect("framebuffer conversion should succeed");

    c.bench_function("png_encode_800x500", |b| {
        b.iter(|| PngEncoder::to_bytes(black_box(&fb)).expect("encoding should succeed"));
    });
}

criterion_group!(benches, render_benchmark, png_encode_benchmark);
criterion_main!(benches);
