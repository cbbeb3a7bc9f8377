#![allow(clippy::expect_used, clippy::unwrap_used, missing_docs)]
//! Benchmark for expression parsing and grid evaluation.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use trazar::expr::{Expr, ExpressionEvaluator};

fn evaluate_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate");

    for size in [100, 1_000, 10_000, 100_000] {
        let evaluator = ExpressionEvaluator::new().num_points(size);

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| {
                evaluator
                    .evaluate(black_box("sin(x) * exp(-x^2) + x/2"), -5.0, 5.0)
                    .expect("evaluation should succeed")
            });
        });
    }

    group.finish();
}

fn parse_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    for expr in [
        "x**2",
        "sin(x) + cos(x)",
        "pow(abs(x), 0.5) * exp(-x**2 / 2) + log10(x + 11)",
    ] {
        group.bench_with_input(BenchmarkId::from_parameter(expr.len()), &expr, |b, &expr| {
            b.iter(|| Expr::parse(black_box(expr)).expect("parse should succeed"));
        });
    }

    group.finish();
}

criterion_group!(benches, evaluate_benchmark, parse_benchmark);
criterion_main!(benches);
