//! End-to-end demo: evaluate an expression and write plot.png / plot.svg.
//!
//! Run: cargo run --example plot_expression [expression]

use trazar::prelude::*;

fn main() -> trazar::Result<()> {
    let expression = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "sin(x) * exp(-x^2 / 10)".to_string());

    let eval = ExpressionEvaluator::new().evaluate(&expression, -10.0, 10.0)?;

    let spec = PlotSpecBuilder::new().build(
        &expression,
        eval.x,
        eval.y,
        PlotOptions::new().title("Trazar demo"),
    )?;

    let renderer = ChartRenderer::new();
    let fb = renderer.to_framebuffer(&spec)?;
    PngEncoder::write_to_file(&fb, "plot.png")?;

    let scene = renderer.layout(&spec)?;
    SvgEncoder::write_to_file(&scene, "plot.svg")?;

    println!("{} -> plot.png, plot.svg (id {})", spec.trace.label, spec.id);
    Ok(())
}
