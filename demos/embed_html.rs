//! Demo: produce an embeddable HTML fragment with a PNG download link.
//!
//! Run: cargo run --example embed_html > plot.html

use trazar::prelude::*;

fn main() -> trazar::Result<()> {
    let expression = "log(x)";

    // NaN over the negative half of the range; the chart shows the rest.
    let eval = ExpressionEvaluator::new().evaluate(expression, -10.0, 10.0)?;

    let spec = PlotSpecBuilder::new().build(
        expression,
        eval.x,
        eval.y,
        PlotOptions::new().x_name("x").y_name("log(x)"),
    )?;

    let renderer = ChartRenderer::new();
    let scene = renderer.layout(&spec)?;
    let fb = renderer.to_framebuffer(&spec)?;
    let png = PngEncoder::to_bytes(&fb)?;

    println!("{}", SvgEncoder::to_html(&scene, Some(&png)));
    Ok(())
}
