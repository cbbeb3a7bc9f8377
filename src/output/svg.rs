//! SVG and embeddable HTML output encoder.
//!
//! Emits a chart scene as a standalone vector SVG document, or as an HTML
//! fragment keyed by the plot's artifact id with an optional base64 PNG
//! data-URI download link. The fragment is the embeddable form a host
//! application drops into a page; the id lets the host address the element
//! for later retrieval.

use crate::geometry::Point;
use crate::render::ChartScene;
use base64::{engine::general_purpose::STANDARD, Engine};
use std::fmt::Write as FmtWrite;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::Result;

/// Font stack used for all SVG text.
const FONT_FAMILY: &str = "Arial, sans-serif";

/// SVG encoder for chart scenes.
pub struct SvgEncoder;

impl SvgEncoder {
    /// Render a scene as a standalone SVG document.
    #[must_use]
    pub fn to_svg(scene: &ChartScene) -> String {
        let mut out = String::with_capacity(4096);
        let _ = write!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = scene.width,
            h = scene.height
        );

        // Background
        let _ = write!(
            out,
            r#"<rect x="0" y="0" width="{}" height="{}" fill="{}"/>"#,
            scene.width,
            scene.height,
            scene.background.to_hex()
        );

        let area = scene.plot_area;

        // Gridlines
        for tick in &scene.x_ticks {
            let _ = write!(
                out,
                r#"<line x1="{x}" y1="{y1}" x2="{x}" y2="{y2}" stroke="lightgray" stroke-width="1"/>"#,
                x = tick.pos,
                y1 = area.y,
                y2 = area.bottom()
            );
        }
        for tick in &scene.y_ticks {
            let _ = write!(
                out,
                r#"<line x1="{x1}" y1="{y}" x2="{x2}" y2="{y}" stroke="lightgray" stroke-width="1"/>"#,
                x1 = area.x,
                x2 = area.right(),
                y = tick.pos
            );
        }

        // Axis rules
        let _ = write!(
            out,
            r#"<line x1="{x}" y1="{y1}" x2="{x}" y2="{y2}" stroke="black" stroke-width="1"/>"#,
            x = area.x,
            y1 = area.y,
            y2 = area.bottom()
        );
        let _ = write!(
            out,
            r#"<line x1="{x1}" y1="{y}" x2="{x2}" y2="{y}" stroke="black" stroke-width="1"/>"#,
            x1 = area.x,
            x2 = area.right(),
            y = area.bottom()
        );

        // Tick labels
        for tick in &scene.x_ticks {
            let _ = write!(
                out,
                r#"<text x="{x}" y="{y}" font-family="{FONT_FAMILY}" font-size="11" text-anchor="middle">{label}</text>"#,
                x = tick.pos,
                y = area.bottom() + 16.0,
                label = escape_xml(&tick.label)
            );
        }
        for tick in &scene.y_ticks {
            let _ = write!(
                out,
                r#"<text x="{x}" y="{y}" font-family="{FONT_FAMILY}" font-size="11" text-anchor="end">{label}</text>"#,
                x = area.x - 6.0,
                y = tick.pos + 4.0,
                label = escape_xml(&tick.label)
            );
        }

        // Trace polylines
        for run in &scene.segments {
            let _ = write!(
                out,
                r#"<polyline points="{}" fill="none" stroke="{}" stroke-width="2"/>"#,
                polyline_points(run),
                scene.line_color.to_hex()
            );
        }

        // Title and axis titles
        let _ = write!(
            out,
            r#"<text x="{x}" y="24" font-family="{FONT_FAMILY}" font-size="16" text-anchor="middle">{title}</text>"#,
            x = f64::from(scene.width) / 2.0,
            title = escape_xml(&scene.title)
        );
        let _ = write!(
            out,
            r#"<text x="{x}" y="{y}" font-family="{FONT_FAMILY}" font-size="12" text-anchor="middle">{label}</text>"#,
            x = area.center().x,
            y = f64::from(scene.height) - 12.0,
            label = escape_xml(&scene.x_title)
        );
        let _ = write!(
            out,
            r#"<text x="{x}" y="{y}" font-family="{FONT_FAMILY}" font-size="12" text-anchor="middle" transform="rotate(-90 {x} {y})">{label}</text>"#,
            x = 18.0,
            y = area.center().y,
            label = escape_xml(&scene.y_title)
        );

        out.push_str("</svg>");
        out
    }

    /// Write a scene to an SVG file.
    ///
    /// # Errors
    ///
    /// Returns an error if file creation or writing fails.
    pub fn write_to_file<P: AsRef<Path>>(scene: &ChartScene, path: P) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(Self::to_svg(scene).as_bytes())?;
        Ok(())
    }

    /// Render a scene as an embeddable HTML fragment.
    ///
    /// The fragment is a `<div>` keyed by the plot's artifact id containing
    /// the inline SVG. When `png` bytes are supplied, a download link with a
    /// base64 data URI is appended so the host page can offer the raster
    /// without a second request.
    #[must_use]
    pub fn to_html(scene: &ChartScene, png: Option<&[u8]>) -> String {
        let mut out = String::with_capacity(8192);
        let _ = write!(out, r#"<div id="{}" class="trazar-plot">"#, escape_xml(&scene.id));
        out.push_str(&Self::to_svg(scene));

        if let Some(bytes) = png {
            let encoded = STANDARD.encode(bytes);
            let _ = write!(
                out,
                r#"<a href="data:image/png;base64,{encoded}" download="{}.png">Download PNG</a>"#,
                escape_xml(&scene.id)
            );
        }

        out.push_str("</div>");
        out
    }
}

/// Format a run as an SVG polyline `points` attribute.
fn polyline_points(run: &[Point]) -> String {
    let mut out = String::with_capacity(run.len() * 12);
    for (i, p) in run.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let _ = write!(out, "{:.2},{:.2}", p.x, p.y);
    }
    out
}

/// Escape text for XML attribute and element content.
fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            other => out.push(other),
        }
    }
    out
}
