//! Chart layout and rasterization.
//!
//! [`ChartRenderer`] resolves a [`PlotSpec`](crate::spec::PlotSpec) into a
//! [`ChartScene`] — pixel-space geometry shared by every output backend —
//! and rasterizes it into a [`Framebuffer`]. The SVG encoder consumes the
//! same scene, so raster and vector output always agree on layout.

/// Rasterization primitives (line drawing, clipping).
pub mod primitives;

use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::framebuffer::Framebuffer;
use crate::geometry::{Point, Rect};
use crate::scale::{finite_extent, LinearScale, LogScale, Scale};
use crate::spec::{AxisKind, PlotSpec};
use primitives::{clip_segment, draw_polyline_aa};

/// One axis tick: a pixel position along the axis and its value label.
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    /// Pixel position (x for the x-axis, y for the y-axis).
    pub pos: f32,
    /// Data value at the tick.
    pub value: f64,
    /// Formatted label.
    pub label: String,
}

/// Resolved pixel-space geometry for one chart.
///
/// Produced by [`ChartRenderer::layout`]; consumed by the rasterizer and the
/// SVG encoder.
#[derive(Debug, Clone)]
pub struct ChartScene {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Plot area inside the margins.
    pub plot_area: Rect,
    /// Chart title.
    pub title: String,
    /// X-axis title.
    pub x_title: String,
    /// Y-axis title.
    pub y_title: String,
    /// X-axis ticks.
    pub x_ticks: Vec<Tick>,
    /// Y-axis ticks.
    pub y_ticks: Vec<Tick>,
    /// Trace polyline runs, already split at non-finite samples and clipped
    /// to the plot area.
    pub segments: Vec<Vec<Point>>,
    /// Trace legend label.
    pub trace_label: String,
    /// Trace color.
    pub line_color: Rgba,
    /// Background color.
    pub background: Rgba,
    /// Artifact id carried over from the spec.
    pub id: String,
}

/// Builder for rendering plot specifications.
///
/// Defaults: 800x500 pixels, a 60-pixel margin, and a `#2196F3` trace on a
/// white background.
#[derive(Debug, Clone)]
pub struct ChartRenderer {
    width: u32,
    height: u32,
    margin: u32,
    line_color: Rgba,
    background: Rgba,
    grid: bool,
}

impl Default for ChartRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl ChartRenderer {
    /// Create a renderer with default dimensions and styling.
    #[must_use]
    pub fn new() -> Self {
        Self {
            width: 800,
            height: 500,
            margin: 60,
            line_color: Rgba::TRACE_BLUE,
            background: Rgba::WHITE,
            grid: true,
        }
    }

    /// Set the output dimensions.
    #[must_use]
    pub fn dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the margin around the plot area.
    #[must_use]
    pub fn margin(mut self, margin: u32) -> Self {
        self.margin = margin;
        self
    }

    /// Set the trace color.
    #[must_use]
    pub fn line_color(mut self, color: Rgba) -> Self {
        self.line_color = color;
        self
    }

    /// Set the background color.
    #[must_use]
    pub fn background(mut self, color: Rgba) -> Self {
        self.background = color;
        self
    }

    /// Enable or disable gridlines.
    #[must_use]
    pub fn grid(mut self, enabled: bool) -> Self {
        self.grid = enabled;
        self
    }

    /// Resolve a plot specification into pixel-space geometry.
    ///
    /// # Errors
    ///
    /// Returns an error when the dimensions leave no plot area.
    pub fn layout(&self, spec: &PlotSpec) -> Result<ChartScene> {
        if self.width <= 2 * self.margin || self.height <= 2 * self.margin {
            return Err(Error::Rendering(format!(
                "margins ({}) leave no plot area in {}x{}",
                self.margin, self.width, self.height
            )));
        }

        let plot_area = Rect::new(
            self.margin as f32,
            self.margin as f32,
            (self.width - 2 * self.margin) as f32,
            (self.height - 2 * self.margin) as f32,
        );

        let x_domain = axis_domain(&spec.trace.x, spec.layout.x_kind, None);
        let y_domain = axis_domain(&spec.trace.y, spec.layout.y_kind, spec.layout.y_range);

        let x_range = (plot_area.x, plot_area.right());
        // Pixel y grows downward; the data axis grows upward.
        let y_range = (plot_area.bottom(), plot_area.y);

        let x_scale = make_scale(spec.layout.x_kind, x_domain, x_range)?;
        let y_scale = make_scale(spec.layout.y_kind, y_domain, y_range)?;

        let x_ticks = axis_ticks(spec.layout.x_kind, x_domain, x_scale.as_ref());
        let y_ticks = axis_ticks(spec.layout.y_kind, y_domain, y_scale.as_ref());

        let segments = trace_segments(
            &spec.trace.x,
            &spec.trace.y,
            x_scale.as_ref(),
            y_scale.as_ref(),
            &plot_area,
        );

        Ok(ChartScene {
            width: self.width,
            height: self.height,
            plot_area,
            title: spec.layout.title.clone(),
            x_title: spec.layout.x_title.clone(),
            y_title: spec.layout.y_title.clone(),
            x_ticks,
            y_ticks,
            segments,
            trace_label: spec.trace.label.clone(),
            line_color: self.line_color,
            background: self.background,
            id: spec.id.clone(),
        })
    }

    /// Rasterize a plot specification into a framebuffer.
    ///
    /// # Errors
    ///
    /// Returns an error if layout or framebuffer allocation fails.
    pub fn to_framebuffer(&self, spec: &PlotSpec) -> Result<Framebuffer> {
        let scene = self.layout(spec)?;
        let mut fb = Framebuffer::new(scene.width, scene.height)?;
        fb.clear(scene.background);

        let area = scene.plot_area;

        if self.grid {
            for tick in &scene.x_ticks {
                fb.fill_rect(tick.pos as u32, area.y as u32, 1, area.height as u32, Rgba::GRID_GRAY);
            }
            for tick in &scene.y_ticks {
                fb.fill_rect(area.x as u32, tick.pos as u32, area.width as u32, 1, Rgba::GRID_GRAY);
            }
        }

        // Axis rules along the left and bottom edges of the plot area.
        fb.fill_rect(area.x as u32, area.y as u32, 1, area.height as u32 + 1, Rgba::BLACK);
        fb.fill_rect(area.x as u32, area.bottom() as u32, area.width as u32 + 1, 1, Rgba::BLACK);

        for run in &scene.segments {
            draw_polyline_aa(&mut fb, run, scene.line_color);
        }

        Ok(fb)
    }
}

/// Pick the data domain for an axis: an explicit range when given, otherwise
/// the finite (and, for log axes, positive) extent of the data, with
/// fallbacks for degenerate and empty cases so layout never fails on
/// pathological traces.
fn axis_domain(data: &[f64], kind: AxisKind, explicit: Option<[f64; 2]>) -> (f64, f64) {
    if let Some([min, max]) = explicit {
        // An explicit bound that a log scale cannot represent falls back to
        // the data extent instead of failing the whole render.
        let representable = kind == AxisKind::Linear || min > 0.0;
        if min.is_finite() && max.is_finite() && min < max && representable {
            return (min, max);
        }
    }

    let extent = match kind {
        AxisKind::Linear => finite_extent(data),
        AxisKind::Log => {
            let positive: Vec<f64> = data
                .iter()
                .copied()
                .filter(|v| v.is_finite() && *v > 0.0)
                .collect();
            finite_extent(&positive)
        }
    };

    match (kind, extent) {
        (AxisKind::Linear, Some((min, max))) if min < max => (min, max),
        (AxisKind::Linear, Some((v, _))) => (v - 0.5, v + 0.5),
        (AxisKind::Linear, None) => (0.0, 1.0),
        (AxisKind::Log, Some((min, max))) if min < max => (min, max),
        (AxisKind::Log, Some((v, _))) => (v / 10.0, v * 10.0),
        (AxisKind::Log, None) => (0.1, 10.0),
    }
}

/// Build the scale for an axis kind.
fn make_scale(
    kind: AxisKind,
    domain: (f64, f64),
    range: (f32, f32),
) -> Result<Box<dyn Scale>> {
    match kind {
        AxisKind::Linear => Ok(Box::new(LinearScale::new(domain, range)?)),
        AxisKind::Log => Ok(Box::new(LogScale::new(domain, range)?)),
    }
}

/// Map the trace into pixel-space polyline runs.
///
/// Runs break at non-finite samples, so a NaN stretch shows as a gap in the
/// curve, and every segment is clipped to the plot area.
fn trace_segments(
    xs: &[f64],
    ys: &[f64],
    x_scale: &dyn Scale,
    y_scale: &dyn Scale,
    area: &Rect,
) -> Vec<Vec<Point>> {
    let mut runs: Vec<Vec<Point>> = Vec::new();
    let mut current: Vec<Point> = Vec::new();
    let mut prev: Option<Point> = None;

    for (&x, &y) in xs.iter().zip(ys) {
        if !x.is_finite() || !y.is_finite() {
            if current.len() >= 2 {
                runs.push(std::mem::take(&mut current));
            } else {
                current.clear();
            }
            prev = None;
            continue;
        }

        let point = Point::new(x_scale.scale(x), y_scale.scale(y));

        if let Some(last) = prev {
            match clip_segment(last, point, area) {
                Some((a, b)) => {
                    // A clipped entry point starts a fresh run.
                    if current.last().map_or(true, |p| p.distance(a) > 0.01) {
                        if current.len() >= 2 {
                            runs.push(std::mem::take(&mut current));
                        } else {
                            current.clear();
                        }
                        current.push(a);
                    }
                    current.push(b);
                }
                None => {
                    if current.len() >= 2 {
                        runs.push(std::mem::take(&mut current));
                    } else {
                        current.clear();
                    }
                }
            }
        }

        prev = Some(point);
    }

    if current.len() >= 2 {
        runs.push(current);
    }

    runs
}

/// Ticks for an axis: nice-number steps on linear axes, powers of ten on log
/// axes.
fn axis_ticks(kind: AxisKind, domain: (f64, f64), scale: &dyn Scale) -> Vec<Tick> {
    let values = match kind {
        AxisKind::Linear => linear_tick_values(domain.0, domain.1, 6),
        AxisKind::Log => log_tick_values(domain.0, domain.1),
    };

    values
        .into_iter()
        .map(|value| Tick {
            pos: scale.scale(value),
            value,
            label: format_tick(value),
        })
        .collect()
}

/// Evenly spaced "nice" tick values covering `[min, max]`.
fn linear_tick_values(min: f64, max: f64, target: usize) -> Vec<f64> {
    let span = max - min;
    let raw_step = span / (target as f64);
    let magnitude = 10f64.powf(raw_step.log10().floor());
    let normalized = raw_step / magnitude;

    let step = if normalized < 1.5 {
        magnitude
    } else if normalized < 3.0 {
        2.0 * magnitude
    } else if normalized < 7.0 {
        5.0 * magnitude
    } else {
        10.0 * magnitude
    };

    let mut ticks = Vec::new();
    let mut value = (min / step).ceil() * step;
    let limit = max + step * 1e-9;
    while value <= limit {
        // Snap near-zero ticks to exactly zero so labels read "0".
        ticks.push(if value.abs() < step * 1e-9 { 0.0 } else { value });
        value += step;
    }
    ticks
}

/// Powers of ten inside `[min, max]`; endpoint decades when none fall inside.
fn log_tick_values(min: f64, max: f64) -> Vec<f64> {
    let lo = min.log10().ceil() as i32;
    let hi = max.log10().floor() as i32;

    if lo > hi {
        return vec![min, max];
    }
    (lo..=hi).map(|k| 10f64.powi(k)).collect()
}

/// Compact tick label: trimmed fixed-point for moderate magnitudes,
/// scientific notation outside them.
fn format_tick(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    let abs = value.abs();
    if !(1e-4..1e7).contains(&abs) {
        return format!("{value:e}");
    }

    let text = format!("{value:.4}");
    let trimmed = text.trim_end_matches('0').trim_end_matches('.');
    trimmed.to_string()
}
