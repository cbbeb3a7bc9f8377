//! Plot specification building.
//!
//! Shapes an evaluated `(x, y)` pair plus display options into a
//! render-ready [`PlotSpec`]: one trace, layout parameters, and a unique
//! artifact id. The spec is backend-neutral; the in-crate renderer consumes
//! it the same way an external charting backend would.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::{Error, Result};

/// Axis scale kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AxisKind {
    /// Linear axis.
    #[default]
    Linear,
    /// Base-10 logarithmic axis.
    Log,
}

impl AxisKind {
    /// Wire-format name of the axis kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Log => "log",
        }
    }

    /// Choose the kind from a log flag.
    #[must_use]
    pub const fn from_log_flag(log: bool) -> Self {
        if log {
            Self::Log
        } else {
            Self::Linear
        }
    }
}

/// Per-request display options.
///
/// Constructed once per request, immutable after building, discarded after
/// use.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotOptions {
    /// X-axis label.
    pub x_name: String,
    /// Y-axis label.
    pub y_name: String,
    /// Chart title; empty means "derive from the expression".
    pub title: String,
    /// Logarithmic x-axis.
    pub x_log: bool,
    /// Logarithmic y-axis.
    pub y_log: bool,
    /// Explicit lower y bound.
    pub y_min: Option<f64>,
    /// Explicit upper y bound.
    pub y_max: Option<f64>,
}

impl Default for PlotOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl PlotOptions {
    /// Create options with the default labels and auto-scaling.
    #[must_use]
    pub fn new() -> Self {
        Self {
            x_name: "x".to_string(),
            y_name: "y".to_string(),
            title: String::new(),
            x_log: false,
            y_log: false,
            y_min: None,
            y_max: None,
        }
    }

    /// Set the x-axis label.
    #[must_use]
    pub fn x_name(mut self, name: impl Into<String>) -> Self {
        self.x_name = name.into();
        self
    }

    /// Set the y-axis label.
    #[must_use]
    pub fn y_name(mut self, name: impl Into<String>) -> Self {
        self.y_name = name.into();
        self
    }

    /// Set the chart title. An empty title falls back to the trace label.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Use a logarithmic x-axis.
    #[must_use]
    pub fn x_log(mut self, log: bool) -> Self {
        self.x_log = log;
        self
    }

    /// Use a logarithmic y-axis.
    #[must_use]
    pub fn y_log(mut self, log: bool) -> Self {
        self.y_log = log;
        self
    }

    /// Set an explicit lower y bound.
    #[must_use]
    pub fn y_min(mut self, value: f64) -> Self {
        self.y_min = Some(value);
        self
    }

    /// Set an explicit upper y bound.
    #[must_use]
    pub fn y_max(mut self, value: f64) -> Self {
        self.y_max = Some(value);
        self
    }
}

/// A single line trace: two equal-length sequences and a legend label.
#[derive(Debug, Clone, PartialEq)]
pub struct Trace {
    /// Domain samples.
    pub x: Vec<f64>,
    /// Value samples; may contain NaN/Inf entries.
    pub y: Vec<f64>,
    /// Legend label, `"{y_name} = {expression}"`.
    pub label: String,
}

/// Layout parameters for a chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    /// Chart title.
    pub title: String,
    /// X-axis title.
    pub x_title: String,
    /// Y-axis title.
    pub y_title: String,
    /// X-axis scale kind.
    pub x_kind: AxisKind,
    /// Y-axis scale kind.
    pub y_kind: AxisKind,
    /// Resolved y range, or `None` for renderer auto-scaling.
    pub y_range: Option<[f64; 2]>,
}

/// Render-ready plot specification.
///
/// Owned by the caller after building; never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotSpec {
    /// The single line trace.
    pub trace: Trace,
    /// Layout parameters.
    pub layout: Layout,
    /// Unique artifact id (`plot_…`), stable for the lifetime of the spec.
    pub id: String,
}

/// Builder turning evaluation output and options into a [`PlotSpec`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PlotSpecBuilder;

impl PlotSpecBuilder {
    /// Create a builder.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Build a plot specification.
    ///
    /// The y range resolves in priority order: both bounds explicit → exactly
    /// those; one explicit → the 5th/95th percentile of the finite subset of
    /// `y` fills the unset side (or the whole range stays auto when nothing
    /// is finite); neither → auto.
    ///
    /// Log-axis flags are recorded as-is; whether the data is strictly
    /// positive is the renderer's concern, not validated here.
    ///
    /// # Errors
    ///
    /// Returns an error for empty or length-mismatched data.
    pub fn build(
        &self,
        expression: &str,
        x: Vec<f64>,
        y: Vec<f64>,
        options: PlotOptions,
    ) -> Result<PlotSpec> {
        if x.is_empty() || y.is_empty() {
            return Err(Error::EmptyData);
        }
        if x.len() != y.len() {
            return Err(Error::DataLengthMismatch {
                x_len: x.len(),
                y_len: y.len(),
            });
        }

        let label = format!("{} = {}", options.y_name, expression);
        let title = if options.title.is_empty() {
            label.clone()
        } else {
            options.title.clone()
        };

        let y_range = resolve_y_range(&y, options.y_min, options.y_max);

        Ok(PlotSpec {
            trace: Trace { x, y, label },
            layout: Layout {
                title,
                x_title: options.x_name,
                y_title: options.y_name,
                x_kind: AxisKind::from_log_flag(options.x_log),
                y_kind: AxisKind::from_log_flag(options.y_log),
                y_range,
            },
            id: next_plot_id(),
        })
    }
}

/// Resolve the y-axis range from explicit bounds and the data.
fn resolve_y_range(y: &[f64], y_min: Option<f64>, y_max: Option<f64>) -> Option<[f64; 2]> {
    match (y_min, y_max) {
        (Some(min), Some(max)) => Some([min, max]),
        (None, None) => None,
        (partial_min, partial_max) => {
            let finite: Vec<f64> = y.iter().copied().filter(|v| v.is_finite()).collect();
            if finite.is_empty() {
                // Nothing finite to derive the missing side from; leave the
                // whole range to the renderer.
                return None;
            }
            let auto_min = percentile(&finite, 5.0);
            let auto_max = percentile(&finite, 95.0);
            Some([
                partial_min.unwrap_or(auto_min),
                partial_max.unwrap_or(auto_max),
            ])
        }
    }
}

/// Percentile with linear interpolation between order statistics.
///
/// `data` must be non-empty; entries are assumed finite (the caller filters).
fn percentile(data: &[f64], q: f64) -> f64 {
    let mut sorted = data.to_vec();
    sorted.sort_by(f64::total_cmp);

    let rank = q / 100.0 * ((sorted.len() - 1) as f64);
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = rank - (lo as f64);

    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

/// Process-wide counter feeding artifact ids.
static PLOT_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Generate a unique artifact id.
///
/// Wall-clock nanoseconds plus a process-wide atomic counter: the counter
/// alone guarantees uniqueness across concurrent calls within a process, the
/// timestamp keeps ids from colliding across restarts.
fn next_plot_id() -> String {
    let count = PLOT_COUNTER.fetch_add(1, Ordering::Relaxed);
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    format!("plot_{nanos:024x}{count:08x}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_xy() -> (Vec<f64>, Vec<f64>) {
        let x: Vec<f64> = (0..100).map(f64::from).collect();
        let y: Vec<f64> = (1..=100).map(f64::from).collect();
        (x, y)
    }

    #[test]
    fn test_label_and_default_title() {
        let (x, y) = sample_xy();
        let spec = PlotSpecBuilder::new()
            .build("x**2", x, y, PlotOptions::new())
            .unwrap();
        assert_eq!(spec.trace.label, "y = x**2");
        assert_eq!(spec.layout.title, "y = x**2");
    }

    #[test]
    fn test_explicit_title_wins() {
        let (x, y) = sample_xy();
        let spec = PlotSpecBuilder::new()
            .build("x**2", x, y, PlotOptions::new().title("Parabola"))
            .unwrap();
        assert_eq!(spec.layout.title, "Parabola");
        assert_eq!(spec.trace.label, "y = x**2");
    }

    #[test]
    fn test_custom_axis_names() {
        let (x, y) = sample_xy();
        let spec = PlotSpecBuilder::new()
            .build(
                "sin(x)",
                x,
                y,
                PlotOptions::new().x_name("time").y_name("amplitude"),
            )
            .unwrap();
        assert_eq!(spec.layout.x_title, "time");
        assert_eq!(spec.layout.y_title, "amplitude");
        assert_eq!(spec.trace.label, "amplitude = sin(x)");
    }

    #[test]
    fn test_axis_kinds() {
        let (x, y) = sample_xy();
        let spec = PlotSpecBuilder::new()
            .build("x", x, y, PlotOptions::new().x_log(true))
            .unwrap();
        assert_eq!(spec.layout.x_kind, AxisKind::Log);
        assert_eq!(spec.layout.y_kind, AxisKind::Linear);
        assert_eq!(spec.layout.x_kind.as_str(), "log");
    }

    #[test]
    fn test_explicit_range_passthrough() {
        let (x, y) = sample_xy();
        let spec = PlotSpecBuilder::new()
            .build("x", x, y, PlotOptions::new().y_min(0.0).y_max(100.0))
            .unwrap();
        assert_eq!(spec.layout.y_range, Some([0.0, 100.0]));
    }

    #[test]
    fn test_auto_range_is_none() {
        let (x, y) = sample_xy();
        let spec = PlotSpecBuilder::new()
            .build("x", x, y, PlotOptions::new())
            .unwrap();
        assert_eq!(spec.layout.y_range, None);
    }

    #[test]
    fn test_partial_range_uses_percentile() {
        let (x, y) = sample_xy();
        let spec = PlotSpecBuilder::new()
            .build("x", x, y, PlotOptions::new().y_min(0.0))
            .unwrap();
        let range = spec.layout.y_range.unwrap();
        assert_eq!(range[0], 0.0);
        // 95th percentile of 1..=100 with linear interpolation.
        assert!((range[1] - 95.05).abs() < 1e-9);
    }

    #[test]
    fn test_partial_range_upper_only() {
        let (x, y) = sample_xy();
        let spec = PlotSpecBuilder::new()
            .build("x", x, y, PlotOptions::new().y_max(50.0))
            .unwrap();
        let range = spec.layout.y_range.unwrap();
        // 5th percentile of 1..=100.
        assert!((range[0] - 5.95).abs() < 1e-9);
        assert_eq!(range[1], 50.0);
    }

    #[test]
    fn test_partial_range_ignores_nonfinite() {
        let x: Vec<f64> = (0..5).map(f64::from).collect();
        let y = vec![f64::NAN, 10.0, f64::INFINITY, 20.0, 30.0];
        let spec = PlotSpecBuilder::new()
            .build("x", x, y, PlotOptions::new().y_min(0.0))
            .unwrap();
        let range = spec.layout.y_range.unwrap();
        assert_eq!(range[0], 0.0);
        assert!(range[1] <= 30.0 && range[1] >= 20.0);
    }

    #[test]
    fn test_partial_range_all_nonfinite_is_auto() {
        let x: Vec<f64> = (0..3).map(f64::from).collect();
        let y = vec![f64::NAN, f64::INFINITY, f64::NEG_INFINITY];
        let spec = PlotSpecBuilder::new()
            .build("x", x, y, PlotOptions::new().y_min(0.0))
            .unwrap();
        assert_eq!(spec.layout.y_range, None);
    }

    #[test]
    fn test_rejects_mismatched_lengths() {
        let err = PlotSpecBuilder::new()
            .build("x", vec![1.0, 2.0], vec![1.0], PlotOptions::new())
            .unwrap_err();
        assert!(matches!(err, Error::DataLengthMismatch { .. }));
    }

    #[test]
    fn test_rejects_empty_data() {
        let err = PlotSpecBuilder::new()
            .build("x", vec![], vec![], PlotOptions::new())
            .unwrap_err();
        assert!(matches!(err, Error::EmptyData));
    }

    #[test]
    fn test_percentile_interpolation() {
        let data: Vec<f64> = (1..=100).map(f64::from).collect();
        assert!((percentile(&data, 95.0) - 95.05).abs() < 1e-9);
        assert!((percentile(&data, 5.0) - 5.95).abs() < 1e-9);
        assert_eq!(percentile(&data, 0.0), 1.0);
        assert_eq!(percentile(&data, 100.0), 100.0);
    }

    #[test]
    fn test_percentile_single_element() {
        assert_eq!(percentile(&[42.0], 95.0), 42.0);
    }

    #[test]
    fn test_plot_ids_unique() {
        let (x, y) = sample_xy();
        let a = PlotSpecBuilder::new()
            .build("x", x.clone(), y.clone(), PlotOptions::new())
            .unwrap();
        let b = PlotSpecBuilder::new()
            .build("x", x, y, PlotOptions::new())
            .unwrap();
        assert_ne!(a.id, b.id);
        assert!(a.id.starts_with("plot_"));
    }
}
