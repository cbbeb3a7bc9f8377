//! # Trazar
//!
//! Sandboxed mathematical expression evaluation and SIMD-accelerated function
//! plotting, with zero JavaScript/HTML dependencies.
//!
//! Trazar turns an untrusted expression string like `"sin(x) * exp(-x^2)"`
//! into a numeric function, samples it over a configurable grid, shapes the
//! result into a render-ready plot specification, and rasterizes it to PNG,
//! SVG, or an embeddable HTML fragment.
//!
//! ## Features
//!
//! - **Closed-vocabulary sandbox**: expressions are parsed into an AST that
//!   can only reference numeric literals, the variable `x`, the constants
//!   `pi` and `e`, and a fixed set of mathematical functions. No host symbols
//!   are reachable from an expression.
//! - **IEEE semantics**: out-of-domain samples become NaN/Inf values, never
//!   panics — `log(x)` over a range crossing zero plots the valid half.
//! - **Pure Rust rendering**: anti-aliased rasterization into a SIMD-aligned
//!   framebuffer, encoded with the pure-Rust `png` crate.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use trazar::prelude::*;
//!
//! // Evaluate an expression over [-10, 10] with 1000 samples
//! let eval = ExpressionEvaluator::new().evaluate("x**2", -10.0, 10.0)?;
//!
//! // Shape it into a plot specification
//! let spec = PlotSpecBuilder::new().build("x**2", eval.x, eval.y, PlotOptions::new())?;
//!
//! // Render to PNG
//! let fb = ChartRenderer::new().to_framebuffer(&spec)?;
//! PngEncoder::write_to_file(&fb, "plot.png")?;
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
// Allow unwrap() in tests only - banned in production code (Cloudflare incident 2025-11-18)
#![cfg_attr(test, allow(clippy::unwrap_used))]
// Allow common patterns in graphics/visualization code
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Core Modules
// ============================================================================

/// Color types for plot styling.
pub mod color;

/// Core framebuffer for pixel rendering.
pub mod framebuffer;

/// Geometric primitives (points, rectangles).
pub mod geometry;

/// Scale functions for data-to-pixel mappings.
pub mod scale;

// ============================================================================
// Evaluation and Specification Modules
// ============================================================================

/// Sandboxed expression parsing and grid evaluation.
pub mod expr;

/// Plot specification building (traces, layout, axis ranges).
pub mod spec;

// ============================================================================
// Rendering Modules
// ============================================================================

/// Chart layout and rasterization.
pub mod render;

/// Output encoders (PNG, SVG, embeddable HTML).
pub mod output;

// ============================================================================
// Error Types
// ============================================================================

/// Error types for trazar operations.
pub mod error;

pub use error::{Error, Result};

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types and traits for convenient imports.
///
/// ```rust,ignore
/// use trazar::prelude::*;
/// ```
pub mod prelude {
    pub use crate::color::Rgba;
    pub use crate::error::{Error, Result};
    pub use crate::expr::{Evaluation, ExpressionEvaluator};
    pub use crate::framebuffer::Framebuffer;
    pub use crate::geometry::{Point, Rect};
    pub use crate::output::{PngEncoder, SvgEncoder};
    pub use crate::render::ChartRenderer;
    pub use crate::scale::{LinearScale, LogScale, Scale};
    pub use crate::spec::{AxisKind, PlotOptions, PlotSpec, PlotSpecBuilder};
}

// ============================================================================
// Re-exports
// ============================================================================

/// Re-export trueno for direct access to SIMD operations.
pub use trueno;

// ============================================================================
// Tests
// ============================================================================
