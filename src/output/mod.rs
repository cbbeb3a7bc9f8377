//! Output encoders.
//!
//! Two artifact forms for every chart: a static raster PNG and a vector
//! SVG / embeddable HTML fragment.

/// PNG output encoder.
pub mod png_encoder;

/// SVG and embeddable HTML output encoder.
pub mod svg;

pub use png_encoder::PngEncoder;
pub use svg::SvgEncoder;
