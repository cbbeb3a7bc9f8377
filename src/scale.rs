//! Scale functions for data-to-pixel mappings.
//!
//! Scales transform f64 data values into f32 pixel positions inside the plot
//! area. Domains are f64 because evaluation output is f64 and may span ranges
//! where f32 resolution is not enough; pixel positions are f32 to match the
//! rasterizer.

use crate::error::{Error, Result};

/// Trait for scale functions that map data values to pixel positions.
pub trait Scale {
    /// Transform a data value to a pixel position.
    fn scale(&self, value: f64) -> f32;

    /// Get the data domain extent.
    fn domain(&self) -> (f64, f64);

    /// Get the pixel range extent.
    fn range(&self) -> (f32, f32);
}

/// Compute the finite extent of a data slice, ignoring NaN/Inf entries.
///
/// Evaluation output legally contains non-finite samples (`log(x)` over a
/// range crossing zero), so extent computation must filter them rather than
/// letting a single NaN poison the fold. Returns `None` when no finite value
/// exists.
#[must_use]
pub fn finite_extent(data: &[f64]) -> Option<(f64, f64)> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;

    for &v in data {
        if v.is_finite() {
            min = min.min(v);
            max = max.max(v);
        }
    }

    if min <= max {
        Some((min, max))
    } else {
        None
    }
}

/// Linear scale for continuous data-to-pixel mapping.
#[derive(Debug, Clone, Copy)]
pub struct LinearScale {
    domain_min: f64,
    domain_max: f64,
    range_min: f32,
    range_max: f32,
}

impl LinearScale {
    /// Create a new linear scale.
    ///
    /// # Errors
    ///
    /// Returns an error if the domain is degenerate or non-finite.
    pub fn new(domain: (f64, f64), range: (f32, f32)) -> Result<Self> {
        if !domain.0.is_finite() || !domain.1.is_finite() {
            return Err(Error::ScaleDomain("Domain must be finite".to_string()));
        }
        if (domain.0 - domain.1).abs() < f64::EPSILON {
            return Err(Error::ScaleDomain("Domain min and max cannot be equal".to_string()));
        }

        Ok(Self {
            domain_min: domain.0,
            domain_max: domain.1,
            range_min: range.0,
            range_max: range.1,
        })
    }

    /// Create a scale spanning the finite extent of a data slice.
    ///
    /// Returns `None` if the data has no finite values or a degenerate
    /// extent.
    #[must_use]
    pub fn from_data(data: &[f64], range: (f32, f32)) -> Option<Self> {
        let (min, max) = finite_extent(data)?;
        Self::new((min, max), range).ok()
    }

    /// Invert the scale (pixel position to data value).
    #[must_use]
    pub fn invert(&self, value: f32) -> f64 {
        let t = f64::from((value - self.range_min) / (self.range_max - self.range_min));
        self.domain_min + t * (self.domain_max - self.domain_min)
    }
}

impl Scale for LinearScale {
    fn scale(&self, value: f64) -> f32 {
        let t = (value - self.domain_min) / (self.domain_max - self.domain_min);
        self.range_min + (t as f32) * (self.range_max - self.range_min)
    }

    fn domain(&self) -> (f64, f64) {
        (self.domain_min, self.domain_max)
    }

    fn range(&self) -> (f32, f32) {
        (self.range_min, self.range_max)
    }
}

/// Logarithmic (base 10) scale for continuous data-to-pixel mapping.
///
/// Non-positive input values are clamped to the smallest positive f64 rather
/// than rejected: whether log-axis data is strictly positive is the caller's
/// concern, and a clamped sample lands far below the visible plot area where
/// the clipper discards it.
#[derive(Debug, Clone, Copy)]
pub struct LogScale {
    log_min: f64,
    log_max: f64,
    domain_min: f64,
    domain_max: f64,
    range_min: f32,
    range_max: f32,
}

impl LogScale {
    /// Create a new base-10 logarithmic scale.
    ///
    /// # Errors
    ///
    /// Returns an error if the domain contains non-positive values or is
    /// degenerate.
    pub fn new(domain: (f64, f64), range: (f32, f32)) -> Result<Self> {
        if domain.0 <= 0.0 || domain.1 <= 0.0 {
            return Err(Error::ScaleDomain("Log scale domain must be positive".to_string()));
        }
        if !domain.0.is_finite() || !domain.1.is_finite() {
            return Err(Error::ScaleDomain("Domain must be finite".to_string()));
        }

        let log_min = domain.0.log10();
        let log_max = domain.1.log10();
        if (log_min - log_max).abs() < f64::EPSILON {
            return Err(Error::ScaleDomain("Domain min and max cannot be equal".to_string()));
        }

        Ok(Self {
            log_min,
            log_max,
            domain_min: domain.0,
            domain_max: domain.1,
            range_min: range.0,
            range_max: range.1,
        })
    }

    /// Create a scale spanning the finite positive extent of a data slice.
    ///
    /// Non-positive samples are excluded from the extent the same way
    /// non-finite ones are. Returns `None` when nothing positive remains.
    #[must_use]
    pub fn from_data(data: &[f64], range: (f32, f32)) -> Option<Self> {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;

        for &v in data {
            if v.is_finite() && v > 0.0 {
                min = min.min(v);
                max = max.max(v);
            }
        }

        if min > max {
            return None;
        }
        Self::new((min, max), range).ok()
    }
}

impl Scale for LogScale {
    fn scale(&self, value: f64) -> f32 {
        let log_val = value.max(f64::MIN_POSITIVE).log10();
        let t = (log_val - self.log_min) / (self.log_max - self.log_min);
        self.range_min + (t as f32) * (self.range_max - self.range_min)
    }

    fn domain(&self) -> (f64, f64) {
        (self.domain_min, self.domain_max)
    }

    fn range(&self) -> (f32, f32) {
        (self.range_min, self.range_max)
    }
}
