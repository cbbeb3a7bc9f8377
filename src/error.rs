//! Error types for trazar operations.
//!
//! Every fault in the evaluate → build → render pipeline is returned as a
//! value; no error crosses the public boundary as a panic, and no operation
//! is retried. A malformed expression is a terminal outcome for that request.

use std::io;
use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in trazar operations.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error (file operations, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// PNG encoding error.
    #[error("PNG encoding error: {0}")]
    PngEncoding(#[from] png::EncodingError),

    /// Invalid sample range: the domain minimum must be strictly below the maximum.
    #[error("X minimum ({x_min}) must be less than X maximum ({x_max})")]
    InvalidRange {
        /// Requested domain minimum.
        x_min: f64,
        /// Requested domain maximum.
        x_max: f64,
    },

    /// Expression contains a deny-listed substring.
    #[error("expression contains forbidden operation: {0}")]
    ForbiddenToken(String),

    /// Expression failed to parse or evaluate (syntax error, unknown
    /// identifier, wrong argument count).
    #[error("error evaluating expression: {0}")]
    Evaluation(String),

    /// Invalid dimensions for framebuffer or plot.
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
    },

    /// Data length mismatch between x and y arrays.
    #[error("Data length mismatch: x has {x_len} elements, y has {y_len} elements")]
    DataLengthMismatch {
        /// Length of x data.
        x_len: usize,
        /// Length of y data.
        y_len: usize,
    },

    /// Empty data provided where non-empty is required.
    #[error("Empty data provided")]
    EmptyData,

    /// Scale domain error (e.g., degenerate extent).
    #[error("Scale domain error: {0}")]
    ScaleDomain(String),

    /// Rendering error.
    #[error("Rendering error: {0}")]
    Rendering(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_range_display() {
        let err = Error::InvalidRange {
            x_min: 10.0,
            x_max: -10.0,
        };
        let msg = err.to_string();
        assert!(msg.contains("10"));
        assert!(msg.contains("less than"));
    }

    #[test]
    fn test_forbidden_token_display() {
        let err = Error::ForbiddenToken("import".to_string());
        assert!(err.to_string().contains("forbidden"));
        assert!(err.to_string().contains("import"));
    }

    #[test]
    fn test_evaluation_display() {
        let err = Error::Evaluation("unknown function `unknown_fn`".to_string());
        assert!(err.to_string().contains("unknown_fn"));
    }

    #[test]
    fn test_data_length_mismatch() {
        let err = Error::DataLengthMismatch {
            x_len: 10,
            y_len: 20,
        };
        assert!(err.to_string().contains("10"));
        assert!(err.to_string().contains("20"));
    }
}
