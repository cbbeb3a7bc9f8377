//! Sandboxed expression parsing and grid evaluation.
//!
//! Turns an untrusted expression string into a numeric function of `x` and
//! samples it over an evenly spaced grid.
//!
//! # Syntax
//!
//! ```text
//! expression := term (('+' | '-') term)*
//! term       := power (('*' | '/' | '%') power)*
//! power      := unary ('^' unary)*            right-associative; '**' ≡ '^'
//! unary      := ('+' | '-')* atom
//! atom       := number | 'x' | 'pi' | 'e' | func '(' args ')' | '(' expression ')'
//!
//! Functions: sin, cos, tan, exp, log (natural), log10, sqrt, abs,
//!            pow(base, exponent), sinh, cosh, tanh, arcsin, arccos, arctan
//! ```
//!
//! Nothing outside that vocabulary is reachable from an expression: the
//! parser produces a closed AST and every function call dispatches through
//! the [`Func`] enum, so there is no dynamic symbol lookup to escape through.
//!
//! # Example
//!
//! ```rust
//! use trazar::expr::ExpressionEvaluator;
//!
//! let eval = ExpressionEvaluator::new()
//!     .num_points(100)
//!     .evaluate("sin(x) * exp(-x^2)", -2.0, 2.0)
//!     .unwrap();
//! assert_eq!(eval.x.len(), 100);
//! assert_eq!(eval.y.len(), 100);
//! ```

mod ast;
mod eval;
mod parser;
mod token;

pub use ast::{BinaryOp, Expr, Func, UnaryOp};

use crate::error::{Error, Result};

/// Deny-listed substrings, matched case-insensitively against the raw
/// expression before parsing.
///
/// This is a coarse lexical screen in front of the parser, not the sandbox
/// itself — the closed AST is what actually prevents anything outside the
/// vocabulary from running. The screen is deliberately broad: an identifier
/// such as `imported_val` is rejected here before the parser ever sees it.
pub const FORBIDDEN_TOKENS: [&str; 6] = ["import", "exec", "eval", "open", "file", "__"];

/// Find the first deny-listed substring in an expression, if any.
#[must_use]
pub fn forbidden_token(expression: &str) -> Option<&'static str> {
    let lowered = expression.to_lowercase();
    FORBIDDEN_TOKENS.iter().find(|op| lowered.contains(**op)).copied()
}

/// Generate `num_points` evenly spaced samples over `[x_min, x_max]`.
///
/// The first sample is exactly `x_min` and the last exactly `x_max`; interior
/// samples are monotonically non-decreasing.
///
/// # Errors
///
/// Returns [`Error::InvalidRange`] unless `x_min < x_max`.
pub fn sample_grid(x_min: f64, x_max: f64, num_points: usize) -> Result<Vec<f64>> {
    // NaN bounds fail the finiteness check rather than slipping past `>=`.
    if !x_min.is_finite() || !x_max.is_finite() || x_min >= x_max {
        return Err(Error::InvalidRange { x_min, x_max });
    }

    let n = num_points.max(2);
    let step = (x_max - x_min) / ((n - 1) as f64);

    let mut grid = Vec::with_capacity(n);
    for i in 0..n {
        grid.push(x_min + step * (i as f64));
    }
    // Pin the endpoint; accumulated rounding may otherwise overshoot.
    grid[n - 1] = x_max;

    Ok(grid)
}

/// Result of evaluating an expression over a sample grid.
///
/// `x` and `y` always have equal length. `y` may contain NaN or ±Inf entries
/// where samples fell outside the expression's domain; downstream consumers
/// tolerate these rather than treating them as errors.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    /// Domain samples.
    pub x: Vec<f64>,
    /// Expression value at each domain sample.
    pub y: Vec<f64>,
}

/// Evaluator turning expression strings into sampled numeric sequences.
///
/// Stateless apart from configuration; safe to share and call concurrently.
#[derive(Debug, Clone, Copy)]
pub struct ExpressionEvaluator {
    num_points: usize,
}

impl Default for ExpressionEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl ExpressionEvaluator {
    /// Default number of grid samples.
    pub const DEFAULT_NUM_POINTS: usize = 1000;

    /// Create an evaluator with the default grid size.
    #[must_use]
    pub fn new() -> Self {
        Self {
            num_points: Self::DEFAULT_NUM_POINTS,
        }
    }

    /// Set the number of grid samples (minimum 2).
    #[must_use]
    pub fn num_points(mut self, n: usize) -> Self {
        self.num_points = n.max(2);
        self
    }

    /// Validate and evaluate an expression over `[x_min, x_max]`.
    ///
    /// Checks run in order: range validity, deny-list screen, parse,
    /// elementwise evaluation. A constant expression (no occurrence of `x`)
    /// is evaluated once and broadcast to grid length.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidRange`] unless `x_min < x_max`.
    /// - [`Error::ForbiddenToken`] when the expression contains a
    ///   deny-listed substring (case-insensitive).
    /// - [`Error::Evaluation`] for syntax errors, unknown identifiers, or
    ///   wrong argument counts.
    ///
    /// Out-of-domain arithmetic is not an error: `log` of a negative sample
    /// yields NaN at that position and division by zero yields ±Inf, per
    /// IEEE 754 semantics.
    pub fn evaluate(&self, expression: &str, x_min: f64, x_max: f64) -> Result<Evaluation> {
        let x = sample_grid(x_min, x_max, self.num_points)?;

        if let Some(op) = forbidden_token(expression) {
            return Err(Error::ForbiddenToken(op.to_string()));
        }

        let expr = Expr::parse(expression)?;
        let y = expr.eval_grid(&x);

        Ok(Evaluation { x, y })
    }
}


// ============================================================================
// Property-based tests with proptest
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(500))]

        /// Grid invariant: exact length, monotone, endpoints pinned.
        #[test]
        fn prop_grid_shape(
            x_min in -1e6f64..1e6,
            span in 1e-6f64..1e6,
            n in 2usize..5000
        ) {
            let x_max = x_min + span;
            let grid = sample_grid(x_min, x_max, n).expect("valid range");

            prop_assert_eq!(grid.len(), n);
            prop_assert_eq!(grid[0], x_min);
            prop_assert_eq!(grid[n - 1], x_max);
            for w in grid.windows(2) {
                prop_assert!(w[1] >= w[0], "grid not monotone: {} > {}", w[0], w[1]);
            }
        }

        /// Inverted or degenerate ranges always fail, whatever the expression.
        #[test]
        fn prop_inverted_range_rejected(
            x_min in -1e6f64..1e6,
            slack in 0.0f64..1e6
        ) {
            let result = ExpressionEvaluator::new().evaluate("x", x_min, x_min - slack);
            let is_invalid_range = matches!(result, Err(Error::InvalidRange { .. }));
            prop_assert!(is_invalid_range);
        }

        /// Output length always matches the configured grid size.
        #[test]
        fn prop_output_length(n in 2usize..2000) {
            let eval = ExpressionEvaluator::new()
                .num_points(n)
                .evaluate("sin(x)", -1.0, 1.0)
                .expect("valid input");
            prop_assert_eq!(eval.x.len(), n);
            prop_assert_eq!(eval.y.len(), n);
        }
    }
}
