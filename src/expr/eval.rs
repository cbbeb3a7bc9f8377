//! Elementwise expression evaluation over a sample grid.
//!
//! Evaluation is total: every arithmetic fault representable in IEEE 754
//! (division by zero, out-of-domain function arguments, overflow) produces a
//! NaN or ±Inf sample instead of an error. Faults that cannot be represented
//! as values (syntax, unknown names, arity) were already rejected at parse
//! time, so evaluation itself cannot fail.

use super::ast::{Expr, UnaryOp};

impl Expr {
    /// Evaluate the expression at a single point.
    #[must_use]
    pub fn eval_at(&self, x: f64) -> f64 {
        match self {
            Self::Number(value) | Self::Const(value) => *value,
            Self::Var => x,
            Self::Unary { op, operand } => match op {
                UnaryOp::Neg => -operand.eval_at(x),
            },
            Self::Binary { op, lhs, rhs } => op.apply(lhs.eval_at(x), rhs.eval_at(x)),
            Self::Call { func, args } => {
                // Arity was checked at parse time; at most two arguments.
                let mut values = [0.0f64; 2];
                for (slot, arg) in values.iter_mut().zip(args) {
                    *slot = arg.eval_at(x);
                }
                func.apply(&values[..args.len()])
            }
        }
    }

    /// Evaluate the expression elementwise over a grid.
    ///
    /// A constant expression is evaluated once and broadcast to grid length,
    /// mirroring scalar-to-sequence broadcasting in array semantics.
    #[must_use]
    pub fn eval_grid(&self, xs: &[f64]) -> Vec<f64> {
        if !self.references_var() {
            let value = self.eval_at(0.0);
            return vec![value; xs.len()];
        }

        xs.iter().map(|&x| self.eval_at(x)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::super::ast::Expr;
    use super::super::sample_grid;

    #[test]
    fn test_caret_and_double_star_identical() {
        let grid = sample_grid(-10.0, 10.0, 1000).unwrap();
        let caret = Expr::parse("x^2").unwrap().eval_grid(&grid);
        let stars = Expr::parse("x**2").unwrap().eval_grid(&grid);
        assert_eq!(caret, stars);
    }

    #[test]
    fn test_constant_broadcast_length() {
        let grid = sample_grid(0.0, 1.0, 37).unwrap();
        let y = Expr::parse("pi").unwrap().eval_grid(&grid);
        assert_eq!(y.len(), 37);
        for v in y {
            assert!((v - 3.141_592_65).abs() < 1e-7);
        }
    }

    #[test]
    fn test_log_of_negative_is_nan_not_error() {
        let grid = sample_grid(-2.0, 2.0, 5).unwrap();
        let y = Expr::parse("log(x)").unwrap().eval_grid(&grid);

        // Negative samples give NaN, positive ones real values.
        assert!(y[0].is_nan());
        assert!(y[1].is_nan());
        assert!(y[4].is_finite());
    }

    #[test]
    fn test_division_by_zero_propagates_inf() {
        // The grid includes x = 0 exactly; 1/x there is +Inf, not a fault.
        let grid = sample_grid(-1.0, 1.0, 3).unwrap();
        let y = Expr::parse("1 / x").unwrap().eval_grid(&grid);
        assert_eq!(y[0], -1.0);
        assert!(y[1].is_infinite());
        assert_eq!(y[2], 1.0);
    }

    #[test]
    fn test_scalar_division_by_zero_is_ok_inf() {
        // f64 has no throwing division: `1/0 + x` is an all-Inf sequence,
        // where the original host engine raised instead.
        let grid = sample_grid(-1.0, 1.0, 5).unwrap();
        let y = Expr::parse("1/0 + x").unwrap().eval_grid(&grid);
        assert!(y.iter().all(|v| v.is_infinite()));
    }

    #[test]
    fn test_exp_overflow_is_inf() {
        let y = Expr::parse("exp(x)").unwrap().eval_grid(&[1000.0]);
        assert!(y[0].is_infinite());
    }

    #[test]
    fn test_negative_base_fractional_exponent_is_nan() {
        let y = Expr::parse("x^0.5").unwrap().eval_grid(&[-4.0]);
        assert!(y[0].is_nan());
    }

    #[test]
    fn test_polynomial_values() {
        let expr = Expr::parse("x**3 + 2*x**2 + x + 1").unwrap();
        assert!((expr.eval_at(0.0) - 1.0).abs() < 1e-12);
        assert!((expr.eval_at(1.0) - 5.0).abs() < 1e-12);
        assert!((expr.eval_at(-1.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_gaussian_shape() {
        let expr = Expr::parse("exp(-x**2)").unwrap();
        assert!((expr.eval_at(0.0) - 1.0).abs() < 1e-12);
        assert!(expr.eval_at(3.0) < 1e-3);
    }
}
