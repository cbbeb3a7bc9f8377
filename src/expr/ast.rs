//! Closed expression AST and function dispatch table.
//!
//! The vocabulary reachable from an expression is exactly what these enums
//! enumerate: literals, the variable, two constants, six operators, and the
//! fixed function set. There is no dynamic name lookup anywhere in the
//! evaluation path.

use crate::error::{Error, Result};

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    /// Arithmetic negation. (Unary plus is absorbed at parse time.)
    Neg,
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `%`
    Rem,
    /// `^` / `**`
    Pow,
}

impl BinaryOp {
    /// Apply the operator with IEEE 754 semantics: division by zero yields
    /// ±Inf or NaN, never a fault.
    pub(crate) fn apply(self, lhs: f64, rhs: f64) -> f64 {
        match self {
            Self::Add => lhs + rhs,
            Self::Sub => lhs - rhs,
            Self::Mul => lhs * rhs,
            Self::Div => lhs / rhs,
            Self::Rem => lhs % rhs,
            Self::Pow => lhs.powf(rhs),
        }
    }
}

/// Named constants available to expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Constant {
    /// π
    Pi,
    /// Euler's number.
    E,
}

impl Constant {
    pub(crate) fn from_name(name: &str) -> Option<Self> {
        match name {
            "pi" => Some(Self::Pi),
            "e" => Some(Self::E),
            _ => None,
        }
    }

    pub(crate) fn value(self) -> f64 {
        match self {
            Self::Pi => std::f64::consts::PI,
            Self::E => std::f64::consts::E,
        }
    }
}

/// The closed set of callable functions.
///
/// Adding a function means adding a variant here; expressions can never call
/// anything this enum does not name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum Func {
    Sin,
    Cos,
    Tan,
    Exp,
    /// Natural logarithm.
    Log,
    Log10,
    Sqrt,
    Abs,
    /// Binary power: `pow(base, exponent)`.
    Pow,
    Sinh,
    Cosh,
    Tanh,
    Arcsin,
    Arccos,
    Arctan,
}

impl Func {
    /// Look up a function by its expression-language name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "sin" => Some(Self::Sin),
            "cos" => Some(Self::Cos),
            "tan" => Some(Self::Tan),
            "exp" => Some(Self::Exp),
            "log" => Some(Self::Log),
            "log10" => Some(Self::Log10),
            "sqrt" => Some(Self::Sqrt),
            "abs" => Some(Self::Abs),
            "pow" => Some(Self::Pow),
            "sinh" => Some(Self::Sinh),
            "cosh" => Some(Self::Cosh),
            "tanh" => Some(Self::Tanh),
            "arcsin" => Some(Self::Arcsin),
            "arccos" => Some(Self::Arccos),
            "arctan" => Some(Self::Arctan),
            _ => None,
        }
    }

    /// The expression-language name of this function.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Exp => "exp",
            Self::Log => "log",
            Self::Log10 => "log10",
            Self::Sqrt => "sqrt",
            Self::Abs => "abs",
            Self::Pow => "pow",
            Self::Sinh => "sinh",
            Self::Cosh => "cosh",
            Self::Tanh => "tanh",
            Self::Arcsin => "arcsin",
            Self::Arccos => "arccos",
            Self::Arctan => "arctan",
        }
    }

    /// Number of arguments the function takes.
    #[must_use]
    pub fn arity(self) -> usize {
        match self {
            Self::Pow => 2,
            _ => 1,
        }
    }

    /// Apply the function. Out-of-domain arguments yield NaN per IEEE 754
    /// (`log` of a negative, `arcsin` beyond ±1, `sqrt` of a negative).
    pub(crate) fn apply(self, args: &[f64]) -> f64 {
        match self {
            Self::Sin => args[0].sin(),
            Self::Cos => args[0].cos(),
            Self::Tan => args[0].tan(),
            Self::Exp => args[0].exp(),
            Self::Log => args[0].ln(),
            Self::Log10 => args[0].log10(),
            Self::Sqrt => args[0].sqrt(),
            Self::Abs => args[0].abs(),
            Self::Pow => args[0].powf(args[1]),
            Self::Sinh => args[0].sinh(),
            Self::Cosh => args[0].cosh(),
            Self::Tanh => args[0].tanh(),
            Self::Arcsin => args[0].asin(),
            Self::Arccos => args[0].acos(),
            Self::Arctan => args[0].atan(),
        }
    }
}

/// A parsed expression.
///
/// Construction goes through [`Expr::parse`]; the variants are the entire
/// language.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Numeric literal.
    Number(f64),
    /// The independent variable `x`.
    Var,
    /// A named constant (`pi`, `e`).
    Const(f64),
    /// Unary operation.
    Unary {
        /// The operator.
        op: UnaryOp,
        /// The operand.
        operand: Box<Expr>,
    },
    /// Binary operation.
    Binary {
        /// The operator.
        op: BinaryOp,
        /// Left operand.
        lhs: Box<Expr>,
        /// Right operand.
        rhs: Box<Expr>,
    },
    /// Call to an allow-listed function, arity checked at parse time.
    Call {
        /// The function.
        func: Func,
        /// Arguments, `func.arity()` of them.
        args: Vec<Expr>,
    },
}

impl Expr {
    /// Parse an expression string into an AST.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Evaluation`] for syntax errors, unknown identifiers,
    /// and wrong argument counts.
    pub fn parse(input: &str) -> Result<Self> {
        if input.trim().is_empty() {
            return Err(Error::Evaluation("empty expression".to_string()));
        }
        let tokens = super::token::tokenize(input)?;
        super::parser::parse(&tokens)
    }

    /// Whether the expression references the variable anywhere.
    ///
    /// Expressions that do not are constants and get broadcast over the grid
    /// instead of re-evaluated per sample.
    #[must_use]
    pub fn references_var(&self) -> bool {
        match self {
            Self::Number(_) | Self::Const(_) => false,
            Self::Var => true,
            Self::Unary { operand, .. } => operand.references_var(),
            Self::Binary { lhs, rhs, .. } => lhs.references_var() || rhs.references_var(),
            Self::Call { args, .. } => args.iter().any(Expr::references_var),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_func_roundtrip_names() {
        for f in [
            Func::Sin,
            Func::Cos,
            Func::Tan,
            Func::Exp,
            Func::Log,
            Func::Log10,
            Func::Sqrt,
            Func::Abs,
            Func::Pow,
            Func::Sinh,
            Func::Cosh,
            Func::Tanh,
            Func::Arcsin,
            Func::Arccos,
            Func::Arctan,
        ] {
            assert_eq!(Func::from_name(f.name()), Some(f));
        }
    }

    #[test]
    fn test_func_unknown_name() {
        assert_eq!(Func::from_name("system"), None);
        assert_eq!(Func::from_name("ln"), None);
        assert_eq!(Func::from_name("Sin"), None); // case-sensitive
    }

    #[test]
    fn test_func_arity() {
        assert_eq!(Func::Pow.arity(), 2);
        assert_eq!(Func::Sin.arity(), 1);
    }

    #[test]
    fn test_log_is_natural() {
        let v = Func::Log.apply(&[std::f64::consts::E]);
        assert!((v - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_out_of_domain_yields_nan() {
        assert!(Func::Log.apply(&[-1.0]).is_nan());
        assert!(Func::Sqrt.apply(&[-4.0]).is_nan());
        assert!(Func::Arcsin.apply(&[2.0]).is_nan());
    }

    #[test]
    fn test_binary_div_by_zero_is_inf() {
        assert!(BinaryOp::Div.apply(1.0, 0.0).is_infinite());
        assert!(BinaryOp::Div.apply(0.0, 0.0).is_nan());
    }

    #[test]
    fn test_constant_values() {
        assert!((Constant::Pi.value() - std::f64::consts::PI).abs() < 1e-15);
        assert!((Constant::E.value() - std::f64::consts::E).abs() < 1e-15);
        assert_eq!(Constant::from_name("tau"), None);
    }

    #[test]
    fn test_references_var() {
        assert!(Expr::parse("sin(x) + 1").unwrap().references_var());
        assert!(!Expr::parse("pi * 2").unwrap().references_var());
        assert!(!Expr::parse("pow(2, 3)").unwrap().references_var());
    }

    #[test]
    fn test_parse_empty_is_error() {
        assert!(Expr::parse("").is_err());
        assert!(Expr::parse("   ").is_err());
    }
}
