use std::str::FromStr;

use thiserror::Error;

pub use crate::interpreter::validator::BinaryOpSymbol;
use crate::{error::DomainError, interpreter::validator::checked_binary};

/// An operation name the calculator does not offer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown operation '{0}'. Expected one of: + - * / % ** log.")]
pub struct UnknownOperation(pub String);

impl BinaryOpSymbol {
    /// Human readable description, as shown in an operation picker.
    ///
    /// # Example
    /// ```
    /// use plotcalc::calculator::BinaryOpSymbol;
    ///
    /// assert_eq!(BinaryOpSymbol::LogBase.label(), "logarithm: log_y(x)");
    /// ```
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Add => "addition: x + y",
            Self::Sub => "subtraction: x - y",
            Self::Mul => "multiplication: x * y",
            Self::Div => "division: x / y",
            Self::Mod => "modulo: x % y (remainder)",
            Self::Pow => "exponentiation: x ** y",
            Self::LogBase => "logarithm: log_y(x)",
        }
    }
}

impl FromStr for BinaryOpSymbol {
    type Err = UnknownOperation;

    /// Accepts the operator symbol or its name, ignoring ASCII case.
    ///
    /// `^` is accepted as a spelling of `**`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let op = match s.trim().to_ascii_lowercase().as_str() {
            "+" | "add" => Self::Add,
            "-" | "sub" => Self::Sub,
            "*" | "mul" => Self::Mul,
            "/" | "div" => Self::Div,
            "%" | "mod" => Self::Mod,
            "**" | "^" | "pow" => Self::Pow,
            "log" => Self::LogBase,
            _ => return Err(UnknownOperation(s.to_string())),
        };
        Ok(op)
    }
}

/// Computes `left <op> right` for the two-operand calculator.
///
/// This is the authoritative single-answer path: any violated precondition
/// is returned as an error, never as a substituted value. `LogBase` computes
/// the logarithm of `left` in base `right`.
///
/// # Errors
/// - `DivideByZero` / `ModuloByZero` when `right == 0` for `/` and `%`.
/// - `NonPositiveArgument` when `left <= 0` for `log`.
/// - `InvalidLogBase` when `right <= 0` or `right == 1` for `log`.
///
/// # Example
/// ```
/// use plotcalc::{
///     calculator::{BinaryOpSymbol, evaluate_scalar_binary},
///     error::DomainErrorKind,
/// };
///
/// assert_eq!(evaluate_scalar_binary(BinaryOpSymbol::Div, 7.0, 2.0), Ok(3.5));
///
/// let err = evaluate_scalar_binary(BinaryOpSymbol::Div, 1.0, 0.0).unwrap_err();
/// assert_eq!(err.kind, DomainErrorKind::DivideByZero);
/// ```
pub fn evaluate_scalar_binary(op: BinaryOpSymbol,
                              left: f64,
                              right: f64)
                              -> Result<f64, DomainError> {
    let result = checked_binary(op, left, right);
    tracing::debug!(%op, left, right, ok = result.is_ok(), "calculated");
    result
}
