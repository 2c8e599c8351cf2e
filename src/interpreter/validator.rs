use std::fmt;

use crate::{
    ast::BinaryOperator,
    error::{DomainError, DomainErrorKind},
};

/// Every two-operand operation the validator knows about.
///
/// This is the formula language's binary operators plus the two-argument
/// logarithm, which only the calculator offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOpSymbol {
    /// `x + y`
    Add,
    /// `x - y`
    Sub,
    /// `x * y`
    Mul,
    /// `x / y`
    Div,
    /// `x % y`, floored: the result has the sign of `y`.
    Mod,
    /// `x ** y`
    Pow,
    /// Logarithm of `x` in base `y`.
    LogBase,
}

impl BinaryOpSymbol {
    /// Every operation, in the order the calculator lists them.
    pub const ALL: [Self; 7] = [Self::Add,
                                Self::Sub,
                                Self::Mul,
                                Self::Div,
                                Self::Mod,
                                Self::Pow,
                                Self::LogBase];

    /// Short name used in messages.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Pow => "**",
            Self::LogBase => "log",
        }
    }
}

impl From<BinaryOperator> for BinaryOpSymbol {
    fn from(op: BinaryOperator) -> Self {
        match op {
            BinaryOperator::Add => Self::Add,
            BinaryOperator::Sub => Self::Sub,
            BinaryOperator::Mul => Self::Mul,
            BinaryOperator::Div => Self::Div,
            BinaryOperator::Mod => Self::Mod,
            BinaryOperator::Pow => Self::Pow,
        }
    }
}

impl fmt::Display for BinaryOpSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Checks the mathematical precondition of `left <op> right`.
///
/// | Operator | Rejected when |
/// |---|---|
/// | `/` | `right == 0` |
/// | `%` | `right == 0` |
/// | `log` | `left <= 0`, then `right <= 0` or `right == 1` |
///
/// `+`, `-`, `*` and `**` are always accepted. The comparison against `1` is
/// exact, so a base of `1.0000000001` passes. `NaN` operands never violate a
/// precondition.
///
/// # Errors
/// Returns the [`DomainError`] for the first violated precondition.
///
/// # Example
/// ```
/// use plotcalc::{
///     error::DomainErrorKind,
///     interpreter::validator::{BinaryOpSymbol, validate_binary},
/// };
///
/// assert!(validate_binary(BinaryOpSymbol::Div, 1.0, 2.0).is_ok());
///
/// let err = validate_binary(BinaryOpSymbol::LogBase, 0.0, 1.0).unwrap_err();
/// assert_eq!(err.kind, DomainErrorKind::NonPositiveArgument);
/// ```
pub fn validate_binary(op: BinaryOpSymbol, left: f64, right: f64) -> Result<(), DomainError> {
    match op {
        BinaryOpSymbol::Div if right == 0.0 => {
            Err(DomainError::new(DomainErrorKind::DivideByZero, op.symbol(), right))
        },
        BinaryOpSymbol::Mod if right == 0.0 => {
            Err(DomainError::new(DomainErrorKind::ModuloByZero, op.symbol(), right))
        },
        BinaryOpSymbol::LogBase => validate_log(left, right),
        _ => Ok(()),
    }
}

/// Checks the preconditions of the logarithm of `value` in base `base`.
///
/// The argument is checked before the base.
///
/// # Errors
/// - `NonPositiveArgument` if `value <= 0`.
/// - `InvalidLogBase` if `base <= 0` or `base == 1`.
#[allow(clippy::float_cmp)]
pub fn validate_log(value: f64, base: f64) -> Result<(), DomainError> {
    validate_ln(value)?;
    if base <= 0.0 || base == 1.0 {
        return Err(DomainError::new(DomainErrorKind::InvalidLogBase,
                                    BinaryOpSymbol::LogBase.symbol(),
                                    base));
    }
    Ok(())
}

/// Checks that `value` is a valid natural logarithm argument.
///
/// # Errors
/// `NonPositiveArgument` if `value <= 0`.
pub fn validate_ln(value: f64) -> Result<(), DomainError> {
    if value <= 0.0 {
        return Err(DomainError::new(DomainErrorKind::NonPositiveArgument,
                                    BinaryOpSymbol::LogBase.symbol(),
                                    value));
    }
    Ok(())
}

/// Computes `left <op> right` without checking preconditions.
///
/// Callers are expected to run [`validate_binary`] first; unchecked results
/// follow IEEE 754 (`1 / 0` is infinite, `0 % 0` is `NaN`).
#[must_use]
pub fn apply_binary(op: BinaryOpSymbol, left: f64, right: f64) -> f64 {
    match op {
        BinaryOpSymbol::Add => left + right,
        BinaryOpSymbol::Sub => left - right,
        BinaryOpSymbol::Mul => left * right,
        BinaryOpSymbol::Div => left / right,
        BinaryOpSymbol::Mod => floored_mod(left, right),
        BinaryOpSymbol::Pow => left.powf(right),
        BinaryOpSymbol::LogBase => left.ln() / right.ln(),
    }
}

/// Validates, then computes `left <op> right`.
///
/// # Errors
/// Returns the [`DomainError`] reported by [`validate_binary`].
///
/// # Example
/// ```
/// use plotcalc::interpreter::validator::{BinaryOpSymbol, checked_binary};
///
/// assert_eq!(checked_binary(BinaryOpSymbol::LogBase, 8.0, 2.0), Ok(3.0));
/// assert_eq!(checked_binary(BinaryOpSymbol::Mod, -7.5, 2.0), Ok(0.5));
/// assert!(checked_binary(BinaryOpSymbol::Mod, 1.0, 0.0).is_err());
/// ```
pub fn checked_binary(op: BinaryOpSymbol, left: f64, right: f64) -> Result<f64, DomainError> {
    validate_binary(op, left, right)?;
    Ok(apply_binary(op, left, right))
}

/// Floored modulo: the remainder takes the sign of the divisor.
///
/// `-7 % 3` is `2` and `7 % -3` is `-2`. A zero remainder carries the sign
/// of the divisor as well.
#[must_use]
pub fn floored_mod(left: f64, right: f64) -> f64 {
    let remainder = left % right;
    if remainder == 0.0 {
        0.0_f64.copysign(right)
    } else if (remainder < 0.0) != (right < 0.0) {
        remainder + right
    } else {
        remainder
    }
}
