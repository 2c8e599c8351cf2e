use std::fmt;

use thiserror::Error;

use crate::ast::{BinaryOperator, Span};

/// The operator precondition that was violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DomainErrorKind {
    /// Division with a zero divisor.
    DivideByZero,
    /// Modulo with a zero divisor.
    ModuloByZero,
    /// Logarithm of a value that is not strictly positive.
    NonPositiveArgument,
    /// Logarithm base that is not positive, or exactly `1`.
    InvalidLogBase,
}

impl fmt::Display for DomainErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::DivideByZero => "Division by zero",
            Self::ModuloByZero => "Modulo by zero",
            Self::NonPositiveArgument => "Logarithm argument must be greater than 0",
            Self::InvalidLogBase => "Logarithm base must be positive and not equal to 1",
        };
        f.write_str(text)
    }
}

/// An operator precondition violated where a single authoritative answer is
/// required.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("{kind} (operator '{operator}', found {value}).")]
pub struct DomainError {
    /// Which precondition failed.
    pub kind:     DomainErrorKind,
    /// Name of the operator or function whose precondition failed.
    pub operator: &'static str,
    /// The offending operand: the divisor, the logarithm argument or base.
    pub value:    f64,
}

impl DomainError {
    /// Creates a domain error for `operator` rejecting `value`.
    #[must_use]
    pub const fn new(kind: DomainErrorKind, operator: &'static str, value: f64) -> Self {
        Self { kind,
               operator,
               value }
    }
}

/// A failure raised while walking the AST.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    /// A precondition was violated while evaluating over a scalar.
    #[error("{error}")]
    Domain {
        /// The violated precondition.
        error: DomainError,
        /// The node that raised it.
        span:  Span,
    },
    /// Two vectors of different lengths were combined.
    #[error("Cannot apply '{operator}' to vectors of different lengths: {left} vs {right}.")]
    ShapeMismatch {
        /// The operator being applied.
        operator: BinaryOperator,
        /// Length of the left operand.
        left:     usize,
        /// Length of the right operand.
        right:    usize,
        /// The node that raised it.
        span:     Span,
    },
}

impl EvalError {
    /// Machine-readable classification.
    #[must_use]
    pub const fn kind(&self) -> super::ErrorKind {
        match self {
            Self::Domain { .. } => super::ErrorKind::Domain,
            Self::ShapeMismatch { .. } => super::ErrorKind::ShapeMismatch,
        }
    }

    /// The operator or function involved in the failure.
    #[must_use]
    pub const fn operator_or_function(&self) -> &'static str {
        match self {
            Self::Domain { error, .. } => error.operator,
            Self::ShapeMismatch { operator, .. } => operator.symbol(),
        }
    }

    /// The AST node that raised the failure.
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::Domain { span, .. } | Self::ShapeMismatch { span, .. } => *span,
        }
    }
}

/// A non-fatal precondition violation collected during vector evaluation.
///
/// Affected elements are `NaN` in the result; the warning summarizes how
/// many elements were affected and the first input that violated the
/// precondition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DomainWarning {
    /// Which precondition failed.
    pub kind:        DomainErrorKind,
    /// Name of the operator or function whose precondition failed.
    pub operator:    &'static str,
    /// Number of affected elements.
    pub count:       usize,
    /// The first offending operand, in element order.
    pub first_value: f64,
    /// The AST node whose precondition failed.
    pub span:        Span,
}

impl fmt::Display for DomainWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plural = if self.count == 1 { "" } else { "s" };
        write!(f,
               "{} (operator '{}', {} element{plural} set to NaN, first offending value {}).",
               self.kind, self.operator, self.count, self.first_value)
    }
}
