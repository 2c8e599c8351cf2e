/// Tokenizer and parser errors.
///
/// Defines the errors detected before evaluation: unrecognized characters
/// and malformed formulas (unbalanced parentheses, unknown identifiers,
/// missing or trailing tokens).
pub mod parse_error;
/// Evaluation errors and warnings.
///
/// Contains the operator precondition errors raised in scalar mode, the
/// shape mismatch raised when vectors of different lengths meet, and the
/// non-fatal warnings collected during vector evaluation.
pub mod runtime_error;
/// Conversion of any failure into a uniform, renderable record.
pub mod report;

use thiserror::Error;

pub use parse_error::{LexError, SyntaxError, SyntaxErrorKind};
pub use report::Report;
pub use runtime_error::{DomainError, DomainErrorKind, DomainWarning, EvalError};

/// The closed failure taxonomy. Every failure belongs to exactly one kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Unrecognized character in the input.
    Lex,
    /// Malformed formula.
    Syntax,
    /// Operator precondition violated in scalar mode.
    Domain,
    /// Elementwise precondition violated in vector mode; non-fatal.
    DomainWarning,
    /// Vector operands of differing length combined.
    ShapeMismatch,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Lex => "lex error",
            Self::Syntax => "syntax error",
            Self::Domain => "domain error",
            Self::DomainWarning => "domain warning",
            Self::ShapeMismatch => "shape mismatch",
        };
        f.write_str(name)
    }
}

/// Any fatal failure of the formula pipeline.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// The tokenizer rejected a character.
    #[error(transparent)]
    Lex(#[from] LexError),
    /// The parser rejected the token stream.
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    /// A two-operand calculation violated a precondition.
    #[error(transparent)]
    Domain(#[from] DomainError),
    /// Evaluation of the AST failed.
    #[error(transparent)]
    Eval(#[from] EvalError),
}

impl EngineError {
    /// Machine-readable classification.
    ///
    /// # Example
    /// ```
    /// use plotcalc::{error::ErrorKind, evaluate_formula_at};
    ///
    /// let err = evaluate_formula_at("1 / x", 0.0).unwrap_err();
    /// assert_eq!(err.kind(), ErrorKind::Domain);
    /// ```
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Lex(_) => ErrorKind::Lex,
            Self::Syntax(_) => ErrorKind::Syntax,
            Self::Domain(_) => ErrorKind::Domain,
            Self::Eval(e) => e.kind(),
        }
    }

    /// The domain precondition that failed, if this is a domain failure.
    #[must_use]
    pub const fn domain_error(&self) -> Option<&DomainError> {
        match self {
            Self::Domain(error) | Self::Eval(EvalError::Domain { error, .. }) => Some(error),
            _ => None,
        }
    }

    /// Converts the error into a uniform report.
    #[must_use]
    pub fn report(&self) -> Report {
        Report::from(self)
    }
}
