use thiserror::Error;

use crate::ast::Span;

/// An unrecognized character in the formula text.
///
/// Always fatal to the call; no tokens are produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Unrecognized character '{character}' at position {position}.")]
pub struct LexError {
    /// Byte offset of the character.
    pub position:  usize,
    /// The character that does not start any token.
    pub character: char,
}

impl LexError {
    /// Location of the offending character.
    #[must_use]
    pub const fn span(&self) -> Span {
        Span::new(self.position, self.position + self.character.len_utf8())
    }
}

/// The structural problem a [`SyntaxError`] reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyntaxErrorKind {
    /// A token appeared where the grammar does not allow it.
    UnexpectedToken,
    /// The formula ended while an operand or `)` was still required.
    UnexpectedEnd,
    /// A `(` was never closed, or a `)` has no matching `(`.
    MismatchedParen,
    /// A name that is neither `x` nor a whitelisted function.
    UnknownIdentifier,
}

/// A malformed formula.
///
/// Carries the kind of violation, where it happened and, when there is one,
/// the offending token or identifier text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", describe(.kind, .found.as_deref(), .span))]
pub struct SyntaxError {
    /// What went wrong.
    pub kind:  SyntaxErrorKind,
    /// Where it went wrong.
    pub span:  Span,
    /// Text of the offending token or identifier, if any.
    pub found: Option<String>,
}

impl SyntaxError {
    /// A token the grammar does not allow at this point.
    #[must_use]
    pub fn unexpected_token(found: impl ToString, span: Span) -> Self {
        Self { kind: SyntaxErrorKind::UnexpectedToken,
               span,
               found: Some(found.to_string()) }
    }

    /// The input ended early; `position` is the end of the last token.
    #[must_use]
    pub const fn unexpected_end(position: usize) -> Self {
        Self { kind:  SyntaxErrorKind::UnexpectedEnd,
               span:  Span::new(position, position),
               found: None, }
    }

    /// An unbalanced parenthesis at `span`.
    ///
    /// `found` is the stray `)` when there is one; `None` means the `(` at
    /// `span` is never closed.
    #[must_use]
    pub fn mismatched_paren(span: Span, found: Option<String>) -> Self {
        Self { kind: SyntaxErrorKind::MismatchedParen,
               span,
               found }
    }

    /// A name outside of the variable and the function whitelist.
    #[must_use]
    pub fn unknown_identifier(name: &str, span: Span) -> Self {
        Self { kind: SyntaxErrorKind::UnknownIdentifier,
               span,
               found: Some(name.to_string()) }
    }

    /// The unknown identifier, when this is an `UnknownIdentifier` error.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self.kind {
            SyntaxErrorKind::UnknownIdentifier => self.found.as_deref(),
            _ => None,
        }
    }
}

fn describe(kind: &SyntaxErrorKind, found: Option<&str>, span: &Span) -> String {
    let position = span.start;
    match (*kind, found) {
        (SyntaxErrorKind::UnexpectedToken, Some(token)) => {
            format!("Unexpected token '{token}' at position {position}.")
        },
        (SyntaxErrorKind::UnexpectedToken, None) => {
            format!("Unexpected token at position {position}.")
        },
        (SyntaxErrorKind::UnexpectedEnd, _) => {
            format!("Unexpected end of formula at position {position}.")
        },
        (SyntaxErrorKind::MismatchedParen, Some(token)) => format!(
            "Unbalanced parenthesis at position {position}: '{token}' has no matching '('."
        ),
        (SyntaxErrorKind::MismatchedParen, None) => {
            format!("Parenthesis opened at position {position} is never closed.")
        },
        (SyntaxErrorKind::UnknownIdentifier, name) => format!(
            "Unknown identifier '{}' at position {position}. Use x or one of: sin, cos, tan, log, exp.",
            name.unwrap_or_default()
        ),
    }
}
