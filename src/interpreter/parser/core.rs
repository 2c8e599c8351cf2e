use std::iter::Peekable;

use crate::{
    ast::{Expr, Span},
    error::{SyntaxError, SyntaxErrorKind},
    interpreter::{
        lexer::Token,
        parser::{binary::parse_additive, utils::END_OF_INPUT},
    },
    util::stack::ensure_sufficient_stack,
};

pub type ParseResult<T> = Result<T, SyntaxError>;

/// Parses a complete token stream into one expression.
///
/// The whole stream must be consumed: a stray `)` after a complete
/// expression is reported as an unbalanced parenthesis, any other leftover
/// token as unexpected.
///
/// # Errors
/// Returns a [`SyntaxError`] describing the first structural violation or
/// unknown identifier.
///
/// # Example
/// ```
/// use plotcalc::{
///     error::SyntaxErrorKind,
///     interpreter::{lexer::tokenize, parser::core::parse},
/// };
///
/// let tokens = tokenize("2 ** 3 ** 2").unwrap();
/// assert_eq!(parse(&tokens).unwrap().to_string(), "2**3**2");
///
/// let tokens = tokenize("x)").unwrap();
/// assert_eq!(parse(&tokens).unwrap_err().kind, SyntaxErrorKind::MismatchedParen);
/// ```
pub fn parse(tokens: &[(Token, Span)]) -> ParseResult<Expr> {
    let end = tokens.last().map_or(0, |(_, span)| span.end);
    let mut iter = tokens.iter().peekable();

    let expr = parse_expression(&mut iter).map_err(|e| resolve_end(e, end))?;

    match iter.next() {
        None => Ok(expr),
        Some((Token::RParen, span)) => {
            Err(SyntaxError::mismatched_paren(*span, Some(Token::RParen.to_string())))
        },
        Some((tok, span)) => Err(SyntaxError::unexpected_token(tok, *span)),
    }
}

/// Parses a full expression.
///
/// This is the entry point for expression parsing. It begins at the
/// lowest-precedence level, addition, and recursively descends through the
/// precedence hierarchy.
///
/// Grammar: `expression := additive`
///
/// Every nested group and call re-enters here, so this is where the stack
/// is grown for deeply parenthesized input.
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Span)>
{
    ensure_sufficient_stack(|| parse_additive(tokens))
}

/// Replaces the end-of-input placeholder with the real end of the formula.
fn resolve_end(mut error: SyntaxError, end: usize) -> SyntaxError {
    if error.kind == SyntaxErrorKind::UnexpectedEnd && error.span.start == END_OF_INPUT {
        error.span = Span::new(end, end);
    }
    error
}
