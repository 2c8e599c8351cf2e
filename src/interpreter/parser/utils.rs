use std::iter::Peekable;

use crate::{
    ast::Span,
    error::SyntaxError,
    interpreter::{lexer::Token, parser::core::ParseResult},
};

/// Placeholder position for errors raised at the end of the token stream.
///
/// The recursive parsers only see an iterator, so they cannot know where the
/// formula ends; [`parse`](super::core::parse) replaces the placeholder.
pub(in crate::interpreter::parser) const END_OF_INPUT: usize = usize::MAX;

/// Consumes the `(` that must follow a function name.
///
/// # Returns
/// The span of the opening parenthesis.
///
/// # Errors
/// - `UnexpectedEnd` if the formula stops after the name.
/// - `UnexpectedToken` if anything else follows the name.
pub(in crate::interpreter::parser) fn expect_open_paren<'a, I>(tokens: &mut Peekable<I>)
                                                               -> ParseResult<Span>
    where I: Iterator<Item = &'a (Token, Span)>
{
    match tokens.next() {
        Some((Token::LParen, span)) => Ok(*span),
        Some((tok, span)) => Err(SyntaxError::unexpected_token(tok, *span)),
        None => Err(SyntaxError::unexpected_end(END_OF_INPUT)),
    }
}

/// Consumes the `)` closing the group opened at `open`.
///
/// # Errors
/// - `MismatchedParen`, pointing at `open`, if the formula ends first.
/// - `UnexpectedToken` if another token sits where `)` belongs, such as the
///   comma of a second function argument.
pub(in crate::interpreter::parser) fn expect_closing_paren<'a, I>(tokens: &mut Peekable<I>,
                                                                  open: Span)
                                                                  -> ParseResult<()>
    where I: Iterator<Item = &'a (Token, Span)>
{
    match tokens.next() {
        Some((Token::RParen, _)) => Ok(()),
        Some((tok, span)) => Err(SyntaxError::unexpected_token(tok, *span)),
        None => Err(SyntaxError::mismatched_paren(open, None)),
    }
}
