use std::iter::Peekable;

use crate::{
    ast::{BinaryOperator, Expr, Span},
    interpreter::{
        lexer::Token,
        parser::{
            core::ParseResult,
            unary::{parse_primary, parse_unary},
        },
    },
};

/// Parses addition and subtraction expressions.
///
/// Handles left-associative binary operators: `+` and `-`.
///
/// The rule is: `additive := multiplicative (("+" | "-") multiplicative)*`
pub fn parse_additive<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Span)>
{
    let mut left = parse_multiplicative(tokens)?;
    while let Some((token, span)) = tokens.peek() {
        let op = match token_to_binary_operator(token) {
            Some(op @ (BinaryOperator::Add | BinaryOperator::Sub)) => op,
            _ => break,
        };
        let span = *span;
        tokens.next();

        let right = parse_multiplicative(tokens)?;
        left = Expr::BinaryOp { left: Box::new(left),
                                op,
                                right: Box::new(right),
                                span };
    }
    Ok(left)
}

/// Parses multiplication-level expressions.
///
/// Handles left-associative operators `*`, `/` and `%`. Operands are parsed
/// at the unary level, so `2 * -x` is accepted.
///
/// The rule is: `multiplicative := unary (("*" | "/" | "%") unary)*`
pub fn parse_multiplicative<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Span)>
{
    let mut left = parse_unary(tokens)?;
    while let Some((token, span)) = tokens.peek() {
        let op = match token_to_binary_operator(token) {
            Some(op @ (BinaryOperator::Mul | BinaryOperator::Div | BinaryOperator::Mod)) => op,
            _ => break,
        };
        let span = *span;
        tokens.next();

        let right = parse_unary(tokens)?;
        left = Expr::BinaryOp { left: Box::new(left),
                                op,
                                right: Box::new(right),
                                span };
    }
    Ok(left)
}

/// Parses exponentiation expressions.
///
/// `**` is right-associative: `a ** b ** c` parses as `a ** (b ** c)`. The
/// exponent is parsed at the unary level, which both gives the
/// right-associativity and admits a negated exponent such as `2 ** -1`. The
/// base is an atom, so `-a ** b` stays `-(a ** b)`.
///
/// The rule is: `power := primary ("**" unary)?`
pub fn parse_power<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Span)>
{
    let base = parse_primary(tokens)?;

    if let Some((Token::StarStar, span)) = tokens.peek() {
        let span = *span;
        tokens.next();

        let exponent = parse_unary(tokens)?;
        return Ok(Expr::BinaryOp { left: Box::new(base),
                                   op: BinaryOperator::Pow,
                                   right: Box::new(exponent),
                                   span });
    }

    Ok(base)
}

/// Maps a token to its corresponding binary operator.
///
/// # Returns
/// `Some(BinaryOperator)` if the token is `+`, `-`, `*`, `/`, `%` or `**`,
/// otherwise `None`.
///
/// # Example
/// ```
/// use plotcalc::{
///     ast::BinaryOperator,
///     interpreter::{lexer::Token, parser::binary::token_to_binary_operator},
/// };
///
/// assert_eq!(token_to_binary_operator(&Token::StarStar), Some(BinaryOperator::Pow));
/// assert_eq!(token_to_binary_operator(&Token::LParen), None);
/// ```
#[must_use]
pub const fn token_to_binary_operator(token: &Token) -> Option<BinaryOperator> {
    match token {
        Token::Plus => Some(BinaryOperator::Add),
        Token::Minus => Some(BinaryOperator::Sub),
        Token::Star => Some(BinaryOperator::Mul),
        Token::Slash => Some(BinaryOperator::Div),
        Token::Percent => Some(BinaryOperator::Mod),
        Token::StarStar => Some(BinaryOperator::Pow),
        _ => None,
    }
}
