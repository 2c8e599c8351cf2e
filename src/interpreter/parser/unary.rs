use std::iter::Peekable;

use crate::{
    ast::{Expr, FunctionId, Span, UnaryOperator},
    error::SyntaxError,
    interpreter::{
        lexer::Token,
        parser::{
            binary::parse_power,
            core::{ParseResult, parse_expression},
            utils::{END_OF_INPUT, expect_closing_paren, expect_open_paren},
        },
    },
    util::stack::ensure_sufficient_stack,
};

/// Parses a unary expression.
///
/// Negation is right-associative, so `--x` is parsed as `-(-x)`. It binds
/// looser than `**`: the operand of `-` is itself a unary expression, which
/// ends in a power expression.
///
/// Grammar:
/// ```text
///     unary := "-" unary
///            | power
/// ```
pub(crate) fn parse_unary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Span)>
{
    if let Some((Token::Minus, span)) = tokens.peek() {
        let span = *span;
        tokens.next();
        let operand = ensure_sufficient_stack(|| parse_unary(tokens))?;
        Ok(Expr::UnaryOp { op: UnaryOperator::Negate,
                           operand: Box::new(operand),
                           span })
    } else {
        parse_power(tokens)
    }
}

/// Parses a primary (atomic) expression.
///
/// Primary expressions form the base of the expression grammar:
/// - numeric literals
/// - the variable `x`
/// - calls of whitelisted functions
/// - parenthesized expressions
///
/// Grammar:
/// ```text
///     primary := number
///              | "x"
///              | function "(" expression ")"
///              | "(" expression ")"
/// ```
///
/// # Errors
/// - `UnexpectedEnd` when no token is left.
/// - `UnknownIdentifier` for any name other than `x` or a function.
/// - `UnexpectedToken` for operators, commas and `)` in operand position.
pub(crate) fn parse_primary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Span)>
{
    match tokens.next() {
        Some((Token::Number(value), span)) => Ok(Expr::Literal { value: *value,
                                                                 span:  *span, }),
        Some((Token::Identifier(name), span)) => parse_identifier_or_function(tokens, name, *span),
        Some((Token::LParen, span)) => parse_grouping(tokens, *span),
        Some((tok, span)) => Err(SyntaxError::unexpected_token(tok, *span)),
        None => Err(SyntaxError::unexpected_end(END_OF_INPUT)),
    }
}

/// Resolves an identifier into the variable or a function call.
///
/// `x` is the variable unless it is followed by `(`, in which case it is
/// being called and is rejected as an unknown function. Every other name
/// must be a whitelisted function (matched ignoring ASCII case).
fn parse_identifier_or_function<'a, I>(tokens: &mut Peekable<I>,
                                       name: &str,
                                       span: Span)
                                       -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Span)>
{
    if name == "x" {
        if let Some((Token::LParen, _)) = tokens.peek() {
            return Err(SyntaxError::unknown_identifier(name, span));
        }
        return Ok(Expr::Variable { span });
    }

    let function =
        FunctionId::lookup(name).ok_or_else(|| SyntaxError::unknown_identifier(name, span))?;

    let open = expect_open_paren(tokens)?;
    let argument = parse_expression(tokens)?;
    expect_closing_paren(tokens, open)?;

    Ok(Expr::Call { function,
                    argument: Box::new(argument),
                    span })
}

/// Parses a parenthesized expression; the `(` at `open` is already consumed.
fn parse_grouping<'a, I>(tokens: &mut Peekable<I>, open: Span) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Span)>
{
    let expr = parse_expression(tokens)?;
    expect_closing_paren(tokens, open)?;
    Ok(expr)
}
