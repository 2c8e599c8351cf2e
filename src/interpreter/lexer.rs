use logos::Logos;

use crate::{ast::Span, error::LexError};

/// Represents a lexical token of a formula.
///
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// The end of input is not a token: the parser sees it as the exhausted
/// token stream.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(skip r"[ \t\n\r\f]+")]
pub enum Token {
    /// Numeric literal tokens, such as `3`, `3.14`, `2.` or `.5`.
    #[regex(r"[0-9]+(\.[0-9]*)?", parse_number)]
    #[regex(r"\.[0-9]+", parse_number)]
    Number(f64),
    /// Identifier tokens; the variable `x` or a function name such as `sin`.
    #[regex(r"[a-zA-Z]+", |lex| lex.slice().to_string())]
    Identifier(String),
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `**`
    #[token("**")]
    StarStar,
    /// `/`
    #[token("/")]
    Slash,
    /// `%`
    #[token("%")]
    Percent,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `,`
    #[token(",")]
    Comma,
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Identifier(name) => write!(f, "{name}"),
            Self::Plus => write!(f, "+"),
            Self::Minus => write!(f, "-"),
            Self::Star => write!(f, "*"),
            Self::StarStar => write!(f, "**"),
            Self::Slash => write!(f, "/"),
            Self::Percent => write!(f, "%"),
            Self::LParen => write!(f, "("),
            Self::RParen => write!(f, ")"),
            Self::Comma => write!(f, ","),
        }
    }
}

/// Splits a formula into tokens paired with their source spans.
///
/// Whitespace is skipped. The first character that cannot start a token
/// aborts tokenization.
///
/// # Errors
/// Returns a [`LexError`] carrying the byte offset and the character that
/// was not recognized.
///
/// # Example
/// ```
/// use plotcalc::interpreter::lexer::{Token, tokenize};
///
/// let tokens = tokenize("2 ** x").unwrap();
/// let kinds: Vec<_> = tokens.into_iter().map(|(token, _)| token).collect();
/// assert_eq!(kinds,
///            vec![Token::Number(2.0), Token::StarStar, Token::Identifier("x".into())]);
///
/// let err = tokenize("x # 2").unwrap_err();
/// assert_eq!((err.position, err.character), (2, '#'));
/// ```
pub fn tokenize(input: &str) -> Result<Vec<(Token, Span)>, LexError> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer(input);

    while let Some(token) = lexer.next() {
        let span = Span::from(lexer.span());
        if let Ok(tok) = token {
            tokens.push((tok, span));
        } else {
            let character = input[span.start..].chars().next().unwrap_or('\u{fffd}');
            return Err(LexError { position: span.start,
                                  character });
        }
    }

    tracing::trace!(count = tokens.len(), "tokenized formula");
    Ok(tokens)
}

/// Parses a numeric literal from the current token slice.
///
/// # Returns
/// - `Some(f64)`: The parsed value.
/// - `None`: If the slice is not a valid float.
fn parse_number(lex: &logos::Lexer<Token>) -> Option<f64> {
    lex.slice().parse().ok()
}
