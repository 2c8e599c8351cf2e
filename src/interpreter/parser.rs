/// Parser entry points.
///
/// Turns a token slice into a single expression, requiring the whole
/// stream to be consumed, and resolves end-of-input positions.
pub mod core;

/// Prefix operators and atoms.
///
/// Handles negation, literals, the variable `x`, whitelisted function calls
/// and parenthesized groups.
pub mod unary;

/// Binary operator precedence levels.
///
/// Implements the additive, multiplicative and exponent levels of the
/// grammar, including the right-associativity of `**`.
pub mod binary;

/// Shared parsing helpers.
pub mod utils;
