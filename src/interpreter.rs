/// The evaluator module walks the AST and computes results.
///
/// The evaluator evaluates every node over the value bound to `x`, combines
/// scalars and vectors elementwise and applies the domain policy: violations
/// are fatal for a scalar binding and become `NaN` plus a warning for a
/// vector binding.
///
/// # Responsibilities
/// - Evaluates literals, the variable, negation, binary operators and calls.
/// - Broadcasts scalars against vectors and rejects vectors of unequal
///   length.
/// - Collects domain warnings and merges those of independently evaluated
///   chunks.
pub mod evaluator;
/// The lexer module tokenizes formula text for further parsing.
///
/// The lexer reads the raw formula and produces a stream of tokens, each
/// paired with its byte span. Whitespace is skipped; any other character
/// outside the token set is a lexical error.
///
/// # Responsibilities
/// - Recognizes numbers, identifiers, operators and delimiters.
/// - Reports the first unrecognized character with its position.
pub mod lexer;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// The parser is a recursive descent over the token stream with one
/// function per precedence level. It never evaluates anything.
///
/// # Responsibilities
/// - Converts tokens into [`crate::ast::Expr`] nodes.
/// - Enforces operator precedence and the right-associativity of `**`.
/// - Rejects unknown identifiers, unbalanced parentheses and stray tokens.
pub mod parser;
/// Operator precondition checks shared by the evaluator and the calculator.
///
/// Decides whether a single pair of operands is acceptable for an operator
/// and computes the result; it knows nothing about vectors or policies.
pub mod validator;
/// The value module defines the runtime data types for evaluation.
///
/// A value is either a scalar or a vector of samples, with helpers for
/// broadcasting and elementwise mapping.
pub mod value;
