//! # plotcalc
//!
//! plotcalc is a sandboxed mathematical expression engine written in Rust.
//! It tokenizes, parses and evaluates formulas in one variable `x`, either
//! at a single point with strict domain checking, or over a whole domain of
//! samples for plotting, where domain violations blank out single points
//! instead of failing the curve.
//!
//! Only a closed grammar is accepted: numbers, `x`, `+ - * / % **`, unary
//! minus, parentheses and the functions `sin cos tan log exp`. No input ever
//! reaches a host evaluator.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

/// Defines the structure of parsed formulas.
///
/// This module declares the `Expr` enum and related types that represent the
/// syntactic structure of a formula as a tree. The AST is built by the parser
/// and traversed by the evaluator.
///
/// # Responsibilities
/// - Defines the node types, operators and the function whitelist.
/// - Attaches byte spans to nodes for error reporting.
/// - Renders a tree back to canonical formula text.
pub mod ast;
/// The two-operand calculator.
///
/// Exposes the calculator's operations, including the logarithm with an
/// explicit base, and evaluates them with every precondition fatal.
pub mod calculator;
/// Provides unified error types for lexing, parsing and evaluation.
///
/// This module defines all errors that can be raised while turning formula
/// text into numbers. Every failure belongs to one class of a closed
/// taxonomy and can be flattened into a [`error::Report`] for display.
///
/// # Responsibilities
/// - Defines error types for all failure modes (lexer, parser, evaluator).
/// - Attaches source spans and offending values for context.
/// - Describes the non-fatal warnings produced while plotting.
pub mod error;
/// Parse-once, evaluate-many formulas and the plotting entry points.
///
/// Ties the lexer, parser and evaluator together and splits large domains
/// across the rayon thread pool.
pub mod formula;
/// Orchestrates the phases of formula evaluation.
///
/// This module contains the lexer, the parser, the evaluator, the operator
/// validator and the runtime value representation.
pub mod interpreter;
/// General utilities shared across phases.
///
/// # Responsibilities
/// - Grow the stack for deeply nested formulas.
/// - Build evenly spaced sample domains.
pub mod util;

pub use calculator::{BinaryOpSymbol, evaluate_scalar_binary};
pub use error::{EngineError, ErrorKind, Report};
pub use formula::{Curve, EvalOptions, Formula, evaluate_formula, evaluate_formula_at, parse_formula};
pub use util::sampling::linspace;
