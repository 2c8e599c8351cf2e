/// Core evaluation logic and context management.
///
/// Contains the environment binding `x`, the per-call evaluation context,
/// the domain policy selected by the environment's shape, and the main AST
/// walk.
pub mod core;

/// Binary operator evaluation.
///
/// Combines scalar and vector operands elementwise, validating every element
/// pair before computing it.
pub mod binary;

/// Unary operator evaluation.
///
/// Implements arithmetic negation, which never fails.
pub mod unary;

/// Function call evaluation.
///
/// Applies the whitelisted functions elementwise, checking the logarithm's
/// domain.
pub mod function;

/// Utility functions for the evaluator.
///
/// Collects non-fatal domain warnings and merges the warnings of
/// independently evaluated chunks.
pub mod utils;
