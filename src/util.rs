/// Stack growth for deep recursion.
///
/// The parser and the evaluator both recurse once per nesting level of the
/// formula. Wrapping the recursive step keeps pathological input such as a
/// thousand nested parentheses from overflowing the thread's stack.
pub mod stack;
/// Domain sampling helpers.
///
/// Builds the evenly spaced `x` values a curve is evaluated over.
pub mod sampling;
