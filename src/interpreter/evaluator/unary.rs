use crate::{
    ast::UnaryOperator,
    interpreter::{evaluator::core::Context, value::NumericValue},
};

impl Context<'_> {
    /// Evaluates a unary operation on a value.
    ///
    /// Negation is applied elementwise and never fails; `NaN` stays `NaN`.
    ///
    /// # Example
    /// ```
    /// use plotcalc::{
    ///     ast::UnaryOperator,
    ///     interpreter::{evaluator::core::Context, value::NumericValue},
    /// };
    ///
    /// let v = Context::eval_unary(UnaryOperator::Negate, NumericValue::Vector(vec![1.0, -2.0]));
    /// assert_eq!(v, NumericValue::Vector(vec![-1.0, 2.0]));
    /// ```
    #[must_use]
    pub fn eval_unary(op: UnaryOperator, value: NumericValue) -> NumericValue {
        match op {
            UnaryOperator::Negate => value.map(|v| -v),
        }
    }
}
