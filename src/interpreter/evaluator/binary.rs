use crate::{
    ast::{BinaryOperator, Span},
    error::EvalError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        validator::{BinaryOpSymbol, apply_binary, validate_binary},
        value::NumericValue,
    },
};

impl Context<'_> {
    /// Evaluates a binary operation between two values.
    ///
    /// Scalars are combined directly. A scalar meeting a vector is
    /// broadcast. Two vectors are combined pairwise and must have the same
    /// length. Every pair of operands goes through the validator first; what
    /// happens on a violation depends on the context's policy.
    ///
    /// # Parameters
    /// - `op`: The operator.
    /// - `left`: Left operand.
    /// - `right`: Right operand.
    /// - `span`: Location of the operator, for error reporting.
    ///
    /// # Errors
    /// - [`EvalError::ShapeMismatch`] for vectors of different lengths.
    /// - [`EvalError::Domain`] for a violation in strict mode.
    ///
    /// # Example
    /// ```
    /// use plotcalc::{
    ///     ast::{BinaryOperator, Span},
    ///     interpreter::{
    ///         evaluator::core::{Context, Environment},
    ///         value::NumericValue,
    ///     },
    /// };
    ///
    /// let env = Environment::vector(vec![1.0, 2.0]);
    /// let mut ctx = Context::new(&env);
    ///
    /// let r = ctx.eval_binary(BinaryOperator::Sub,
    ///                         NumericValue::Scalar(10.0),
    ///                         NumericValue::Vector(vec![1.0, 2.0]),
    ///                         Span::default())
    ///            .unwrap();
    /// assert_eq!(r, NumericValue::Vector(vec![9.0, 8.0]));
    ///
    /// let err = ctx.eval_binary(BinaryOperator::Add,
    ///                           NumericValue::Vector(vec![1.0]),
    ///                           NumericValue::Vector(vec![1.0, 2.0]),
    ///                           Span::default());
    /// assert!(err.is_err());
    /// ```
    pub fn eval_binary(&mut self,
                       op: BinaryOperator,
                       left: NumericValue,
                       right: NumericValue,
                       span: Span)
                       -> EvalResult<NumericValue> {
        use NumericValue::{Scalar, Vector};

        let symbol = BinaryOpSymbol::from(op);

        match (left, right) {
            (Scalar(l), Scalar(r)) => {
                let width = self.broadcast_width();
                Ok(Scalar(self.eval_pair(symbol, l, r, span, width)?))
            },
            (Vector(larr), Scalar(r)) => {
                let out = larr.into_iter()
                              .map(|l| self.eval_pair(symbol, l, r, span, 1))
                              .collect::<EvalResult<Vec<_>>>()?;
                Ok(Vector(out))
            },
            (Scalar(l), Vector(rarr)) => {
                let out = rarr.into_iter()
                              .map(|r| self.eval_pair(symbol, l, r, span, 1))
                              .collect::<EvalResult<Vec<_>>>()?;
                Ok(Vector(out))
            },
            (Vector(larr), Vector(rarr)) => {
                if larr.len() != rarr.len() {
                    return Err(EvalError::ShapeMismatch { operator: op,
                                                          left: larr.len(),
                                                          right: rarr.len(),
                                                          span });
                }

                let out = larr.into_iter()
                              .zip(rarr)
                              .map(|(l, r)| self.eval_pair(symbol, l, r, span, 1))
                              .collect::<EvalResult<Vec<_>>>()?;
                Ok(Vector(out))
            },
        }
    }

    /// Validates and computes one pair of operands.
    ///
    /// `count` is how many result elements this pair stands for.
    fn eval_pair(&mut self,
                 op: BinaryOpSymbol,
                 left: f64,
                 right: f64,
                 span: Span,
                 count: usize)
                 -> EvalResult<f64> {
        match validate_binary(op, left, right) {
            Ok(()) => Ok(apply_binary(op, left, right)),
            Err(error) => self.violation(error, span, count),
        }
    }
}
