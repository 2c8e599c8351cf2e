use crate::{
    ast::{FunctionId, Span},
    interpreter::{
        evaluator::core::{Context, EvalResult},
        validator::validate_ln,
        value::NumericValue,
    },
};

impl Context<'_> {
    /// Evaluates a call of a whitelisted function.
    ///
    /// The function is applied to every element of the argument. `sin`,
    /// `cos`, `tan` and `exp` accept any input. `log` is the natural
    /// logarithm and rejects input that is not strictly positive: fatal in
    /// strict mode, `NaN` plus a warning in lenient mode.
    ///
    /// # Parameters
    /// - `function`: Function to apply.
    /// - `argument`: The evaluated argument.
    /// - `span`: Location of the call, for error reporting.
    ///
    /// # Example
    /// ```
    /// use plotcalc::{
    ///     ast::{FunctionId, Span},
    ///     interpreter::{
    ///         evaluator::core::{Context, Environment},
    ///         value::NumericValue,
    ///     },
    /// };
    ///
    /// let env = Environment::vector(vec![1.0, 0.0]);
    /// let mut ctx = Context::new(&env);
    ///
    /// let v = ctx.eval_call(FunctionId::Log,
    ///                       NumericValue::Vector(vec![1.0, 0.0]),
    ///                       Span::default())
    ///            .unwrap();
    /// let values = v.as_slice().unwrap();
    /// assert_eq!(values[0], 0.0);
    /// assert!(values[1].is_nan());
    /// ```
    pub fn eval_call(&mut self,
                     function: FunctionId,
                     argument: NumericValue,
                     span: Span)
                     -> EvalResult<NumericValue> {
        match argument {
            NumericValue::Scalar(v) => {
                let width = self.broadcast_width();
                Ok(NumericValue::Scalar(self.apply_function(function, v, span, width)?))
            },
            NumericValue::Vector(values) => {
                let out = values.into_iter()
                                .map(|v| self.apply_function(function, v, span, 1))
                                .collect::<EvalResult<Vec<_>>>()?;
                Ok(NumericValue::Vector(out))
            },
        }
    }

    fn apply_function(&mut self,
                      function: FunctionId,
                      value: f64,
                      span: Span,
                      count: usize)
                      -> EvalResult<f64> {
        match function {
            FunctionId::Sin => Ok(value.sin()),
            FunctionId::Cos => Ok(value.cos()),
            FunctionId::Tan => Ok(value.tan()),
            FunctionId::Exp => Ok(value.exp()),
            FunctionId::Log => match validate_ln(value) {
                Ok(()) => Ok(value.ln()),
                Err(error) => self.violation(error, span, count),
            },
        }
    }
}
