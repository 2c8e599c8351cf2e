use crate::{
    ast::{Expr, Span},
    error::{DomainError, DomainWarning, EvalError},
    interpreter::{evaluator::utils::WarningLog, value::NumericValue},
    util::stack::ensure_sufficient_stack,
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or an
/// [`EvalError`] describing the failure.
pub type EvalResult<T> = Result<T, EvalError>;

/// How operator precondition violations are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DomainPolicy {
    /// A violation aborts the evaluation with [`EvalError::Domain`].
    Strict,
    /// A violation turns the affected element into `NaN` and is recorded as
    /// a [`DomainWarning`].
    Lenient,
}

/// The binding of the variable `x` for one evaluation.
///
/// Binding a scalar selects calculator mode, binding a vector selects
/// plotting mode; see [`Environment::policy`].
#[derive(Debug, Clone, PartialEq)]
pub struct Environment {
    x: NumericValue,
}

impl Environment {
    /// Binds `x` to a single number.
    #[must_use]
    pub const fn scalar(x: f64) -> Self {
        Self { x: NumericValue::Scalar(x) }
    }

    /// Binds `x` to a sequence of domain points.
    #[must_use]
    pub fn vector(x: impl Into<Vec<f64>>) -> Self {
        Self { x: NumericValue::Vector(x.into()) }
    }

    /// The value bound to `x`.
    #[must_use]
    pub const fn x(&self) -> &NumericValue {
        &self.x
    }

    /// The domain policy implied by the shape of `x`.
    ///
    /// A scalar binding needs one authoritative answer, so violations are
    /// fatal. A vector binding describes a curve, so violations only blank
    /// out the affected points.
    #[must_use]
    pub const fn policy(&self) -> DomainPolicy {
        match self.x {
            NumericValue::Scalar(_) => DomainPolicy::Strict,
            NumericValue::Vector(_) => DomainPolicy::Lenient,
        }
    }
}

impl From<NumericValue> for Environment {
    fn from(x: NumericValue) -> Self {
        Self { x }
    }
}

/// The outcome of a successful evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    /// The computed value, shaped like the environment's binding unless the
    /// formula does not use `x`.
    pub value:    NumericValue,
    /// Non-fatal violations met on the way; always empty in strict mode.
    pub warnings: Vec<DomainWarning>,
}

/// Stores the state of one evaluation.
///
/// A `Context` is created per call and dropped when the call returns; it
/// borrows the environment and owns the warnings collected so far.
pub struct Context<'env> {
    env:      &'env Environment,
    policy:   DomainPolicy,
    warnings: WarningLog,
}

impl<'env> Context<'env> {
    /// Creates a context evaluating against `env`, with the policy the
    /// environment implies.
    #[must_use]
    pub fn new(env: &'env Environment) -> Self {
        Self::with_policy(env, env.policy())
    }

    /// Creates a context with an explicit domain policy.
    #[must_use]
    pub fn with_policy(env: &'env Environment, policy: DomainPolicy) -> Self {
        Self { env,
               policy,
               warnings: WarningLog::default() }
    }

    /// The active domain policy.
    #[must_use]
    pub const fn policy(&self) -> DomainPolicy {
        self.policy
    }

    /// Evaluates an expression and returns the resulting value.
    ///
    /// This is the main entry point of the AST walk. Children are evaluated
    /// first; literals stay scalar and are broadcast when they meet a vector.
    ///
    /// # Example
    /// ```
    /// use plotcalc::{
    ///     interpreter::{
    ///         evaluator::core::{Context, Environment},
    ///         value::NumericValue,
    ///     },
    ///     parse_formula,
    /// };
    ///
    /// let ast = parse_formula("x * 2 + 1").unwrap();
    /// let env = Environment::vector(vec![0.0, 1.0]);
    /// let mut ctx = Context::new(&env);
    ///
    /// assert_eq!(ctx.eval(&ast).unwrap(), NumericValue::Vector(vec![1.0, 3.0]));
    /// ```
    pub fn eval(&mut self, expr: &Expr) -> EvalResult<NumericValue> {
        ensure_sufficient_stack(|| match expr {
            Expr::Literal { value, .. } => Ok(NumericValue::Scalar(*value)),
            Expr::Variable { .. } => Ok(self.env.x().clone()),
            Expr::UnaryOp { op, operand, .. } => {
                let value = self.eval(operand)?;
                Ok(Self::eval_unary(*op, value))
            },
            Expr::BinaryOp { left,
                             op,
                             right,
                             span, } => {
                let left = self.eval(left)?;
                let right = self.eval(right)?;
                self.eval_binary(*op, left, right, *span)
            },
            Expr::Call { function,
                         argument,
                         span, } => {
                let value = self.eval(argument)?;
                self.eval_call(*function, value, *span)
            },
        })
    }

    /// Consumes the context and returns the warnings it collected.
    #[must_use]
    pub fn into_warnings(self) -> Vec<DomainWarning> {
        self.warnings.into_vec()
    }

    /// Handles a violated precondition according to the policy.
    ///
    /// `count` is the number of result elements the violation affects: one
    /// for an element of a vector, the whole domain for a scalar
    /// sub-result that will be broadcast.
    ///
    /// # Returns
    /// `NaN` in lenient mode; the element it replaces is undefined.
    ///
    /// # Errors
    /// [`EvalError::Domain`] in strict mode.
    pub(crate) fn violation(&mut self,
                            error: DomainError,
                            span: Span,
                            count: usize)
                            -> EvalResult<f64> {
        match self.policy {
            DomainPolicy::Strict => Err(EvalError::Domain { error, span }),
            DomainPolicy::Lenient => {
                self.warnings.record(&error, span, count);
                Ok(f64::NAN)
            },
        }
    }

    /// Number of result elements a scalar sub-result stands for.
    pub(crate) fn broadcast_width(&self) -> usize {
        self.env.x().width()
    }
}

/// Evaluates a parsed formula against an environment.
///
/// The policy follows the environment: strict for a scalar `x`, lenient for
/// a vector `x`.
///
/// # Errors
/// - [`EvalError::Domain`] for a violated precondition in strict mode.
/// - [`EvalError::ShapeMismatch`] if vectors of different lengths meet.
///
/// # Example
/// ```
/// use plotcalc::{
///     interpreter::{
///         evaluator::core::{Environment, evaluate},
///         value::NumericValue,
///     },
///     parse_formula,
/// };
///
/// let ast = parse_formula("1 / x").unwrap();
///
/// assert!(evaluate(&ast, &Environment::scalar(0.0)).is_err());
/// assert!(evaluate(&ast, &Environment::scalar(4.0)).unwrap().value.is_scalar());
///
/// let out = evaluate(&ast, &Environment::vector(vec![0.0, 2.0])).unwrap();
/// let values = out.value.as_slice().unwrap();
/// assert!(values[0].is_nan());
/// assert_eq!(values[1], 0.5);
/// assert_eq!(out.warnings[0].count, 1);
/// ```
pub fn evaluate(ast: &Expr, env: &Environment) -> EvalResult<Evaluation> {
    let mut context = Context::new(env);
    let value = context.eval(ast)?;
    let warnings = context.into_warnings();

    tracing::trace!(policy = ?env.policy(), warnings = warnings.len(), "evaluated formula");
    Ok(Evaluation { value, warnings })
}
