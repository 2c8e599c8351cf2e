use std::{fmt, str::FromStr};

use rayon::prelude::*;

use crate::{
    ast::Expr,
    error::{DomainWarning, EngineError},
    interpreter::{
        evaluator::{
            core::{Environment, Evaluation, evaluate},
            utils::merge_warnings,
        },
        lexer::tokenize,
        parser::core::parse,
    },
};

/// Domains shorter than this are never split.
pub const DEFAULT_CHUNK_SIZE: usize = 256;

/// Tunes how a formula is evaluated over a domain.
///
/// The options only affect speed: parallel and sequential evaluation return
/// identical values and warnings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvalOptions {
    /// Split large domains into chunks evaluated on the rayon thread pool.
    pub parallel:   bool,
    /// Number of domain points per chunk. Zero is treated as one.
    pub chunk_size: usize,
}

impl Default for EvalOptions {
    fn default() -> Self {
        Self { parallel:   true,
               chunk_size: DEFAULT_CHUNK_SIZE, }
    }
}

impl EvalOptions {
    /// Options that evaluate the whole domain on the calling thread.
    #[must_use]
    pub fn sequential() -> Self {
        Self { parallel: false,
               ..Self::default() }
    }
}

/// The result of evaluating a formula over a domain.
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    values:   Vec<f64>,
    warnings: Vec<DomainWarning>,
}

impl Curve {
    /// One value per domain point; `NaN` where a precondition failed.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Non-fatal violations, in source order of the offending nodes.
    #[must_use]
    pub fn warnings(&self) -> &[DomainWarning] {
        &self.warnings
    }

    /// Returns `true` if any point was blanked out.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Consumes the curve, keeping only the values.
    #[must_use]
    pub fn into_values(self) -> Vec<f64> {
        self.values
    }
}

/// A parsed formula in the variable `x`, ready to be evaluated many times.
///
/// # Example
/// ```
/// use plotcalc::Formula;
///
/// let f: Formula = "SIN( x )*2 + 1".parse().unwrap();
/// assert_eq!(f.to_string(), "sin(x) * 2 + 1");
/// assert_eq!(f.eval_at(0.0).unwrap(), 1.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Formula {
    source: String,
    ast:    Expr,
}

impl Formula {
    /// Tokenizes and parses `source`.
    ///
    /// # Errors
    /// [`EngineError::Lex`] or [`EngineError::Syntax`].
    pub fn parse(source: &str) -> Result<Self, EngineError> {
        Ok(Self { source: source.to_string(),
                  ast:    parse_formula(source)?, })
    }

    /// The text the formula was parsed from.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The parsed tree.
    #[must_use]
    pub const fn ast(&self) -> &Expr {
        &self.ast
    }

    /// Evaluates the formula at a single point.
    ///
    /// Violations are fatal, since there is only one answer to give.
    ///
    /// # Errors
    /// [`EngineError::Eval`] wrapping the violated precondition.
    pub fn eval_at(&self, x: f64) -> Result<f64, EngineError> {
        let evaluation = evaluate(&self.ast, &Environment::scalar(x))?;
        Ok(evaluation.value.as_scalar().unwrap_or(f64::NAN))
    }

    /// Evaluates the formula over `domain` with the default options.
    ///
    /// # Errors
    /// See [`Formula::eval_over_with`].
    pub fn eval_over(&self, domain: &[f64]) -> Result<Curve, EngineError> {
        self.eval_over_with(domain, EvalOptions::default())
    }

    /// Evaluates the formula over `domain`.
    ///
    /// Violations only blank out the affected points. A formula that does
    /// not use `x` is broadcast to the length of the domain.
    ///
    /// Large domains are split into chunks of `options.chunk_size` points
    /// evaluated in parallel; the values are concatenated in order and the
    /// warnings merged, so the curve is the same as a sequential run.
    ///
    /// # Errors
    /// [`EngineError::Eval`] if evaluation fails outright.
    ///
    /// # Example
    /// ```
    /// use plotcalc::{EvalOptions, Formula};
    ///
    /// let f = Formula::parse("log(x)").unwrap();
    /// let domain: Vec<f64> = (-500..=500).map(f64::from).collect();
    ///
    /// let parallel = f.eval_over_with(&domain, EvalOptions { parallel: true, chunk_size: 64 })
    ///                 .unwrap();
    /// let sequential = f.eval_over_with(&domain, EvalOptions::sequential()).unwrap();
    ///
    /// assert_eq!(parallel.warnings(), sequential.warnings());
    /// assert_eq!(parallel.warnings()[0].count, 501);
    /// ```
    pub fn eval_over_with(&self,
                          domain: &[f64],
                          options: EvalOptions)
                          -> Result<Curve, EngineError> {
        let chunk_size = options.chunk_size.max(1);

        if !options.parallel || domain.len() <= chunk_size {
            tracing::debug!(points = domain.len(),
                            constant = !self.ast.uses_variable(),
                            "evaluating sequentially");
            let Evaluation { value, warnings } = evaluate(&self.ast, &Environment::vector(domain))?;
            return Ok(Curve { values: value.broadcast(domain.len()),
                              warnings });
        }

        tracing::debug!(points = domain.len(),
                        chunks = domain.len().div_ceil(chunk_size),
                        "evaluating in parallel");

        let chunks = domain.par_chunks(chunk_size)
                           .map(|chunk| {
                               evaluate(&self.ast, &Environment::vector(chunk))
                                   .map(|e| (e.value.broadcast(chunk.len()), e.warnings))
                           })
                           .collect::<Result<Vec<_>, _>>()?;

        let mut values = Vec::with_capacity(domain.len());
        let mut chunk_warnings = Vec::with_capacity(chunks.len());
        for (chunk_values, warnings) in chunks {
            values.extend(chunk_values);
            chunk_warnings.push(warnings);
        }

        Ok(Curve { values,
                   warnings: merge_warnings(chunk_warnings) })
    }
}

impl FromStr for Formula {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.ast)
    }
}

/// Tokenizes and parses a formula into its AST.
///
/// # Errors
/// [`EngineError::Lex`] for an unrecognized character,
/// [`EngineError::Syntax`] for a malformed formula.
///
/// # Example
/// ```
/// use plotcalc::{error::ErrorKind, parse_formula};
///
/// assert!(parse_formula("x**2 - 3*x").is_ok());
/// assert_eq!(parse_formula("x $ 2").unwrap_err().kind(), ErrorKind::Lex);
/// assert_eq!(parse_formula("sin(x").unwrap_err().kind(), ErrorKind::Syntax);
/// ```
pub fn parse_formula(source: &str) -> Result<Expr, EngineError> {
    let tokens = tokenize(source)?;
    let ast = parse(&tokens)?;
    tracing::debug!(len = source.len(), tokens = tokens.len(), nodes = ast.node_count(), "parsed formula");
    Ok(ast)
}

/// Evaluates `formula` over `domain` for plotting.
///
/// Domain violations are non-fatal: the affected points are `NaN` and the
/// curve carries a warning per offending node.
///
/// # Errors
/// Lexing, parsing or shape failures.
///
/// # Example
/// ```
/// use plotcalc::{error::DomainErrorKind, evaluate_formula};
///
/// let curve = evaluate_formula("1/x", &[0.0, 4.0]).unwrap();
/// assert!(curve.values()[0].is_nan());
/// assert_eq!(curve.values()[1], 0.25);
/// assert_eq!(curve.warnings()[0].kind, DomainErrorKind::DivideByZero);
///
/// let constant = evaluate_formula("2 ** 3 ** 2", &[0.0, 1.0]).unwrap();
/// assert_eq!(constant.values(), &[512.0, 512.0]);
/// ```
pub fn evaluate_formula(formula: &str, domain: &[f64]) -> Result<Curve, EngineError> {
    Formula::parse(formula)?.eval_over(domain)
}

/// Evaluates `formula` at the single point `x`.
///
/// # Errors
/// Lexing or parsing failures, and any violated precondition.
///
/// # Example
/// ```
/// use plotcalc::evaluate_formula_at;
///
/// assert_eq!(evaluate_formula_at("-2**2", 0.0).unwrap(), -4.0);
/// assert_eq!(evaluate_formula_at("x % 3", -7.0).unwrap(), 2.0);
/// assert!(evaluate_formula_at("log(x)", 0.0).is_err());
/// ```
pub fn evaluate_formula_at(formula: &str, x: f64) -> Result<f64, EngineError> {
    Formula::parse(formula)?.eval_at(x)
}
