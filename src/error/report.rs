use std::fmt;

use crate::{
    ast::Span,
    error::{DomainWarning, EngineError, ErrorKind, EvalError},
};

/// A failure flattened into the fields a front end needs to show it.
///
/// Nothing is lost in the conversion: the operator or function name and the
/// offending value are kept whenever the original error has them.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    /// Taxonomy class of the failure.
    pub kind:                 ErrorKind,
    /// Human readable description.
    pub message:              String,
    /// The operator or function involved, if any.
    pub operator_or_function: Option<String>,
    /// The offending numeric value, if any.
    pub value:                Option<f64>,
    /// Location in the formula, if the failure came from one.
    pub span:                 Option<Span>,
}

impl Report {
    /// Renders the message followed by the formula with a caret line under
    /// the offending span.
    ///
    /// Without a span only the message is returned.
    ///
    /// # Example
    /// ```
    /// use plotcalc::parse_formula;
    ///
    /// let report = parse_formula("x + foo(x)").unwrap_err().report();
    /// let rendered = report.render("x + foo(x)");
    /// assert!(rendered.ends_with("x + foo(x)\n    ^^^"));
    /// ```
    #[must_use]
    pub fn render(&self, source: &str) -> String {
        let Some(span) = self.span else {
            return format!("{}: {}", self.kind, self.message);
        };

        let start = clamp_to_char_boundary(source, span.start);
        let end = clamp_to_char_boundary(source, span.end.max(span.start));
        let indent = source[..start].chars().count();
        let width = source[start..end].chars().count().max(1);

        format!("{}: {}\n{source}\n{}{}",
                self.kind,
                self.message,
                " ".repeat(indent),
                "^".repeat(width))
    }
}

fn clamp_to_char_boundary(source: &str, index: usize) -> usize {
    let mut index = index.min(source.len());
    while !source.is_char_boundary(index) {
        index -= 1;
    }
    index
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl From<&EngineError> for Report {
    fn from(error: &EngineError) -> Self {
        let message = error.to_string();
        match error {
            EngineError::Lex(e) => Self { kind: ErrorKind::Lex,
                                          message,
                                          operator_or_function: None,
                                          value: None,
                                          span: Some(e.span()) },
            EngineError::Syntax(e) => Self { kind: ErrorKind::Syntax,
                                             message,
                                             operator_or_function: e.name().map(str::to_string),
                                             value: None,
                                             span: Some(e.span) },
            EngineError::Domain(e) => Self { kind: ErrorKind::Domain,
                                             message,
                                             operator_or_function: Some(e.operator.to_string()),
                                             value: Some(e.value),
                                             span: None },
            EngineError::Eval(e) => {
                let value = match e {
                    EvalError::Domain { error, .. } => Some(error.value),
                    EvalError::ShapeMismatch { .. } => None,
                };
                Self { kind: e.kind(),
                       message,
                       operator_or_function: Some(e.operator_or_function().to_string()),
                       value,
                       span: Some(e.span()) }
            },
        }
    }
}

impl From<EngineError> for Report {
    fn from(error: EngineError) -> Self {
        Self::from(&error)
    }
}

impl DomainWarning {
    /// Converts the warning into a uniform report.
    ///
    /// # Example
    /// ```
    /// use plotcalc::{error::ErrorKind, evaluate_formula};
    ///
    /// let curve = evaluate_formula("log(x)", &[-1.0, 1.0]).unwrap();
    /// let report = curve.warnings()[0].report();
    /// assert_eq!(report.kind, ErrorKind::DomainWarning);
    /// assert_eq!(report.operator_or_function.as_deref(), Some("log"));
    /// assert_eq!(report.value, Some(-1.0));
    /// ```
    #[must_use]
    pub fn report(&self) -> Report {
        Report { kind:                 ErrorKind::DomainWarning,
                 message:              self.to_string(),
                 operator_or_function: Some(self.operator.to_string()),
                 value:                Some(self.first_value),
                 span:                 Some(self.span), }
    }
}
