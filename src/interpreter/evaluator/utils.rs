use crate::{
    ast::Span,
    error::{DomainError, DomainWarning},
};

/// Collects non-fatal domain violations during lenient evaluation.
///
/// Violations are grouped per AST node (its span) and precondition: each
/// group keeps the number of affected elements and the first offending
/// value in element order. Groups are reported in source order.
#[derive(Debug, Clone, Default)]
pub struct WarningLog {
    warnings: Vec<DomainWarning>,
}

impl WarningLog {
    /// Records that `count` result elements were blanked out by `error`.
    ///
    /// A count of zero (a violation broadcast over an empty domain) affects
    /// nothing and is not recorded.
    ///
    /// # Example
    /// ```
    /// use plotcalc::{
    ///     ast::Span,
    ///     error::{DomainError, DomainErrorKind},
    ///     interpreter::evaluator::utils::WarningLog,
    /// };
    ///
    /// let mut log = WarningLog::default();
    /// log.record(&DomainError::new(DomainErrorKind::DivideByZero, "/", 0.0), Span::new(0, 1), 0);
    /// assert!(log.is_empty());
    ///
    /// let error = DomainError::new(DomainErrorKind::DivideByZero, "/", 0.0);
    /// log.record(&error, Span::new(1, 2), 1);
    /// log.record(&DomainError { value: -0.0, ..error }, Span::new(1, 2), 2);
    ///
    /// let warnings = log.into_vec();
    /// assert_eq!(warnings.len(), 1);
    /// assert_eq!(warnings[0].count, 3);
    /// assert!(warnings[0].first_value.is_sign_positive());
    /// ```
    pub fn record(&mut self, error: &DomainError, span: Span, count: usize) {
        if count == 0 {
            return;
        }
        self.add(DomainWarning { kind: error.kind,
                                 operator: error.operator,
                                 count,
                                 first_value: error.value,
                                 span });
    }

    /// Folds a warning into the log, keeping the earlier first value.
    fn add(&mut self, warning: DomainWarning) {
        match self.warnings
                  .iter_mut()
                  .find(|w| w.span == warning.span && w.kind == warning.kind)
        {
            Some(existing) => existing.count += warning.count,
            None => self.warnings.push(warning),
        }
    }

    /// Returns `true` if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Consumes the log, returning one warning per group in source order.
    #[must_use]
    pub fn into_vec(mut self) -> Vec<DomainWarning> {
        self.warnings
            .sort_by_key(|w| (w.span.start, w.span.end));
        self.warnings
    }
}

/// Merges the warnings of consecutive chunks of one domain.
///
/// `chunks` must be in domain order. Counts of the same group are summed and
/// the first offending value comes from the earliest chunk, which gives the
/// same result as evaluating the whole domain at once.
pub fn merge_warnings(chunks: impl IntoIterator<Item = Vec<DomainWarning>>) -> Vec<DomainWarning> {
    let mut log = WarningLog::default();
    for warning in chunks.into_iter().flatten() {
        log.add(warning);
    }
    log.into_vec()
}
