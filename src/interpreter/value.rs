use std::fmt;

/// A runtime value: one number, or one number per domain point.
///
/// Every elementwise operation on a `Vector` produces a `Vector` of the same
/// length. `NaN` and infinities are ordinary element values.
#[derive(Debug, Clone, PartialEq)]
pub enum NumericValue {
    /// A single number.
    Scalar(f64),
    /// An ordered, fixed-length sequence of numbers.
    Vector(Vec<f64>),
}

impl From<f64> for NumericValue {
    fn from(v: f64) -> Self {
        Self::Scalar(v)
    }
}

impl From<Vec<f64>> for NumericValue {
    fn from(v: Vec<f64>) -> Self {
        Self::Vector(v)
    }
}

impl From<&[f64]> for NumericValue {
    fn from(v: &[f64]) -> Self {
        Self::Vector(v.to_vec())
    }
}

impl NumericValue {
    /// Returns `true` for a scalar.
    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        matches!(self, Self::Scalar(_))
    }

    /// Returns the scalar, or `None` for a vector.
    #[must_use]
    pub const fn as_scalar(&self) -> Option<f64> {
        match self {
            Self::Scalar(v) => Some(*v),
            Self::Vector(_) => None,
        }
    }

    /// Returns the elements of a vector, or `None` for a scalar.
    #[must_use]
    pub fn as_slice(&self) -> Option<&[f64]> {
        match self {
            Self::Scalar(_) => None,
            Self::Vector(v) => Some(v),
        }
    }

    /// Number of points this value describes; a scalar counts as one.
    #[must_use]
    pub fn width(&self) -> usize {
        match self {
            Self::Scalar(_) => 1,
            Self::Vector(v) => v.len(),
        }
    }

    /// Converts the value to a vector of `len` elements.
    ///
    /// A scalar is replicated; a vector is returned unchanged, whatever its
    /// length.
    ///
    /// # Example
    /// ```
    /// use plotcalc::interpreter::value::NumericValue;
    ///
    /// assert_eq!(NumericValue::Scalar(2.0).broadcast(3), vec![2.0, 2.0, 2.0]);
    /// assert_eq!(NumericValue::Vector(vec![1.0]).broadcast(3), vec![1.0]);
    /// ```
    #[must_use]
    pub fn broadcast(self, len: usize) -> Vec<f64> {
        match self {
            Self::Scalar(v) => vec![v; len],
            Self::Vector(v) => v,
        }
    }

    /// Applies `f` to every element, preserving the shape.
    #[must_use]
    pub fn map(self, f: impl Fn(f64) -> f64) -> Self {
        match self {
            Self::Scalar(v) => Self::Scalar(f(v)),
            Self::Vector(v) => Self::Vector(v.into_iter().map(f).collect()),
        }
    }
}

impl fmt::Display for NumericValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(v) => write!(f, "{v}"),
            Self::Vector(values) => {
                write!(f, "[")?;
                for (i, v) in values.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{v}")?;
                }
                write!(f, "]")
            },
        }
    }
}
