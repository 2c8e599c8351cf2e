use std::fmt;

use crate::util::stack::ensure_sufficient_stack;

/// A byte range into the formula text.
///
/// Every token and every AST node remembers where it came from so that
/// errors can point at the offending part of the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    /// Offset of the first byte.
    pub start: usize,
    /// Offset one past the last byte.
    pub end:   usize,
}

impl Span {
    /// Creates a span covering `start..end`.
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

impl From<std::ops::Range<usize>> for Span {
    fn from(range: std::ops::Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}

/// An abstract syntax tree (AST) node representing a formula.
///
/// The tree is closed: the only variable is `x` and the only callable names
/// are the members of [`FunctionId`]. Each node owns its children.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A numeric constant.
    Literal {
        /// The constant value.
        value: f64,
        /// Location in the formula.
        span:  Span,
    },
    /// The bound variable `x`.
    Variable {
        /// Location in the formula.
        span: Span,
    },
    /// A unary operation (negation).
    UnaryOp {
        /// The unary operator to apply.
        op:      UnaryOperator,
        /// The operand expression.
        operand: Box<Self>,
        /// Location of the operator and its operand.
        span:    Span,
    },
    /// A binary arithmetic operation.
    BinaryOp {
        /// Left operand.
        left:  Box<Self>,
        /// The operator.
        op:    BinaryOperator,
        /// Right operand.
        right: Box<Self>,
        /// Location of the operator token.
        span:  Span,
    },
    /// Call of a whitelisted function with exactly one argument.
    Call {
        /// The function being called.
        function: FunctionId,
        /// The argument expression.
        argument: Box<Self>,
        /// Location of the function name.
        span:     Span,
    },
}

impl Expr {
    /// Returns the source location stored on this node.
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::Literal { span, .. }
            | Self::Variable { span }
            | Self::UnaryOp { span, .. }
            | Self::BinaryOp { span, .. }
            | Self::Call { span, .. } => *span,
        }
    }

    /// Binding strength used when rendering the tree back to text.
    const fn precedence(&self) -> u8 {
        match self {
            Self::BinaryOp { op, .. } => op.precedence(),
            Self::UnaryOp { .. } => UNARY_PRECEDENCE,
            Self::Literal { .. } | Self::Variable { .. } | Self::Call { .. } => ATOM_PRECEDENCE,
        }
    }

    /// Counts the nodes of the tree.
    ///
    /// # Example
    /// ```
    /// use plotcalc::parse_formula;
    ///
    /// let ast = parse_formula("sin(x) + 1").unwrap();
    /// assert_eq!(ast.node_count(), 4);
    /// ```
    #[must_use]
    pub fn node_count(&self) -> usize {
        ensure_sufficient_stack(|| match self {
            Self::Literal { .. } | Self::Variable { .. } => 1,
            Self::UnaryOp { operand, .. } => 1 + operand.node_count(),
            Self::BinaryOp { left, right, .. } => 1 + left.node_count() + right.node_count(),
            Self::Call { argument, .. } => 1 + argument.node_count(),
        })
    }

    /// Returns `true` if the formula refers to `x` anywhere.
    #[must_use]
    pub fn uses_variable(&self) -> bool {
        ensure_sufficient_stack(|| match self {
            Self::Literal { .. } => false,
            Self::Variable { .. } => true,
            Self::UnaryOp { operand, .. } => operand.uses_variable(),
            Self::BinaryOp { left, right, .. } => left.uses_variable() || right.uses_variable(),
            Self::Call { argument, .. } => argument.uses_variable(),
        })
    }

    /// Moves the children of this node onto `stack`, leaving leaves behind.
    fn take_children(&mut self, stack: &mut Vec<Self>) {
        let mut take = |child: &mut Box<Self>| {
            stack.push(std::mem::replace(child.as_mut(), Self::Variable { span: Span::default() }));
        };
        match self {
            Self::Literal { .. } | Self::Variable { .. } => {},
            Self::UnaryOp { operand, .. } => take(operand),
            Self::BinaryOp { left, right, .. } => {
                take(left);
                take(right);
            },
            Self::Call { argument, .. } => take(argument),
        }
    }
}

/// Tears the tree down with an explicit work list, so dropping a deeply
/// nested formula uses constant stack.
impl Drop for Expr {
    fn drop(&mut self) {
        let mut stack = Vec::new();
        self.take_children(&mut stack);
        while let Some(mut expr) = stack.pop() {
            expr.take_children(&mut stack);
        }
    }
}

const ADDITIVE_PRECEDENCE: u8 = 1;
const MULTIPLICATIVE_PRECEDENCE: u8 = 2;
const UNARY_PRECEDENCE: u8 = 3;
const POWER_PRECEDENCE: u8 = 4;
const ATOM_PRECEDENCE: u8 = 5;

/// Smallest power of ten above `f64::MAX`.
const OVERFLOW_EXPONENT: usize = 309;

/// Writes `expr`, wrapped in parentheses when `parenthesize` is set.
fn write_operand(f: &mut fmt::Formatter<'_>, expr: &Expr, parenthesize: bool) -> fmt::Result {
    if parenthesize {
        write!(f, "({expr})")
    } else {
        write!(f, "{expr}")
    }
}

/// Renders the canonical text of the formula.
///
/// Parentheses are emitted only where the grammar needs them, so parsing the
/// output yields a tree that evaluates identically.
///
/// # Example
/// ```
/// use plotcalc::parse_formula;
///
/// let ast = parse_formula("(-(2))**x + SIN( x )*3").unwrap();
/// assert_eq!(ast.to_string(), "(-2)**x + sin(x) * 3");
///
/// // A literal beyond `f64::MAX` keeps overflowing after a round trip.
/// let huge = parse_formula(&"9".repeat(400)).unwrap();
/// assert_eq!(parse_formula(&huge.to_string()).unwrap().to_string(), huge.to_string());
/// ```
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        ensure_sufficient_stack(|| match self {
            Self::Literal { value, .. } if value.is_infinite() => {
                // Digits that overflow to infinity again when re-read.
                write!(f, "1{}", "0".repeat(OVERFLOW_EXPONENT))
            },
            Self::Literal { value, .. } => write!(f, "{value}"),
            Self::Variable { .. } => write!(f, "x"),
            Self::UnaryOp { op, operand, .. } => {
                write!(f, "{op}")?;
                write_operand(f, operand, operand.precedence() < UNARY_PRECEDENCE)
            },
            Self::BinaryOp { left, op, right, .. } => {
                let own = op.precedence();
                if *op == BinaryOperator::Pow {
                    // Right-associative, and `-a**b` means `-(a**b)`.
                    write_operand(f, left, left.precedence() <= own)?;
                    write!(f, "{op}")?;
                    write_operand(f, right, right.precedence() < UNARY_PRECEDENCE)
                } else {
                    write_operand(f, left, left.precedence() < own)?;
                    write!(f, " {op} ")?;
                    write_operand(f, right, right.precedence() <= own)
                }
            },
            Self::Call { function, argument, .. } => write!(f, "{function}({argument})"),
        })
    }
}

/// Binary arithmetic operators of the formula language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `%`
    Mod,
    /// `**`
    Pow,
}

impl BinaryOperator {
    const fn precedence(self) -> u8 {
        match self {
            Self::Add | Self::Sub => ADDITIVE_PRECEDENCE,
            Self::Mul | Self::Div | Self::Mod => MULTIPLICATIVE_PRECEDENCE,
            Self::Pow => POWER_PRECEDENCE,
        }
    }

    /// The operator as written in a formula.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Pow => "**",
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Unary operators of the formula language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    /// Arithmetic negation, `-x`.
    Negate,
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Negate => f.write_str("-"),
        }
    }
}

/// The closed set of functions a formula may call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FunctionId {
    /// Sine, argument in radians.
    Sin,
    /// Cosine, argument in radians.
    Cos,
    /// Tangent, argument in radians.
    Tan,
    /// Natural logarithm.
    Log,
    /// Natural exponential.
    Exp,
}

impl FunctionId {
    /// Every callable function, in a stable order.
    pub const ALL: [Self; 5] = [Self::Sin, Self::Cos, Self::Tan, Self::Log, Self::Exp];

    /// Resolves a function name, ignoring ASCII case.
    ///
    /// # Example
    /// ```
    /// use plotcalc::ast::FunctionId;
    ///
    /// assert_eq!(FunctionId::lookup("SIN"), Some(FunctionId::Sin));
    /// assert_eq!(FunctionId::lookup("sqrt"), None);
    /// ```
    #[must_use]
    pub fn lookup(name: &str) -> Option<Self> {
        Self::ALL.into_iter()
                 .find(|function| function.name().eq_ignore_ascii_case(name))
    }

    /// The lowercase name used in formulas.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Log => "log",
            Self::Exp => "exp",
        }
    }
}

impl fmt::Display for FunctionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
