use std::{fmt, rc::Rc};

use crate::{
    ast::{Func, OpCode},
    error::RuntimeError,
    interpreter::evaluator::core::EvalResult,
};

/// Represents a runtime value in the interpreter.
///
/// Every expression evaluates to one of these. Numbers are 64-bit floats;
/// comparisons produce `1` or `0`.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    /// The absence of a value: unbound identifiers, empty expressions and
    /// `null` itself.
    #[default]
    Null,
    /// A number.
    Number(f64),
    /// A closure. The body is shared with the tree it was parsed from.
    Func(Rc<Func>),
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<Option<f64>> for Value {
    fn from(v: Option<f64>) -> Self {
        v.map_or(Self::Null, Self::Number)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Number(if v { 1.0 } else { 0.0 })
    }
}

impl Value {
    /// Returns `true` for nonzero numbers and closures.
    ///
    /// # Example
    /// ```
    /// use brak::interpreter::value::Value;
    ///
    /// assert!(Value::Number(5.0).is_truthy());
    /// assert!(!Value::Number(0.0).is_truthy());
    /// assert!(!Value::Null.is_truthy());
    /// ```
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Number(n) => *n != 0.0,
            Self::Func(_) => true,
        }
    }

    /// A short name for the kind of value, used in error messages.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Number(_) => "number",
            Self::Func(_) => "closure",
        }
    }

    /// Extracts the number an operator needs.
    ///
    /// # Errors
    /// Returns [`RuntimeError::ExpectedNumber`] for `null` and closures.
    pub fn as_number(&self, op: OpCode) -> EvalResult<f64> {
        match self {
            Self::Number(n) => Ok(*n),
            other => Err(RuntimeError::ExpectedNumber { op,
                                                        found: other.kind() }),
        }
    }

    /// The literal this value lowers to when spliced back into an
    /// expression. Closures have no literal form and lower to `null`.
    #[must_use]
    pub const fn to_literal(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Null | Self::Func(_) => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Func(_) => write!(f, "<closure>"),
        }
    }
}
