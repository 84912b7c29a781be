//! A dynamically typed element for trees whose contents aren't known at compile time (values
//! parsed from user input, say).
//!
//! Only values of the same kind are ordered against each other. Putting a [`Value::Text`] into
//! a tree of [`Value::Int`]s therefore fails with [`Error::TypeMismatch`](crate::Error) instead
//! of silently picking an order between kinds.
//!
//! ```
//! use bst_variants::avl::Tree;
//! use bst_variants::{Error, Value};
//!
//! let mut tree = Tree::with_values([Value::Int(2), Value::Int(1)])?;
//!
//! assert_eq!(tree.insert(Value::from("two")), Err(Error::TypeMismatch));
//! assert_eq!(tree.insert(Value::from(f64::NAN)), Err(Error::ValueNotComparable));
//! assert_eq!(tree.len(), 2);
//! # Ok::<(), Error>(())
//! ```

use std::cmp::Ordering;
use std::fmt;

/// An integer, float or string.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A signed integer.
    Int(i64),
    /// A float. `NaN` has no order and is rejected by every tree.
    Float(f64),
    /// A string, ordered lexicographically by bytes.
    Text(String),
}

impl Value {
    /// Name of the kind of value, for messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Text(_) => "text",
        }
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
            (Value::Float(a), Value::Float(b)) => a.partial_cmp(b),
            (Value::Text(a), Value::Text(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(value) => write!(f, "{value}"),
            Value::Float(value) => write!(f, "{value}"),
            Value::Text(value) => write!(f, "{value:?}"),
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_kinds_compare() {
        assert!(Value::Int(1) < Value::Int(2));
        assert!(Value::Float(1.5) > Value::Float(-1.0));
        assert!(Value::from("a") < Value::from("b"));
    }

    #[test]
    fn different_kinds_do_not() {
        assert_eq!(Value::Int(1).partial_cmp(&Value::Float(1.0)), None);
        assert_eq!(Value::from("1").partial_cmp(&Value::Int(1)), None);
        assert_ne!(Value::Int(1), Value::Float(1.0));
    }

    #[test]
    fn nan_is_not_equal_to_itself() {
        let nan = Value::from(f64::NAN);
        assert_eq!(nan.partial_cmp(&nan), None);
        assert_eq!(nan.kind(), "float");
    }

    #[test]
    fn display() {
        assert_eq!(Value::Int(-3).to_string(), "-3");
        assert_eq!(Value::from("x").to_string(), "\"x\"");
    }
}
