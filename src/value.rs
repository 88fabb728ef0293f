//! Dynamically typed values for hyper-parameters, tags and instance attributes.

use crate::error::EstimatorError;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fmt;

/// A hyper-parameter, tag or attribute value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Value {
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    /// Fixed-size heterogeneous sequence (the tuple default kind).
    Tuple(Vec<Value>),
    /// Numeric array, flattened in row-major order.
    Array(Vec<f64>),
}

/// Hyper-parameters keyed by constructor parameter name.
pub type Params = BTreeMap<String, Value>;

/// Capability tags keyed by tag name.
pub type Tags = BTreeMap<String, Value>;

/// Snapshot of every attribute of an instance, fitted ones included.
pub type Attributes = BTreeMap<String, Value>;

impl Value {
    /// Short name of the value's kind, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::None => "none",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "str",
            Value::Tuple(_) => "tuple",
            Value::Array(_) => "array",
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Numeric view; integers widen to `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_tuple(&self) -> Option<&[Value]> {
        match self {
            Value::Tuple(items) => Some(items),
            _ => None,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    pub fn is_nan(&self) -> bool {
        matches!(self, Value::Float(f) if f.is_nan())
    }

    /// Structural equality in which NaN equals NaN.
    pub fn same_as(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Float(a), Value::Float(b)) => float_eq(*a, *b),
            (Value::Array(a), Value::Array(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| float_eq(*x, *y))
            }
            (Value::Tuple(a), Value::Tuple(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.same_as(y))
            }
            _ => self == other,
        }
    }

    /// Hex SHA-256 of the canonical bincode encoding.
    ///
    /// Two values hash equal exactly when their content is bit-identical,
    /// which makes the hash usable to detect in-place mutation of nested
    /// values.
    pub fn content_hash(&self) -> Result<String, EstimatorError> {
        let bytes = bincode::serialize(self)?;
        let digest = Sha256::digest(&bytes);
        Ok(digest.iter().map(|b| format!("{:02x}", b)).collect())
    }
}

fn float_eq(a: f64, b: f64) -> bool {
    (a.is_nan() && b.is_nan()) || a == b
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => write!(f, "None"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
            Value::Str(s) => write!(f, "'{}'", s),
            Value::Tuple(items) => {
                write!(f, "(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, ")")
            }
            Value::Array(values) => write!(f, "array({:?})", values),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<Vec<f64>> for Value {
    fn from(values: Vec<f64>) -> Self {
        Value::Array(values)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::None, Into::into)
    }
}

/// Builds a string-keyed map (params, tags or attributes) from pairs.
pub fn value_map<I, K, V>(pairs: I) -> BTreeMap<String, Value>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<Value>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_as_treats_nan_as_equal() {
        assert!(Value::Float(f64::NAN).same_as(&Value::Float(f64::NAN)));
        assert_ne!(Value::Float(f64::NAN), Value::Float(f64::NAN));
        assert!(Value::Array(vec![1.0, f64::NAN]).same_as(&Value::Array(vec![1.0, f64::NAN])));
    }

    #[test]
    fn test_same_as_distinguishes_kinds() {
        assert!(!Value::Int(1).same_as(&Value::Float(1.0)));
        assert!(!Value::Str("a".into()).same_as(&Value::None));
    }

    #[test]
    fn test_content_hash_detects_nested_change() {
        let a = Value::Tuple(vec![Value::Int(3), Value::Int(1), Value::Int(2)]);
        let b = Value::Tuple(vec![Value::Int(1), Value::Int(2), Value::Int(3)]);
        let hash = a.content_hash().unwrap();
        assert_eq!(hash, a.clone().content_hash().unwrap());
        assert_ne!(hash, b.content_hash().unwrap());
        assert_eq!(hash.len(), 64);
    }

    #[test]
    fn test_content_hash_of_every_kind() {
        for value in [
            Value::None,
            Value::Bool(true),
            Value::Int(-7),
            Value::Float(f64::NAN),
            Value::Str(String::new()),
            Value::Array(vec![]),
            Value::Tuple(vec![Value::Tuple(vec![Value::None])]),
        ] {
            let hash = value.content_hash().unwrap();
            assert_eq!(hash.len(), 64, "{}", value);
        }
    }

    #[test]
    fn test_display() {
        let v = Value::Tuple(vec![Value::Float(0.0), Value::Float(1.5)]);
        assert_eq!(v.to_string(), "(0, 1.5)");
        assert_eq!(Value::from("last").to_string(), "'last'");
        assert_eq!(Value::None.to_string(), "None");
    }

    #[test]
    fn test_value_map_from_pairs() {
        let params = value_map([("sp", Value::Int(2)), ("strategy", "mean".into())]);
        assert_eq!(params.get("sp"), Some(&Value::Int(2)));
        assert_eq!(params.get("strategy").and_then(Value::as_str), Some("mean"));
    }

    #[test]
    fn test_option_conversion() {
        assert_eq!(Value::from(None::<i64>), Value::None);
        assert_eq!(Value::from(Some(4i64)), Value::Int(4));
    }
}
