//! Literal values carried by filter leaves and bound parameters emitted into SQL.
//!
//! [`LiteralValue`] is produced once at the input boundary so the detector and
//! strategies pattern-match over a closed set instead of probing JSON shapes.
//! [`SqlParam`] is what ends up in the positional parameter list.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A client-supplied operator value.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    /// JSON `null`. Never reaches a strategy: the builder skips it.
    Null,
    /// Strict boolean.
    Bool(bool),
    /// Integer that fits `i64`.
    Int(i64),
    /// Integer above `i64::MAX`, kept as its exact decimal digits.
    BigInt(String),
    /// Any other JSON number.
    Float(f64),
    /// String.
    Text(String),
    /// Array of values.
    List(Vec<LiteralValue>),
    /// JSON object kept verbatim; no strategy accepts it as a literal.
    Json(Value),
}

impl LiteralValue {
    /// Short shape name used in error messages.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Int(_) | Self::BigInt(_) => "integer",
            Self::Float(_) => "float",
            Self::Text(_) => "string",
            Self::List(_) => "list",
            Self::Json(_) => "object",
        }
    }

    /// Returns true for JSON `null`.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns true for integers and floats.
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, Self::Int(_) | Self::BigInt(_) | Self::Float(_))
    }

    /// Returns the string slice if this is text.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the element slice if this is a list.
    #[must_use]
    pub fn as_list(&self) -> Option<&[LiteralValue]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the number as `f64` for integers and floats.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(i) => Some(*i as f64),
            Self::BigInt(digits) => digits.parse().ok(),
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Converts the value back to JSON (used for error messages and the CLI).
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Null => Value::Null,
            Self::Bool(b) => Value::Bool(*b),
            Self::Int(i) => Value::from(*i),
            Self::BigInt(digits) => digits
                .parse::<u64>()
                .map_or_else(|_| Value::String(digits.clone()), Value::from),
            Self::Float(f) => Value::from(*f),
            Self::Text(s) => Value::String(s.clone()),
            Self::List(items) => Value::Array(items.iter().map(Self::to_json).collect()),
            Self::Json(v) => v.clone(),
        }
    }
}

impl std::fmt::Display for LiteralValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(s) => write!(f, "{s:?}"),
            other => write!(f, "{}", other.to_json()),
        }
    }
}

impl From<&Value> for LiteralValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(*b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Self::Int(i)
                } else if let Some(u) = n.as_u64() {
                    Self::BigInt(u.to_string())
                } else {
                    Self::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            Value::String(s) => Self::Text(s.clone()),
            Value::Array(items) => Self::List(items.iter().map(Self::from).collect()),
            Value::Object(_) => Self::Json(value.clone()),
        }
    }
}

impl From<Value> for LiteralValue {
    fn from(value: Value) -> Self {
        Self::from(&value)
    }
}

impl From<bool> for LiteralValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for LiteralValue {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<u64> for LiteralValue {
    fn from(u: u64) -> Self {
        i64::try_from(u).map_or_else(|_| Self::BigInt(u.to_string()), Self::Int)
    }
}

impl From<i32> for LiteralValue {
    fn from(i: i32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<f64> for LiteralValue {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<&str> for LiteralValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for LiteralValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl<T: Into<LiteralValue>> From<Vec<T>> for LiteralValue {
    fn from(items: Vec<T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

/// A bound positional parameter.
///
/// Serializes untagged so drivers can forward the list as plain JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SqlParam {
    /// Boolean parameter.
    Bool(bool),
    /// Integer parameter.
    Int(i64),
    /// Floating-point parameter.
    Float(f64),
    /// Text parameter; also carries numeric strings, patterns and typed literals
    /// that the SQL side casts (`::inet`, `::daterange`, `::vector`, ...).
    Text(String),
}

impl std::fmt::Display for SqlParam {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Text(s) => write!(f, "{s:?}"),
        }
    }
}

impl From<&str> for SqlParam {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for SqlParam {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<i64> for SqlParam {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<bool> for SqlParam {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}
