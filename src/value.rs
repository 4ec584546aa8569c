//! Record attributes.
//!
//! An [`Attr`] is one key/value pair on a record. Keys keep their insertion
//! order all the way to the output line.

use std::borrow::Cow;
use std::fmt;

use serde::Serialize;

/// An attribute value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    String(String),
    Bool(bool),
    I64(i64),
    U64(u64),
    F64(f64),
    /// Arbitrary structured data, rendered as compact JSON in text mode.
    Json(serde_json::Value),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => f.write_str(s),
            Self::Bool(b) => write!(f, "{b}"),
            Self::I64(n) => write!(f, "{n}"),
            Self::U64(n) => write!(f, "{n}"),
            Self::F64(n) => write!(f, "{n}"),
            Self::Json(v) => write!(f, "{v}"),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Self::String(s.clone())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

macro_rules! impl_from_int {
    ($variant:ident: $($ty:ty),+) => {
        $(
            impl From<$ty> for Value {
                fn from(n: $ty) -> Self {
                    Self::$variant(n.into())
                }
            }
        )+
    };
}

impl_from_int!(I64: i8, i16, i32, i64);
impl_from_int!(U64: u8, u16, u32, u64);

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        Self::U64(u64::try_from(n).unwrap_or(u64::MAX))
    }
}

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Self::F64(n.into())
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::F64(n)
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        Self::Json(v)
    }
}

/// A key/value pair attached to a record.
#[derive(Debug, Clone, PartialEq)]
pub struct Attr {
    /// Attribute name.
    pub key: Cow<'static, str>,
    /// Attribute value.
    pub value: Value,
}

impl Attr {
    /// Creates an attribute.
    #[must_use]
    pub fn new(key: impl Into<Cow<'static, str>>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Builds a `Vec<Attr>` from `key => value` pairs.
///
/// ```
/// use botlog::{attrs, Value};
///
/// let list = attrs!["user_id" => "u1", "success" => true];
/// assert_eq!(list[0].key, "user_id");
/// assert_eq!(list[1].value, Value::Bool(true));
/// assert!(attrs![].is_empty());
/// ```
#[macro_export]
macro_rules! attrs {
    () => {
        ::std::vec::Vec::<$crate::Attr>::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {
        ::std::vec![$($crate::Attr::new($key, $value)),+]
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_conversions_pick_signedness() {
        assert_eq!(Value::from(-3_i32), Value::I64(-3));
        assert_eq!(Value::from(7_u16), Value::U64(7));
        assert_eq!(Value::from(9_usize), Value::U64(9));
    }

    #[test]
    fn display_is_raw() {
        assert_eq!(Value::from("a b").to_string(), "a b");
        assert_eq!(Value::from(false).to_string(), "false");
        assert_eq!(Value::from(1.5).to_string(), "1.5");
        assert_eq!(
            Value::from(serde_json::json!({"k": [1, 2]})).to_string(),
            r#"{"k":[1,2]}"#
        );
    }

    #[test]
    fn serializes_untagged() {
        let json = serde_json::to_string(&vec![
            Value::from("x"),
            Value::from(true),
            Value::from(-1_i64),
            Value::from(serde_json::json!(null)),
        ])
        .unwrap();
        assert_eq!(json, r#"["x",true,-1,null]"#);
    }

    #[test]
    fn attr_accepts_owned_keys() {
        let key = format!("ctx_{}", 1);
        let attr = Attr::new(key, 5_u8);
        assert_eq!(attr.key, "ctx_1");
    }

    #[test]
    fn macro_allows_trailing_comma() {
        let list = attrs!["a" => 1, "b" => "two",];
        assert_eq!(list.len(), 2);
    }
}
