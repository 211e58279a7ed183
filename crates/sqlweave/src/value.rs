//! Owned argument values bound to `?` placeholders.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// A bound argument value.
///
/// Values are owned and comparable so a rendered statement can be inspected,
/// compared in tests and handed to any driver adapter.
///
/// Serialized untagged. When deserializing, a string becomes a `Uuid` or an
/// RFC 3339 `Timestamp` if it parses as one, and `Text` otherwise. A
/// `Decimal` serializes as a string and comes back as `Text`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// NULL value
    Null,
    /// Boolean
    Bool(bool),
    /// Integer
    Int(i64),
    /// Float
    Float(f64),
    /// UUID value
    Uuid(Uuid),
    /// UTC timestamp
    Timestamp(DateTime<Utc>),
    /// Text
    Text(String),
    /// Raw bytes
    Bytes(Vec<u8>),
    /// Exact decimal
    #[cfg(feature = "rust_decimal")]
    Decimal(rust_decimal::Decimal),
}

impl Value {
    /// Check if this is NULL.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Render this value as an inline SQL literal.
    pub fn to_literal(&self) -> String {
        self.to_string()
    }
}

/// Formats the value as a SQL literal (used for bound-SQL output).
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "NULL"),
            Value::Bool(true) => write!(f, "TRUE"),
            Value::Bool(false) => write!(f, "FALSE"),
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(n) => write!(f, "{}", n),
            Value::Text(s) => write!(f, "'{}'", s.replace('\'', "''")),
            Value::Bytes(bytes) => {
                write!(f, "X'")?;
                for b in bytes {
                    write!(f, "{:02X}", b)?;
                }
                write!(f, "'")
            }
            Value::Uuid(u) => write!(f, "'{}'", u),
            Value::Timestamp(ts) => write!(f, "'{}'", ts.format("%Y-%m-%d %H:%M:%S%.f")),
            #[cfg(feature = "rust_decimal")]
            Value::Decimal(d) => write!(f, "{}", d),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i8> for Value {
    fn from(n: i8) -> Self {
        Value::Int(n as i64)
    }
}

impl From<i16> for Value {
    fn from(n: i16) -> Self {
        Value::Int(n as i64)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n as i64)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<u8> for Value {
    fn from(n: u8) -> Self {
        Value::Int(n as i64)
    }
}

impl From<u16> for Value {
    fn from(n: u16) -> Self {
        Value::Int(n as i64)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Int(n as i64)
    }
}

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Value::Float(n as f64)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Value::Text(s.clone())
    }
}

impl From<Vec<u8>> for Value {
    fn from(bytes: Vec<u8>) -> Self {
        Value::Bytes(bytes)
    }
}

impl From<&[u8]> for Value {
    fn from(bytes: &[u8]) -> Self {
        Value::Bytes(bytes.to_vec())
    }
}

impl From<Uuid> for Value {
    fn from(u: Uuid) -> Self {
        Value::Uuid(u)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(ts: DateTime<Utc>) -> Self {
        Value::Timestamp(ts)
    }
}

#[cfg(feature = "rust_decimal")]
impl From<rust_decimal::Decimal> for Value {
    fn from(d: rust_decimal::Decimal) -> Self {
        Value::Decimal(d)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literals() {
        assert_eq!(Value::Null.to_literal(), "NULL");
        assert_eq!(Value::from(true).to_literal(), "TRUE");
        assert_eq!(Value::from(42i32).to_literal(), "42");
        assert_eq!(Value::from(1.5f64).to_literal(), "1.5");
        assert_eq!(Value::from("it's").to_literal(), "'it''s'");
        assert_eq!(Value::from(vec![0x0au8, 0xff]).to_literal(), "X'0AFF'");
    }

    #[test]
    fn test_option_conversion() {
        let none: Option<i64> = None;
        assert_eq!(Value::from(none), Value::Null);
        assert_eq!(Value::from(Some("a")), Value::Text("a".to_string()));
    }

    #[test]
    fn test_serialize_untagged() {
        let args = vec![Value::from(1i64), Value::from("x"), Value::Null];
        let json = serde_json::to_string(&args).unwrap();
        assert_eq!(json, r#"[1,"x",null]"#);
    }

    #[test]
    fn test_deserialize_keeps_uuid_and_timestamp() {
        use chrono::TimeZone;

        let id = Uuid::parse_str("67e55044-10b1-426f-9247-bb680e5fe0c8").unwrap();
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap();
        let args = vec![Value::Uuid(id), Value::Timestamp(at), Value::from("plain")];

        let json = serde_json::to_string(&args).unwrap();
        let back: Vec<Value> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, args);
    }
}
