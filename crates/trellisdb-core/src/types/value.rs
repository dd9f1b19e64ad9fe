//! Attribute values that can be embedded in storage keys.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A value carried by an attribute vertex.
///
/// Unlike general property values, attribute values are part of the vertex's
/// identity: the encoded value is embedded in the storage key itself, so two
/// attributes with the same owning type and the same value are the same
/// vertex.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AttributeValue {
    /// Boolean value
    Boolean(bool),
    /// 64-bit signed integer
    Integer(i64),
    /// 64-bit floating point number
    Float(f64),
    /// UTF-8 string
    Text(String),
    /// Instant in time, millisecond precision, UTC-normalized
    Timestamp(DateTime<Utc>),
}

impl AttributeValue {
    /// Returns the value as a boolean if it is one.
    #[inline]
    #[must_use]
    pub const fn as_boolean(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the value as an integer if it is one.
    #[inline]
    #[must_use]
    pub const fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the value as a float if it is one.
    #[inline]
    #[must_use]
    pub const fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Returns the value as a string slice if it is one.
    #[inline]
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the value as a timestamp if it is one.
    #[inline]
    #[must_use]
    pub fn as_timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Timestamp(t) => Some(*t),
            _ => None,
        }
    }
}

impl From<bool> for AttributeValue {
    #[inline]
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

impl From<i64> for AttributeValue {
    #[inline]
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

impl From<f64> for AttributeValue {
    #[inline]
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<String> for AttributeValue {
    #[inline]
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for AttributeValue {
    #[inline]
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<DateTime<Utc>> for AttributeValue {
    #[inline]
    fn from(t: DateTime<Utc>) -> Self {
        Self::Timestamp(t)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn value_conversions() {
        assert_eq!(AttributeValue::from(true).as_boolean(), Some(true));
        assert_eq!(AttributeValue::from(42i64).as_integer(), Some(42));
        assert_eq!(AttributeValue::from(2.5f64).as_float(), Some(2.5));
        assert_eq!(AttributeValue::from("hello").as_text(), Some("hello"));
    }

    #[test]
    fn timestamp_value() {
        let instant = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let value = AttributeValue::from(instant);
        assert_eq!(value.as_timestamp(), Some(instant));
        assert_eq!(value.as_integer(), None);
    }

    #[test]
    fn accessors_reject_other_variants() {
        let value = AttributeValue::Text("hi".to_owned());
        assert_eq!(value.as_boolean(), None);
        assert_eq!(value.as_integer(), None);
        assert_eq!(value.as_float(), None);
        assert_eq!(value.as_timestamp(), None);
    }
}
