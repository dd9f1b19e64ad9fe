//! Attribute identifiers: thing identifiers that embed their value.
//!
//! An attribute vertex is identified by its owning type together with its
//! value, so the value is encoded directly into the key:
//!
//! `[attribute kind][owner type iid][value tag][payload]`
//!
//! # Payload encodings
//!
//! Every payload preserves ordering: comparing encoded keys byte-wise gives
//! the natural order of the values, which is what makes value range scans
//! over an attribute type possible.
//!
//! - Boolean: one byte, `0x00` or `0x01`, false before true
//! - Integer: big-endian i64 with the sign bit flipped, negative before
//!   positive
//! - Float: IEEE 754 bits transformed to a total order, NaN canonicalized to
//!   sort last
//! - Text: one length byte followed by the UTF-8 bytes, at most
//!   [`AttributeIid::MAX_TEXT_BYTES`]
//! - Timestamp: big-endian sign-flipped UTC epoch milliseconds, chronological
//!   order for all instants including pre-epoch ones
//!
//! Text keys order by length before content; ordered scans over text values
//! are not part of this layer's contract.

use std::fmt;

use chrono::{DateTime, Utc};

use crate::encoding::iid::{read_be_u16, read_be_u64, Iid};
use crate::encoding::kind::{ThingKind, TypeKind, ValueType};
use crate::encoding::vertex::{ThingIid, TypeIid};
use crate::error::CoreError;
use crate::types::AttributeValue;

/// Constant for flipping the sign bit of signed integers.
const SIGN_FLIP_I64: u64 = 0x8000_0000_0000_0000;

fn encode_i64(value: i64) -> u64 {
    // Flip sign bit to make negative numbers sort before positive.
    (value as u64) ^ SIGN_FLIP_I64
}

fn decode_i64(raw: u64) -> i64 {
    (raw ^ SIGN_FLIP_I64) as i64
}

fn encode_f64(value: f64) -> u64 {
    let bits = value.to_bits();
    if value.is_nan() {
        // Canonicalize NaN to the maximum so it sorts last.
        u64::MAX
    } else if bits & SIGN_FLIP_I64 == 0 {
        // Positive float (including +0): flip sign bit.
        bits ^ SIGN_FLIP_I64
    } else {
        // Negative float (including -0): flip all bits.
        !bits
    }
}

fn decode_f64(raw: u64) -> f64 {
    let bits = if raw == u64::MAX {
        f64::NAN.to_bits()
    } else if raw & SIGN_FLIP_I64 != 0 {
        raw ^ SIGN_FLIP_I64
    } else {
        !raw
    };
    f64::from_bits(bits)
}

/// Identifier of an attribute vertex.
///
/// The encoded length varies by value type; it is always derivable from the
/// tag byte (and, for text, the length byte), never from the surrounding
/// buffer.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AttributeIid {
    iid: Iid,
    value_type: ValueType,
}

impl AttributeIid {
    /// Offset of the value-type tag byte.
    pub const VALUE_TYPE_INDEX: usize = ThingIid::HEADER_LENGTH;
    /// Offset of the first payload byte.
    pub const VALUE_INDEX: usize = Self::VALUE_TYPE_INDEX + 1;
    /// Maximum encoded byte length of a text value.
    pub const MAX_TEXT_BYTES: usize = 255;

    /// Builds the identifier for an attribute of `owner` holding `value`.
    ///
    /// Timestamps are truncated to their millisecond precision; that is the
    /// granularity of the value type.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Encoding`] if `owner` is not an attribute type
    /// or a text value exceeds [`Self::MAX_TEXT_BYTES`].
    pub fn of(owner: &TypeIid, value: &AttributeValue) -> Result<Self, CoreError> {
        if owner.kind() != TypeKind::Attribute {
            return Err(CoreError::Encoding(format!(
                "attribute identifiers require an attribute-type owner, got {}",
                owner.kind()
            )));
        }

        let value_type = ValueType::of(value);
        let capacity = Self::VALUE_INDEX
            + match value {
                AttributeValue::Text(s) => 1 + s.len(),
                _ => 8,
            };
        let mut bytes = Vec::with_capacity(capacity);
        bytes.push(ThingKind::Attribute.as_byte());
        bytes.extend_from_slice(owner.as_bytes());
        bytes.push(value_type.as_byte());

        match value {
            AttributeValue::Boolean(b) => bytes.push(u8::from(*b)),
            AttributeValue::Integer(i) => bytes.extend_from_slice(&encode_i64(*i).to_be_bytes()),
            AttributeValue::Float(f) => bytes.extend_from_slice(&encode_f64(*f).to_be_bytes()),
            AttributeValue::Text(s) => {
                if s.len() > Self::MAX_TEXT_BYTES {
                    return Err(CoreError::Encoding(format!(
                        "text value of {} bytes exceeds the {}-byte maximum",
                        s.len(),
                        Self::MAX_TEXT_BYTES
                    )));
                }
                bytes.push(s.len() as u8);
                bytes.extend_from_slice(s.as_bytes());
            }
            AttributeValue::Timestamp(t) => {
                bytes.extend_from_slice(&encode_i64(t.timestamp_millis()).to_be_bytes());
            }
        }

        Ok(Self { iid: Iid::new(bytes), value_type })
    }

    /// Reinterprets an exact encoded attribute identifier.
    ///
    /// Every payload is validated here, so the value accessors on the
    /// returned identifier cannot fail.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Corruption`] if the length does not match the
    /// tag, a discriminator or tag is unknown, the owner is not an attribute
    /// type, or the payload is malformed.
    pub fn decode(bytes: &[u8]) -> Result<Self, CoreError> {
        let expected = Self::encoded_len_at(bytes, 0)?;
        if bytes.len() != expected {
            return Err(CoreError::Corruption(format!(
                "attribute identifier must be {expected} bytes, got {}",
                bytes.len()
            )));
        }
        if bytes[0] != ThingKind::Attribute.as_byte() {
            return Err(CoreError::Corruption(format!(
                "expected attribute discriminator, got {:#x}",
                bytes[0]
            )));
        }
        let owner = TypeIid::decode(&bytes[1..=TypeIid::LENGTH])?;
        if owner.kind() != TypeKind::Attribute {
            return Err(CoreError::Corruption(format!(
                "attribute identifier owned by {}",
                owner.kind()
            )));
        }

        let value_type = ValueType::from_byte(bytes[Self::VALUE_TYPE_INDEX])?;
        let payload = &bytes[Self::VALUE_INDEX..];
        match value_type {
            ValueType::Boolean => {
                if payload[0] > 1 {
                    return Err(CoreError::Corruption(format!(
                        "invalid boolean payload: {:#x}",
                        payload[0]
                    )));
                }
            }
            ValueType::Text => {
                std::str::from_utf8(&payload[1..]).map_err(|e| {
                    CoreError::Corruption(format!("invalid UTF-8 in text payload: {e}"))
                })?;
            }
            ValueType::Timestamp => {
                let millis = decode_i64(read_be_u64(payload));
                if DateTime::from_timestamp_millis(millis).is_none() {
                    return Err(CoreError::Corruption(format!(
                        "timestamp out of range: {millis}"
                    )));
                }
            }
            ValueType::Integer | ValueType::Float => {}
        }

        Ok(Self { iid: Iid::new(bytes.to_vec()), value_type })
    }

    /// Decodes the attribute identifier starting at `from` in a composite
    /// key.
    ///
    /// The span is read from the tag byte (and, for text, the length byte);
    /// no bytes past it are touched.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Corruption`] if the buffer is too short or the
    /// bytes are not a well-formed attribute identifier.
    pub fn extract(buf: &[u8], from: usize) -> Result<Self, CoreError> {
        let len = Self::encoded_len_at(buf, from)?;
        let window = from.checked_add(len).and_then(|end| buf.get(from..end)).ok_or_else(
            || CoreError::Corruption(format!("truncated attribute identifier at offset {from}")),
        )?;
        Self::decode(window)
    }

    /// Computes the encoded length of the attribute identifier at `from`
    /// from its tag and length bytes alone.
    fn encoded_len_at(buf: &[u8], from: usize) -> Result<usize, CoreError> {
        let tag_index = from.checked_add(Self::VALUE_TYPE_INDEX).ok_or_else(|| {
            CoreError::Corruption(format!("truncated attribute identifier at offset {from}"))
        })?;
        let tag = buf.get(tag_index).ok_or_else(|| {
            CoreError::Corruption(format!("truncated attribute identifier at offset {from}"))
        })?;
        match ValueType::from_byte(*tag)?.fixed_payload_len() {
            Some(len) => Ok(Self::VALUE_INDEX + len),
            None => {
                let text_len = buf.get(tag_index + 1).ok_or_else(|| {
                    CoreError::Corruption(format!(
                        "truncated attribute identifier at offset {from}"
                    ))
                })?;
                Ok(Self::VALUE_INDEX + 1 + usize::from(*text_len))
            }
        }
    }

    /// Decodes the embedded value.
    ///
    /// This recomputes the value from the stored bytes on every call; the
    /// payload was validated when the identifier was constructed.
    #[must_use]
    pub fn value(&self) -> AttributeValue {
        let payload = self.payload();
        match self.value_type {
            ValueType::Boolean => AttributeValue::Boolean(payload[0] != 0),
            ValueType::Integer => AttributeValue::Integer(decode_i64(read_be_u64(payload))),
            ValueType::Float => AttributeValue::Float(decode_f64(read_be_u64(payload))),
            ValueType::Text => {
                AttributeValue::Text(String::from_utf8_lossy(&payload[1..]).into_owned())
            }
            ValueType::Timestamp => {
                let millis = decode_i64(read_be_u64(payload));
                // Range-checked at construction.
                AttributeValue::Timestamp(
                    DateTime::from_timestamp_millis(millis).unwrap_or(DateTime::UNIX_EPOCH),
                )
            }
        }
    }

    /// Returns the value type encoded in the tag byte.
    #[inline]
    #[must_use]
    pub const fn value_type(&self) -> ValueType {
        self.value_type
    }

    /// Returns the kind encoded in the discriminator byte.
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> ThingKind {
        ThingKind::Attribute
    }

    /// Returns the identifier of the owning attribute type.
    #[must_use]
    pub fn type_iid(&self) -> TypeIid {
        let bytes = self.iid.as_bytes();
        TypeIid::new(TypeKind::Attribute, read_be_u16(&bytes[2..]))
    }

    /// Returns the bytes past the kind and owner header: the tag and the
    /// payload.
    #[inline]
    #[must_use]
    pub fn key(&self) -> &[u8] {
        &self.iid.as_bytes()[ThingIid::HEADER_LENGTH..]
    }

    fn payload(&self) -> &[u8] {
        &self.iid.as_bytes()[Self::VALUE_INDEX..]
    }

    /// Returns the boolean value.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidCast`] if the value type is not boolean.
    pub fn as_boolean(&self) -> Result<bool, CoreError> {
        match self.value() {
            AttributeValue::Boolean(b) => Ok(b),
            _ => Err(self.cast_error(ValueType::Boolean)),
        }
    }

    /// Returns the integer value.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidCast`] if the value type is not integer.
    pub fn as_integer(&self) -> Result<i64, CoreError> {
        match self.value() {
            AttributeValue::Integer(i) => Ok(i),
            _ => Err(self.cast_error(ValueType::Integer)),
        }
    }

    /// Returns the float value.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidCast`] if the value type is not float.
    pub fn as_float(&self) -> Result<f64, CoreError> {
        match self.value() {
            AttributeValue::Float(f) => Ok(f),
            _ => Err(self.cast_error(ValueType::Float)),
        }
    }

    /// Returns the text value without copying it out of the key.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidCast`] if the value type is not text.
    pub fn as_text(&self) -> Result<&str, CoreError> {
        if self.value_type != ValueType::Text {
            return Err(self.cast_error(ValueType::Text));
        }
        std::str::from_utf8(&self.payload()[1..])
            .map_err(|e| CoreError::Corruption(format!("invalid UTF-8 in text payload: {e}")))
    }

    /// Returns the timestamp value.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidCast`] if the value type is not
    /// timestamp.
    pub fn as_timestamp(&self) -> Result<DateTime<Utc>, CoreError> {
        match self.value() {
            AttributeValue::Timestamp(t) => Ok(t),
            _ => Err(self.cast_error(ValueType::Timestamp)),
        }
    }

    fn cast_error(&self, expected: ValueType) -> CoreError {
        CoreError::InvalidCast {
            expected: expected.to_string(),
            actual: self.value_type.to_string(),
        }
    }

    /// Returns the encoded key bytes.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.iid.as_bytes()
    }

    /// Returns the encoded length in bytes.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.iid.len()
    }

    /// Returns `true` if there are no bytes. Never true for a decoded
    /// identifier.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.iid.is_empty()
    }
}

impl fmt::Display for AttributeIid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.iid.readable(|| {
            let rendered = match self.value() {
                AttributeValue::Boolean(b) => b.to_string(),
                AttributeValue::Integer(i) => i.to_string(),
                AttributeValue::Float(v) => v.to_string(),
                AttributeValue::Text(s) => format!("{s:?}"),
                AttributeValue::Timestamp(t) => t.to_string(),
            };
            format!(
                "[{}]{}[{}:{rendered}]",
                ThingKind::Attribute,
                self.type_iid(),
                self.value_type
            )
        }))
    }
}

impl fmt::Debug for AttributeIid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AttributeIid({self})")
    }
}
