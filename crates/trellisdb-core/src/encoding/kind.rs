//! Vertex and value-type discriminators.
//!
//! Every encoded vertex identifier starts with a one-byte discriminator that
//! partitions the keyspace by vertex category:
//!
//! - `0x01`..`0x04` - schema type vertices ([`TypeKind`])
//! - `0x11`..`0x14` - data thing vertices ([`ThingKind`])
//!
//! Attribute identifiers additionally carry a one-byte value-type tag
//! ([`ValueType`]) after the owning-type window.
//!
//! The byte values are a frozen storage contract: keys written with them are
//! persisted, so variants may be added but existing values must never change.
//! Schema bytes sort below instance bytes, which keeps all schema vertices in
//! one contiguous region of the keyspace.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CoreError;
use crate::types::AttributeValue;

/// The category of a schema type vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum TypeKind {
    /// Entity type
    Entity = 0x01,
    /// Relation type
    Relation = 0x02,
    /// Role type
    Role = 0x03,
    /// Attribute type
    Attribute = 0x04,
}

impl TypeKind {
    /// Returns the discriminator byte for this kind.
    #[inline]
    #[must_use]
    pub const fn as_byte(self) -> u8 {
        self as u8
    }

    /// Looks up the kind for a discriminator byte.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Corruption`] if the byte is not a type
    /// discriminator.
    pub fn from_byte(byte: u8) -> Result<Self, CoreError> {
        match byte {
            0x01 => Ok(Self::Entity),
            0x02 => Ok(Self::Relation),
            0x03 => Ok(Self::Role),
            0x04 => Ok(Self::Attribute),
            other => {
                Err(CoreError::Corruption(format!("unknown type discriminator: {other:#x}")))
            }
        }
    }

    /// Returns the discriminator kind for instances of this type.
    #[inline]
    #[must_use]
    pub const fn instance_kind(self) -> ThingKind {
        match self {
            Self::Entity => ThingKind::Entity,
            Self::Relation => ThingKind::Relation,
            Self::Role => ThingKind::Role,
            Self::Attribute => ThingKind::Attribute,
        }
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Entity => "entity_type",
            Self::Relation => "relation_type",
            Self::Role => "role_type",
            Self::Attribute => "attribute_type",
        })
    }
}

/// The category of a data thing vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum ThingKind {
    /// Entity instance
    Entity = 0x11,
    /// Relation instance
    Relation = 0x12,
    /// Role instance
    Role = 0x13,
    /// Attribute instance
    Attribute = 0x14,
}

impl ThingKind {
    /// Returns the discriminator byte for this kind.
    #[inline]
    #[must_use]
    pub const fn as_byte(self) -> u8 {
        self as u8
    }

    /// Looks up the kind for a discriminator byte.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Corruption`] if the byte is not a thing
    /// discriminator.
    pub fn from_byte(byte: u8) -> Result<Self, CoreError> {
        match byte {
            0x11 => Ok(Self::Entity),
            0x12 => Ok(Self::Relation),
            0x13 => Ok(Self::Role),
            0x14 => Ok(Self::Attribute),
            other => {
                Err(CoreError::Corruption(format!("unknown thing discriminator: {other:#x}")))
            }
        }
    }

    /// Returns the kind of the schema type that owns instances of this kind.
    #[inline]
    #[must_use]
    pub const fn type_kind(self) -> TypeKind {
        match self {
            Self::Entity => TypeKind::Entity,
            Self::Relation => TypeKind::Relation,
            Self::Role => TypeKind::Role,
            Self::Attribute => TypeKind::Attribute,
        }
    }
}

impl fmt::Display for ThingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Entity => "entity",
            Self::Relation => "relation",
            Self::Role => "role",
            Self::Attribute => "attribute",
        })
    }
}

/// The value-type tag carried by attribute identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum ValueType {
    /// Boolean values
    Boolean = 0x01,
    /// 64-bit signed integers
    Integer = 0x02,
    /// 64-bit floating point numbers
    Float = 0x03,
    /// UTF-8 strings
    Text = 0x04,
    /// Instants in time, millisecond precision
    Timestamp = 0x05,
}

impl ValueType {
    /// Returns the tag byte for this value type.
    #[inline]
    #[must_use]
    pub const fn as_byte(self) -> u8 {
        self as u8
    }

    /// Looks up the value type for a tag byte.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Corruption`] if the byte is not a value-type tag.
    pub fn from_byte(byte: u8) -> Result<Self, CoreError> {
        match byte {
            0x01 => Ok(Self::Boolean),
            0x02 => Ok(Self::Integer),
            0x03 => Ok(Self::Float),
            0x04 => Ok(Self::Text),
            0x05 => Ok(Self::Timestamp),
            other => Err(CoreError::Corruption(format!("unknown value type tag: {other:#x}"))),
        }
    }

    /// Returns the value type of an attribute value.
    #[must_use]
    pub fn of(value: &AttributeValue) -> Self {
        match value {
            AttributeValue::Boolean(_) => Self::Boolean,
            AttributeValue::Integer(_) => Self::Integer,
            AttributeValue::Float(_) => Self::Float,
            AttributeValue::Text(_) => Self::Text,
            AttributeValue::Timestamp(_) => Self::Timestamp,
        }
    }

    /// Returns the payload width in bytes, or `None` for length-prefixed
    /// variable-width payloads.
    #[inline]
    #[must_use]
    pub const fn fixed_payload_len(self) -> Option<usize> {
        match self {
            Self::Boolean => Some(1),
            Self::Integer | Self::Float | Self::Timestamp => Some(8),
            Self::Text => None,
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Text => "text",
            Self::Timestamp => "timestamp",
        })
    }
}
