//! Scan prefixes over encoded identifiers.
//!
//! Identifiers of one shape share a leading byte sequence, so a range scan
//! bounded by one of these prefixes visits exactly the identifiers of that
//! shape. Schema types cluster before data things because every [`TypeKind`]
//! discriminator is smaller than every [`ThingKind`] discriminator.

use crate::encoding::kind::{ThingKind, TypeKind, ValueType};
use crate::encoding::vertex::TypeIid;
use crate::error::CoreError;

/// Prefix of every type identifier of `kind`.
#[inline]
#[must_use]
pub fn type_scan_prefix(kind: TypeKind) -> Vec<u8> {
    vec![kind.as_byte()]
}

/// Prefix of every instance identifier owned by `owner`.
///
/// For attribute types this covers all values of all value types; narrow
/// with [`attribute_value_scan_prefix`] to a single value type.
#[inline]
#[must_use]
pub fn instance_scan_prefix(owner: &TypeIid) -> Vec<u8> {
    let mut prefix = Vec::with_capacity(1 + TypeIid::LENGTH);
    prefix.push(owner.kind().instance_kind().as_byte());
    prefix.extend_from_slice(owner.as_bytes());
    prefix
}

/// Prefix of every attribute identifier owned by `owner` holding a value of
/// `value_type`.
///
/// Keys under this prefix order by value, so sub-ranges of it express value
/// range scans.
///
/// # Errors
///
/// Returns [`CoreError::InvalidCast`] if `owner` is not an attribute type.
#[inline]
pub fn attribute_value_scan_prefix(
    owner: &TypeIid,
    value_type: ValueType,
) -> Result<Vec<u8>, CoreError> {
    if owner.kind() != TypeKind::Attribute {
        return Err(CoreError::InvalidCast {
            expected: TypeKind::Attribute.to_string(),
            actual: owner.kind().to_string(),
        });
    }
    let mut prefix = instance_scan_prefix(owner);
    prefix.push(value_type.as_byte());
    Ok(prefix)
}
