//! Vertex identifiers: schema types, default things, and the dispatch
//! umbrella over every vertex form.
//!
//! Three encoded forms exist (see the module docs on [`super`] for the byte
//! layouts): the 3-byte type identifier, the 12-byte default thing
//! identifier, and the variable-length attribute identifier. Decoding always
//! starts from the leading discriminator byte, so an identifier can be read
//! back out of any offset inside a larger composite key.

use std::cmp::Ordering;
use std::fmt;

use crate::encoding::attribute::AttributeIid;
use crate::encoding::iid::{read_be_u16, read_be_u64, Iid};
use crate::encoding::kind::{ThingKind, TypeKind};
use crate::error::CoreError;
use crate::keygen::KeyGenerator;

/// Identifier of a schema type vertex.
///
/// Layout: `[type kind][counter u16 BE]`, 3 bytes. The big-endian counter
/// makes the byte order of two identifiers of the same kind equal the
/// allocation order of their counters.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypeIid {
    iid: Iid,
    kind: TypeKind,
}

impl TypeIid {
    /// Encoded length in bytes.
    pub const LENGTH: usize = 3;

    /// Builds the identifier for a known kind and counter.
    #[must_use]
    pub fn new(kind: TypeKind, counter: u16) -> Self {
        let mut bytes = Vec::with_capacity(Self::LENGTH);
        bytes.push(kind.as_byte());
        bytes.extend_from_slice(&counter.to_be_bytes());
        Self { iid: Iid::new(bytes), kind }
    }

    /// Allocates a fresh identifier for a new schema type.
    ///
    /// # Errors
    ///
    /// Propagates allocator failures such as
    /// [`CoreError::KeySpaceExhausted`] unchanged.
    pub fn generate(generator: &dyn KeyGenerator, kind: TypeKind) -> Result<Self, CoreError> {
        let counter = generator.type_key(kind)?;
        Ok(Self::new(kind, counter))
    }

    /// Reinterprets an exact encoded type identifier.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Corruption`] if the length is not
    /// [`Self::LENGTH`] or the discriminator is unknown.
    pub fn decode(bytes: &[u8]) -> Result<Self, CoreError> {
        if bytes.len() != Self::LENGTH {
            return Err(CoreError::Corruption(format!(
                "type identifier must be {} bytes, got {}",
                Self::LENGTH,
                bytes.len()
            )));
        }
        let kind = TypeKind::from_byte(bytes[0])?;
        Ok(Self { iid: Iid::new(bytes.to_vec()), kind })
    }

    /// Decodes the type identifier starting at `from` in a composite key.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Corruption`] if the buffer is too short or the
    /// bytes are not a type identifier.
    pub fn extract(buf: &[u8], from: usize) -> Result<Self, CoreError> {
        let window = from
            .checked_add(Self::LENGTH)
            .and_then(|end| buf.get(from..end))
            .ok_or_else(|| {
                CoreError::Corruption(format!("truncated type identifier at offset {from}"))
            })?;
        Self::decode(window)
    }

    /// Returns the kind encoded in the discriminator byte.
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> TypeKind {
        self.kind
    }

    /// Returns the allocated counter.
    #[must_use]
    pub fn counter(&self) -> u16 {
        read_be_u16(&self.iid.as_bytes()[1..])
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

impl fmt::Display for TypeIid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.iid.readable(|| format!("[{}:{}]", self.kind, self.counter())))
    }
}

impl fmt::Debug for TypeIid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeIid({self})")
    }
}

/// Identifier of a default-form thing vertex: an entity, relation, or role
/// instance.
///
/// Layout: `[thing kind][owner type iid][counter u64 BE]`, 12 bytes.
/// Attribute instances never take this form; their identifier embeds the
/// value instead of a counter (see [`AttributeIid`]).
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectIid {
    iid: Iid,
    kind: ThingKind,
}

impl ObjectIid {
    /// Encoded length in bytes.
    pub const LENGTH: usize = ThingIid::HEADER_LENGTH + 8;

    /// Builds the identifier for a known owner and counter.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Encoding`] if the owner is an attribute type.
    pub fn new(owner: &TypeIid, counter: u64) -> Result<Self, CoreError> {
        Self::check_owner(owner)?;
        Ok(Self::assemble(owner, counter))
    }

    /// Allocates a fresh identifier for a new instance of `owner`.
    ///
    /// The instance discriminator is derived from the owner's kind, so an
    /// entity type always produces entity instances.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Encoding`] if the owner is an attribute type;
    /// allocator failures propagate unchanged.
    pub fn generate(generator: &dyn KeyGenerator, owner: &TypeIid) -> Result<Self, CoreError> {
        Self::check_owner(owner)?;
        let counter = generator.thing_key(owner)?;
        Ok(Self::assemble(owner, counter))
    }

    fn check_owner(owner: &TypeIid) -> Result<(), CoreError> {
        if owner.kind() == TypeKind::Attribute {
            return Err(CoreError::Encoding(format!(
                "attribute instances embed their value and are never default-form: {owner}"
            )));
        }
        Ok(())
    }

    fn assemble(owner: &TypeIid, counter: u64) -> Self {
        let kind = owner.kind().instance_kind();
        let mut bytes = Vec::with_capacity(Self::LENGTH);
        bytes.push(kind.as_byte());
        bytes.extend_from_slice(owner.as_bytes());
        bytes.extend_from_slice(&counter.to_be_bytes());
        Self { iid: Iid::new(bytes), kind }
    }

    /// Reinterprets an exact encoded default thing identifier.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Corruption`] if the length is wrong, a
    /// discriminator is unknown, the owner is an attribute type, or the
    /// instance discriminator does not match the owner's kind.
    pub fn decode(bytes: &[u8]) -> Result<Self, CoreError> {
        if bytes.len() != Self::LENGTH {
            return Err(CoreError::Corruption(format!(
                "default thing identifier must be {} bytes, got {}",
                Self::LENGTH,
                bytes.len()
            )));
        }
        let kind = ThingKind::from_byte(bytes[0])?;
        let owner = TypeIid::decode(&bytes[1..=TypeIid::LENGTH])?;
        if owner.kind() == TypeKind::Attribute {
            return Err(CoreError::Corruption(
                "attribute identifiers are never default-form".into(),
            ));
        }
        if owner.kind().instance_kind() != kind {
            return Err(CoreError::Corruption(format!(
                "instance discriminator {kind} does not match owner {}",
                owner.kind()
            )));
        }
        Ok(Self { iid: Iid::new(bytes.to_vec()), kind })
    }

    /// Decodes the default thing identifier starting at `from` in a
    /// composite key.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Corruption`] if the buffer is too short or the
    /// bytes are not a default thing identifier.
    pub fn extract(buf: &[u8], from: usize) -> Result<Self, CoreError> {
        let window = from
            .checked_add(Self::LENGTH)
            .and_then(|end| buf.get(from..end))
            .ok_or_else(|| {
                CoreError::Corruption(format!(
                    "truncated default thing identifier at offset {from}"
                ))
            })?;
        Self::decode(window)
    }

    /// Returns the kind encoded in the discriminator byte.
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> ThingKind {
        self.kind
    }

    /// Returns the identifier of the owning schema type.
    #[must_use]
    pub fn type_iid(&self) -> TypeIid {
        let bytes = self.iid.as_bytes();
        TypeIid::new(self.kind.type_kind(), read_be_u16(&bytes[2..]))
    }

    /// Returns the trailing counter bytes. Opaque at this layer; the value
    /// only guarantees uniqueness within the owning type.
    #[inline]
    #[must_use]
    pub fn key(&self) -> &[u8] {
        &self.iid.as_bytes()[ThingIid::HEADER_LENGTH..]
    }

    /// Returns the allocated counter.
    #[must_use]
    pub fn counter(&self) -> u64 {
        read_be_u64(self.key())
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

impl fmt::Display for ObjectIid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(
            self.iid.readable(|| format!("[{}]{}[{}]", self.kind, self.type_iid(), self.counter())),
        )
    }
}

impl fmt::Debug for ObjectIid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectIid({self})")
    }
}

/// Identifier of any data thing vertex.
///
/// The two forms are distinguished by the owning-type discriminator at byte
/// index 1: instances of attribute types always take the attribute form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ThingIid {
    /// A default-form instance: entity, relation, or role.
    Object(ObjectIid),
    /// An attribute instance carrying its value in the key.
    Attribute(AttributeIid),
}

impl ThingIid {
    /// Length of the discriminator plus the embedded owner type identifier.
    pub const HEADER_LENGTH: usize = 1 + TypeIid::LENGTH;

    /// Reinterprets an exact encoded thing identifier of either form.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Corruption`] if the bytes are not a well-formed
    /// thing identifier.
    pub fn decode(bytes: &[u8]) -> Result<Self, CoreError> {
        let owner_byte = bytes.get(1).ok_or_else(|| {
            CoreError::Corruption(format!("truncated thing identifier of {} bytes", bytes.len()))
        })?;
        if *owner_byte == TypeKind::Attribute.as_byte() {
            AttributeIid::decode(bytes).map(Self::Attribute)
        } else {
            ObjectIid::decode(bytes).map(Self::Object)
        }
    }

    /// Decodes the thing identifier starting at `from` in a composite key.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Corruption`] if the buffer is too short or the
    /// bytes are not a well-formed thing identifier.
    pub fn extract(buf: &[u8], from: usize) -> Result<Self, CoreError> {
        let owner_byte = from
            .checked_add(1)
            .and_then(|index| buf.get(index))
            .ok_or_else(|| {
                CoreError::Corruption(format!("truncated thing identifier at offset {from}"))
            })?;
        if *owner_byte == TypeKind::Attribute.as_byte() {
            AttributeIid::extract(buf, from).map(Self::Attribute)
        } else {
            ObjectIid::extract(buf, from).map(Self::Object)
        }
    }

    /// Returns the kind encoded in the discriminator byte.
    #[must_use]
    pub const fn kind(&self) -> ThingKind {
        match self {
            Self::Object(o) => o.kind(),
            Self::Attribute(a) => a.kind(),
        }
    }

    /// Returns the identifier of the owning schema type.
    #[must_use]
    pub fn type_iid(&self) -> TypeIid {
        match self {
            Self::Object(o) => o.type_iid(),
            Self::Attribute(a) => a.type_iid(),
        }
    }

    /// Returns the bytes past the kind and owner header: the counter for
    /// default-form things, the tag and payload for attributes.
    #[must_use]
    pub fn key(&self) -> &[u8] {
        match self {
            Self::Object(o) => o.key(),
            Self::Attribute(a) => a.key(),
        }
    }

    /// Casts to the attribute form.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidCast`] if this is a default-form
    /// identifier.
    pub fn as_attribute(&self) -> Result<&AttributeIid, CoreError> {
        match self {
            Self::Attribute(a) => Ok(a),
            Self::Object(o) => Err(CoreError::InvalidCast {
                expected: ThingKind::Attribute.to_string(),
                actual: o.kind().to_string(),
            }),
        }
    }

    /// Casts to the default form.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidCast`] if this is an attribute
    /// identifier.
    pub fn as_object(&self) -> Result<&ObjectIid, CoreError> {
        match self {
            Self::Object(o) => Ok(o),
            Self::Attribute(a) => Err(CoreError::InvalidCast {
                expected: "default-form thing".to_owned(),
                actual: a.kind().to_string(),
            }),
        }
    }

    /// Returns the encoded key bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Object(o) => o.as_bytes(),
            Self::Attribute(a) => a.as_bytes(),
        }
    }

    /// Returns the encoded length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    /// Returns `true` if there are no bytes. Never true for a decoded
    /// identifier.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.as_bytes().is_empty()
    }
}

impl PartialOrd for ThingIid {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ThingIid {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_bytes().cmp(other.as_bytes())
    }
}

impl From<ObjectIid> for ThingIid {
    #[inline]
    fn from(iid: ObjectIid) -> Self {
        Self::Object(iid)
    }
}

impl From<AttributeIid> for ThingIid {
    #[inline]
    fn from(iid: AttributeIid) -> Self {
        Self::Attribute(iid)
    }
}

impl fmt::Display for ThingIid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Object(o) => o.fmt(f),
            Self::Attribute(a) => a.fmt(f),
        }
    }
}

/// Identifier of any vertex: schema type or data thing.
///
/// This is the entry point for reading composite keys. The leading byte
/// decides the form, the form decides the span, so a sequence of
/// concatenated identifiers can be walked by repeated extraction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum VertexIid {
    /// A schema type vertex.
    Type(TypeIid),
    /// A data thing vertex.
    Thing(ThingIid),
}

impl VertexIid {
    /// Decodes the vertex identifier starting at `from` in a composite key.
    ///
    /// The span is determined entirely by the discriminator, tag, and length
    /// bytes: exactly `len()` bytes are read, so callers advance their
    /// offset by the returned identifier's length.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Corruption`] if the buffer is too short or the
    /// bytes at `from` are not a well-formed vertex identifier.
    pub fn extract(buf: &[u8], from: usize) -> Result<Self, CoreError> {
        let byte = *buf.get(from).ok_or_else(|| {
            CoreError::Corruption(format!("truncated vertex identifier at offset {from}"))
        })?;
        if TypeKind::from_byte(byte).is_ok() {
            TypeIid::extract(buf, from).map(Self::Type)
        } else if ThingKind::from_byte(byte).is_ok() {
            ThingIid::extract(buf, from).map(Self::Thing)
        } else {
            Err(CoreError::Corruption(format!("unknown vertex discriminator: {byte:#x}")))
        }
    }

    /// Reinterprets an exact encoded vertex identifier.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Corruption`] if the bytes are malformed or if
    /// trailing bytes follow the identifier.
    pub fn decode(bytes: &[u8]) -> Result<Self, CoreError> {
        let vertex = Self::extract(bytes, 0)?;
        if vertex.len() != bytes.len() {
            return Err(CoreError::Corruption(format!(
                "vertex identifier of {} bytes followed by {} trailing bytes",
                vertex.len(),
                bytes.len() - vertex.len()
            )));
        }
        Ok(vertex)
    }

    /// Casts to a schema type identifier.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidCast`] if this is a thing identifier.
    pub fn as_type(&self) -> Result<&TypeIid, CoreError> {
        match self {
            Self::Type(t) => Ok(t),
            Self::Thing(t) => Err(CoreError::InvalidCast {
                expected: "schema type".to_owned(),
                actual: t.kind().to_string(),
            }),
        }
    }

    /// Casts to a data thing identifier.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidCast`] if this is a type identifier.
    pub fn as_thing(&self) -> Result<&ThingIid, CoreError> {
        match self {
            Self::Thing(t) => Ok(t),
            Self::Type(t) => Err(CoreError::InvalidCast {
                expected: "data thing".to_owned(),
                actual: t.kind().to_string(),
            }),
        }
    }

    /// Returns the leading discriminator byte.
    #[must_use]
    pub fn kind_byte(&self) -> u8 {
        self.as_bytes()[0]
    }

    /// Returns the encoded key bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Type(t) => t.as_bytes(),
            Self::Thing(t) => t.as_bytes(),
        }
    }

    /// Returns the encoded length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    /// Returns `true` if there are no bytes. Never true for a decoded
    /// identifier.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.as_bytes().is_empty()
    }
}

impl PartialOrd for VertexIid {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for VertexIid {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_bytes().cmp(other.as_bytes())
    }
}

impl From<TypeIid> for VertexIid {
    #[inline]
    fn from(iid: TypeIid) -> Self {
        Self::Type(iid)
    }
}

impl From<ThingIid> for VertexIid {
    #[inline]
    fn from(iid: ThingIid) -> Self {
        Self::Thing(iid)
    }
}

impl From<ObjectIid> for VertexIid {
    #[inline]
    fn from(iid: ObjectIid) -> Self {
        Self::Thing(ThingIid::Object(iid))
    }
}

impl From<AttributeIid> for VertexIid {
    #[inline]
    fn from(iid: AttributeIid) -> Self {
        Self::Thing(ThingIid::Attribute(iid))
    }
}

impl fmt::Display for VertexIid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Type(t) => t.fmt(f),
            Self::Thing(t) => t.fmt(f),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn type_iid_layout() {
        let iid = TypeIid::new(TypeKind::Entity, 7);
        assert_eq!(iid.as_bytes(), &[0x01, 0x00, 0x07]);
        assert_eq!(iid.len(), TypeIid::LENGTH);
        assert_eq!(iid.kind(), TypeKind::Entity);
        assert_eq!(iid.counter(), 7);
    }

    #[test]
    fn type_iid_counter_order_is_byte_order() {
        let counters = [0u16, 1, 7, 255, 256, 4096, u16::MAX];
        let iids: Vec<_> = counters.iter().map(|c| TypeIid::new(TypeKind::Role, *c)).collect();
        for window in iids.windows(2) {
            assert!(window[0].as_bytes() < window[1].as_bytes());
            assert!(window[0] < window[1]);
        }
    }

    #[test]
    fn type_iid_decode_rejects_wrong_length() {
        assert!(matches!(TypeIid::decode(&[0x01, 0x00]), Err(CoreError::Corruption(_))));
        assert!(matches!(
            TypeIid::decode(&[0x01, 0x00, 0x07, 0x00]),
            Err(CoreError::Corruption(_))
        ));
    }

    #[test]
    fn type_iid_decode_rejects_unknown_kind() {
        assert!(matches!(TypeIid::decode(&[0x7f, 0x00, 0x07]), Err(CoreError::Corruption(_))));
    }

    #[test]
    fn type_iid_roundtrip() {
        let iid = TypeIid::new(TypeKind::Attribute, 300);
        let decoded = TypeIid::decode(iid.as_bytes()).unwrap();
        assert_eq!(decoded, iid);
        assert_eq!(decoded.counter(), 300);
    }

    #[test]
    fn object_iid_layout() {
        let owner = TypeIid::new(TypeKind::Relation, 2);
        let iid = ObjectIid::new(&owner, 9).unwrap();
        assert_eq!(iid.len(), ObjectIid::LENGTH);
        assert_eq!(iid.as_bytes()[0], ThingKind::Relation.as_byte());
        assert_eq!(&iid.as_bytes()[1..4], owner.as_bytes());
        assert_eq!(iid.key(), &[0, 0, 0, 0, 0, 0, 0, 9]);
        assert_eq!(iid.counter(), 9);
        assert_eq!(iid.type_iid(), owner);
    }

    #[test]
    fn object_iid_rejects_attribute_owner() {
        let owner = TypeIid::new(TypeKind::Attribute, 1);
        assert!(matches!(ObjectIid::new(&owner, 1), Err(CoreError::Encoding(_))));
    }

    #[test]
    fn object_iid_decode_rejects_mismatched_kinds() {
        // Entity instance claiming a relation type as owner.
        let owner = TypeIid::new(TypeKind::Relation, 2);
        let mut bytes = vec![ThingKind::Entity.as_byte()];
        bytes.extend_from_slice(owner.as_bytes());
        bytes.extend_from_slice(&1u64.to_be_bytes());
        assert!(matches!(ObjectIid::decode(&bytes), Err(CoreError::Corruption(_))));
    }

    #[test]
    fn object_iid_decode_rejects_attribute_owner() {
        let owner = TypeIid::new(TypeKind::Attribute, 2);
        let mut bytes = vec![ThingKind::Attribute.as_byte()];
        bytes.extend_from_slice(owner.as_bytes());
        bytes.extend_from_slice(&1u64.to_be_bytes());
        assert!(matches!(ObjectIid::decode(&bytes), Err(CoreError::Corruption(_))));
    }

    #[test]
    fn thing_iid_routes_by_owner_kind() {
        let owner = TypeIid::new(TypeKind::Entity, 1);
        let object = ObjectIid::new(&owner, 42).unwrap();
        let decoded = ThingIid::decode(object.as_bytes()).unwrap();
        assert!(matches!(decoded, ThingIid::Object(_)));
        assert_eq!(decoded.as_bytes(), object.as_bytes());
        assert_eq!(decoded.key(), object.key());
    }

    #[test]
    fn extract_rejects_out_of_bounds_offsets() {
        let owner = TypeIid::new(TypeKind::Entity, 1);
        let object = ObjectIid::new(&owner, 42).unwrap();
        let bytes = object.as_bytes();

        assert!(ThingIid::extract(bytes, 1).is_err());
        assert!(ThingIid::extract(bytes, bytes.len()).is_err());
        assert!(ThingIid::extract(bytes, usize::MAX).is_err());
        assert!(VertexIid::extract(bytes, usize::MAX - 1).is_err());
    }

    #[test]
    fn vertex_extract_rejects_unknown_discriminator() {
        assert!(matches!(
            VertexIid::extract(&[0xee, 0x00, 0x00], 0),
            Err(CoreError::Corruption(_))
        ));
        assert!(matches!(VertexIid::extract(&[], 0), Err(CoreError::Corruption(_))));
    }

    #[test]
    fn vertex_decode_rejects_trailing_bytes() {
        let iid = TypeIid::new(TypeKind::Entity, 7);
        let mut bytes = iid.as_bytes().to_vec();
        bytes.push(0x00);
        assert!(matches!(VertexIid::decode(&bytes), Err(CoreError::Corruption(_))));
    }

    #[test]
    fn vertex_casts_are_exclusive() {
        let type_iid = VertexIid::from(TypeIid::new(TypeKind::Entity, 1));
        assert!(type_iid.as_type().is_ok());
        assert!(matches!(type_iid.as_thing(), Err(CoreError::InvalidCast { .. })));

        let owner = TypeIid::new(TypeKind::Entity, 1);
        let thing = VertexIid::from(ObjectIid::new(&owner, 5).unwrap());
        assert!(thing.as_thing().is_ok());
        assert!(matches!(thing.as_type(), Err(CoreError::InvalidCast { .. })));
    }

    #[test]
    fn rendering_is_structured_and_stable() {
        let owner = TypeIid::new(TypeKind::Entity, 2);
        assert_eq!(owner.to_string(), "[entity_type:2]");

        let object = ObjectIid::new(&owner, 7).unwrap();
        assert_eq!(object.to_string(), "[entity][entity_type:2][7]");
        assert_eq!(object.to_string(), "[entity][entity_type:2][7]");
    }

    #[test]
    fn thing_ordering_follows_bytes_across_forms() {
        use crate::types::AttributeValue;

        let entity_owner = TypeIid::new(TypeKind::Entity, 1);
        let a = ThingIid::from(ObjectIid::new(&entity_owner, 1).unwrap());
        let b = ThingIid::from(ObjectIid::new(&entity_owner, 2).unwrap());
        assert!(a < b);
        assert_eq!(a.cmp(&b), a.as_bytes().cmp(b.as_bytes()));

        // Entity instances (0x11) sort before attribute instances (0x14)
        // regardless of length, because the discriminator byte leads.
        let attr_owner = TypeIid::new(TypeKind::Attribute, 1);
        let c = ThingIid::from(AttributeIid::of(&attr_owner, &AttributeValue::Boolean(false)).unwrap());
        assert!(b < c);
        assert_eq!(b.cmp(&c), b.as_bytes().cmp(c.as_bytes()));
    }
}
