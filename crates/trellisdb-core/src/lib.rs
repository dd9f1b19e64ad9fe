//! Core vertex identifiers and storage-key encoding for `TrellisDB`.
//!
//! `TrellisDB` stores a typed graph in an ordered key-value store. This
//! crate defines the identifiers of schema types and data things and their
//! binary encoding, which is arranged so that the encoded bytes are the
//! storage keys themselves: equality, hashing, and range scans all operate
//! directly on the encoded form. See [`encoding`] for the byte layouts.
//!
//! # Example
//!
//! ```
//! use trellisdb_core::{
//!     AttributeIid, AttributeValue, MonotonicKeyGenerator, ObjectIid, TypeIid, TypeKind,
//! };
//!
//! let keys = MonotonicKeyGenerator::new();
//!
//! // Schema: an entity type and an attribute type.
//! let person = TypeIid::generate(&keys, TypeKind::Entity)?;
//! let name = TypeIid::generate(&keys, TypeKind::Attribute)?;
//!
//! // Data: a person instance and a name value.
//! let alice = ObjectIid::generate(&keys, &person)?;
//! assert_eq!(alice.type_iid(), person);
//!
//! let alice_name = AttributeIid::of(&name, &AttributeValue::from("Alice"))?;
//! assert_eq!(alice_name.as_text()?, "Alice");
//! # Ok::<(), trellisdb_core::CoreError>(())
//! ```

// Deny unwrap in library code to ensure proper error handling
#![deny(clippy::unwrap_used)]

pub mod encoding;
pub mod error;
pub mod keygen;
pub mod types;

pub use encoding::{
    AttributeIid, Iid, ObjectIid, ThingIid, ThingKind, TypeIid, TypeKind, ValueType, VertexIid,
};
pub use error::CoreError;
pub use keygen::{KeyGenerator, MonotonicKeyGenerator};
pub use types::AttributeValue;
