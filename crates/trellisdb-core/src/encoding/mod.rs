//! Binary encoding of graph identifiers as ordered storage keys.
//!
//! Every vertex of the graph is identified by a byte string that doubles as
//! its key in the backing key-value store. The encoding is designed around
//! lexicographic byte order:
//!
//! - identifiers of one kind share a leading discriminator byte, so a kind
//!   is one prefix scan
//! - instances embed their owning type right after the discriminator, so a
//!   type's extent is one prefix scan
//! - counters and attribute payloads are order-preserving, so range scans
//!   follow numeric and chronological order
//!
//! Identifier layouts:
//!
//! - [`TypeIid`]: `[type kind][u16 counter]`, 3 bytes
//! - [`ObjectIid`]: `[thing kind][owner type iid][u64 counter]`, 12 bytes
//! - [`AttributeIid`]: `[thing kind][owner type iid][value tag][payload]`,
//!   variable length
//!
//! [`VertexIid`] and [`ThingIid`] are the sum types over these; their
//! `decode` and `extract` constructors dispatch on the discriminator bytes,
//! so identifiers of mixed shapes can be read back out of composite keys
//! without any external framing.
//!
//! The byte values behind the layouts are a persistence contract. Changing
//! any of them invalidates existing stores and requires bumping
//! [`ENCODING_VERSION`].

/// Version of the identifier byte layout, stored in store manifests.
pub const ENCODING_VERSION: u8 = 1;

mod attribute;
mod iid;
mod kind;
pub mod keys;
mod vertex;

#[cfg(test)]
mod proptest_tests;

pub use attribute::AttributeIid;
pub use iid::Iid;
pub use kind::{ThingKind, TypeKind, ValueType};
pub use vertex::{ObjectIid, ThingIid, TypeIid, VertexIid};
