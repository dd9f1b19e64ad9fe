//! The raw identifier value type shared by all vertex identifiers.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::OnceLock;

/// An immutable identifier: an owned byte sequence used as a storage key.
///
/// Equality, ordering, and hashing are defined purely over the bytes, and the
/// ordering is the unsigned lexicographic order the storage engine applies to
/// keys. The human-readable rendering is computed at most once and cached;
/// every reader observes the same published string.
#[derive(Clone)]
pub struct Iid {
    bytes: Box<[u8]>,
    readable: OnceLock<String>,
}

impl Iid {
    /// Wraps an encoded key. Callers guarantee at least one byte.
    pub(crate) fn new(bytes: Vec<u8>) -> Self {
        debug_assert!(!bytes.is_empty(), "identifiers are never empty");
        Self { bytes: bytes.into_boxed_slice(), readable: OnceLock::new() }
    }

    /// Returns the encoded key bytes.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns the encoded length in bytes.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` if there are no bytes. Well-formed identifiers are
    /// never empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Copies the key into a fresh buffer.
    #[inline]
    #[must_use]
    pub fn to_vec(&self) -> Vec<u8> {
        self.bytes.to_vec()
    }

    /// Returns the cached rendering, computing it with `render` on first use.
    pub(crate) fn readable<F>(&self, render: F) -> &str
    where
        F: FnOnce() -> String,
    {
        self.readable.get_or_init(render)
    }
}

impl PartialEq for Iid {
    fn eq(&self, other: &Self) -> bool {
        self.bytes == other.bytes
    }
}

impl Eq for Iid {}

impl PartialOrd for Iid {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Iid {
    fn cmp(&self, other: &Self) -> Ordering {
        self.bytes.cmp(&other.bytes)
    }
}

impl Hash for Iid {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bytes.hash(state);
    }
}

impl AsRef<[u8]> for Iid {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Display for Iid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.readable(|| hex_string(&self.bytes)))
    }
}

impl fmt::Debug for Iid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Iid(0x{})", hex_string(&self.bytes))
    }
}

fn hex_string(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// Reads a big-endian u16 from the first two bytes.
#[inline]
pub(crate) fn read_be_u16(bytes: &[u8]) -> u16 {
    u16::from_be_bytes([bytes[0], bytes[1]])
}

/// Reads a big-endian u64 from the first eight bytes.
#[inline]
pub(crate) fn read_be_u64(bytes: &[u8]) -> u64 {
    u64::from_be_bytes([
        bytes[0], bytes[1], bytes[2], bytes[3], bytes[4], bytes[5], bytes[6], bytes[7],
    ])
}
