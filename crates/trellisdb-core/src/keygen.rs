//! Counter allocation for newly created identifiers.
//!
//! [`TypeIid::generate`] and [`ObjectIid::generate`] take the allocator as a
//! `&dyn KeyGenerator`, so storage layers can plug in a durable
//! implementation. [`MonotonicKeyGenerator`] is the in-memory one: counters
//! start at 1 (0 is reserved), every allocation is unique, and exhausted
//! namespaces report [`CoreError::KeySpaceExhausted`] instead of wrapping.
//!
//! [`TypeIid::generate`]: crate::encoding::TypeIid::generate
//! [`ObjectIid::generate`]: crate::encoding::ObjectIid::generate

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use crate::encoding::{TypeIid, TypeKind};
use crate::error::CoreError;

/// Source of the counter portion of new identifiers.
pub trait KeyGenerator: Send + Sync {
    /// Allocates the next type counter within `kind`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::KeySpaceExhausted`] if the namespace has no
    /// counters left.
    fn type_key(&self, kind: TypeKind) -> Result<u16, CoreError>;

    /// Allocates the next instance counter within `owner`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::KeySpaceExhausted`] if the namespace has no
    /// counters left.
    fn thing_key(&self, owner: &TypeIid) -> Result<u64, CoreError>;
}

/// In-memory monotonic allocator with one counter per namespace.
///
/// Counters are not persisted; after a restart, replay the high-water marks
/// with [`Self::restore_type_counter`] and [`Self::restore_thing_counter`]
/// before allocating.
pub struct MonotonicKeyGenerator {
    type_counters: Mutex<HashMap<TypeKind, u16>>,
    thing_counters: Mutex<HashMap<TypeIid, u64>>,
}

impl MonotonicKeyGenerator {
    /// Creates an allocator with every namespace at its first counter.
    #[must_use]
    pub fn new() -> Self {
        Self {
            type_counters: Mutex::new(HashMap::new()),
            thing_counters: Mutex::new(HashMap::new()),
        }
    }

    /// Sets the next counter to allocate for `kind`.
    pub fn restore_type_counter(&self, kind: TypeKind, next: u16) {
        let mut counters = self.type_counters.lock().unwrap_or_else(PoisonError::into_inner);
        counters.insert(kind, next);
    }

    /// Sets the next counter to allocate for instances of `owner`.
    pub fn restore_thing_counter(&self, owner: &TypeIid, next: u64) {
        let mut counters = self.thing_counters.lock().unwrap_or_else(PoisonError::into_inner);
        counters.insert(owner.clone(), next);
    }

    /// Returns the next counter that would be allocated for `kind`.
    #[must_use]
    pub fn current_type_counter(&self, kind: TypeKind) -> u16 {
        let counters = self.type_counters.lock().unwrap_or_else(PoisonError::into_inner);
        counters.get(&kind).copied().unwrap_or(1)
    }

    /// Returns the next counter that would be allocated for instances of
    /// `owner`.
    #[must_use]
    pub fn current_thing_counter(&self, owner: &TypeIid) -> u64 {
        let counters = self.thing_counters.lock().unwrap_or_else(PoisonError::into_inner);
        counters.get(owner).copied().unwrap_or(1)
    }
}

impl Default for MonotonicKeyGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyGenerator for MonotonicKeyGenerator {
    fn type_key(&self, kind: TypeKind) -> Result<u16, CoreError> {
        let mut counters = self.type_counters.lock().unwrap_or_else(PoisonError::into_inner);
        let next = counters.entry(kind).or_insert(1);
        let key = *next;
        // The maximum is the exhaustion sentinel and is never issued.
        if key == u16::MAX {
            return Err(CoreError::KeySpaceExhausted { namespace: kind.to_string() });
        }
        *next = key + 1;
        Ok(key)
    }

    fn thing_key(&self, owner: &TypeIid) -> Result<u64, CoreError> {
        let mut counters = self.thing_counters.lock().unwrap_or_else(PoisonError::into_inner);
        let next = counters.entry(owner.clone()).or_insert(1);
        let key = *next;
        if key == u64::MAX {
            return Err(CoreError::KeySpaceExhausted { namespace: owner.to_string() });
        }
        *next = key + 1;
        Ok(key)
    }
}
