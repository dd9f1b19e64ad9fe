//! Error types for the core crate.

use thiserror::Error;

/// Errors that can occur in the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A typed accessor was used on an identifier of a different kind.
    #[error("invalid cast: expected {expected}, got {actual}")]
    InvalidCast {
        /// The kind the caller asked for.
        expected: String,
        /// The kind the identifier actually has.
        actual: String,
    },

    /// A value cannot be encoded under its variant's constraints.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// Persisted bytes do not form a well-formed identifier.
    #[error("data corruption: {0}")]
    Corruption(String),

    /// A counter namespace has no keys left to hand out.
    #[error("key space exhausted for {namespace}")]
    KeySpaceExhausted {
        /// The namespace that ran out.
        namespace: String,
    },
}

impl CoreError {
    /// Returns `true` if the error is an ordinary, recoverable failure.
    ///
    /// Casting and construction errors can be handled by the caller.
    /// Corruption and exhaustion are fatal: corrupt bytes mean the store
    /// itself is damaged, and an exhausted key space cannot be retried.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::InvalidCast { .. } | Self::Encoding(_))
    }
}
