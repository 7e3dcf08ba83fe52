//! Error types for the ledger and its storage medium.
//!
//! Reads through the ledger never surface these: an absent entry reads as
//! its default and a malformed one is logged and treated as absent. Writes
//! propagate [`StoreError`] so a failing medium is not silently ignored.

use thiserror::Error;

/// Failures of the underlying key-value medium.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading a key failed.
    #[error("failed to read '{key}': {source}")]
    Read {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// Writing or removing a key failed.
    #[error("failed to write '{key}': {source}")]
    Write {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// A value could not be serialized for storage.
    #[error("failed to serialize '{key}': {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Why a stored entry could not be turned into a value.
///
/// A key that was never written is not an error; it loads as `Ok(None)`.
#[derive(Debug, Error)]
pub enum EntryError {
    /// The stored value failed to deserialize.
    #[error("malformed value under '{key}': {source}")]
    Malformed {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// The medium itself failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl EntryError {
    /// Returns `true` if the entry exists but holds garbage.
    pub fn is_malformed(&self) -> bool {
        matches!(self, EntryError::Malformed { .. })
    }
}

/// Rejected login input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoginError {
    #[error("please enter an email")]
    MissingEmail,

    #[error("please enter a valid email")]
    InvalidEmail(String),

    #[error("please enter your name")]
    MissingName,
}
