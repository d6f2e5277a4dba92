//! Storage error taxonomy
//!
//! Classifies every way a media request can fail before any response bytes
//! are written; the handlers map each variant to its HTTP status.

use thiserror::Error;

/// Errors produced by the media store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The named object does not exist in the store (maps to 404).
    #[error("media object not found: {0}")]
    NotFound(String),

    /// The requested name contains path separators or parent references
    /// and was rejected before touching the filesystem (maps to 404).
    #[error("invalid object name: {0}")]
    InvalidName(String),

    /// The file ended before the requested slice did. Serving fewer bytes
    /// than the announced Content-Length would corrupt the transfer, so
    /// this is a storage-integrity failure (maps to 500).
    #[error("short read on {name}: wanted {wanted} bytes at offset {offset}, got {got}")]
    ShortRead {
        name: String,
        offset: u64,
        wanted: u64,
        got: u64,
    },

    /// Any other disk-level failure (maps to 500).
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
}
