//! Content identifiers for stored media
//!
//! An object's identity is the CRC32 of its bytes plus its length, rendered
//! as `<crc32 hex>_<size>`. Two uploads with identical content collapse to
//! the same stored name.

use crc32fast::Hasher;
use std::fmt;

/// Content address of a media object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentId {
    pub crc32: u32,
    pub size: u64,
}

impl ContentId {
    /// Compute the identifier of an in-memory payload.
    #[must_use]
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut hasher = Hasher::new();
        hasher.update(bytes);
        Self {
            crc32: hasher.finalize(),
            size: bytes.len() as u64,
        }
    }
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08x}_{}", self.crc32, self.size)
    }
}
