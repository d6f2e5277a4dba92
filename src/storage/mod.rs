//! Media storage namespace
//!
//! A flat directory of immutable media objects keyed by opaque filenames.
//! Uploads are content-addressed ([`ContentId`]) and published with a
//! write-then-rename, so an object is never discoverable before its bytes
//! are fully on disk and readers never observe partial writes.

mod id;

pub use id::ContentId;

use crate::error::StoreError;
use std::io::SeekFrom;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::fs;
use tokio::io::{AsyncReadExt, AsyncSeekExt};

/// Distinguishes concurrent in-flight uploads writing temp files.
static TMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Metadata of a successfully stored object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    /// Content-addressed filename the object is served under
    pub filename: String,
    /// Object size in bytes
    pub size: u64,
}

/// Flat-directory store for uploaded media.
///
/// Filenames are opaque keys; any name containing a path separator or a
/// parent reference is rejected before the filesystem is consulted.
#[derive(Debug, Clone)]
pub struct MediaStore {
    root: PathBuf,
}

impl MediaStore {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory holding the stored objects.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the storage directory if it does not exist yet.
    pub async fn ensure_root(&self) -> Result<(), StoreError> {
        fs::create_dir_all(&self.root).await?;
        Ok(())
    }

    /// Check whether an object exists. Invalid names simply do not exist.
    pub async fn exists(&self, name: &str) -> bool {
        match self.object_path(name) {
            Ok(path) => fs::metadata(&path)
                .await
                .map(|m| m.is_file())
                .unwrap_or(false),
            Err(_) => false,
        }
    }

    /// Byte length of a stored object.
    pub async fn size(&self, name: &str) -> Result<u64, StoreError> {
        let path = self.object_path(name)?;
        let meta = fs::metadata(&path)
            .await
            .map_err(|e| Self::map_not_found(e, name))?;
        if !meta.is_file() {
            return Err(StoreError::NotFound(name.to_string()));
        }
        Ok(meta.len())
    }

    /// Read the entire object into memory.
    pub async fn read_full(&self, name: &str) -> Result<Vec<u8>, StoreError> {
        let path = self.object_path(name)?;
        fs::read(&path)
            .await
            .map_err(|e| Self::map_not_found(e, name))
    }

    /// Read exactly `length` bytes starting at offset `start`.
    ///
    /// Hitting EOF before the slice is filled is a [`StoreError::ShortRead`]:
    /// objects are immutable once published, so a short read means the store
    /// and the just-measured size disagree, and silently truncating would
    /// send a body shorter than the announced Content-Length.
    pub async fn read_slice(
        &self,
        name: &str,
        start: u64,
        length: u64,
    ) -> Result<Vec<u8>, StoreError> {
        let path = self.object_path(name)?;
        let capacity = usize::try_from(length).map_err(|_| {
            StoreError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "slice length exceeds addressable memory",
            ))
        })?;

        // File handle is scoped to this call; dropped on every exit path.
        let mut file = fs::File::open(&path)
            .await
            .map_err(|e| Self::map_not_found(e, name))?;
        file.seek(SeekFrom::Start(start)).await?;

        let mut buf = vec![0u8; capacity];
        let mut filled = 0;
        while filled < buf.len() {
            let n = file.read(&mut buf[filled..]).await?;
            if n == 0 {
                return Err(StoreError::ShortRead {
                    name: name.to_string(),
                    offset: start,
                    wanted: length,
                    got: filled as u64,
                });
            }
            filled += n;
        }
        Ok(buf)
    }

    /// Store a payload under its content address, keeping the original
    /// name's extension so the MIME resolver can classify it later.
    ///
    /// Write-then-publish: bytes go to a temp file in the same directory
    /// and are renamed into place, so `exists` never returns true for a
    /// partially written object. Re-storing identical content is idempotent.
    pub async fn store(&self, original_name: &str, bytes: &[u8]) -> Result<StoredObject, StoreError> {
        let id = ContentId::from_bytes(bytes);
        let filename = match extension_of(original_name) {
            Some(ext) => format!("{id}.{ext}"),
            None => id.to_string(),
        };
        // Published names are content ids plus a sanitized extension, but
        // re-validate anyway before joining paths.
        let target = self.object_path(&filename)?;

        let tmp_tag = TMP_COUNTER.fetch_add(1, Ordering::Relaxed);
        let tmp = self
            .root
            .join(format!(".{filename}.{}.{tmp_tag}.tmp", std::process::id()));

        fs::write(&tmp, bytes).await?;
        if let Err(e) = fs::rename(&tmp, &target).await {
            // Leave no temp file behind on a failed publish.
            let _ = fs::remove_file(&tmp).await;
            return Err(e.into());
        }

        Ok(StoredObject {
            filename,
            size: bytes.len() as u64,
        })
    }

    /// Resolve a name to its on-disk path, rejecting traversal attempts.
    fn object_path(&self, name: &str) -> Result<PathBuf, StoreError> {
        if name.is_empty()
            || name.contains('/')
            || name.contains('\\')
            || name.contains("..")
            || name.contains('\0')
        {
            return Err(StoreError::InvalidName(name.to_string()));
        }
        Ok(self.root.join(name))
    }

    fn map_not_found(e: std::io::Error, name: &str) -> StoreError {
        if e.kind() == std::io::ErrorKind::NotFound {
            StoreError::NotFound(name.to_string())
        } else {
            StoreError::Io(e)
        }
    }
}

/// Lower-cased extension of an uploaded name, if it has a usable one.
fn extension_of(name: &str) -> Option<String> {
    let (_, ext) = name.rsplit_once('.')?;
    if ext.is_empty() || ext.contains('/') || ext.contains('\\') {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}
