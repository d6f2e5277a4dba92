//! Byte-range media delivery module
//!
//! Answers a single GET/HEAD for a stored media object: 200 with the full
//! body, 206 with a single byte range, 404 for unknown names, 416 for a
//! start offset past EOF, 500 when the store misbehaves. Stateless; every
//! request is classified fully before any response bytes exist.

use crate::error::StoreError;
use crate::http::{self, range::RangeOutcome, MimeResolver};
use crate::logger;
use crate::storage::MediaStore;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

/// Serves stored media objects with HTTP partial-content semantics.
pub struct MediaServer {
    store: MediaStore,
    mime: MimeResolver,
}

impl MediaServer {
    #[must_use]
    pub const fn new(store: MediaStore, mime: MimeResolver) -> Self {
        Self { store, mime }
    }

    /// The underlying object store (used by the upload path).
    #[must_use]
    pub const fn store(&self) -> &MediaStore {
        &self.store
    }

    /// The MIME table media is classified against.
    #[must_use]
    pub const fn mime(&self) -> &MimeResolver {
        &self.mime
    }

    /// Handle one request for the named object.
    pub async fn serve(
        &self,
        filename: &str,
        range_header: Option<&str>,
        is_head: bool,
    ) -> Response<Full<Bytes>> {
        match self.try_serve(filename, range_header, is_head).await {
            Ok(resp) => resp,
            Err(StoreError::NotFound(_) | StoreError::InvalidName(_)) => {
                http::build_404_response()
            }
            Err(e) => {
                logger::log_error(&format!("Failed to serve '{filename}': {e}"));
                http::build_500_response()
            }
        }
    }

    async fn try_serve(
        &self,
        filename: &str,
        range_header: Option<&str>,
        is_head: bool,
    ) -> Result<Response<Full<Bytes>>, StoreError> {
        if !self.store.exists(filename).await {
            return Err(StoreError::NotFound(filename.to_string()));
        }
        let size = self.store.size(filename).await?;
        let content_type = self.mime.resolve(filename);

        match http::parse_range_header(range_header, size) {
            // The leniency policy folds malformed headers into the full
            // response: a bad Range header never breaks playback.
            RangeOutcome::Absent | RangeOutcome::Malformed => {
                // HEAD needs only the already-measured size; skip the read.
                let data = if is_head {
                    Bytes::new()
                } else {
                    Bytes::from(self.store.read_full(filename).await?)
                };
                Ok(http::build_full_media_response(
                    data,
                    content_type,
                    size,
                    is_head,
                ))
            }
            RangeOutcome::Explicit(range) => {
                let data = if is_head {
                    Bytes::new()
                } else {
                    Bytes::from(
                        self.store
                            .read_slice(filename, range.start, range.byte_len())
                            .await?,
                    )
                };
                Ok(http::build_partial_media_response(
                    data,
                    content_type,
                    range.start,
                    range.end,
                    size,
                    is_head,
                ))
            }
            RangeOutcome::Unsatisfiable => Ok(http::build_416_response(size)),
        }
    }
}
