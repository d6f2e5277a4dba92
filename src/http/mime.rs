//! MIME type resolution module
//!
//! Maps a stored filename's extension to a Content-Type string. The built-in
//! table covers the video formats the upload path is meant for; callers can
//! register additional types without touching this module.

use std::collections::HashMap;

/// Content-Type used when the extension is unknown or missing.
pub const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// Extension to Content-Type lookup with a safe fallback.
///
/// # Examples
/// ```
/// use desibeatz::http::mime::MimeResolver;
///
/// let mime = MimeResolver::new();
/// assert_eq!(mime.resolve("clip.mp4"), "video/mp4");
/// assert_eq!(mime.resolve("photo.png"), "application/octet-stream");
/// ```
#[derive(Debug, Clone)]
pub struct MimeResolver {
    table: HashMap<String, String>,
}

impl MimeResolver {
    /// Create a resolver seeded with the supported video formats.
    #[must_use]
    pub fn new() -> Self {
        let mut resolver = Self {
            table: HashMap::new(),
        };
        resolver.register("mp4", "video/mp4");
        resolver.register("mov", "video/quicktime");
        resolver.register("avi", "video/x-msvideo");
        resolver
    }

    /// Register an additional extension (stored lower-cased, no dot).
    pub fn register(&mut self, extension: &str, content_type: &str) {
        self.table
            .insert(extension.to_ascii_lowercase(), content_type.to_string());
    }

    /// Resolve a filename to its Content-Type. Never fails: unknown or
    /// missing extensions get [`FALLBACK_CONTENT_TYPE`].
    #[must_use]
    pub fn resolve(&self, filename: &str) -> &str {
        filename
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .and_then(|ext| self.table.get(&ext))
            .map_or(FALLBACK_CONTENT_TYPE, String::as_str)
    }
}

impl Default for MimeResolver {
    fn default() -> Self {
        Self::new()
    }
}
