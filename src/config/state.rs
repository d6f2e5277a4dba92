//! Application state module
//!
//! One [`AppState`] is built at process start and shared by `Arc`; it owns
//! the configuration and the media delivery components. There is no runtime
//! reconfiguration and no hidden global state.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use super::types::Config;
use crate::handler::media::MediaServer;
use crate::http::MimeResolver;
use crate::storage::MediaStore;

/// Shared application state
pub struct AppState {
    pub config: Config,
    pub media: MediaServer,

    // Cached so the per-request hot path never takes a lock
    pub cached_access_log: Arc<AtomicBool>,
}

impl AppState {
    #[must_use]
    pub fn new(config: &Config) -> Self {
        let store = MediaStore::new(&config.media.root);
        let media = MediaServer::new(store, MimeResolver::new());

        Self {
            config: config.clone(),
            media,
            cached_access_log: Arc::new(AtomicBool::new(config.logging.access_log)),
        }
    }
}
