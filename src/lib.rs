//! Desibeatz media delivery
//!
//! Content-addressed storage for uploaded media plus an HTTP byte-range
//! file server, so browser `<video>` elements can seek and stream stored
//! clips instead of downloading them whole.

pub mod config;
pub mod error;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;
pub mod storage;
