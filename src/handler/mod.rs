//! Request handler module
//!
//! Routing dispatch plus the two business handlers: byte-range media
//! delivery and content-addressed upload intake.

pub mod media;
pub mod router;
pub mod upload;

// Re-export main entry point
pub use router::handle_request;
