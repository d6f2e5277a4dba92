//! HTTP protocol layer module
//!
//! Protocol-level building blocks (range parsing, MIME resolution, response
//! builders), decoupled from routing and storage.

pub mod mime;
pub mod range;
pub mod response;

// Re-export commonly used items
pub use mime::MimeResolver;
pub use range::{parse_range_header, ByteRange, RangeOutcome};
pub use response::{
    build_400_response, build_404_response, build_405_response, build_413_response,
    build_416_response, build_500_response, build_created_response, build_full_media_response,
    build_health_response, build_options_response, build_partial_media_response,
};
