//! HTTP Range request parsing module
//!
//! Decodes the `Range` request header into an explicit tagged outcome so the
//! leniency policy (malformed headers fall back to the whole file) is a
//! visible, testable branch rather than a pattern-match failure path.

/// A satisfiable byte interval within a file, inclusive on both ends.
///
/// Invariant: `start <= end < file_size` for the size it was parsed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    /// First byte offset, inclusive
    pub start: u64,
    /// Last byte offset, inclusive
    pub end: u64,
}

impl ByteRange {
    /// Number of bytes covered by this range (always at least 1).
    #[inline]
    #[must_use]
    pub const fn byte_len(&self) -> u64 {
        self.end - self.start + 1
    }
}

/// Outcome of parsing a `Range` header against a file of known size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeOutcome {
    /// No Range header was sent; serve the full file with 200.
    Absent,
    /// Header present but not of the accepted `bytes=<start>-[<end>]` shape
    /// (multi-range and suffix forms land here too). Serve the full file
    /// with 200 instead of failing the request.
    Malformed,
    /// A satisfiable single range; serve 206 Partial Content.
    Explicit(ByteRange),
    /// Start offset at or past end of file; serve 416.
    Unsatisfiable,
}

/// Parse an HTTP `Range` header (single range only, bytes unit).
///
/// Accepted formats:
/// - `bytes=start-end` - specific inclusive range, `end` clamped to EOF
/// - `bytes=start-` - from `start` to end of file
///
/// Anything else (other units, suffix ranges like `bytes=-500`, multiple
/// ranges, non-numeric offsets) degrades to [`RangeOutcome::Malformed`]:
/// a bad Range header must never break playback of the underlying media.
///
/// # Examples
/// ```
/// use desibeatz::http::range::{parse_range_header, RangeOutcome};
///
/// let result = parse_range_header(Some("bytes=0-99"), 1000);
/// assert!(matches!(result, RangeOutcome::Explicit(_)));
///
/// let result = parse_range_header(None, 1000);
/// assert!(matches!(result, RangeOutcome::Absent));
/// ```
#[must_use]
pub fn parse_range_header(range_header: Option<&str>, file_size: u64) -> RangeOutcome {
    let Some(header) = range_header else {
        return RangeOutcome::Absent;
    };

    let Some(range_spec) = header.trim().strip_prefix("bytes=") else {
        return RangeOutcome::Malformed; // Not bytes unit
    };

    // Only single ranges are supported; multi-range would require a
    // multipart/byteranges response.
    if range_spec.contains(',') {
        return RangeOutcome::Malformed;
    }

    let Some((start_str, end_str)) = range_spec.split_once('-') else {
        return RangeOutcome::Malformed;
    };

    // An empty start is the suffix form ("-500"), which the accepted shape
    // does not include; it parses as an error and degrades to full content.
    let Ok(start) = start_str.trim().parse::<u64>() else {
        return RangeOutcome::Malformed;
    };

    // Shape must be fully valid before any bounds verdict: a header with a
    // garbage end offset is Malformed even when its start is past EOF.
    let end = match end_str.trim() {
        "" => None, // Open-ended range
        s => match s.parse::<u64>() {
            Ok(e) => Some(e),
            Err(_) => return RangeOutcome::Malformed,
        },
    };

    // Reversed ranges ("bytes=5-2") never match the accepted shape's intent.
    if end.is_some_and(|e| start > e) {
        return RangeOutcome::Malformed;
    }

    // Start at or beyond EOF is the one explicit range we refuse to serve:
    // there are no right bytes to send.
    if start >= file_size {
        return RangeOutcome::Unsatisfiable;
    }

    let end = end.map_or(file_size - 1, |e| e.min(file_size - 1));

    RangeOutcome::Explicit(ByteRange { start, end })
}
