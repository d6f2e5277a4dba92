//! Upload intake module
//!
//! Accepts a raw request body, content-addresses it, and publishes it into
//! the media store. The client's original filename (query parameter) only
//! contributes its extension; the stored name is derived from the content.

use crate::config::AppState;
use crate::http;
use crate::logger;
use chrono::Utc;
use http_body_util::{BodyExt, Full};
use hyper::body::{Body, Bytes};
use hyper::{Request, Response};
use serde_json::json;
use std::sync::Arc;

/// Handle `POST /uploads?filename=<original>`.
///
/// The file becomes discoverable only after the store has renamed it into
/// place, so a concurrent reader never sees a partial object.
pub async fn handle_upload<B>(req: Request<B>, state: &Arc<AppState>) -> Response<Full<Bytes>>
where
    B: Body,
    B::Error: std::fmt::Display,
{
    let original_name = original_filename(req.uri().query()).unwrap_or_default();

    let max_body_size = state.config.http.max_body_size;
    let body = match req.into_body().collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) => {
            logger::log_warning(&format!("Failed to read upload body: {e}"));
            return http::build_400_response("unreadable request body");
        }
    };

    if body.len() as u64 > max_body_size {
        logger::log_warning(&format!(
            "Upload body too large: {} bytes (max: {max_body_size})",
            body.len()
        ));
        return http::build_413_response();
    }
    if body.is_empty() {
        return http::build_400_response("empty upload body");
    }

    match state.media.store().store(&original_name, &body).await {
        Ok(stored) => {
            let content_type = state.media.mime().resolve(&stored.filename);
            http::build_created_response(&json!({
                "filename": stored.filename,
                "size": stored.size,
                "content_type": content_type,
                "uploaded_at": Utc::now().to_rfc3339(),
            }))
        }
        Err(e) => {
            logger::log_error(&format!("Failed to store upload: {e}"));
            http::build_500_response()
        }
    }
}

/// Extract the `filename` query parameter, if present.
fn original_filename(query: Option<&str>) -> Option<String> {
    query?
        .split('&')
        .find_map(|pair| pair.strip_prefix("filename="))
        .map(ToString::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filename_param_extracted() {
        assert_eq!(
            original_filename(Some("filename=clip.mp4")),
            Some("clip.mp4".to_string())
        );
        assert_eq!(
            original_filename(Some("a=1&filename=clip.mov&b=2")),
            Some("clip.mov".to_string())
        );
    }

    #[test]
    fn test_filename_param_missing() {
        assert_eq!(original_filename(None), None);
        assert_eq!(original_filename(Some("a=1&b=2")), None);
        assert_eq!(original_filename(Some("")), None);
    }
}
