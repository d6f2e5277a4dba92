//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: method validation, route
//! matching, and dispatch to the media and upload handlers.

use crate::config::AppState;
use crate::handler::upload;
use crate::http;
use crate::logger;
use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::sync::atomic::Ordering;
use std::sync::Arc;

/// Main entry point for HTTP request handling.
///
/// Generic over the body type so tests can drive it with `Full<Bytes>`
/// while the server feeds it `hyper::body::Incoming`.
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible>
where
    B: Body,
    B::Error: std::fmt::Display,
{
    let method = req.method().clone();
    let access_log = state.cached_access_log.load(Ordering::Relaxed);
    if access_log {
        logger::log_request(&method, req.uri(), req.version());
    }

    let path = req.uri().path().to_string();

    let mut response = match method {
        Method::OPTIONS => http::build_options_response(state.config.http.enable_cors),
        Method::POST => {
            logger::log_headers_count(req.headers().len(), state.config.logging.show_headers);
            if let Some(resp) = check_body_size(&req, state.config.http.max_body_size) {
                resp
            } else if path == state.config.media.route_prefix {
                upload::handle_upload(req, &state).await
            } else {
                http::build_404_response()
            }
        }
        Method::GET | Method::HEAD => {
            logger::log_headers_count(req.headers().len(), state.config.logging.show_headers);
            let is_head = method == Method::HEAD;
            let range_header = req
                .headers()
                .get("range")
                .and_then(|v| v.to_str().ok())
                .map(ToString::to_string);
            route_request(&path, is_head, range_header.as_deref(), &state).await
        }
        _ => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            http::build_405_response()
        }
    };

    // Every response identifies the server
    if let Ok(value) = hyper::header::HeaderValue::from_str(&state.config.http.server_name) {
        response.headers_mut().insert(hyper::header::SERVER, value);
    }

    if access_log {
        logger::log_access(
            &method,
            &path,
            response.status().as_u16(),
            content_length_of(&response),
        );
    }
    Ok(response)
}

/// Route GET/HEAD requests based on path.
async fn route_request(
    path: &str,
    is_head: bool,
    range_header: Option<&str>,
    state: &Arc<AppState>,
) -> Response<Full<Bytes>> {
    if path == "/healthz" {
        return http::build_health_response("ok");
    }

    // Media delivery: <route_prefix>/<filename>, filename is an opaque key
    let prefix = state.config.media.route_prefix.as_str();
    if let Some(name) = path
        .strip_prefix(prefix)
        .and_then(|rest| rest.strip_prefix('/'))
    {
        if !name.is_empty() {
            return state.media.serve(name, range_header, is_head).await;
        }
    }

    http::build_404_response()
}

/// Validate the Content-Length header and return 413 if it exceeds the limit.
///
/// This rejects oversized uploads before their body is buffered; the upload
/// handler re-checks the actual collected size.
fn check_body_size<B>(req: &Request<B>, max_body_size: u64) -> Option<Response<Full<Bytes>>> {
    let content_length = req.headers().get("content-length")?;
    content_length.to_str().map_or_else(
        |_| {
            logger::log_warning("Content-Length header contains non-ASCII characters");
            None
        },
        |size_str| match size_str.parse::<u64>() {
            Ok(size) if size > max_body_size => {
                logger::log_warning(&format!(
                    "Request body too large: {size} bytes (max: {max_body_size})"
                ));
                Some(http::build_413_response())
            }
            Err(_) => {
                logger::log_warning(&format!(
                    "Invalid Content-Length value: '{size_str}', skipping size check"
                ));
                None
            }
            _ => None,
        },
    )
}

/// Announced body size of a built response, for access logging.
fn content_length_of(resp: &Response<Full<Bytes>>) -> usize {
    resp.headers()
        .get("content-length")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
        .unwrap_or(0)
}
