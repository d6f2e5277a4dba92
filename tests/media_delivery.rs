//! End-to-end tests for byte-range media delivery, driven through the
//! [`MediaServer`] orchestrator against a real temporary directory.

use desibeatz::http::MimeResolver;
use desibeatz::handler::media::MediaServer;
use desibeatz::storage::MediaStore;
use http_body_util::BodyExt;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use tempfile::TempDir;

struct Fixture {
    _dir: TempDir,
    server: MediaServer,
}

/// A server over a fresh directory containing `clip.mp4` with `content`.
async fn fixture_with(content: &[u8]) -> Fixture {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("clip.mp4"), content).unwrap();
    let server = MediaServer::new(MediaStore::new(dir.path()), MimeResolver::new());
    Fixture { _dir: dir, server }
}

/// 1000 distinguishable bytes, enough to tell any two slices apart.
fn clip_bytes() -> Vec<u8> {
    (0..1000u32).map(|i| (i % 251) as u8).collect()
}

async fn body_of(resp: Response<Full<Bytes>>) -> Bytes {
    resp.into_body().collect().await.unwrap().to_bytes()
}

fn header<'a>(resp: &'a Response<Full<Bytes>>, name: &str) -> &'a str {
    resp.headers().get(name).unwrap().to_str().unwrap()
}

#[tokio::test]
async fn no_range_header_serves_full_file() {
    let content = clip_bytes();
    let fx = fixture_with(&content).await;

    let resp = fx.server.serve("clip.mp4", None, false).await;
    assert_eq!(resp.status(), 200);
    assert_eq!(header(&resp, "content-type"), "video/mp4");
    assert_eq!(header(&resp, "content-length"), "1000");
    assert_eq!(header(&resp, "accept-ranges"), "bytes");
    assert_eq!(body_of(resp).await.as_ref(), content.as_slice());
}

#[tokio::test]
async fn explicit_range_returns_exact_slice() {
    let content = clip_bytes();
    let fx = fixture_with(&content).await;

    let resp = fx.server.serve("clip.mp4", Some("bytes=200-399"), false).await;
    assert_eq!(resp.status(), 206);
    assert_eq!(header(&resp, "content-length"), "200");
    assert_eq!(header(&resp, "content-range"), "bytes 200-399/1000");
    assert_eq!(header(&resp, "accept-ranges"), "bytes");
    assert_eq!(body_of(resp).await.as_ref(), &content[200..400]);
}

#[tokio::test]
async fn open_ended_range_runs_to_eof() {
    let content = clip_bytes();
    let fx = fixture_with(&content).await;

    let resp = fx.server.serve("clip.mp4", Some("bytes=900-"), false).await;
    assert_eq!(resp.status(), 206);
    assert_eq!(header(&resp, "content-length"), "100");
    assert_eq!(header(&resp, "content-range"), "bytes 900-999/1000");
    assert_eq!(body_of(resp).await.as_ref(), &content[900..]);
}

#[tokio::test]
async fn open_ended_from_zero_equals_whole_file_range() {
    let content = clip_bytes();
    let fx = fixture_with(&content).await;

    let open = fx.server.serve("clip.mp4", Some("bytes=0-"), false).await;
    let explicit = fx.server.serve("clip.mp4", Some("bytes=0-999"), false).await;
    assert_eq!(open.status(), 206);
    assert_eq!(explicit.status(), 206);
    assert_eq!(body_of(open).await, body_of(explicit).await);
}

#[tokio::test]
async fn adjacent_ranges_partition_the_file() {
    let content = clip_bytes();
    let fx = fixture_with(&content).await;

    for k in [1usize, 137, 500, 999] {
        let first = fx
            .server
            .serve("clip.mp4", Some(&format!("bytes=0-{}", k - 1)), false)
            .await;
        let second = fx
            .server
            .serve("clip.mp4", Some(&format!("bytes={k}-999")), false)
            .await;
        assert_eq!(first.status(), 206);
        assert_eq!(second.status(), 206);

        let mut joined = body_of(first).await.to_vec();
        joined.extend_from_slice(&body_of(second).await);
        assert_eq!(joined, content, "split at {k} must reassemble exactly");
    }
}

#[tokio::test]
async fn malformed_range_degrades_to_full_response() {
    let content = clip_bytes();
    let fx = fixture_with(&content).await;

    for bad in ["bytes=abc", "bytes=-500", "bytes=0-10,20-30", "items=0-9"] {
        let resp = fx.server.serve("clip.mp4", Some(bad), false).await;
        assert_eq!(resp.status(), 200, "header {bad:?} must degrade to 200");
        assert_eq!(body_of(resp).await.len(), 1000);
    }
}

#[tokio::test]
async fn start_past_eof_is_416_with_size() {
    let fx = fixture_with(&clip_bytes()).await;

    let resp = fx
        .server
        .serve("clip.mp4", Some("bytes=1000-1010"), false)
        .await;
    assert_eq!(resp.status(), 416);
    assert_eq!(header(&resp, "content-range"), "bytes */1000");
    assert!(body_of(resp).await.is_empty());
}

#[tokio::test]
async fn end_clamped_to_final_byte() {
    let content = clip_bytes();
    let fx = fixture_with(&content).await;

    let resp = fx
        .server
        .serve("clip.mp4", Some("bytes=990-5000"), false)
        .await;
    assert_eq!(resp.status(), 206);
    assert_eq!(header(&resp, "content-range"), "bytes 990-999/1000");
    assert_eq!(body_of(resp).await.as_ref(), &content[990..]);
}

#[tokio::test]
async fn missing_object_is_404_with_and_without_range() {
    let fx = fixture_with(&clip_bytes()).await;

    let resp = fx.server.serve("ghost.mp4", None, false).await;
    assert_eq!(resp.status(), 404);

    let resp = fx.server.serve("ghost.mp4", Some("bytes=0-10"), false).await;
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn traversal_names_are_not_found() {
    let fx = fixture_with(&clip_bytes()).await;

    for name in ["../clip.mp4", "..", "a/b.mp4"] {
        let resp = fx.server.serve(name, None, false).await;
        assert_eq!(resp.status(), 404, "name {name:?} must 404");
    }
}

#[tokio::test]
async fn head_request_carries_headers_without_body() {
    let fx = fixture_with(&clip_bytes()).await;

    let resp = fx.server.serve("clip.mp4", Some("bytes=200-399"), true).await;
    assert_eq!(resp.status(), 206);
    assert_eq!(header(&resp, "content-length"), "200");
    assert_eq!(header(&resp, "content-range"), "bytes 200-399/1000");
    assert!(body_of(resp).await.is_empty());
}

#[tokio::test]
async fn head_full_object_reports_size_without_body() {
    let fx = fixture_with(&clip_bytes()).await;

    let resp = fx.server.serve("clip.mp4", None, true).await;
    assert_eq!(resp.status(), 200);
    assert_eq!(header(&resp, "content-length"), "1000");
    assert_eq!(header(&resp, "content-type"), "video/mp4");
    assert_eq!(header(&resp, "accept-ranges"), "bytes");
    assert!(body_of(resp).await.is_empty());
}

#[tokio::test]
async fn unknown_extension_served_as_octet_stream() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("photo.png"), b"not actually a png").unwrap();
    let server = MediaServer::new(MediaStore::new(dir.path()), MimeResolver::new());

    let resp = server.serve("photo.png", None, false).await;
    assert_eq!(resp.status(), 200);
    assert_eq!(header(&resp, "content-type"), "application/octet-stream");
}

#[tokio::test]
async fn extended_mime_table_classifies_registered_types() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("photo.png"), b"png bytes").unwrap();
    let mut mime = MimeResolver::new();
    mime.register("png", "image/png");
    let server = MediaServer::new(MediaStore::new(dir.path()), mime);

    let resp = server.serve("photo.png", None, false).await;
    assert_eq!(header(&resp, "content-type"), "image/png");
}

#[tokio::test]
async fn empty_file_serves_empty_200() {
    let fx = fixture_with(b"").await;

    let resp = fx.server.serve("clip.mp4", None, false).await;
    assert_eq!(resp.status(), 200);
    assert_eq!(header(&resp, "content-length"), "0");

    // Any explicit range into an empty file is unsatisfiable
    let resp = fx.server.serve("clip.mp4", Some("bytes=0-"), false).await;
    assert_eq!(resp.status(), 416);
    assert_eq!(header(&resp, "content-range"), "bytes */0");
}
