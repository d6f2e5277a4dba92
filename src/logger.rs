//! Logger module
//!
//! Plain line-oriented logging to stdout/stderr. Access log lines carry a
//! common-log-format timestamp; everything else is untimestamped operational
//! output.

use crate::config::Config;
use chrono::Utc;
use hyper::{Method, Uri, Version};
use std::net::SocketAddr;

pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    println!("======================================");
    println!("Desibeatz media server started");
    println!("Listening on: http://{addr}");
    println!("Media root: {}", config.media.root);
    println!("Serving under: {}", config.media.route_prefix);
    println!("Log level: {}", config.logging.level);
    if let Some(workers) = config.server.workers {
        println!("Worker threads: {workers}");
    }
    println!("Using Tokio runtime for concurrency");
    println!("======================================\n");
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    println!("[Connection] Accepted from: {peer_addr}");
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    eprintln!("[ERROR] Failed to serve connection: {err:?}");
}

pub fn log_request(method: &Method, uri: &Uri, version: Version) {
    println!("[Request] {method} {uri} {version:?}");
}

pub fn log_headers_count(count: usize, show: bool) {
    if show {
        println!("[Headers] Count: {count}");
    }
}

/// Access log line for a completed media request
pub fn log_access(method: &Method, path: &str, status: u16, bytes: usize) {
    let timestamp = Utc::now().format("%d/%b/%Y:%H:%M:%S %z");
    println!("[{timestamp}] \"{method} {path}\" {status} {bytes}");
}

pub fn log_error(message: &str) {
    eprintln!("[ERROR] {message}");
}

pub fn log_warning(message: &str) {
    eprintln!("[WARN] {message}");
}
