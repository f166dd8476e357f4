//! Local static file server for previewing a built site.
//!
//! Plain HTTP on `127.0.0.1`, one request at a time. Only files under the
//! served root are reachable; directories resolve to their `index.html`.

use percent_encoding::percent_decode_str;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tiny_http::{Header, Method, Request, Response, Server};

#[derive(Error, Debug)]
pub enum ServeError {
    #[error("Could not bind 127.0.0.1:{port}: {reason}")]
    Bind { port: u16, reason: String },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Serve `root` until the process is interrupted.
///
/// Requests are logged as `GET /path -> 200` when `log_requests` is set.
pub fn serve(root: &Path, port: u16, log_requests: bool) -> Result<(), ServeError> {
    let server = Server::http(("127.0.0.1", port)).map_err(|e| ServeError::Bind {
        port,
        reason: e.to_string(),
    })?;
    println!("Serving catalog at http://127.0.0.1:{}", port);
    println!("Press Ctrl+C to stop the server.");

    for request in server.incoming_requests() {
        let line = format!("{} {}", request.method(), request.url());
        match handle_request(request, root) {
            Ok(status) if log_requests => println!("{} -> {}", line, status),
            Ok(_) => {}
            Err(e) => eprintln!("{} failed: {}", line, e),
        }
    }
    Ok(())
}

fn handle_request(request: Request, root: &Path) -> Result<u16, ServeError> {
    if !matches!(request.method(), Method::Get | Method::Head) {
        request.respond(Response::from_string("Method Not Allowed").with_status_code(405))?;
        return Ok(405);
    }

    let Some(path) = resolve_path(request.url(), root) else {
        request.respond(Response::from_string("Not Found").with_status_code(404))?;
        return Ok(404);
    };

    // tiny_http drops the body itself when answering HEAD.
    let body = fs::read(&path)?;
    let content_type = Header::from_bytes("Content-Type", content_type(&path))
        .map_err(|_| ServeError::Io(std::io::Error::other("invalid content type header")))?;
    request.respond(Response::from_data(body).with_header(content_type))?;
    Ok(200)
}

/// Resolve a request URL to a file under `root`, handling `index.html` for
/// directories. Anything escaping `root` resolves to `None`.
pub fn resolve_path(url: &str, root: &Path) -> Option<PathBuf> {
    let clean = normalize_url(url);
    if clean.split('/').any(|part| part == "..") {
        return None;
    }

    let canonical = root.join(&clean).canonicalize().ok()?;
    let root_canonical = root.canonicalize().ok()?;
    if !canonical.starts_with(&root_canonical) {
        return None;
    }

    if canonical.is_file() {
        return Some(canonical);
    }
    let index = canonical.join("index.html");
    index.is_file().then_some(index)
}

/// Strip the query string, percent-decode, and trim slashes.
fn normalize_url(url: &str) -> String {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let decoded = percent_decode_str(path)
        .decode_utf8()
        .map(|s| s.into_owned())
        .unwrap_or_default();
    decoded.trim_matches('/').to_string()
}

/// Guess the MIME type from the file extension.
pub fn content_type(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("html" | "htm") => "text/html; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("js" | "mjs") => "text/javascript; charset=utf-8",
        Some("json") => "application/json",
        Some("txt" | "md") => "text/plain; charset=utf-8",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("ico") => "image/x-icon",
        Some("woff2") => "font/woff2",
        _ => "application/octet-stream",
    }
}
