//! Minimal HTTP/1.1 tile server for integration tests.
//!
//! Answers `GET /{z}/{x}/{y}.png` with a fixed PNG body and records every
//! requested path. Paths outside the world at that zoom get 404.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread;

#[derive(Debug, Clone, Copy, Default)]
pub struct TileServerOptions {
    /// If set, every request gets this status with an empty body.
    pub force_status: Option<u16>,
}

/// A running server: its URL template and the log of requested paths.
pub struct TileServer {
    pub url_template: String,
    pub requests: Arc<Mutex<Vec<String>>>,
}

/// Starts a server in a background thread serving `tile_png` for every valid
/// tile path. The server runs until the process exits.
pub fn start(tile_png: Vec<u8>) -> TileServer {
    start_with_options(tile_png, TileServerOptions::default())
}

pub fn start_with_options(tile_png: Vec<u8>, opts: TileServerOptions) -> TileServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let body = Arc::new(tile_png);
    let requests = Arc::new(Mutex::new(Vec::new()));
    let log = Arc::clone(&requests);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let body = Arc::clone(&body);
            let log = Arc::clone(&log);
            thread::spawn(move || handle(stream, &body, &log, opts));
        }
    });
    TileServer {
        url_template: format!("http://127.0.0.1:{}/{{z}}/{{x}}/{{y}}.png", port),
        requests,
    }
}

fn handle(
    mut stream: std::net::TcpStream,
    body: &[u8],
    log: &Mutex<Vec<String>>,
    opts: TileServerOptions,
) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) => return,
        Ok(n) => n,
        Err(_) => return,
    };
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => s,
        Err(_) => return,
    };
    let mut parts = request.lines().next().unwrap_or("").split_whitespace();
    let method = parts.next().unwrap_or("");
    let path = parts.next().unwrap_or("").to_string();
    log.lock().unwrap().push(path.clone());

    if !method.eq_ignore_ascii_case("GET") {
        let _ = stream.write_all(b"HTTP/1.1 405 Method Not Allowed\r\nContent-Length: 0\r\n\r\n");
        return;
    }
    if let Some(status) = opts.force_status {
        let response = format!("HTTP/1.1 {} Forced\r\nContent-Length: 0\r\n\r\n", status);
        let _ = stream.write_all(response.as_bytes());
        return;
    }
    if !is_valid_tile_path(&path) {
        let _ = stream.write_all(b"HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\n\r\n");
        return;
    }
    let header = format!(
        "HTTP/1.1 200 OK\r\nContent-Type: image/png\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        body.len()
    );
    let _ = stream.write_all(header.as_bytes());
    let _ = stream.write_all(body);
}

/// True for `/{z}/{x}/{y}.png` with x and y inside the 2^z grid.
fn is_valid_tile_path(path: &str) -> bool {
    let parts: Vec<&str> = path.trim_start_matches('/').split('/').collect();
    if parts.len() != 3 {
        return false;
    }
    let z: u32 = match parts[0].parse() {
        Ok(z) if z <= 19 => z,
        _ => return false,
    };
    let x: u64 = match parts[1].parse() {
        Ok(x) => x,
        Err(_) => return false,
    };
    let y: u64 = match parts[2].strip_suffix(".png").and_then(|y| y.parse().ok()) {
        Some(y) => y,
        None => return false,
    };
    let count = 1u64 << z;
    x < count && y < count
}
