//! Minimal HTTP/1.1 server for integration tests.
//!
//! Answers every GET with a fixed status line and body. Optionally answers
//! the first path with a redirect to `/feed.json`.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

#[derive(Debug, Clone)]
pub struct FeedServerOptions {
    /// Status line served for `/feed.json`, e.g. "200 OK".
    pub status: &'static str,
    /// If true, any other path answers 302 to `/feed.json`.
    pub redirect_to_feed: bool,
}

impl Default for FeedServerOptions {
    fn default() -> Self {
        Self {
            status: "200 OK",
            redirect_to_feed: false,
        }
    }
}

/// Handle to a running server.
pub struct FeedServer {
    pub base_url: String,
    hits: Arc<AtomicUsize>,
}

impl FeedServer {
    /// URL of the feed document.
    pub fn feed_url(&self) -> String {
        format!("{}feed.json", self.base_url)
    }

    /// Number of requests answered so far.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

/// Starts a server in a background thread serving `body` as JSON. The server
/// runs until the process exits.
pub fn start(body: impl Into<Vec<u8>>) -> FeedServer {
    start_with_options(body, FeedServerOptions::default())
}

pub fn start_with_options(body: impl Into<Vec<u8>>, opts: FeedServerOptions) -> FeedServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let body = Arc::new(body.into());
    let hits = Arc::new(AtomicUsize::new(0));
    let hits_srv = Arc::clone(&hits);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let body = Arc::clone(&body);
            let opts = opts.clone();
            hits_srv.fetch_add(1, Ordering::SeqCst);
            thread::spawn(move || handle(stream, &body, &opts));
        }
    });
    FeedServer {
        base_url: format!("http://127.0.0.1:{}/", port),
        hits,
    }
}

/// A loopback URL with nothing listening behind it.
pub fn closed_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}/feed.json", port)
}

fn handle(mut stream: std::net::TcpStream, body: &[u8], opts: &FeedServerOptions) {
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
    let path = parts.next().unwrap_or("");

    if !method.eq_ignore_ascii_case("GET") {
        let _ = stream.write_all(
            b"HTTP/1.1 405 Method Not Allowed\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        );
        return;
    }
    if opts.redirect_to_feed && path != "/feed.json" {
        let _ = stream.write_all(
            b"HTTP/1.1 302 Found\r\nLocation: /feed.json\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        );
        return;
    }
    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        opts.status,
        body.len()
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.write_all(body);
}
