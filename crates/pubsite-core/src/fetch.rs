//! Loading the publication document over HTTP or from disk.
//!
//! A single GET per page load: no retry, no timeout, and cache reuse
//! disabled so an edited document is picked up on the next load.

use std::fmt;
use std::path::PathBuf;
use std::sync::LazyLock;

use reqwest::header::{CACHE_CONTROL, PRAGMA};

use crate::error::LoadError;
use crate::publication::PublicationCollection;

/// Where the publication document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Url(String),
    File(PathBuf),
}

impl Source {
    /// `http://` and `https://` locations are URLs; everything else is a path.
    pub fn parse(location: &str) -> Self {
        if location.starts_with("http://") || location.starts_with("https://") {
            Self::Url(location.to_string())
        } else {
            Self::File(PathBuf::from(location))
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Url(url) => f.write_str(url),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Shared async HTTP client.
static SHARED_CLIENT: LazyLock<reqwest::Client> = LazyLock::new(|| {
    reqwest::Client::builder()
        .user_agent(concat!("pubsite/", env!("CARGO_PKG_VERSION")))
        .build()
        .expect("failed to build HTTP client")
});

/// Get shared HTTP client.
pub fn http_client() -> &'static reqwest::Client {
    &SHARED_CLIENT
}

/// Single-threaded runtime for callers without their own executor.
pub static SHARED_RUNTIME: LazyLock<tokio::runtime::Runtime> = LazyLock::new(|| {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("failed to build tokio runtime")
});

/// Fetch raw document bytes. Non-2xx responses are errors.
pub async fn fetch_bytes(url: &str) -> Result<Vec<u8>, LoadError> {
    let response = SHARED_CLIENT
        .get(url)
        .header(CACHE_CONTROL, "no-cache")
        .header(PRAGMA, "no-cache")
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|e| LoadError::from_reqwest(&e))?;

    let body = response
        .bytes()
        .await
        .map_err(|e| LoadError::from_reqwest(&e))?;
    Ok(body.to_vec())
}

/// Load and leniently decode the publication document.
pub async fn load_collection(source: &Source) -> Result<PublicationCollection, LoadError> {
    let bytes = match source {
        Source::Url(url) => fetch_bytes(url).await?,
        Source::File(path) => tokio::fs::read(path).await?,
    };
    log::debug!("read {} bytes from {source}", bytes.len());
    Ok(PublicationCollection::from_slice(&bytes)?)
}

/// One-shot local HTTP server for tests: answers a single request with
/// `status_line` and hands back the raw request head.
#[cfg(test)]
pub(crate) fn serve_once(
    status_line: &'static str,
) -> (String, std::thread::JoinHandle<String>) {
    use std::io::{Read, Write};

    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}/publications.json", listener.local_addr().unwrap());
    let handle = std::thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut head = Vec::new();
        let mut buf = [0u8; 1024];
        while !head.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = stream.read(&mut buf).unwrap();
            if n == 0 {
                break;
            }
            head.extend_from_slice(&buf[..n]);
        }
        let body = "not here";
        write!(
            stream,
            "HTTP/1.1 {status_line}\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        )
        .unwrap();
        String::from_utf8_lossy(&head).into_owned()
    });
    (url, handle)
}
