//! Error taxonomy: everything that can stop a run is either a fetch failure or
//! a write failure.
//!
//! Messages describe the failing step only; the underlying cause is reachable
//! through `source()`, so callers print the chain (`{:#}` with anyhow).

use std::path::{Path, PathBuf};

/// The feed could not be obtained as JSON.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Source is not an absolute http(s) URL.
    #[error("invalid source URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
    /// libcurl failed (bad URL, DNS, connect, TLS, transfer).
    #[error("GET {url} failed")]
    Transfer {
        url: String,
        #[source]
        source: curl::Error,
    },
    /// Server answered with a non-2xx status.
    #[error("GET {url} returned HTTP {code}")]
    Status { url: String, code: u32 },
    /// Body is not valid JSON.
    #[error("response body is not valid JSON")]
    Decode(#[source] serde_json::Error),
}

/// The rewritten document could not be persisted.
#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    #[error("serialize document")]
    Serialize(#[source] serde_json::Error),
    #[error("{action} {}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl WriteError {
    pub(crate) fn io(action: &'static str, path: &Path, source: std::io::Error) -> Self {
        WriteError::Io {
            action,
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Failure of a whole run. Displays the underlying error unchanged.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Write(#[from] WriteError),
}
