//! Crate error types
//!
//! Only startup-fatal conditions (endpoint bind failure, missing placeholder
//! asset) propagate out of `run()` calls. Per-connection failures are logged
//! and terminate the owning handler's task only.

use std::path::PathBuf;

use tokio_tungstenite::tungstenite;

/// Convenience alias for relay operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type
#[derive(Debug)]
pub enum Error {
    /// Socket or filesystem I/O failed
    Io(std::io::Error),
    /// WebSocket protocol error on a producer connection
    WebSocket(tungstenite::Error),
    /// The placeholder image could not be loaded at startup
    Placeholder {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O error: {}", e),
            Error::WebSocket(e) => write!(f, "WebSocket error: {}", e),
            Error::Placeholder { path, source } => {
                write!(f, "Failed to load placeholder {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::WebSocket(e) => Some(e),
            Error::Placeholder { source, .. } => Some(source),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

impl From<tungstenite::Error> for Error {
    fn from(e: tungstenite::Error) -> Self {
        Error::WebSocket(e)
    }
}
