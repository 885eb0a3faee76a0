//! Placeholder frame for channels with no camera frame yet
//!
//! Loaded once at process startup and shared read-only by every channel. A
//! viewer connecting to an idle channel receives this image instead of an
//! empty stream. A missing file is a startup-fatal error: a channel with
//! neither a real frame nor a placeholder cannot serve valid output.

use std::path::Path;

use bytes::Bytes;

use crate::error::{Error, Result};

/// The shared placeholder image
///
/// Cloning hands out a refcounted view of the same bytes; the payload is
/// never copied or mutated after load.
#[derive(Debug, Clone)]
pub struct Placeholder {
    data: Bytes,
}

impl Placeholder {
    /// Load the placeholder image from a file.
    ///
    /// Call once at startup, before binding any endpoints.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(|source| Error::Placeholder {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::info!(path = %path.display(), size = data.len(), "Placeholder image loaded");

        Ok(Self {
            data: Bytes::from(data),
        })
    }

    /// Create a placeholder from in-memory bytes.
    pub fn from_bytes(data: impl Into<Bytes>) -> Self {
        Self { data: data.into() }
    }

    /// Get a refcounted handle to the placeholder bytes.
    pub fn bytes(&self) -> Bytes {
        self.data.clone()
    }

    /// Placeholder size in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the placeholder is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
