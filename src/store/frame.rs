//! Published frame type

use std::time::Instant;

use bytes::Bytes;

/// A validator-accepted frame held in a channel's slot
///
/// Immutable once published. The payload is refcounted via `Bytes`, so a
/// handle returned to a reader stays valid after the slot is overwritten by
/// a newer frame — publishing never touches frames already handed out.
#[derive(Debug, Clone)]
pub struct Frame {
    /// JPEG payload (zero-copy via reference counting)
    pub data: Bytes,

    /// Sequence number assigned at publish (starts at 1; 0 means "no real
    /// frame yet" and is reserved for the placeholder state)
    pub seq: u64,

    /// When the frame was accepted
    pub received_at: Instant,
}

impl Frame {
    pub(super) fn new(data: Bytes, seq: u64) -> Self {
        Self {
            data,
            seq,
            received_at: Instant::now(),
        }
    }

    /// Payload size in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the payload is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
