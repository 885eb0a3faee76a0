//! Per-channel frame store
//!
//! A single-slot, single-writer/many-reader buffer holding the latest
//! accepted frame. Last-write-wins, no backlog: a burst of publishes before
//! any reader checks in leaves only the final frame observable; earlier
//! frames are unrecoverably dropped by design.

use std::time::Duration;

use bytes::Bytes;
use tokio::sync::{Notify, RwLock};

use crate::media::{self, Placeholder};

use super::frame::Frame;

/// Read-only projection of a store, served by the stats endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelStats {
    /// Total frames accepted since startup
    pub frames_received_total: u64,
    /// Whether the slot currently holds a real frame
    pub has_frame: bool,
    /// Size of the current frame in bytes (0 if none)
    pub frame_size: usize,
}

/// Slot contents, replaced wholesale on every accepted publish
struct Slot {
    frame: Option<Frame>,
    seq: u64,
}

/// Per-channel overwrite buffer with change notification
///
/// All mutation goes through [`publish`](FrameStore::publish); all reads go
/// through [`snapshot`](FrameStore::snapshot). The lock guarantees a reader
/// always observes a consistent (frame, sequence) pair.
pub struct FrameStore {
    slot: RwLock<Slot>,
    changed: Notify,
    placeholder: Bytes,
}

impl FrameStore {
    /// Create an empty store sharing the process-wide placeholder.
    pub fn new(placeholder: &Placeholder) -> Self {
        Self {
            slot: RwLock::new(Slot {
                frame: None,
                seq: 0,
            }),
            changed: Notify::new(),
            placeholder: placeholder.bytes(),
        }
    }

    /// Validate and publish a candidate frame.
    ///
    /// Invalid candidates are a no-op: the slot, the sequence counter, and
    /// all waiters are left untouched, and `None` is returned. A valid
    /// candidate atomically replaces the slot, increments the sequence
    /// counter by exactly 1, and wakes *all* current waiters (fan-out
    /// notification, not a work queue). Returns the new sequence number.
    pub async fn publish(&self, candidate: Bytes) -> Option<u64> {
        if !media::is_valid_frame(&candidate) {
            tracing::trace!(size = candidate.len(), "Frame rejected by validator");
            return None;
        }

        let seq = {
            let mut slot = self.slot.write().await;
            slot.seq += 1;
            slot.frame = Some(Frame::new(candidate, slot.seq));
            slot.seq
        };

        self.changed.notify_waiters();
        Some(seq)
    }

    /// Get the current frame and its sequence number.
    ///
    /// Returns the placeholder paired with sequence 0 while no real frame has
    /// been published — a stable value until the first publish. Idempotent:
    /// two snapshots with no intervening publish return identical pairs.
    pub async fn snapshot(&self) -> (Bytes, u64) {
        let slot = self.slot.read().await;
        match &slot.frame {
            Some(frame) => (frame.data.clone(), slot.seq),
            None => (self.placeholder.clone(), 0),
        }
    }

    /// Block until the sequence counter advances or `timeout` elapses.
    ///
    /// Returns `true` if a change notification arrived, `false` on timeout.
    /// No frames are buffered for slow waiters: a notification that fires
    /// between two waits is simply missed, and the waiter discovers the newer
    /// sequence on its next [`snapshot`](FrameStore::snapshot).
    pub async fn wait_for_change(&self, timeout: Duration) -> bool {
        tokio::time::timeout(timeout, self.changed.notified())
            .await
            .is_ok()
    }

    /// Read-only stats projection for this channel.
    pub async fn stats(&self) -> ChannelStats {
        let slot = self.slot.read().await;
        ChannelStats {
            frames_received_total: slot.seq,
            has_frame: slot.frame.is_some(),
            frame_size: slot.frame.as_ref().map(Frame::len).unwrap_or(0),
        }
    }

    /// The shared placeholder bytes this store falls back to.
    pub fn placeholder(&self) -> Bytes {
        self.placeholder.clone()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn store() -> FrameStore {
        FrameStore::new(&Placeholder::from_bytes(&b"placeholder"[..]))
    }

    /// A payload of `len` bytes with correct SOI/EOI markers, filled with
    /// `fill` so frames are distinguishable.
    fn valid_frame(len: usize, fill: u8) -> Bytes {
        let mut data = vec![fill; len];
        data[..2].copy_from_slice(&media::SOI);
        let end = len - 2;
        data[end..].copy_from_slice(&media::EOI);
        Bytes::from(data)
    }

    #[tokio::test]
    async fn test_empty_store_snapshots_placeholder_at_seq_zero() {
        let store = store();

        let (frame, seq) = store.snapshot().await;
        assert_eq!(frame, Bytes::from_static(b"placeholder"));
        assert_eq!(seq, 0);
    }

    #[tokio::test]
    async fn test_publish_increments_seq_by_one() {
        let store = store();

        assert_eq!(store.publish(valid_frame(6000, 1)).await, Some(1));
        assert_eq!(store.publish(valid_frame(6000, 2)).await, Some(2));
        assert_eq!(store.publish(valid_frame(6000, 3)).await, Some(3));

        let (_, seq) = store.snapshot().await;
        assert_eq!(seq, 3);
    }

    #[tokio::test]
    async fn test_snapshot_returns_most_recent_publish() {
        let store = store();

        let frame_a = valid_frame(6000, 0xAA);
        let frame_b = valid_frame(7000, 0xBB);
        store.publish(frame_a).await;
        store.publish(frame_b.clone()).await;

        // Only the final frame of the burst is observable
        let (frame, seq) = store.snapshot().await;
        assert_eq!(frame, frame_b);
        assert_eq!(seq, 2);
    }

    #[tokio::test]
    async fn test_snapshot_is_idempotent_between_publishes() {
        let store = store();
        store.publish(valid_frame(6000, 7)).await;

        let first = store.snapshot().await;
        let second = store.snapshot().await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_invalid_publish_is_a_noop() {
        let store = store();
        let good = valid_frame(6000, 1);
        store.publish(good.clone()).await;

        // Too short
        assert_eq!(store.publish(valid_frame(4999, 2)).await, None);

        // Missing EOI
        let mut missing_eoi = vec![9u8; 6000];
        missing_eoi[..2].copy_from_slice(&media::SOI);
        assert_eq!(store.publish(Bytes::from(missing_eoi)).await, None);

        // Missing SOI
        let mut missing_soi = vec![9u8; 6000];
        let end = missing_soi.len() - 2;
        missing_soi[end..].copy_from_slice(&media::EOI);
        assert_eq!(store.publish(Bytes::from(missing_soi)).await, None);

        // Slot and counter unchanged
        let (frame, seq) = store.snapshot().await;
        assert_eq!(frame, good);
        assert_eq!(seq, 1);

        let stats = store.stats().await;
        assert_eq!(stats.frames_received_total, 1);
    }

    #[tokio::test]
    async fn test_published_handle_survives_overwrite() {
        let store = store();
        let frame_a = valid_frame(6000, 0xAA);
        store.publish(frame_a.clone()).await;

        let (held, _) = store.snapshot().await;
        store.publish(valid_frame(6000, 0xBB)).await;

        // The handle taken before the overwrite still reads the old bytes
        assert_eq!(held, frame_a);
    }

    #[tokio::test]
    async fn test_wait_for_change_times_out_when_idle() {
        let store = store();
        assert!(!store.wait_for_change(Duration::from_millis(20)).await);
    }

    #[tokio::test]
    async fn test_publish_wakes_all_waiters() {
        let store = Arc::new(store());

        let mut waiters = Vec::new();
        for _ in 0..3 {
            let store = Arc::clone(&store);
            waiters.push(tokio::spawn(async move {
                store.wait_for_change(Duration::from_secs(5)).await
            }));
        }

        // Let every waiter reach its notified() await
        tokio::time::sleep(Duration::from_millis(50)).await;
        store.publish(valid_frame(6000, 1)).await;

        for waiter in waiters {
            assert!(waiter.await.unwrap(), "waiter missed the broadcast");
        }
    }

    #[tokio::test]
    async fn test_rejected_publish_does_not_wake_waiters() {
        let store = Arc::new(store());

        let waiter = {
            let store = Arc::clone(&store);
            tokio::spawn(async move { store.wait_for_change(Duration::from_millis(200)).await })
        };

        tokio::time::sleep(Duration::from_millis(50)).await;
        store.publish(Bytes::from_static(b"junk")).await;

        assert!(!waiter.await.unwrap(), "rejected frame must not notify");
    }

    #[tokio::test]
    async fn test_stats_projection() {
        let store = store();

        let stats = store.stats().await;
        assert_eq!(
            stats,
            ChannelStats {
                frames_received_total: 0,
                has_frame: false,
                frame_size: 0,
            }
        );

        store.publish(valid_frame(6000, 1)).await;
        let stats = store.stats().await;
        assert_eq!(
            stats,
            ChannelStats {
                frames_received_total: 1,
                has_frame: true,
                frame_size: 6000,
            }
        );
    }
}
