//! Per-channel frame storage
//!
//! One [`FrameStore`] per camera channel: a single-slot overwrite buffer, a
//! monotonic sequence counter, and a fan-out change notification. Producers
//! and viewers run at independent, uncorrelated rates; the store never queues
//! backlog — it always exposes the most recent valid frame.
//!
//! # Architecture
//!
//! ```text
//!                       Arc<FrameStore>
//!                  ┌───────────────────────┐
//!                  │ slot: RwLock<Slot {   │
//!                  │   frame, seq,         │
//!                  │ }>                    │
//!                  │ changed: Notify       │
//!                  └──────────┬────────────┘
//!                             │
//!        ┌────────────────────┼────────────────────┐
//!        │                    │                    │
//!        ▼                    ▼                    ▼
//!   [Producer]            [Viewer]             [Viewer]
//!   publish()          wait_for_change()    wait_for_change()
//!        │              snapshot()           snapshot()
//!        └──► notify_waiters() ──► multipart chunk ──► HTTP
//! ```
//!
//! # Zero-Copy Design
//!
//! Frame payloads are `bytes::Bytes`, so every reader shares the same
//! allocation. Publishing a new frame swaps the slot but leaves handles
//! already returned to readers untouched.

pub mod frame;
pub mod store;

pub use frame::Frame;
pub use store::{ChannelStats, FrameStore};
