//! Viewer-side frame distribution
//!
//! One HTTP server per channel. Every viewer request opens a long-lived
//! `multipart/x-mixed-replace` response fed from the channel's
//! [`FrameStore`](crate::store::FrameStore); a stats endpoint exposes a
//! read-only projection of the same store.

pub mod config;
pub mod mjpeg;
pub mod server;
pub mod stats;

pub use config::DistributionConfig;
pub use server::DistributionServer;
pub use stats::StatsDocument;
