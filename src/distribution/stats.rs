//! Channel stats document
//!
//! Read-only JSON projection of a channel, served by `GET /stats`. Querying
//! it has no side effects on the store or any stream.

use serde::Serialize;

use crate::store::ChannelStats;

/// The document returned by the stats endpoint
#[derive(Debug, Clone, Serialize)]
pub struct StatsDocument {
    /// Channel identity
    pub channel_id: String,
    /// Total frames accepted since startup
    pub frames_received_total: u64,
    /// Whether the channel currently holds a real frame
    pub has_frame: bool,
    /// Current frame size in bytes (0 if none)
    pub frame_size: usize,
}

impl StatsDocument {
    /// Project a store's stats into the wire document.
    pub fn new(channel_id: impl Into<String>, stats: ChannelStats) -> Self {
        Self {
            channel_id: channel_id.into(),
            frames_received_total: stats.frames_received_total,
            has_frame: stats.has_frame,
            frame_size: stats.frame_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_projection() {
        let doc = StatsDocument::new(
            "cam1",
            ChannelStats {
                frames_received_total: 42,
                has_frame: true,
                frame_size: 6000,
            },
        );

        assert_eq!(doc.channel_id, "cam1");
        assert_eq!(doc.frames_received_total, 42);
        assert!(doc.has_frame);
        assert_eq!(doc.frame_size, 6000);
    }

    #[test]
    fn test_serializes_expected_fields() {
        let doc = StatsDocument::new(
            "cam2",
            ChannelStats {
                frames_received_total: 0,
                has_frame: false,
                frame_size: 0,
            },
        );

        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "channel_id": "cam2",
                "frames_received_total": 0,
                "has_frame": false,
                "frame_size": 0,
            })
        );
    }
}
