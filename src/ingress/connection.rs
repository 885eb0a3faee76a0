//! Producer connection handling
//!
//! One task per producer socket: upgrades to WebSocket, reads discrete binary
//! messages, validates and publishes them into the channel's store, and
//! probes liveness with ping/pong. No acknowledgement is ever sent for
//! accepted or rejected frames.

use std::net::SocketAddr;
use std::sync::Arc;

use bytes::Bytes;
use futures::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::time::{interval_at, sleep_until, Instant};
use tokio_tungstenite::tungstenite::protocol::WebSocketConfig;
use tokio_tungstenite::tungstenite::Message;

use crate::error::Result;
use crate::media::MIN_FRAME_SIZE;
use crate::store::FrameStore;

use super::config::IngressConfig;

/// Run one producer connection until it closes or fails its liveness probe.
pub(super) async fn run(
    socket: TcpStream,
    peer_addr: SocketAddr,
    channel_id: &str,
    session_id: u64,
    config: IngressConfig,
    store: Arc<FrameStore>,
) -> Result<()> {
    let ws_config = WebSocketConfig {
        max_message_size: Some(config.max_message_size),
        max_frame_size: Some(config.max_message_size),
        ..Default::default()
    };

    let ws = tokio_tungstenite::accept_async_with_config(socket, Some(ws_config)).await?;

    tracing::info!(
        channel = %channel_id,
        session_id = session_id,
        peer = %peer_addr,
        "Producer connected"
    );

    let (mut write, mut read) = ws.split();

    // First probe fires one full interval after connect
    let mut ping_timer = interval_at(Instant::now() + config.ping_interval, config.ping_interval);
    let mut pong_deadline: Option<Instant> = None;

    loop {
        let probe_expiry = async move {
            match pong_deadline {
                Some(deadline) => sleep_until(deadline).await,
                None => std::future::pending().await,
            }
        };

        tokio::select! {
            msg = read.next() => {
                match msg {
                    Some(Ok(Message::Binary(data))) => {
                        if data.len() < MIN_FRAME_SIZE {
                            tracing::trace!(
                                channel = %channel_id,
                                session_id = session_id,
                                size = data.len(),
                                "Ignoring undersized message"
                            );
                            continue;
                        }

                        let size = data.len();
                        match store.publish(Bytes::from(data)).await {
                            Some(seq) => {
                                tracing::debug!(
                                    channel = %channel_id,
                                    session_id = session_id,
                                    seq = seq,
                                    size = size,
                                    "Frame accepted"
                                );
                            }
                            None => {
                                tracing::trace!(
                                    channel = %channel_id,
                                    session_id = session_id,
                                    size = size,
                                    "Frame rejected"
                                );
                            }
                        }
                    }
                    Some(Ok(Message::Ping(payload))) => {
                        write.send(Message::Pong(payload)).await?;
                    }
                    Some(Ok(Message::Pong(_))) => {
                        pong_deadline = None;
                    }
                    Some(Ok(Message::Close(_))) => {
                        tracing::debug!(
                            channel = %channel_id,
                            session_id = session_id,
                            "Producer sent close"
                        );
                        break;
                    }
                    // Text and raw frames are ignored; only binary carries frames
                    Some(Ok(_)) => {}
                    Some(Err(e)) => return Err(e.into()),
                    None => break,
                }
            }
            _ = ping_timer.tick() => {
                write.send(Message::Ping(Vec::new())).await?;
                if pong_deadline.is_none() {
                    pong_deadline = Some(Instant::now() + config.pong_timeout);
                }
            }
            _ = probe_expiry => {
                tracing::warn!(
                    channel = %channel_id,
                    session_id = session_id,
                    "Producer failed liveness probe, closing"
                );
                break;
            }
        }
    }

    Ok(())
}
