//! Per-channel HTTP distribution server
//!
//! Serves the MJPEG live stream at `/` and the stats document at `/stats`.
//! Every incoming request gets an independent streaming loop with fresh
//! viewer state; a dropped viewer ends only its own loop.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::State;
use axum::response::Response;
use axum::routing::get;
use axum::{Json, Router};
use tokio::net::TcpListener;

use crate::error::Result;
use crate::store::FrameStore;

use super::config::DistributionConfig;
use super::mjpeg;
use super::stats::StatsDocument;

/// Shared state handed to the route handlers
#[derive(Clone)]
struct AppState {
    channel_id: String,
    config: DistributionConfig,
    store: Arc<FrameStore>,
}

/// Distribution server for one channel
pub struct DistributionServer {
    channel_id: String,
    config: DistributionConfig,
    store: Arc<FrameStore>,
    listener: TcpListener,
}

impl DistributionServer {
    /// Bind the viewer endpoint for a channel.
    ///
    /// Bind failure is a startup-fatal error and must abort the process
    /// before any connection is accepted.
    pub async fn bind(
        channel_id: impl Into<String>,
        config: DistributionConfig,
        store: Arc<FrameStore>,
    ) -> Result<Self> {
        let channel_id = channel_id.into();
        let listener = TcpListener::bind(config.bind_addr).await?;

        tracing::info!(
            channel = %channel_id,
            addr = %listener.local_addr()?,
            "Distribution listening"
        );

        Ok(Self {
            channel_id,
            config,
            store,
            listener,
        })
    }

    /// The address the server actually bound to.
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Serve viewer connections forever.
    pub async fn run(self) -> Result<()> {
        let state = AppState {
            channel_id: self.channel_id,
            config: self.config,
            store: self.store,
        };

        let app = Router::new()
            .route("/", get(stream_handler))
            .route("/stats", get(stats_handler))
            .with_state(state);

        axum::serve(self.listener, app).await?;
        Ok(())
    }
}

/// `GET /` — open-ended MJPEG live stream
async fn stream_handler(State(state): State<AppState>) -> Response {
    tracing::debug!(channel = %state.channel_id, "Viewer connected");
    mjpeg::stream_response(Arc::clone(&state.store), &state.config)
}

/// `GET /stats` — read-only channel stats document
async fn stats_handler(State(state): State<AppState>) -> Json<StatsDocument> {
    let stats = state.store.stats().await;
    Json(StatsDocument::new(state.channel_id.clone(), stats))
}
