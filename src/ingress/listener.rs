//! Producer endpoint listener
//!
//! Binds one network endpoint per channel and accepts producer connections
//! indefinitely. A producer may disconnect and a new one may reconnect to the
//! same endpoint without restarting the service; a single failed or closed
//! producer connection is never fatal to the process.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::net::{TcpListener, TcpStream};

use crate::error::Result;
use crate::store::FrameStore;

use super::config::IngressConfig;
use super::connection;

/// Ingress listener for one channel
pub struct IngressListener {
    channel_id: String,
    config: IngressConfig,
    store: Arc<FrameStore>,
    listener: TcpListener,
    next_session_id: AtomicU64,
}

impl IngressListener {
    /// Bind the producer endpoint for a channel.
    ///
    /// Bind failure is a startup-fatal error and must abort the process
    /// before any connection is accepted.
    pub async fn bind(
        channel_id: impl Into<String>,
        config: IngressConfig,
        store: Arc<FrameStore>,
    ) -> Result<Self> {
        let channel_id = channel_id.into();
        let listener = TcpListener::bind(config.bind_addr).await?;

        tracing::info!(
            channel = %channel_id,
            addr = %listener.local_addr()?,
            "Ingress listening"
        );

        Ok(Self {
            channel_id,
            config,
            store,
            listener,
            next_session_id: AtomicU64::new(1),
        })
    }

    /// The address the listener actually bound to.
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Accept producer connections forever.
    ///
    /// Accept errors are logged and the loop continues; only the initial bind
    /// can take the process down.
    pub async fn run(self) -> Result<()> {
        loop {
            match self.listener.accept().await {
                Ok((socket, peer_addr)) => {
                    self.handle_connection(socket, peer_addr);
                }
                Err(e) => {
                    tracing::error!(
                        channel = %self.channel_id,
                        error = %e,
                        "Failed to accept producer connection"
                    );
                }
            }
        }
    }

    fn handle_connection(&self, socket: TcpStream, peer_addr: SocketAddr) {
        let session_id = self.next_session_id.fetch_add(1, Ordering::Relaxed);

        if self.config.tcp_nodelay {
            if let Err(e) = socket.set_nodelay(true) {
                tracing::warn!(
                    channel = %self.channel_id,
                    session_id = session_id,
                    error = %e,
                    "Failed to set TCP_NODELAY"
                );
            }
        }

        let channel_id = self.channel_id.clone();
        let config = self.config.clone();
        let store = Arc::clone(&self.store);

        tokio::spawn(async move {
            if let Err(e) =
                connection::run(socket, peer_addr, &channel_id, session_id, config, store).await
            {
                tracing::debug!(
                    channel = %channel_id,
                    session_id = session_id,
                    error = %e,
                    "Producer connection error"
                );
            }

            tracing::info!(
                channel = %channel_id,
                session_id = session_id,
                "Producer connection closed"
            );
        });
    }
}
