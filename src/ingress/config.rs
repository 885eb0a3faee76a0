//! Ingress configuration

use std::net::SocketAddr;
use std::time::Duration;

use crate::media::MAX_FRAME_SIZE;

/// Ingress listener configuration options
#[derive(Debug, Clone)]
pub struct IngressConfig {
    /// Address the producer endpoint binds to
    pub bind_addr: SocketAddr,

    /// Maximum accepted WebSocket message size in bytes
    ///
    /// Oversized payloads are rejected by the transport before reaching the
    /// validator; the offending connection is torn down.
    pub max_message_size: usize,

    /// Interval between liveness pings sent to the producer
    pub ping_interval: Duration,

    /// How long to wait for a pong before treating the connection as dead
    pub pong_timeout: Duration,

    /// Enable TCP_NODELAY (disable Nagle's algorithm)
    pub tcp_nodelay: bool,
}

impl Default for IngressConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:3001".parse().unwrap(),
            max_message_size: MAX_FRAME_SIZE,
            ping_interval: Duration::from_secs(20),
            pong_timeout: Duration::from_secs(10),
            tcp_nodelay: true, // Important for low latency
        }
    }
}

impl IngressConfig {
    /// Create a new config with custom bind address
    pub fn with_addr(addr: SocketAddr) -> Self {
        Self {
            bind_addr: addr,
            ..Default::default()
        }
    }

    /// Set the bind address
    pub fn bind(mut self, addr: SocketAddr) -> Self {
        self.bind_addr = addr;
        self
    }

    /// Set the maximum accepted message size
    pub fn max_message_size(mut self, size: usize) -> Self {
        self.max_message_size = size;
        self
    }

    /// Set the liveness ping interval
    pub fn ping_interval(mut self, interval: Duration) -> Self {
        self.ping_interval = interval;
        self
    }

    /// Set the pong response timeout
    pub fn pong_timeout(mut self, timeout: Duration) -> Self {
        self.pong_timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = IngressConfig::default();

        assert_eq!(config.bind_addr.port(), 3001);
        assert_eq!(config.max_message_size, 2_000_000);
        assert_eq!(config.ping_interval, Duration::from_secs(20));
        assert_eq!(config.pong_timeout, Duration::from_secs(10));
        assert!(config.tcp_nodelay);
    }

    #[test]
    fn test_with_addr() {
        let addr: SocketAddr = "127.0.0.1:3002".parse().unwrap();
        let config = IngressConfig::with_addr(addr);

        assert_eq!(config.bind_addr.port(), 3002);
    }

    #[test]
    fn test_builder_chaining() {
        let addr: SocketAddr = "127.0.0.1:3001".parse().unwrap();
        let config = IngressConfig::default()
            .bind(addr)
            .max_message_size(500_000)
            .ping_interval(Duration::from_secs(5))
            .pong_timeout(Duration::from_secs(2));

        assert_eq!(config.bind_addr, addr);
        assert_eq!(config.max_message_size, 500_000);
        assert_eq!(config.ping_interval, Duration::from_secs(5));
        assert_eq!(config.pong_timeout, Duration::from_secs(2));
    }
}
