//! Distribution configuration

use std::net::SocketAddr;
use std::time::Duration;

/// Distribution server configuration options
#[derive(Debug, Clone)]
pub struct DistributionConfig {
    /// Address the viewer endpoint binds to
    pub bind_addr: SocketAddr,

    /// Upper bound on how long a streaming loop blocks waiting for a new
    /// frame before re-checking the connection
    ///
    /// Purely a liveness bound; the wake-up itself comes from the store's
    /// change notification.
    pub wait_timeout: Duration,

    /// Minimum interval between emission checks when the sequence has not
    /// advanced (~40 fps ceiling by default)
    ///
    /// Guards against a tight spin when the wait returns without an actual
    /// sequence change; it does not implement the wake-up.
    pub min_emit_interval: Duration,
}

impl Default for DistributionConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:5000".parse().unwrap(),
            wait_timeout: Duration::from_secs(1),
            min_emit_interval: Duration::from_millis(25),
        }
    }
}

impl DistributionConfig {
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

    /// Set the idle-wait timeout
    pub fn wait_timeout(mut self, timeout: Duration) -> Self {
        self.wait_timeout = timeout;
        self
    }

    /// Set the emission rate-cap interval
    pub fn min_emit_interval(mut self, interval: Duration) -> Self {
        self.min_emit_interval = interval;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DistributionConfig::default();

        assert_eq!(config.bind_addr.port(), 5000);
        assert_eq!(config.wait_timeout, Duration::from_secs(1));
        assert_eq!(config.min_emit_interval, Duration::from_millis(25));
    }

    #[test]
    fn test_builder_chaining() {
        let addr: SocketAddr = "127.0.0.1:5001".parse().unwrap();
        let config = DistributionConfig::default()
            .bind(addr)
            .wait_timeout(Duration::from_millis(100))
            .min_emit_interval(Duration::from_millis(10));

        assert_eq!(config.bind_addr, addr);
        assert_eq!(config.wait_timeout, Duration::from_millis(100));
        assert_eq!(config.min_emit_interval, Duration::from_millis(10));
    }
}
