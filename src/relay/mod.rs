//! Relay composition
//!
//! A relay ties one channel's frame store to its ingress listener and
//! distribution server. Deployments run one relay per camera on distinct
//! endpoints; relays share nothing but the immutable placeholder bytes, and
//! adding a channel is purely additive.

use std::net::SocketAddr;
use std::sync::Arc;

use crate::distribution::{DistributionConfig, DistributionServer};
use crate::error::Result;
use crate::ingress::{IngressConfig, IngressListener};
use crate::media::Placeholder;
use crate::store::FrameStore;

/// Configuration for one channel's relay
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Channel identity, used in logs and the stats document
    pub channel_id: String,

    /// Producer endpoint configuration
    pub ingress: IngressConfig,

    /// Viewer endpoint configuration
    pub distribution: DistributionConfig,
}

impl RelayConfig {
    /// Create a config with default endpoints for the given channel.
    pub fn new(channel_id: impl Into<String>) -> Self {
        Self {
            channel_id: channel_id.into(),
            ingress: IngressConfig::default(),
            distribution: DistributionConfig::default(),
        }
    }

    /// Replace the ingress configuration.
    pub fn ingress(mut self, config: IngressConfig) -> Self {
        self.ingress = config;
        self
    }

    /// Replace the distribution configuration.
    pub fn distribution(mut self, config: DistributionConfig) -> Self {
        self.distribution = config;
        self
    }

    /// Set the producer endpoint address.
    pub fn ingress_addr(mut self, addr: SocketAddr) -> Self {
        self.ingress.bind_addr = addr;
        self
    }

    /// Set the viewer endpoint address.
    pub fn distribution_addr(mut self, addr: SocketAddr) -> Self {
        self.distribution.bind_addr = addr;
        self
    }
}

/// One camera channel: store + ingress + distribution
pub struct Relay {
    channel_id: String,
    store: Arc<FrameStore>,
    ingress: IngressListener,
    distribution: DistributionServer,
}

impl Relay {
    /// Create the channel's store and bind both endpoints.
    ///
    /// Either bind failing is fatal, before any connection is accepted — a
    /// half-bound relay never serves.
    pub async fn bind(config: RelayConfig, placeholder: &Placeholder) -> Result<Self> {
        let store = Arc::new(FrameStore::new(placeholder));

        let ingress = IngressListener::bind(
            config.channel_id.as_str(),
            config.ingress,
            Arc::clone(&store),
        )
        .await?;
        let distribution = DistributionServer::bind(
            config.channel_id.as_str(),
            config.distribution,
            Arc::clone(&store),
        )
        .await?;

        Ok(Self {
            channel_id: config.channel_id,
            store,
            ingress,
            distribution,
        })
    }

    /// Channel identity.
    pub fn channel_id(&self) -> &str {
        &self.channel_id
    }

    /// The channel's frame store (for stats queries or direct publishing in
    /// tests).
    pub fn store(&self) -> &Arc<FrameStore> {
        &self.store
    }

    /// Producer endpoint address.
    pub fn ingress_addr(&self) -> Result<SocketAddr> {
        self.ingress.local_addr()
    }

    /// Viewer endpoint address.
    pub fn distribution_addr(&self) -> Result<SocketAddr> {
        self.distribution.local_addr()
    }

    /// Serve both endpoints until a fatal error.
    pub async fn run(self) -> Result<()> {
        tokio::try_join!(self.ingress.run(), self.distribution.run())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let ingress_addr: SocketAddr = "127.0.0.1:3001".parse().unwrap();
        let http_addr: SocketAddr = "127.0.0.1:5000".parse().unwrap();

        let config = RelayConfig::new("cam1")
            .ingress_addr(ingress_addr)
            .distribution_addr(http_addr);

        assert_eq!(config.channel_id, "cam1");
        assert_eq!(config.ingress.bind_addr, ingress_addr);
        assert_eq!(config.distribution.bind_addr, http_addr);
    }

    #[tokio::test]
    async fn test_bind_ephemeral_endpoints() {
        let placeholder = Placeholder::from_bytes(&b"p"[..]);
        let config = RelayConfig::new("cam1")
            .ingress_addr("127.0.0.1:0".parse().unwrap())
            .distribution_addr("127.0.0.1:0".parse().unwrap());

        let relay = Relay::bind(config, &placeholder).await.unwrap();

        assert_ne!(relay.ingress_addr().unwrap().port(), 0);
        assert_ne!(relay.distribution_addr().unwrap().port(), 0);
        assert_ne!(
            relay.ingress_addr().unwrap().port(),
            relay.distribution_addr().unwrap().port()
        );
    }

    #[tokio::test]
    async fn test_bind_conflict_is_fatal() {
        let placeholder = Placeholder::from_bytes(&b"p"[..]);

        let first = Relay::bind(
            RelayConfig::new("cam1")
                .ingress_addr("127.0.0.1:0".parse().unwrap())
                .distribution_addr("127.0.0.1:0".parse().unwrap()),
            &placeholder,
        )
        .await
        .unwrap();

        // Second relay on the same ingress port must fail up front
        let taken = first.ingress_addr().unwrap();
        let result = Relay::bind(
            RelayConfig::new("cam2")
                .ingress_addr(taken)
                .distribution_addr("127.0.0.1:0".parse().unwrap()),
            &placeholder,
        )
        .await;

        assert!(result.is_err());
    }
}
