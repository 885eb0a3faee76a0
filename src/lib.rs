//! MJPEG camera frame relay
//!
//! Relays single-image JPEG frames pushed by embedded camera devices over
//! persistent WebSocket connections into a continuously-updated in-memory
//! buffer, and re-broadcasts the current frame to any number of HTTP viewers
//! as a `multipart/x-mixed-replace` live stream.
//!
//! Producers and viewers run at independent, uncorrelated rates. The relay
//! never queues backlog: it always exposes the most recent valid frame and
//! silently discards anything older. Delivery to viewers is
//! at-most-one-current-frame — frame drop under bursts is by design.
//!
//! # Architecture
//!
//! ```text
//!  camera ──ws──► ingress ──validate──► FrameStore.publish ──► notify all
//!                                            │                     │
//!                                       snapshot() ◄── every viewer loop
//!                                            │
//!                                   multipart chunk ──► viewer socket
//! ```
//!
//! Each camera channel is one [`Relay`]: a [`FrameStore`], an
//! [`IngressListener`], and a [`DistributionServer`] on distinct endpoints.
//! Channels are fully independent — no shared state, no cross-channel
//! synchronization.
//!
//! # Example
//! ```no_run
//! use mjpeg_relay::{Placeholder, Relay, RelayConfig};
//!
//! # async fn example() -> mjpeg_relay::Result<()> {
//! let placeholder = Placeholder::load("placeholder.jpg")?;
//!
//! let relay = Relay::bind(
//!     RelayConfig::new("cam1")
//!         .ingress_addr("0.0.0.0:3001".parse().unwrap())
//!         .distribution_addr("0.0.0.0:5000".parse().unwrap()),
//!     &placeholder,
//! )
//! .await?;
//!
//! relay.run().await
//! # }
//! ```

pub mod distribution;
pub mod error;
pub mod ingress;
pub mod media;
pub mod relay;
pub mod session;
pub mod store;

pub use distribution::{DistributionConfig, DistributionServer, StatsDocument};
pub use error::{Error, Result};
pub use ingress::{IngressConfig, IngressListener};
pub use media::Placeholder;
pub use relay::{Relay, RelayConfig};
pub use session::ViewerSession;
pub use store::{ChannelStats, Frame, FrameStore};
