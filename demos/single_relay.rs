//! Single-camera relay example
//!
//! Run with: cargo run --example single_relay [INGRESS_PORT] [HTTP_PORT]
//!
//! Examples:
//!   cargo run --example single_relay              # ingress :3001, http :5000
//!   cargo run --example single_relay 3005 8080
//!
//! Push JPEG frames as binary WebSocket messages to the ingress port, then
//! open http://localhost:5000/ in a browser to watch the stream.

use mjpeg_relay::{Placeholder, Relay, RelayConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("mjpeg_relay=debug".parse()?),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    let ingress_port: u16 = args.get(1).map(|a| a.parse()).transpose()?.unwrap_or(3001);
    let http_port: u16 = args.get(2).map(|a| a.parse()).transpose()?.unwrap_or(5000);

    let placeholder = Placeholder::load("placeholder.jpg")?;

    let relay = Relay::bind(
        RelayConfig::new("cam1")
            .ingress_addr(([0, 0, 0, 0], ingress_port).into())
            .distribution_addr(([0, 0, 0, 0], http_port).into()),
        &placeholder,
    )
    .await?;

    println!("ws ingress :{ingress_port}, viewers http://localhost:{http_port}/");

    tokio::select! {
        result = relay.run() => {
            if let Err(e) = result {
                eprintln!("Relay error: {}", e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            println!("\nShutting down...");
        }
    }

    Ok(())
}
