//! Dual-camera relay example
//!
//! Run with: cargo run --example dual_relay [PLACEHOLDER]
//!
//! Examples:
//!   cargo run --example dual_relay                    # loads ./placeholder.jpg
//!   cargo run --example dual_relay assets/idle.jpg    # custom placeholder
//!
//! ## Topology
//!
//! Two fully independent channels:
//!   cam1: WebSocket ingress on :3001, MJPEG viewers on http://localhost:5000/
//!   cam2: WebSocket ingress on :3002, MJPEG viewers on http://localhost:5001/
//!
//! ## Pushing frames (camera side)
//!
//! Any WebSocket client that sends whole JPEG images as binary messages
//! works. Frames under 5000 bytes or without SOI/EOI markers are dropped
//! silently.
//!
//! ## Viewing
//!
//! Browser: open http://localhost:5000/ (the page IS the stream)
//! Stats:   curl http://localhost:5000/stats

use mjpeg_relay::{Placeholder, Relay, RelayConfig};

fn print_usage() {
    eprintln!("Usage: dual_relay [PLACEHOLDER]");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  PLACEHOLDER    Path to the idle image (default: placeholder.jpg)");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_usage();
        return Ok(());
    }

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("mjpeg_relay=debug".parse()?),
        )
        .init();

    // Placeholder is loaded once and shared read-only by both channels;
    // a missing file aborts before any endpoint binds.
    let placeholder_path = args.get(1).map(String::as_str).unwrap_or("placeholder.jpg");
    let placeholder = Placeholder::load(placeholder_path)?;

    let cam1 = Relay::bind(
        RelayConfig::new("cam1")
            .ingress_addr("0.0.0.0:3001".parse()?)
            .distribution_addr("0.0.0.0:5000".parse()?),
        &placeholder,
    )
    .await?;

    let cam2 = Relay::bind(
        RelayConfig::new("cam2")
            .ingress_addr("0.0.0.0:3002".parse()?)
            .distribution_addr("0.0.0.0:5001".parse()?),
        &placeholder,
    )
    .await?;

    println!("cam1: ws ingress :3001, viewers http://localhost:5000/");
    println!("cam2: ws ingress :3002, viewers http://localhost:5001/");
    println!("Stats: http://localhost:5000/stats and http://localhost:5001/stats");
    println!();

    tokio::select! {
        result = async { tokio::try_join!(cam1.run(), cam2.run()) } => {
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
