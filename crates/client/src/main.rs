//! Map overlay client binary.
//!
//! Composition root that loads configuration, sets up logging, assembles the
//! runtime for the current platform and runs it until interrupted.
//!
//! # Examples
//!
//! ```bash
//! # Headless, logging only
//! cargo run -p overlay-client
//!
//! # Write composed frames to ./frames/overlay.png
//! OVERLAY_FRAME_DIR=frames OVERLAY_DEBUG=true cargo run -p overlay-client
//! ```

use anyhow::Result;
use client_bootstrap::{ClientConfig, OverlayBuilder};
use overlay_client::{Client, logging, surface_for};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = ClientConfig::from_env();
    logging::setup_logging()?;

    tracing::info!("Starting map overlay");
    tracing::info!("Process: {}", config.probe.process_name);
    tracing::info!("Map server: {}", config.map_server_url);
    if let Some(dir) = &config.frame_dir {
        tracing::info!("Frame output: {}", dir.display());
    }

    let surface = surface_for(config.frame_dir.as_deref())?;
    let setup = OverlayBuilder::new(config).build(surface)?;

    Client::new(setup.runtime).run().await
}
