//! Shared bootstrap utilities for the overlay client.
//!
//! Provides configuration loading and runtime assembly for the current
//! platform so the binary only has to pick a surface.
pub mod builder;
pub mod config;

pub use builder::{OverlayBuilder, OverlaySetup};
pub use config::ClientConfig;
