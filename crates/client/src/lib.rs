//! Top-level client running the overlay until interrupted.
//!
//! ```text
//! Client
//!   ├─→ Runtime (probe, orchestrator, renderer workers)
//!   └─→ Surface (frame dump or headless)
//! ```
pub mod logging;
pub mod surface;

pub use surface::{FrameDumpSurface, HeadlessSurface, surface_for};

use anyhow::Result;
use runtime::{Runtime, RuntimeHandle};

/// Owns the runtime for the lifetime of the process.
pub struct Client {
    runtime: Runtime,
}

impl Client {
    pub fn new(runtime: Runtime) -> Self {
        Self { runtime }
    }

    pub fn handle(&self) -> RuntimeHandle {
        self.runtime.handle()
    }

    /// Run until Ctrl-C, then shut the runtime down.
    pub async fn run(self) -> Result<()> {
        tokio::signal::ctrl_c().await?;
        tracing::info!("Interrupted; shutting down");
        self.shutdown().await
    }

    pub async fn shutdown(self) -> Result<()> {
        self.runtime.shutdown().await?;
        Ok(())
    }
}
