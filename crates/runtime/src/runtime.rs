//! High-level runtime orchestrator.
//!
//! The runtime owns the background workers, wires up the frame channel and
//! shutdown signal, and exposes a builder-based API for clients to assemble
//! the overlay from its parts.

use std::sync::Arc;
use std::time::Duration;

use overlay_core::OverlaySettings;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::info;

use crate::api::{CancelSource, MapDataProvider, Result, RuntimeError, RuntimeHandle};
use crate::orchestrator::MapFetchOrchestrator;
use crate::probe::SnapshotSource;
use crate::render::{OverlayRenderer, OverlaySurface};
use crate::window::WindowSystem;
use crate::workers::{RenderWorker, TickWorker};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub settings: OverlaySettings,
    /// Upper bound on a single provider call.
    pub fetch_timeout: Duration,
}

impl RuntimeConfig {
    pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            settings: OverlaySettings::default(),
            fetch_timeout: Self::DEFAULT_FETCH_TIMEOUT,
        }
    }
}

/// Running overlay.
///
/// [`RuntimeHandle`] provides a cloneable façade for clients.
pub struct Runtime {
    handle: RuntimeHandle,
    tick_worker: JoinHandle<()>,
    render_worker: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Stop both workers and wait for them to finish.
    pub async fn shutdown(self) -> Result<()> {
        self.handle.shutdown();

        self.tick_worker.await.map_err(RuntimeError::WorkerJoin)?;
        self.render_worker.await.map_err(RuntimeError::WorkerJoin)?;

        info!("runtime stopped");
        Ok(())
    }
}

/// Builder for [`Runtime`].
///
/// A snapshot source, map provider, window system and surface are all
/// required.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    source: Option<Box<dyn SnapshotSource>>,
    provider: Option<Arc<dyn MapDataProvider>>,
    windows: Option<Arc<dyn WindowSystem>>,
    surface: Option<Box<dyn OverlaySurface>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            source: None,
            provider: None,
            windows: None,
            surface: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    pub fn snapshot_source(mut self, source: impl SnapshotSource + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    pub fn map_provider(mut self, provider: Arc<dyn MapDataProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn window_system(mut self, windows: Arc<dyn WindowSystem>) -> Self {
        self.windows = Some(windows);
        self
    }

    pub fn surface(mut self, surface: impl OverlaySurface + 'static) -> Self {
        self.surface = Some(Box::new(surface));
        self
    }

    /// Spawn the workers. Must be called from within a tokio runtime.
    pub fn build(self) -> Result<Runtime> {
        let source = self
            .source
            .ok_or(RuntimeError::MissingComponent("snapshot source"))?;
        let provider = self
            .provider
            .ok_or(RuntimeError::MissingComponent("map provider"))?;
        let windows = self
            .windows
            .ok_or(RuntimeError::MissingComponent("window system"))?;
        let surface = self
            .surface
            .ok_or(RuntimeError::MissingComponent("overlay surface"))?;

        let settings = Arc::new(self.config.settings);
        let (cancel, token) = CancelSource::new();
        let (frame_tx, frame_rx) = watch::channel(None);

        let orchestrator =
            MapFetchOrchestrator::new(provider, self.config.fetch_timeout, token.clone());
        let tick = TickWorker::new(
            source,
            orchestrator,
            Arc::clone(&settings),
            Arc::clone(&windows),
            frame_tx,
            token.clone(),
        );
        let renderer = OverlayRenderer::new(Arc::clone(&settings), windows, surface);
        let render = RenderWorker::new(renderer, frame_rx.clone(), token);

        let tick_worker = tokio::spawn(tick.run());
        let render_worker = tokio::spawn(render.run());
        info!(
            interval_ms = settings.update_interval_ms,
            position = %settings.map_position,
            "runtime started"
        );

        Ok(Runtime {
            handle: RuntimeHandle::new(frame_rx, cancel),
            tick_worker,
            render_worker,
        })
    }
}
