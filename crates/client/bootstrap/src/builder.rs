//! Builds the runtime and its platform components from a [`ClientConfig`].
use std::sync::Arc;

use anyhow::{Context, Result};
use runtime::{
    HttpMapProvider, OverlaySurface, ProcessAttacher, Runtime, StateProbe, WindowSystem,
    default_attacher, default_window_system,
};

use crate::config::ClientConfig;

/// Assembles probe, provider, window system and surface into a [`Runtime`].
///
/// Platform defaults are used for every component not overridden.
pub struct OverlayBuilder {
    config: ClientConfig,
    attacher: Option<Box<dyn ProcessAttacher>>,
    windows: Option<Arc<dyn WindowSystem>>,
}

impl OverlayBuilder {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            attacher: None,
            windows: None,
        }
    }

    /// Replace the platform process attacher.
    pub fn attacher(mut self, attacher: impl ProcessAttacher + 'static) -> Self {
        self.attacher = Some(Box::new(attacher));
        self
    }

    /// Replace the platform window system.
    pub fn window_system(mut self, windows: Arc<dyn WindowSystem>) -> Self {
        self.windows = Some(windows);
        self
    }

    /// Spawn the runtime drawing onto `surface`. Must run inside tokio.
    pub fn build(self, surface: Box<dyn OverlaySurface>) -> Result<OverlaySetup> {
        let config = self.config;

        let attacher = self.attacher.unwrap_or_else(default_attacher);
        let probe = StateProbe::new(attacher, config.probe.clone());
        let provider = Arc::new(HttpMapProvider::new(config.map_server_url.as_str()));
        let windows = self
            .windows
            .unwrap_or_else(|| Arc::from(default_window_system(config.screen)));

        tracing::debug!(
            process = %config.probe.process_name,
            map_server = %provider.base_url(),
            "building runtime"
        );

        let runtime = Runtime::builder()
            .config(config.runtime.clone())
            .snapshot_source(probe)
            .map_provider(provider)
            .window_system(windows)
            .surface(surface)
            .build()
            .context("failed to start overlay runtime")?;

        Ok(OverlaySetup { config, runtime })
    }
}

pub struct OverlaySetup {
    pub config: ClientConfig,
    pub runtime: Runtime,
}
