//! Tick worker: capture, orchestrate, publish.
use std::sync::Arc;
use std::time::Duration;

use overlay_core::OverlaySettings;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, trace};

use crate::api::CancelToken;
use crate::orchestrator::{MapFetchOrchestrator, OrchestratorState, OverlayFrame};
use crate::probe::SnapshotSource;
use crate::visibility::{game_in_foreground, should_hide_map};
use crate::window::WindowSystem;

/// Background task that owns the orchestrator state.
///
/// Ticks never overlap: a slow map fetch delays the next tick instead of
/// racing it.
pub struct TickWorker {
    source: Box<dyn SnapshotSource>,
    orchestrator: MapFetchOrchestrator,
    state: OrchestratorState,
    settings: Arc<OverlaySettings>,
    windows: Arc<dyn WindowSystem>,
    frames: watch::Sender<Option<Arc<OverlayFrame>>>,
    cancel: CancelToken,
}

impl TickWorker {
    pub fn new(
        source: Box<dyn SnapshotSource>,
        orchestrator: MapFetchOrchestrator,
        settings: Arc<OverlaySettings>,
        windows: Arc<dyn WindowSystem>,
        frames: watch::Sender<Option<Arc<OverlayFrame>>>,
        cancel: CancelToken,
    ) -> Self {
        Self {
            source,
            orchestrator,
            state: OrchestratorState::default(),
            settings,
            windows,
            frames,
            cancel,
        }
    }

    /// Main worker loop.
    pub async fn run(mut self) {
        let period = Duration::from_millis(
            self.settings
                .update_interval_ms
                .max(OverlaySettings::MIN_UPDATE_INTERVAL_MS),
        );
        info!(?period, "tick worker started");

        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                _ = self.cancel.cancelled() => break,
                _ = interval.tick() => {
                    self.tick().await;
                }
            }
        }

        debug!("tick worker stopped");
    }

    /// One capture/orchestrate/publish cycle. Publishes nothing when no
    /// snapshot could be captured.
    pub async fn tick(&mut self) -> Option<Arc<OverlayFrame>> {
        let Some(snapshot) = self.source.capture() else {
            trace!("no snapshot captured");
            return None;
        };

        self.orchestrator.tick(&mut self.state, snapshot.clone()).await;

        let foreground = game_in_foreground(&snapshot, self.windows.as_ref());
        let hidden = should_hide_map(&snapshot, &self.settings, foreground);
        let frame = Arc::new(OverlayFrame {
            snapshot,
            map: self.state.map.clone(),
            hidden,
        });

        self.frames.send_replace(Some(Arc::clone(&frame)));
        Some(frame)
    }

    pub fn state(&self) -> &OrchestratorState {
        &self.state
    }
}
