//! Render worker: draws every frame the tick worker publishes.
use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, trace, warn};

use crate::api::CancelToken;
use crate::orchestrator::OverlayFrame;
use crate::render::OverlayRenderer;

pub struct RenderWorker {
    renderer: OverlayRenderer,
    frames: watch::Receiver<Option<Arc<OverlayFrame>>>,
    cancel: CancelToken,
}

impl RenderWorker {
    pub fn new(
        renderer: OverlayRenderer,
        frames: watch::Receiver<Option<Arc<OverlayFrame>>>,
        cancel: CancelToken,
    ) -> Self {
        Self {
            renderer,
            frames,
            cancel,
        }
    }

    /// Main worker loop. Exits on shutdown or when the tick worker is gone.
    pub async fn run(mut self) {
        self.renderer.prepare_surface();

        loop {
            tokio::select! {
                biased;
                _ = self.cancel.cancelled() => break,
                changed = self.frames.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let frame = self.frames.borrow_and_update().clone();
                    if let Some(frame) = frame {
                        self.draw(&frame);
                    }
                }
            }
        }

        debug!("render worker stopped");
    }

    fn draw(&mut self, frame: &OverlayFrame) {
        match self.renderer.render(frame) {
            Ok(outcome) => trace!(?outcome, "rendered frame"),
            Err(error) => warn!(%error, "failed to present frame"),
        }
    }
}
