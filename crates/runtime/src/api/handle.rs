//! Cloneable façade over the running overlay.
//!
//! [`RuntimeHandle`] exposes the latest published frame, a change stream for
//! frame consumers, and cooperative shutdown.
use std::sync::Arc;

use tokio::sync::watch;

use crate::orchestrator::OverlayFrame;

/// Receiver side of the frame channel. `None` until the first capture.
pub type FrameReceiver = watch::Receiver<Option<Arc<OverlayFrame>>>;

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    frames: FrameReceiver,
    cancel: CancelSource,
}

impl RuntimeHandle {
    pub(crate) fn new(frames: FrameReceiver, cancel: CancelSource) -> Self {
        Self { frames, cancel }
    }

    /// The most recently published frame, if any.
    pub fn latest_frame(&self) -> Option<Arc<OverlayFrame>> {
        self.frames.borrow().clone()
    }

    /// Subscribe to frame updates.
    ///
    /// Receivers only ever observe whole frames; intermediate frames may be
    /// skipped when the consumer is slower than the tick loop.
    pub fn subscribe_frames(&self) -> FrameReceiver {
        self.frames.clone()
    }

    /// Ask every worker to stop. In-flight map requests are abandoned.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }

    pub fn is_shutting_down(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

/// Owner side of the shutdown signal.
#[derive(Clone)]
pub struct CancelSource {
    tx: Arc<watch::Sender<bool>>,
}

impl CancelSource {
    pub fn new() -> (Self, CancelToken) {
        let (tx, rx) = watch::channel(false);
        (Self { tx: Arc::new(tx) }, CancelToken { rx })
    }

    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.tx.borrow()
    }

    pub fn token(&self) -> CancelToken {
        CancelToken {
            rx: self.tx.subscribe(),
        }
    }
}

/// Listener side of the shutdown signal.
#[derive(Clone, Debug)]
pub struct CancelToken {
    rx: watch::Receiver<bool>,
}

impl CancelToken {
    /// A token that is never cancelled.
    pub fn never() -> Self {
        let (_tx, rx) = watch::channel(false);
        Self { rx }
    }

    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolves once cancellation is requested. Never resolves if the source
    /// is dropped without cancelling.
    pub async fn cancelled(&self) {
        let mut rx = self.rx.clone();
        if rx.wait_for(|cancelled| *cancelled).await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}
