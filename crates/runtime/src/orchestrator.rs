//! Decides when to open map sessions and fetch map data.
//!
//! Each tick compares the fresh snapshot with the previous one. A new world
//! (seed) opens a provider session; a new area, difficulty or world fetches
//! the area's map. Provider calls run inline under a timeout and abort on
//! shutdown, so at most one request is ever in flight and a late reply can
//! never overwrite a newer one.
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use overlay_core::{GameSnapshot, MapData};
use tracing::{debug, info, warn};

use crate::api::{CancelToken, MapDataProvider, ProviderError, SessionRequest};

/// Everything the renderer needs for one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct OverlayFrame {
    pub snapshot: GameSnapshot,
    pub map: Option<Arc<MapData>>,
    pub hidden: bool,
}

/// Mutable state carried between ticks.
#[derive(Clone, Debug, Default)]
pub struct OrchestratorState {
    pub last: Option<GameSnapshot>,
    pub current: Option<GameSnapshot>,
    pub map: Option<Arc<MapData>>,
    /// Seed of the provider session that is currently open.
    pub session_seed: Option<u32>,
}

/// Provider work required by one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickPlan {
    pub open_session: bool,
    pub fetch_map: bool,
    pub drop_map: bool,
}

impl TickPlan {
    /// A missing `last` snapshot counts as a change in every field.
    pub fn decide(
        last: Option<&GameSnapshot>,
        current: &GameSnapshot,
        has_map: bool,
        session_seed: Option<u32>,
    ) -> Self {
        let seed = current.map_seed;
        if seed == 0 {
            return Self {
                drop_map: has_map,
                ..Self::default()
            };
        }

        let seed_changed = last.map(|l| l.map_seed) != Some(seed);
        let area_changed = last.map(|l| l.area) != Some(current.area);
        let difficulty_changed = last.map(|l| l.difficulty) != Some(current.difficulty);

        Self {
            open_session: seed_changed || session_seed != Some(seed),
            fetch_map: !has_map
                || (area_changed && !current.area.is_none())
                || difficulty_changed
                || seed_changed,
            drop_map: false,
        }
    }

    pub fn is_idle(&self) -> bool {
        *self == Self::default()
    }
}

pub struct MapFetchOrchestrator {
    provider: Arc<dyn MapDataProvider>,
    fetch_timeout: Duration,
    cancel: CancelToken,
}

impl MapFetchOrchestrator {
    pub fn new(
        provider: Arc<dyn MapDataProvider>,
        fetch_timeout: Duration,
        cancel: CancelToken,
    ) -> Self {
        Self {
            provider,
            fetch_timeout,
            cancel,
        }
    }

    /// Apply one snapshot to `state`, calling the provider as needed.
    ///
    /// Provider failures are logged and leave the state ready to retry on the
    /// next tick: a failed session leaves no session open, a failed fetch
    /// leaves no cached map.
    pub async fn tick(&self, state: &mut OrchestratorState, snapshot: GameSnapshot) -> TickPlan {
        let plan = TickPlan::decide(
            state.last.as_ref(),
            &snapshot,
            state.map.is_some(),
            state.session_seed,
        );
        state.current = Some(snapshot.clone());

        if plan.drop_map {
            info!("game left; dropping cached map");
            state.map = None;
            state.session_seed = None;
        }

        if plan.open_session {
            state.session_seed = None;
            state.map = None;
            let request = SessionRequest {
                map_seed: snapshot.map_seed,
                difficulty: snapshot.difficulty,
            };
            match self.guarded(self.provider.create_session(request)).await {
                Ok(()) => {
                    info!(
                        seed = snapshot.map_seed,
                        difficulty = %snapshot.difficulty,
                        "opened map session"
                    );
                    state.session_seed = Some(snapshot.map_seed);
                }
                Err(error) => warn!(%error, seed = snapshot.map_seed, "failed to open map session"),
            }
        }

        if plan.fetch_map {
            if state.session_seed == Some(snapshot.map_seed) {
                match self.guarded(self.provider.map_data(snapshot.area)).await {
                    Ok(data) => {
                        info!(area = %snapshot.area, rows = data.map_rows.len(), "fetched map");
                        state.map = Some(Arc::new(data));
                    }
                    Err(error) => {
                        warn!(%error, area = %snapshot.area, "failed to fetch map");
                        state.map = None;
                    }
                }
            } else {
                debug!(area = %snapshot.area, "skipping map fetch without an open session");
            }
        }

        state.last = Some(snapshot);
        plan
    }

    /// Run a provider call under the fetch timeout, abandoning it on shutdown.
    async fn guarded<T>(
        &self,
        call: impl Future<Output = Result<T, ProviderError>>,
    ) -> Result<T, ProviderError> {
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(ProviderError::Cancelled),
            outcome = tokio::time::timeout(self.fetch_timeout, call) => {
                outcome.map_err(|_| ProviderError::Timeout(self.fetch_timeout))?
            }
        }
    }
}
