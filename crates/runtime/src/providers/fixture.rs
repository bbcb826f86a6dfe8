//! Provider serving preloaded maps, for offline runs and tests.
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use overlay_core::{AreaId, MapData};

use crate::api::{MapDataProvider, ProviderError, SessionRequest};

/// One call observed by a [`StaticMapProvider`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProviderCall {
    CreateSession(SessionRequest),
    MapData(AreaId),
}

/// Serves the same maps for every session and records each call.
///
/// Sessions and areas can be made to fail or stall to exercise error paths.
#[derive(Clone, Default)]
pub struct StaticMapProvider {
    maps: Arc<HashMap<AreaId, MapData>>,
    calls: Arc<Mutex<Vec<ProviderCall>>>,
    failing_sessions: Arc<Mutex<usize>>,
    delay: Option<Duration>,
}

impl StaticMapProvider {
    pub fn new(maps: impl IntoIterator<Item = (AreaId, MapData)>) -> Self {
        Self {
            maps: Arc::new(maps.into_iter().collect()),
            ..Self::default()
        }
    }

    /// Fail the next `count` session requests.
    pub fn fail_next_sessions(&self, count: usize) {
        if let Ok(mut failing) = self.failing_sessions.lock() {
            *failing = count;
        }
    }

    /// Sleep before answering each area request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> Vec<ProviderCall> {
        self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
    }

    fn record(&self, call: ProviderCall) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }
}

#[async_trait]
impl MapDataProvider for StaticMapProvider {
    async fn create_session(&self, request: SessionRequest) -> Result<(), ProviderError> {
        self.record(ProviderCall::CreateSession(request));
        let fail = match self.failing_sessions.lock() {
            Ok(mut failing) if *failing > 0 => {
                *failing -= 1;
                true
            }
            _ => false,
        };
        if fail {
            return Err(ProviderError::NoSession);
        }
        Ok(())
    }

    async fn map_data(&self, area: AreaId) -> Result<MapData, ProviderError> {
        self.record(ProviderCall::MapData(area));
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.maps
            .get(&area)
            .cloned()
            .ok_or(ProviderError::AreaUnavailable(area))
    }
}
