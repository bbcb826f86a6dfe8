//! Asynchronous abstraction for sourcing per-area map data.
//!
//! Runtime users plug in [`MapDataProvider`] implementations so the overlay
//! can run against the HTTP map server, canned fixtures, or test doubles.
use async_trait::async_trait;
use overlay_core::{AreaId, Difficulty, MapData};

use super::errors::ProviderError;

/// Parameters identifying one generated world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SessionRequest {
    pub map_seed: u32,
    pub difficulty: Difficulty,
}

/// Source of collision maps keyed by world seed and area.
///
/// A session must be opened for a `(seed, difficulty)` pair before
/// [`map_data`](Self::map_data) can answer for areas of that world.
#[async_trait]
pub trait MapDataProvider: Send + Sync {
    /// Open (or replace) the session used by subsequent area requests.
    async fn create_session(&self, request: SessionRequest) -> Result<(), ProviderError>;

    /// Fetch the map for `area` in the currently open session.
    async fn map_data(&self, area: AreaId) -> Result<MapData, ProviderError>;
}
