//! HTTP client for the map generation server.
use async_trait::async_trait;
use overlay_core::{AreaId, MapData};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::debug;

use crate::api::{MapDataProvider, ProviderError, SessionRequest};

#[derive(Debug, Serialize)]
struct CreateSessionBody {
    difficulty: u8,
    mapid: u32,
}

#[derive(Debug, Deserialize)]
struct SessionResponse {
    id: String,
}

/// Map provider backed by the map server's REST API.
///
/// Holds at most one open session; opening a new one replaces it.
pub struct HttpMapProvider {
    /// Server root, without a trailing slash
    base_url: String,

    /// HTTP client
    http_client: reqwest::Client,

    /// Id of the open session
    session: RwLock<Option<String>>,
}

impl HttpMapProvider {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    pub fn with_client(base_url: impl Into<String>, http_client: reqwest::Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            http_client,
            session: RwLock::new(None),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn session_id(&self) -> Option<String> {
        self.session.read().await.clone()
    }

    fn sessions_url(&self) -> String {
        format!("{}/sessions/", self.base_url)
    }

    fn area_url(&self, session: &str, area: AreaId) -> String {
        format!("{}/sessions/{}/areas/{}", self.base_url, session, area.0)
    }
}

#[async_trait]
impl MapDataProvider for HttpMapProvider {
    async fn create_session(&self, request: SessionRequest) -> Result<(), ProviderError> {
        let url = self.sessions_url();
        let body = CreateSessionBody {
            difficulty: request.difficulty as u8,
            mapid: request.map_seed,
        };

        debug!(seed = request.map_seed, difficulty = %request.difficulty, "creating map session");

        let response = self.http_client.post(&url).json(&body).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status {
                status: status.as_u16(),
                url,
            });
        }

        let session: SessionResponse = response.json().await?;
        debug!(session = %session.id, "map session created");
        *self.session.write().await = Some(session.id);
        Ok(())
    }

    async fn map_data(&self, area: AreaId) -> Result<MapData, ProviderError> {
        let session = self.session_id().await.ok_or(ProviderError::NoSession)?;
        let url = self.area_url(&session, area);

        let response = self.http_client.get(&url).send().await?;
        match response.status() {
            status if status.is_success() => Ok(response.json().await?),
            StatusCode::NOT_FOUND => Err(ProviderError::AreaUnavailable(area)),
            status => Err(ProviderError::Status {
                status: status.as_u16(),
                url,
            }),
        }
    }
}
