use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::{
    errors::FetchError,
    types::{Artist, Paging, TimeRange, Track},
};

/// Authenticated access to the "current user's top items" endpoints.
#[derive(Debug, Clone)]
pub struct SpotifyApi {
    http: Client,
    base_url: String,
    access_token: String,
}

impl SpotifyApi {
    pub fn new(http: Client, base_url: &str, access_token: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            access_token: access_token.to_string(),
        }
    }

    /// Retrieves the user's top artists for a time window.
    ///
    /// Uses `GET /me/top/artists?time_range=..&limit=..`. Records come back in
    /// the order Spotify ranks them.
    pub async fn top_artists(
        &self,
        time_range: TimeRange,
        limit: u32,
    ) -> Result<Vec<Artist>, FetchError> {
        self.top_items("artists", time_range, limit).await
    }

    /// Retrieves the user's top tracks for a time window.
    pub async fn top_tracks(
        &self,
        time_range: TimeRange,
        limit: u32,
    ) -> Result<Vec<Track>, FetchError> {
        self.top_items("tracks", time_range, limit).await
    }

    async fn top_items<T: DeserializeOwned>(
        &self,
        kind: &str,
        time_range: TimeRange,
        limit: u32,
    ) -> Result<Vec<T>, FetchError> {
        let endpoint = format!("{uri}/me/top/{kind}", uri = self.base_url);
        let limit = limit.to_string();

        let response = self
            .http
            .get(&endpoint)
            .bearer_auth(&self.access_token)
            .query(&[("time_range", time_range.as_str()), ("limit", limit.as_str())])
            .send()
            .await
            .map_err(|source| FetchError::Http {
                endpoint: endpoint.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status { endpoint, status });
        }

        let body = response.text().await.map_err(|source| FetchError::Http {
            endpoint: endpoint.clone(),
            source,
        })?;
        let page: Paging<T> =
            serde_json::from_str(&body).map_err(|source| FetchError::Decode { endpoint, source })?;

        Ok(page.items)
    }
}
