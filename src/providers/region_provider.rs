use std::time::Duration;

use crate::errors::internal::RemoteError;
use crate::types::dto::regions::Region;

/// Read-only lookups against the geographic reference service
///
/// Every lookup fails open: network, status and decode failures are logged
/// and resolve to an empty list so the cascading selects stay usable.
pub struct RegionProvider {
    client: reqwest::Client,
    base_url: String,
}

impl RegionProvider {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub async fn list_provinces(&self) -> Vec<Region> {
        self.fetch_or_empty("provinces.json".to_string()).await
    }

    pub async fn list_regencies(&self, province_id: &str) -> Vec<Region> {
        self.fetch_children("regencies", province_id).await
    }

    pub async fn list_districts(&self, regency_id: &str) -> Vec<Region> {
        self.fetch_children("districts", regency_id).await
    }

    async fn fetch_children(&self, kind: &str, parent_id: &str) -> Vec<Region> {
        match child_path(kind, parent_id) {
            Some(path) => self.fetch_or_empty(path).await,
            None => {
                tracing::warn!(kind, parent_id, "Rejected non-numeric region id");
                Vec::new()
            }
        }
    }

    async fn fetch_or_empty(&self, path: String) -> Vec<Region> {
        match self.fetch(&path).await {
            Ok(regions) => {
                tracing::debug!(path = %path, count = regions.len(), "Fetched regions");
                regions
            }
            Err(e) => {
                tracing::warn!(path = %path, error = %e, "Region lookup failed, returning empty list");
                Vec::new()
            }
        }
    }

    async fn fetch(&self, path: &str) -> Result<Vec<Region>, RemoteError> {
        let url = format!("{}/{}", self.base_url, path);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| RemoteError::Network {
                url: url.clone(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(RemoteError::Status {
                url,
                status: status.as_u16(),
                message: status.canonical_reason().unwrap_or("unknown").to_string(),
            });
        }

        response
            .json::<Vec<Region>>()
            .await
            .map_err(|e| RemoteError::Decode {
                url,
                message: e.to_string(),
            })
    }
}

/// Upstream path for the children of a region; ids are numeric codes only
fn child_path(kind: &str, parent_id: &str) -> Option<String> {
    if parent_id.is_empty() || !parent_id.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(format!("{}/{}.json", kind, parent_id))
}

impl std::fmt::Debug for RegionProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegionProvider")
            .field("base_url", &self.base_url)
            .finish()
    }
}
