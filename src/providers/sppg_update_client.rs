use std::time::Duration;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;

use crate::errors::internal::RemoteError;
use crate::providers::status_workflow::REFERENCE_MARKER;
use crate::types::dto::common::ErrorResponse;
use crate::types::dto::sppg::{SppgDto, SppgWriteResponse, UpdateSppgRequest};
use crate::types::internal::SppgStatus;

/// HTTP client for the record update endpoint
///
/// Issues `PUT {base}/sppg` with a bearer token and reads records back with
/// `GET {base}/sppg/{id}`. Nothing is retried; a non-2xx answer becomes
/// `RemoteError::Status` carrying the server's message. Callers refetch the
/// record after a successful write to observe the authoritative state.
pub struct SppgUpdateClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
    cancel: CancellationToken,
}

impl SppgUpdateClient {
    pub fn new(base_url: impl Into<String>, token: Option<String>, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
            cancel: CancellationToken::new(),
        }
    }

    /// Tie in-flight requests to an outer lifetime
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub async fn set_status(&self, id_sppg: &str, status: SppgStatus) -> Result<SppgWriteResponse, RemoteError> {
        self.put(UpdateSppgRequest {
            id_sppg: id_sppg.to_string(),
            prog_stat: Some(status.as_str().to_string()),
            reff_attention: None,
        })
        .await
    }

    pub async fn set_reference_marker(&self, id_sppg: &str) -> Result<SppgWriteResponse, RemoteError> {
        self.put(UpdateSppgRequest {
            id_sppg: id_sppg.to_string(),
            prog_stat: None,
            reff_attention: Some(REFERENCE_MARKER.to_string()),
        })
        .await
    }

    pub async fn fetch_record(&self, id_sppg: &str) -> Result<SppgDto, RemoteError> {
        let url = format!("{}/sppg/{}", self.base_url, id_sppg);
        let request = self.authorized(self.client.get(&url));
        self.send(url, request).await
    }

    async fn put(&self, body: UpdateSppgRequest) -> Result<SppgWriteResponse, RemoteError> {
        let url = format!("{}/sppg", self.base_url);
        let request = self.authorized(self.client.put(&url)).json(&body);

        let response: SppgWriteResponse = self.send(url, request).await?;
        tracing::info!(
            id_sppg = %body.id_sppg,
            prog_stat = ?body.prog_stat,
            reff_attention = ?body.reff_attention,
            "Record update accepted"
        );
        Ok(response)
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send<T: DeserializeOwned>(
        &self,
        url: String,
        request: reqwest::RequestBuilder,
    ) -> Result<T, RemoteError> {
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(RemoteError::Cancelled { url }),
            result = Self::exchange(url.clone(), request) => result,
        }
    }

    async fn exchange<T: DeserializeOwned>(
        url: String,
        request: reqwest::RequestBuilder,
    ) -> Result<T, RemoteError> {
        let response = request.send().await.map_err(|e| RemoteError::Network {
            url: url.clone(),
            message: e.to_string(),
        })?;

        let status = response.status();
        if !status.is_success() {
            let message = Self::error_message(status, response).await;
            tracing::warn!(url = %url, status = status.as_u16(), message = %message, "Record endpoint rejected request");
            return Err(RemoteError::Status {
                url,
                status: status.as_u16(),
                message,
            });
        }

        response.json::<T>().await.map_err(|e| RemoteError::Decode {
            url,
            message: e.to_string(),
        })
    }

    async fn error_message(status: StatusCode, response: reqwest::Response) -> String {
        let fallback = status.canonical_reason().unwrap_or("request failed").to_string();
        match response.text().await {
            Ok(body) => match serde_json::from_str::<ErrorResponse>(&body) {
                Ok(error) => error.message,
                Err(_) if !body.trim().is_empty() => body,
                Err(_) => fallback,
            },
            Err(_) => fallback,
        }
    }
}

impl std::fmt::Debug for SppgUpdateClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SppgUpdateClient")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
