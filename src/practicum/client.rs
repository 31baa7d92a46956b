//! HTTP client for the homework review API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::{debug, error};

use crate::config::{Credentials, PollerSettings};
use crate::error::BotError;

/// Source of homework status snapshots.
#[async_trait]
pub trait HomeworkApi: Send + Sync {
    /// Fetches statuses changed since `from_date` (unix seconds).
    async fn fetch_statuses(&self, from_date: i64) -> Result<Value, BotError>;
}

/// Review API client authenticated with an OAuth token.
pub struct PracticumClient {
    http: Client,
    endpoint: String,
    auth_header: String,
}

impl PracticumClient {
    /// Creates a client for `endpoint` with a per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(endpoint: &str, token: &str, timeout: Duration) -> Result<Self, BotError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BotError::HttpClientSetup(e.to_string()))?;

        Ok(Self {
            http,
            endpoint: endpoint.to_owned(),
            auth_header: format!("OAuth {token}"),
        })
    }

    /// Creates a client from loaded credentials and settings.
    pub fn from_config(
        credentials: &Credentials,
        settings: &PollerSettings,
    ) -> Result<Self, BotError> {
        Self::new(
            &settings.endpoint,
            &credentials.practicum_token,
            settings.http_timeout(),
        )
    }

    /// Endpoint this client polls.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl HomeworkApi for PracticumClient {
    async fn fetch_statuses(&self, from_date: i64) -> Result<Value, BotError> {
        debug!("Requesting homework statuses from_date={}", from_date);

        let response = self
            .http
            .get(&self.endpoint)
            .header(reqwest::header::AUTHORIZATION, &self.auth_header)
            .query(&[("from_date", from_date)])
            .send()
            .await
            .map_err(|e| {
                error!("Review API request failed: {}", e);
                BotError::from(e)
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            error!("Review API answered with {}", status);
            return Err(BotError::UnexpectedStatus(status.as_u16()));
        }

        Ok(response.json::<Value>().await?)
    }
}

impl std::fmt::Debug for PracticumClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PracticumClient")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}
