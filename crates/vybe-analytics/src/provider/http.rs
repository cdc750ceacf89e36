//! HTTP Analytics Client
//!
//! `DataProvider` over the Vybe REST API, authenticated with a static
//! `X-API-KEY` header.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde_json::Value;

use super::{classify_payload, DataProvider, Endpoint};
use crate::error::{FetchError, Result};

const API_KEY_HEADER: &str = "X-API-KEY";

/// Client configuration
#[derive(Clone)]
pub struct VybeConfig {
    pub base_url: String,

    /// Static API credential, never logged
    pub api_key: String,

    /// Finite request timeout
    pub timeout_secs: u64,
}

impl std::fmt::Debug for VybeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VybeConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl VybeConfig {
    pub const DEFAULT_BASE_URL: &'static str = "https://api.vybenetwork.xyz";

    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: Self::DEFAULT_BASE_URL.into(),
            api_key: api_key.into(),
            timeout_secs: 30,
        }
    }
}

/// Vybe analytics HTTP client
pub struct VybeClient {
    client: Client,
    base_url: Url,
    api_key: String,
}

impl VybeClient {
    pub fn new(config: VybeConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| FetchError::Config(format!("invalid base URL: {}", e)))?;
        if base_url.cannot_be_a_base() {
            return Err(FetchError::Config("base URL cannot carry a path".into()));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| FetchError::Config(format!("HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url,
            api_key: config.api_key,
        })
    }

    /// Build the request URL; path arguments are percent-encoded per segment
    pub fn endpoint_url(&self, endpoint: Endpoint, path_args: &[(&str, &str)]) -> Result<Url> {
        let segments = endpoint.path_segments(path_args)?;
        let mut url = self.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| FetchError::Config("base URL cannot carry a path".into()))?;
            path.pop_if_empty();
            path.extend(&segments);
        }
        Ok(url)
    }
}

#[async_trait]
impl DataProvider for VybeClient {
    async fn fetch(
        &self,
        endpoint: Endpoint,
        path_args: &[(&str, &str)],
        query: &[(&str, &str)],
    ) -> Result<Value> {
        let url = self.endpoint_url(endpoint, path_args)?;

        let response = self
            .client
            .get(url)
            .header(API_KEY_HEADER, &self.api_key)
            .query(query)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(endpoint = %endpoint, status = %status, "Provider returned non-success status");
            return Err(FetchError::Transport(format!("HTTP {}", status)));
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Transport(e.without_url().to_string()))?;
        if body.trim().is_empty() {
            return Err(FetchError::Transport("empty response body".into()));
        }

        let payload: Value = serde_json::from_str(&body).map_err(|e| {
            tracing::warn!(endpoint = %endpoint, error = %e, "Provider body is not JSON");
            FetchError::Upstream(None)
        })?;

        classify_payload(payload)
    }

    fn name(&self) -> &str {
        "Vybe"
    }
}
