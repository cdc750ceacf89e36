//! Analytics Provider Integration
//!
//! The fetch seam (`DataProvider`) and the typed client built on top of it.

mod http;
mod mock;

pub use http::{VybeClient, VybeConfig};
pub use mock::{MockDataProvider, RecordedRequest};

use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{FetchError, Result};
use crate::model::{TokenBalances, TokenDetails, TokenOhlcv, TopHolders, WalletPnl};

/// Read-only provider endpoints, keyed by a wallet or token address
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Endpoint {
    TokenDetails,
    TokenBalances,
    WalletPnl,
    TopHolders,
    TokenOhlcv,
}

impl Endpoint {
    /// Path template relative to the API base URL
    pub fn template(self) -> &'static str {
        match self {
            Endpoint::TokenDetails => "token/{address}",
            Endpoint::TokenBalances => "account/token-balance/{address}",
            Endpoint::WalletPnl => "account/pnl/{address}",
            Endpoint::TopHolders => "token/{address}/top-holders",
            Endpoint::TokenOhlcv => "price/{address}/token-ohlcv",
        }
    }

    /// Substitute `{name}` placeholders with `path_args`, one path segment each
    pub fn path_segments(self, path_args: &[(&str, &str)]) -> Result<Vec<String>> {
        self.template()
            .split('/')
            .map(|segment| {
                match segment.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
                    Some(name) => path_args
                        .iter()
                        .find(|(key, _)| *key == name)
                        .map(|(_, value)| (*value).to_string())
                        .ok_or_else(|| FetchError::Config(format!("missing path argument '{}'", name))),
                    None => Ok(segment.to_string()),
                }
            })
            .collect()
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.template())
    }
}

/// Fetch seam (Strategy pattern)
///
/// Implementations issue exactly one request per call and classify the outcome:
/// transport failures as `FetchError::Transport`, payloads carrying an error
/// indicator as `FetchError::Upstream` (see [`classify_payload`]).
#[async_trait]
pub trait DataProvider: Send + Sync {
    async fn fetch(
        &self,
        endpoint: Endpoint,
        path_args: &[(&str, &str)],
        query: &[(&str, &str)],
    ) -> Result<Value>;

    /// Provider name
    fn name(&self) -> &str;
}

/// Collapse a payload with a non-empty `error` field into `FetchError::Upstream`
pub fn classify_payload(payload: Value) -> Result<Value> {
    let upstream = match payload.get("error") {
        None | Some(Value::Null) | Some(Value::Bool(false)) => None,
        Some(Value::String(s)) if s.is_empty() => None,
        Some(Value::String(s)) => Some(Some(s.clone())),
        Some(Value::Bool(true)) => Some(None),
        Some(other) => Some(
            other
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string)
                .or_else(|| Some(other.to_string())),
        ),
    };

    match upstream {
        None => Ok(payload),
        Some(message) => Err(FetchError::Upstream(message)),
    }
}

/// Parse a classified payload into its endpoint schema
pub fn decode<T: DeserializeOwned>(endpoint: Endpoint, payload: Value) -> Result<T> {
    serde_json::from_value(payload).map_err(|e| {
        tracing::warn!(endpoint = %endpoint, error = %e, "Payload does not match schema");
        FetchError::Upstream(None)
    })
}

/// Typed access to the analytics endpoints
#[derive(Clone)]
pub struct AnalyticsClient {
    provider: Arc<dyn DataProvider>,
    resolution: String,
}

impl AnalyticsClient {
    /// `resolution` is the fixed query parameter of the OHLCV endpoint (e.g. "1d")
    pub fn new(provider: Arc<dyn DataProvider>, resolution: impl Into<String>) -> Self {
        Self {
            provider,
            resolution: resolution.into(),
        }
    }

    async fn get<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        address: &str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        tracing::debug!(provider = self.provider.name(), endpoint = %endpoint, address, "Fetching");
        let payload = self
            .provider
            .fetch(endpoint, &[("address", address)], query)
            .await?;
        decode(endpoint, payload)
    }

    pub async fn token_details(&self, address: &str) -> Result<TokenDetails> {
        self.get(Endpoint::TokenDetails, address, &[]).await
    }

    pub async fn token_balances(&self, wallet: &str) -> Result<TokenBalances> {
        self.get(Endpoint::TokenBalances, wallet, &[]).await
    }

    pub async fn wallet_pnl(&self, wallet: &str) -> Result<WalletPnl> {
        self.get(Endpoint::WalletPnl, wallet, &[]).await
    }

    pub async fn top_holders(&self, address: &str) -> Result<TopHolders> {
        self.get(Endpoint::TopHolders, address, &[]).await
    }

    pub async fn token_ohlcv(&self, address: &str) -> Result<TokenOhlcv> {
        self.get(Endpoint::TokenOhlcv, address, &[("resolution", self.resolution.as_str())])
            .await
    }
}
