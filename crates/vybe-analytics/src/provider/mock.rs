//! Mock Data Provider
//!
//! For tests and demos. Serves canned payloads per endpoint and records every
//! request it receives.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Mutex;

use super::{classify_payload, DataProvider, Endpoint};
use crate::error::{FetchError, Result};

/// A request as seen by the mock
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordedRequest {
    pub endpoint: Endpoint,
    pub address: Option<String>,
    pub query: Vec<(String, String)>,
}

/// Mock provider with canned responses
#[derive(Default)]
pub struct MockDataProvider {
    responses: HashMap<Endpoint, Result<Value>>,
    calls: AtomicUsize,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockDataProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `payload` for `endpoint`. Payloads go through the same error-field
    /// classification as real responses.
    pub fn with_payload(mut self, endpoint: Endpoint, payload: Value) -> Self {
        self.responses.insert(endpoint, Ok(payload));
        self
    }

    /// Fail every request to `endpoint` with `error`
    pub fn with_error(mut self, endpoint: Endpoint, error: FetchError) -> Self {
        self.responses.insert(endpoint, Err(error));
        self
    }

    /// Number of fetches issued so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub async fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().await.clone()
    }
}

#[async_trait]
impl DataProvider for MockDataProvider {
    async fn fetch(
        &self,
        endpoint: Endpoint,
        path_args: &[(&str, &str)],
        query: &[(&str, &str)],
    ) -> Result<Value> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().await.push(RecordedRequest {
            endpoint,
            address: path_args
                .iter()
                .find(|(key, _)| *key == "address")
                .map(|(_, value)| (*value).to_string()),
            query: query
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        });

        match self.responses.get(&endpoint) {
            Some(Ok(payload)) => classify_payload(payload.clone()),
            Some(Err(error)) => Err(error.clone()),
            None => Err(FetchError::Transport(format!("no canned response for {}", endpoint))),
        }
    }

    fn name(&self) -> &str {
        "MockVybe"
    }
}
