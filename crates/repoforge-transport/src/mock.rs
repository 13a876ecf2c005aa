//! Test-mode interception for the transport layer.
//!
//! `MockTransport` is injected wherever a [`Transport`] is expected. While
//! interception is enabled it answers every call from a registry of canned
//! outcomes keyed by method and URL and never performs network I/O. A call
//! with no registered outcome fails with `TransportError::MockNotFound`.
//!
//! The registry is owned by the instance, so parallel tests never share it.

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use repoforge_utils::error::TransportError;

use crate::types::{Transport, TransportRequest, TransportResponse};

/// Registry key
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MockKey {
    pub method: Method,
    pub url: String,
}

impl MockKey {
    #[must_use]
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
        }
    }
}

/// What an intercepted call returns
#[derive(Debug, Clone)]
pub enum MockOutcome {
    Response(TransportResponse),
    Error(TransportError),
}

/// A canned outcome for one method + URL
#[derive(Debug, Clone)]
pub struct Mock {
    pub key: MockKey,
    pub outcome: MockOutcome,
}

impl Mock {
    /// Canned response with a raw body
    #[must_use]
    pub fn response(
        method: Method,
        url: impl Into<String>,
        status: StatusCode,
        body: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            key: MockKey::new(method, url),
            outcome: MockOutcome::Response(TransportResponse::new(status, body)),
        }
    }

    /// Canned response with a JSON body
    #[must_use]
    pub fn json(
        method: Method,
        url: impl Into<String>,
        status: StatusCode,
        body: &serde_json::Value,
    ) -> Self {
        Self::response(method, url, status, body.to_string())
    }

    /// Canned transport failure
    #[must_use]
    pub fn error(method: Method, url: impl Into<String>, error: TransportError) -> Self {
        Self {
            key: MockKey::new(method, url),
            outcome: MockOutcome::Error(error),
        }
    }
}

/// A call observed by the mock while interception was enabled
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub key: MockKey,
    pub headers: HeaderMap,
    pub body: Option<Vec<u8>>,
    /// Whether a registered outcome answered the call
    pub matched: bool,
}

impl RecordedCall {
    /// Request body decoded as JSON, if any
    #[must_use]
    pub fn json_body(&self) -> Option<serde_json::Value> {
        self.body
            .as_deref()
            .and_then(|b| serde_json::from_slice(b).ok())
    }
}

#[derive(Default)]
struct MockState {
    enabled: bool,
    mocks: HashMap<MockKey, MockOutcome>,
    calls: Vec<RecordedCall>,
}

/// Injectable transport test double
pub struct MockTransport {
    state: Mutex<MockState>,
    fallback: Option<Arc<dyn Transport>>,
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTransport {
    /// New mock with interception enabled and an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Mutex::new(MockState {
                enabled: true,
                ..MockState::default()
            }),
            fallback: None,
        }
    }

    /// New mock that delegates to `fallback` while interception is disabled
    #[must_use]
    pub fn with_fallback(fallback: Arc<dyn Transport>) -> Self {
        Self {
            fallback: Some(fallback),
            ..Self::new()
        }
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn enable(&self) {
        self.state().enabled = true;
    }

    pub fn disable(&self) {
        self.state().enabled = false;
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.state().enabled
    }

    /// Register a canned outcome. A later registration for the same key
    /// replaces the earlier one.
    pub fn register(&self, mock: Mock) {
        self.state().mocks.insert(mock.key, mock.outcome);
    }

    /// Remove every registered outcome. Recorded calls are kept.
    pub fn clear(&self) {
        self.state().mocks.clear();
    }

    /// Forget recorded calls
    pub fn reset_calls(&self) {
        self.state().calls.clear();
    }

    #[must_use]
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.state().calls.clone()
    }

    /// Number of intercepted calls for a method + URL, matched or not
    #[must_use]
    pub fn call_count(&self, method: &Method, url: &str) -> usize {
        self.state()
            .calls
            .iter()
            .filter(|c| &c.key.method == method && c.key.url == url)
            .count()
    }

    /// Number of intercepted calls that had no registered outcome
    #[must_use]
    pub fn miss_count(&self) -> usize {
        self.state().calls.iter().filter(|c| !c.matched).count()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        let intercepted = {
            let mut state = self.state();
            if state.enabled {
                let key = MockKey::new(request.method.clone(), request.url.clone());
                let outcome = state.mocks.get(&key).cloned();
                state.calls.push(RecordedCall {
                    key: key.clone(),
                    headers: request.headers.clone(),
                    body: request.body.clone(),
                    matched: outcome.is_some(),
                });
                Some(outcome.ok_or(TransportError::MockNotFound {
                    method: key.method.to_string(),
                    url: key.url,
                }))
            } else {
                None
            }
        };

        match intercepted {
            Some(Ok(MockOutcome::Response(response))) => Ok(response),
            Some(Ok(MockOutcome::Error(error))) => Err(error),
            Some(Err(miss)) => Err(miss),
            None => match &self.fallback {
                Some(fallback) => fallback.send(request).await,
                None => Err(TransportError::InvalidRequest(
                    "mock interception is disabled and no fallback transport is configured"
                        .to_string(),
                )),
            },
        }
    }
}
