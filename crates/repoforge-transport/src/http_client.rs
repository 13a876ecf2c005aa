//! reqwest-backed transport
//!
//! One `reqwest::Client` is built per `HttpTransport` and shared by every
//! request it sends, so connections are reused across a batch.

use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use repoforge_utils::error::TransportError;
use repoforge_utils::redaction::redact_error_message;

use crate::types::{Transport, TransportRequest, TransportResponse};

/// Default per-request timeout
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Default connect timeout
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Production transport performing real network I/O.
///
/// No retries: a failed call is reported once and the caller decides.
#[derive(Clone)]
pub struct HttpTransport {
    client: Arc<Client>,
    request_timeout: Duration,
}

impl HttpTransport {
    /// Create a transport with the default request timeout
    ///
    /// # Errors
    ///
    /// Returns `TransportError::InvalidRequest` if the client cannot be constructed
    pub fn new() -> Result<Self, TransportError> {
        Self::with_timeout(DEFAULT_REQUEST_TIMEOUT)
    }

    /// Create a transport with a custom per-request timeout
    ///
    /// # Errors
    ///
    /// Returns `TransportError::InvalidRequest` if the client cannot be constructed
    pub fn with_timeout(request_timeout: Duration) -> Result<Self, TransportError> {
        let client = Client::builder()
            .connect_timeout(DEFAULT_CONNECT_TIMEOUT.min(request_timeout))
            .pool_idle_timeout(Duration::from_secs(90))
            .pool_max_idle_per_host(10)
            .build()
            .map_err(|e| {
                TransportError::InvalidRequest(format!("Failed to build HTTP client: {e}"))
            })?;

        Ok(Self {
            client: Arc::new(client),
            request_timeout,
        })
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    fn map_send_error(&self, err: &reqwest::Error) -> TransportError {
        if err.is_timeout() {
            TransportError::Timeout {
                duration: self.request_timeout,
            }
        } else if err.is_builder() {
            TransportError::InvalidRequest(redact_error_message(&err.to_string()))
        } else {
            TransportError::Connection(redact_error_message(&err.to_string()))
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        debug!(
            method = %request.method,
            url = %request.url,
            timeout_secs = self.request_timeout.as_secs(),
            "Executing HTTP request"
        );

        let mut builder = self
            .client
            .request(request.method, &request.url)
            .headers(request.headers)
            .timeout(self.request_timeout);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(|e| self.map_send_error(&e))?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .bytes()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TransportError::Timeout {
                        duration: self.request_timeout,
                    }
                } else {
                    TransportError::Body(redact_error_message(&e.to_string()))
                }
            })?
            .to_vec();

        debug!(status = status.as_u16(), bytes = body.len(), "HTTP response received");

        Ok(TransportResponse {
            status,
            headers,
            body,
        })
    }
}
