//! Core transport types

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

use repoforge_utils::error::TransportError;

/// A fully prepared outbound request
#[derive(Debug, Clone)]
pub struct TransportRequest {
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
    /// Already-encoded body
    pub body: Option<Vec<u8>>,
}

impl TransportRequest {
    /// Build a request with a JSON-encoded body.
    ///
    /// # Errors
    ///
    /// - `TransportError::InvalidRequest` if `url` is empty
    /// - `TransportError::Serialization` if `body` cannot be encoded
    pub fn json<T>(
        method: Method,
        url: impl Into<String>,
        body: &T,
        headers: HeaderMap,
    ) -> Result<Self, TransportError>
    where
        T: Serialize + ?Sized,
    {
        let url = url.into();
        if url.trim().is_empty() {
            return Err(TransportError::InvalidRequest(
                "request URL must not be empty".to_string(),
            ));
        }

        let body =
            serde_json::to_vec(body).map_err(|e| TransportError::Serialization(e.to_string()))?;

        Ok(Self {
            method,
            url,
            headers,
            body: Some(body),
        })
    }
}

/// Raw response as received; non-2xx statuses are not errors at this level
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TransportResponse {
    #[must_use]
    pub fn new(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: body.into(),
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Decode the body as JSON
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if the body does not match `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }

    /// Body as lossy UTF-8, for diagnostics
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Sends one request and returns the raw response.
///
/// Implementations must not interpret HTTP status codes; that is the
/// caller's job.
#[async_trait]
pub trait Transport: Send + Sync {
    /// # Errors
    ///
    /// Returns `TransportError` when no HTTP response was obtained.
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError>;
}
