use reqwest::Method;
use reqwest::header::HeaderMap;
use serde::Serialize;
use std::sync::Arc;

use repoforge_utils::error::TransportError;

use crate::types::{Transport, TransportRequest, TransportResponse};

/// Thin JSON client over an injected [`Transport`].
///
/// Cloning is cheap; clones share the underlying transport.
#[derive(Clone)]
pub struct RestClient {
    transport: Arc<dyn Transport>,
}

impl RestClient {
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// POST `body` as JSON with the given headers.
    ///
    /// # Errors
    ///
    /// Returns `TransportError` for an empty URL, an unserializable body, or
    /// when no response was obtained. HTTP error statuses are returned as
    /// responses.
    pub async fn post<T>(
        &self,
        url: &str,
        body: &T,
        headers: HeaderMap,
    ) -> Result<TransportResponse, TransportError>
    where
        T: Serialize + ?Sized,
    {
        let request = TransportRequest::json(Method::POST, url, body, headers)?;
        self.transport.send(request).await
    }
}

impl std::fmt::Debug for RestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestClient").finish_non_exhaustive()
    }
}
