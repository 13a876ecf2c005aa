//! GitHub repository-creation provider

use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

use repoforge_config::Config;
use repoforge_transport::header::{ACCEPT, AUTHORIZATION, USER_AGENT};
use repoforge_transport::{
    HeaderMap, HeaderValue, HttpTransport, RestClient, Transport, TransportError,
};
use repoforge_utils::redaction::redact_error_message;

use crate::types::{GithubCreateRepoRequest, GithubCreateRepoResponse, GithubErrorResponse};

/// Media type GitHub recommends for REST calls
const GITHUB_ACCEPT: &str = "application/vnd.github+json";

const INVALID_ERROR_BODY: &str = "invalid json response body";
const INVALID_SUCCESS_BODY: &str = "error when trying to unmarshal github create repo response";

/// Creates repositories on a remote hosting provider.
///
/// Implementations never panic on provider answers; every failure is an
/// `Err` carrying the HTTP status to surface.
#[async_trait]
pub trait RepoProvider: Send + Sync {
    /// # Errors
    ///
    /// Returns a `GithubErrorResponse` with the provider's status for non-2xx
    /// answers and a synthetic 500 when the call or decoding failed.
    async fn create_repo(
        &self,
        access_token: &str,
        request: &GithubCreateRepoRequest,
    ) -> Result<GithubCreateRepoResponse, GithubErrorResponse>;
}

/// `RepoProvider` backed by the GitHub REST API
#[derive(Clone, Debug)]
pub struct GithubProvider {
    rest_client: RestClient,
    create_repo_url: String,
    user_agent: String,
}

impl GithubProvider {
    /// Create a provider sending through `transport`.
    ///
    /// `api_base_url` is the API root, e.g. `https://api.github.com`.
    #[must_use]
    pub fn new(
        transport: Arc<dyn Transport>,
        api_base_url: &str,
        user_agent: impl Into<String>,
    ) -> Self {
        Self {
            rest_client: RestClient::new(transport),
            create_repo_url: create_repo_url(api_base_url),
            user_agent: user_agent.into(),
        }
    }

    /// Create a provider using a real HTTP transport configured from `config`
    ///
    /// # Errors
    ///
    /// Returns `TransportError::InvalidRequest` if the HTTP client cannot be constructed
    pub fn new_from_config(config: &Config) -> Result<Self, TransportError> {
        let transport = HttpTransport::with_timeout(config.request_timeout())?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Create a provider from `config` sending through an injected transport
    #[must_use]
    pub fn with_transport(config: &Config, transport: Arc<dyn Transport>) -> Self {
        Self::new(transport, config.api_base_url(), config.user_agent())
    }

    #[must_use]
    pub fn create_repo_url(&self) -> &str {
        &self.create_repo_url
    }

    fn headers(&self, access_token: &str) -> Result<HeaderMap, TransportError> {
        let mut auth = HeaderValue::from_str(&format!("token {access_token}")).map_err(|_| {
            TransportError::InvalidRequest("access token is not a valid header value".to_string())
        })?;
        auth.set_sensitive(true);

        let user_agent = HeaderValue::from_str(&self.user_agent).map_err(|_| {
            TransportError::InvalidRequest(format!(
                "user agent '{}' is not a valid header value",
                self.user_agent
            ))
        })?;

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_ACCEPT));
        headers.insert(USER_AGENT, user_agent);
        Ok(headers)
    }
}

fn create_repo_url(api_base_url: &str) -> String {
    format!("{}/user/repos", api_base_url.trim_end_matches('/'))
}

#[async_trait]
impl RepoProvider for GithubProvider {
    async fn create_repo(
        &self,
        access_token: &str,
        request: &GithubCreateRepoRequest,
    ) -> Result<GithubCreateRepoResponse, GithubErrorResponse> {
        debug!(
            provider = "github",
            repo_name = %request.name,
            url = %self.create_repo_url,
            "Creating repository"
        );

        let headers = self
            .headers(access_token)
            .map_err(|e| GithubErrorResponse::internal(e.to_string()))?;

        let response = self
            .rest_client
            .post(&self.create_repo_url, request, headers)
            .await
            .map_err(|e| {
                let message = redact_error_message(&e.to_string());
                debug!(provider = "github", error = %message, "Transport failure");
                GithubErrorResponse::internal(message)
            })?;

        if !response.is_success() {
            let mut error: GithubErrorResponse = response
                .json()
                .map_err(|_| GithubErrorResponse::internal(INVALID_ERROR_BODY))?;
            error.status_code = response.status.as_u16();
            debug!(
                provider = "github",
                status = error.status_code,
                message = %error.message,
                "GitHub rejected repository creation"
            );
            return Err(error);
        }

        let created: GithubCreateRepoResponse = response
            .json()
            .map_err(|_| GithubErrorResponse::internal(INVALID_SUCCESS_BODY))?;

        debug!(
            provider = "github",
            repo_id = created.id,
            full_name = %created.full_name,
            "Repository created"
        );
        Ok(created)
    }
}
