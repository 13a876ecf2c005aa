//! Single-repository creation

use std::sync::Arc;
use tracing::debug;

use repoforge_config::Config;
use repoforge_github::{GithubCreateRepoRequest, GithubErrorResponse, GithubProvider, RepoProvider};
use repoforge_transport::{StatusCode, Transport};
use repoforge_utils::error::{ApiError, ApiErrorKind, RepoforgeError};

use crate::types::{CreateRepoRequest, CreateRepoResponse};

/// Creates repositories through a [`RepoProvider`] using one access token.
///
/// Cloning is cheap; batch tasks each hold a clone.
#[derive(Clone)]
pub struct RepositoryService {
    provider: Arc<dyn RepoProvider>,
    access_token: Arc<str>,
}

impl RepositoryService {
    #[must_use]
    pub fn new(provider: Arc<dyn RepoProvider>, access_token: impl Into<String>) -> Self {
        Self {
            provider,
            access_token: Arc::from(access_token.into()),
        }
    }

    /// Service talking to GitHub over HTTP, as configured
    ///
    /// # Errors
    ///
    /// Returns `RepoforgeError::Config` if no access token is configured and
    /// `RepoforgeError::Transport` if the HTTP client cannot be built.
    pub fn from_config(config: &Config) -> Result<Self, RepoforgeError> {
        let access_token = config.access_token()?.to_string();
        let provider = GithubProvider::new_from_config(config)?;
        Ok(Self::new(Arc::new(provider), access_token))
    }

    /// Service talking to GitHub through an injected transport
    ///
    /// # Errors
    ///
    /// Returns `RepoforgeError::Config` if no access token is configured.
    pub fn with_transport(
        config: &Config,
        transport: Arc<dyn Transport>,
    ) -> Result<Self, RepoforgeError> {
        let access_token = config.access_token()?.to_string();
        let provider = GithubProvider::with_transport(config, transport);
        Ok(Self::new(Arc::new(provider), access_token))
    }

    /// Create one repository.
    ///
    /// Names are trimmed; an empty name is rejected with 400 before any
    /// provider call. Provider failures keep the provider's status and message.
    ///
    /// # Errors
    ///
    /// Returns the `ApiError` describing why the repository was not created.
    pub async fn create_repo(
        &self,
        request: &CreateRepoRequest,
    ) -> Result<CreateRepoResponse, ApiError> {
        let name = request.validated_name()?;

        let payload = GithubCreateRepoRequest {
            name: name.to_string(),
            description: request.description.clone(),
            private: false,
        };

        let created = self
            .provider
            .create_repo(&self.access_token, &payload)
            .await
            .map_err(provider_error)?;

        debug!(repo_name = %created.name, repo_id = created.id, "Repository created");

        Ok(CreateRepoResponse {
            id: created.id,
            owner: created.owner.login,
            name: created.name,
        })
    }
}

impl std::fmt::Debug for RepositoryService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RepositoryService").finish_non_exhaustive()
    }
}

/// Map a provider error to an `ApiError`, keeping status and message as-is.
fn provider_error(err: GithubErrorResponse) -> ApiError {
    if err.synthetic {
        return ApiError::new(err.status_code, err.message, ApiErrorKind::Transport);
    }

    let mut api_error = ApiError::provider(err.status_code, err.message);
    if let Some(reason) = StatusCode::from_u16(err.status_code)
        .ok()
        .and_then(|s| s.canonical_reason())
    {
        api_error.error = error_label(reason);
    }
    api_error
}

/// "Unprocessable Entity" -> "unprocessable_entity"
fn error_label(reason: &str) -> String {
    reason
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{StubOutcome, StubProvider};
    use repoforge_transport::mock::{Mock, MockTransport};
    use repoforge_transport::Method;
    use serde_json::json;

    const URL: &str = "https://api.github.com/user/repos";

    #[tokio::test]
    async fn test_create_repo_projects_owner_login() {
        let stub = Arc::new(StubProvider::new().with("repo-a", StubOutcome::created(7, "octocat")));
        let service = RepositoryService::new(stub.clone(), "ghp_token");

        let created = service
            .create_repo(&CreateRepoRequest::new("repo-a", "desc"))
            .await
            .unwrap();

        assert_eq!(
            created,
            CreateRepoResponse {
                id: 7,
                owner: "octocat".to_string(),
                name: "repo-a".to_string(),
            }
        );
        let seen = stub.requests();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].0, "ghp_token");
        assert!(!seen[0].1.private);
        assert_eq!(seen[0].1.description, "desc");
    }

    #[tokio::test]
    async fn test_name_is_trimmed_before_sending() {
        let stub = Arc::new(StubProvider::new().with("repo-a", StubOutcome::created(1, "o")));
        let service = RepositoryService::new(stub.clone(), "t");

        service
            .create_repo(&CreateRepoRequest::new("  repo-a  ", ""))
            .await
            .unwrap();

        assert_eq!(stub.requests()[0].1.name, "repo-a");
    }

    #[tokio::test]
    async fn test_blank_name_never_calls_provider() {
        let stub = Arc::new(StubProvider::new());
        let service = RepositoryService::new(stub.clone(), "t");

        let err = service
            .create_repo(&CreateRepoRequest::new("   ", ""))
            .await
            .unwrap_err();

        assert_eq!(err.status, 400);
        assert_eq!(err.message, "invalid repository name");
        assert_eq!(err.kind, ApiErrorKind::Validation);
        assert_eq!(stub.call_count(), 0);
    }

    #[tokio::test]
    async fn test_provider_error_keeps_status_and_message() {
        let stub = Arc::new(
            StubProvider::new().with("taken", StubOutcome::failed(422, "Repository creation failed.")),
        );
        let service = RepositoryService::new(stub, "t");

        let err = service
            .create_repo(&CreateRepoRequest::new("taken", ""))
            .await
            .unwrap_err();

        assert_eq!(err.status, 422);
        assert_eq!(err.message, "Repository creation failed.");
        assert_eq!(err.kind, ApiErrorKind::Provider);
        assert_eq!(err.error, "unprocessable_entity");
    }

    #[tokio::test]
    async fn test_transport_failure_is_internal_error() {
        let mock = Arc::new(MockTransport::new());
        mock.register(Mock::error(
            Method::POST,
            URL,
            repoforge_transport::TransportError::Connection("refused".to_string()),
        ));
        let config = Config::builder().access_token("ghp_token").build().unwrap();
        let service = RepositoryService::with_transport(&config, mock).unwrap();

        let err = service
            .create_repo(&CreateRepoRequest::new("repo-a", ""))
            .await
            .unwrap_err();

        assert_eq!(err.status, 500);
        assert_eq!(err.kind, ApiErrorKind::Transport);
        assert_eq!(err.error, "internal_server_error");
        assert!(err.message.contains("refused"));
    }

    #[tokio::test]
    async fn test_with_transport_end_to_end() {
        let mock = Arc::new(MockTransport::new());
        mock.register(Mock::json(
            Method::POST,
            URL,
            StatusCode::CREATED,
            &json!({"id": 42, "name": "repo-a", "owner": {"login": "octocat"}}),
        ));
        let config = Config::builder().access_token("ghp_token").build().unwrap();
        let service = RepositoryService::with_transport(&config, mock.clone()).unwrap();

        let created = service
            .create_repo(&CreateRepoRequest::new("repo-a", ""))
            .await
            .unwrap();

        assert_eq!(created.id, 42);
        assert_eq!(created.owner, "octocat");
        assert_eq!(mock.call_count(&Method::POST, URL), 1);
    }

    #[test]
    fn test_with_transport_requires_token() {
        let config = Config::builder().build().unwrap();
        let err = RepositoryService::with_transport(&config, Arc::new(MockTransport::new()))
            .unwrap_err();
        assert!(matches!(err, RepoforgeError::Config(_)));
    }

    #[test]
    fn test_error_label() {
        assert_eq!(error_label("Unprocessable Entity"), "unprocessable_entity");
        assert_eq!(error_label("Non-Authoritative Information"), "non_authoritative_information");
        assert_eq!(error_label("I'm a teapot"), "i_m_a_teapot");
    }
}
