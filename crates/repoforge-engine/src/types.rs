//! Domain model for repository creation

use serde::{Deserialize, Serialize};

use repoforge_utils::error::ApiError;
use repoforge_utils::exit_codes::STATUS_CREATED;

/// Message returned for names that are empty after trimming
pub(crate) const INVALID_NAME_MESSAGE: &str = "invalid repository name";

/// Request to create one repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateRepoRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl CreateRepoRequest {
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }

    /// The name with surrounding whitespace removed.
    ///
    /// # Errors
    ///
    /// Returns a 400 `ApiError` if nothing is left after trimming.
    pub fn validated_name(&self) -> Result<&str, ApiError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ApiError::bad_request(INVALID_NAME_MESSAGE));
        }
        Ok(name)
    }
}

/// Projection of a created repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateRepoResponse {
    pub id: i64,
    pub owner: String,
    pub name: String,
}

/// Outcome of one item in a batch: a created repository or an error, never both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CreateRepositoriesResult {
    Response(CreateRepoResponse),
    Error(ApiError),
}

impl CreateRepositoriesResult {
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Response(_))
    }

    /// HTTP status for this item: 201 when created, the error's status otherwise
    #[must_use]
    pub fn status(&self) -> u16 {
        match self {
            Self::Response(_) => STATUS_CREATED,
            Self::Error(err) => err.status,
        }
    }

    #[must_use]
    pub fn response(&self) -> Option<&CreateRepoResponse> {
        match self {
            Self::Response(response) => Some(response),
            Self::Error(_) => None,
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&ApiError> {
        match self {
            Self::Response(_) => None,
            Self::Error(err) => Some(err),
        }
    }
}

impl From<Result<CreateRepoResponse, ApiError>> for CreateRepositoriesResult {
    fn from(result: Result<CreateRepoResponse, ApiError>) -> Self {
        match result {
            Ok(response) => Self::Response(response),
            Err(err) => Self::Error(err),
        }
    }
}

/// Aggregate result of a batch.
///
/// `results` holds one entry per request, in completion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateReposResponse {
    pub status: u16,
    pub results: Vec<CreateRepositoriesResult>,
}

impl CreateReposResponse {
    #[must_use]
    pub fn succeeded(&self) -> usize {
        self.results.iter().filter(|r| r.is_success()).count()
    }

    #[must_use]
    pub fn failed(&self) -> usize {
        self.results.len() - self.succeeded()
    }
}
