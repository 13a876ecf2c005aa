//! GitHub wire types for `POST /user/repos`

use serde::{Deserialize, Serialize};
use std::fmt;

use repoforge_utils::error::STATUS_INTERNAL_SERVER_ERROR;

/// Outbound payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GithubCreateRepoRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub private: bool,
}

/// Subset of the created-repository object GitHub returns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GithubCreateRepoResponse {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub full_name: String,
    pub owner: RepoOwner,
    #[serde(default)]
    pub permissions: Option<RepoPermissions>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoOwner {
    #[serde(default)]
    pub id: i64,
    pub login: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub html_url: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoPermissions {
    #[serde(rename = "admin", default)]
    pub is_admin: bool,
    #[serde(rename = "push", default)]
    pub has_push: bool,
    #[serde(rename = "pull", default)]
    pub has_pull: bool,
}

/// One entry of GitHub's `errors` array
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GithubError {
    #[serde(default)]
    pub resource: String,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub field: String,
    #[serde(default)]
    pub message: String,
}

/// Error answer from GitHub, or one synthesized locally.
///
/// `status_code` is never part of GitHub's body; it is filled in from the HTTP
/// status. `synthetic` marks errors built by the adapter itself (transport
/// failure, undecodable body) rather than returned by GitHub.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GithubErrorResponse {
    #[serde(default)]
    pub status_code: u16,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub documentation_url: String,
    #[serde(default)]
    pub errors: Vec<GithubError>,
    #[serde(skip)]
    pub synthetic: bool,
}

impl GithubErrorResponse {
    /// Locally synthesized 500
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status_code: STATUS_INTERNAL_SERVER_ERROR,
            message: message.into(),
            synthetic: true,
            ..Self::default()
        }
    }
}

impl fmt::Display for GithubErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "github error ({}): {}", self.status_code, self.message)
    }
}

impl std::error::Error for GithubErrorResponse {}
