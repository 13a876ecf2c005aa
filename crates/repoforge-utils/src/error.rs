//! Error types for repoforge
//!
//! Two families live here:
//! - Rust errors (`TransportError`, `ConfigError`, `RepoforgeError`) that travel
//!   through `Result` and `?` at the library and CLI edges.
//! - `ApiError`, the HTTP-shaped error carried as *data* inside per-item batch
//!   results. The batch orchestrator never fails; it reports these instead.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// HTTP status used for validation failures
pub const STATUS_BAD_REQUEST: u16 = 400;
/// HTTP status used when the failure is not attributable to the provider
pub const STATUS_INTERNAL_SERVER_ERROR: u16 = 500;

/// Main error type for repoforge operations outside the batch boundary
#[derive(Error, Debug)]
pub enum RepoforgeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON input: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Repository creation failed ({status}): {message}")]
    Api { status: u16, message: String },
}

impl From<ApiError> for RepoforgeError {
    fn from(err: ApiError) -> Self {
        Self::Api {
            status: err.status,
            message: err.message,
        }
    }
}

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration file: {0}")]
    InvalidFile(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),

    #[error("Invalid configuration value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("Configuration file not found at {path}")]
    NotFound { path: String },
}

/// Failures talking to the remote provider below the HTTP-status level.
///
/// Non-2xx responses are *not* transport errors; they come back as regular
/// responses and the caller decides how to read the status.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// Request body could not be encoded as JSON
    #[error("Failed to serialize request body: {0}")]
    Serialization(String),

    /// Request was malformed before it left the process (empty URL, bad header)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Network-level failure (DNS, TLS, connection reset)
    #[error("Connection failed: {0}")]
    Connection(String),

    /// Request exceeded its timeout
    #[error("Request timed out after {duration:?}")]
    Timeout { duration: Duration },

    /// Response body could not be read
    #[error("Failed to read response body: {0}")]
    Body(String),

    /// Test-mode interception is active but nothing is registered for the key
    #[error("no mockup found for {method} {url}")]
    MockNotFound { method: String, url: String },
}

/// Origin of an [`ApiError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiErrorKind {
    /// Request failed local checks; no network call was made
    Validation,
    /// Provider answered with a non-2xx status
    Provider,
    /// Provider could not be reached or its answer could not be decoded
    Transport,
}

/// HTTP-shaped error returned per item.
///
/// `status` is the code a caller should surface; for provider failures it is
/// the provider's own status, verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    pub status: u16,
    pub message: String,
    pub error: String,
    pub kind: ApiErrorKind,
}

impl ApiError {
    /// Build an error with an explicit status and kind
    #[must_use]
    pub fn new(status: u16, message: impl Into<String>, kind: ApiErrorKind) -> Self {
        let error = match kind {
            ApiErrorKind::Validation => "bad_request",
            ApiErrorKind::Provider => "provider_error",
            ApiErrorKind::Transport => "internal_server_error",
        };
        Self {
            status,
            message: message.into(),
            error: error.to_string(),
            kind,
        }
    }

    /// 400 for requests rejected before any network call
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(STATUS_BAD_REQUEST, message, ApiErrorKind::Validation)
    }

    /// 500 for failures that are not the provider's fault
    #[must_use]
    pub fn internal_server_error(message: impl Into<String>) -> Self {
        Self::new(
            STATUS_INTERNAL_SERVER_ERROR,
            message,
            ApiErrorKind::Transport,
        )
    }

    /// Provider status and message, preserved as-is
    #[must_use]
    pub fn provider(status: u16, message: impl Into<String>) -> Self {
        Self::new(status, message, ApiErrorKind::Provider)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.error, self.status, self.message)
    }
}

impl std::error::Error for ApiError {}

/// Trait for providing user-friendly error reporting with context and suggestions
pub trait UserFriendlyError {
    /// Get a user-friendly error message
    fn user_message(&self) -> String;

    /// Get contextual information about the error
    fn context(&self) -> Option<String>;

    /// Get suggested actions to resolve the error
    fn suggestions(&self) -> Vec<String>;

    /// Get the error category for grouping similar errors
    fn category(&self) -> ErrorCategory;
}

/// Categories of errors for better organization and handling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Transport,
    Provider,
    FileSystem,
    Validation,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configuration => write!(f, "Configuration"),
            Self::Transport => write!(f, "Transport"),
            Self::Provider => write!(f, "Provider"),
            Self::FileSystem => write!(f, "File System"),
            Self::Validation => write!(f, "Validation"),
        }
    }
}

impl UserFriendlyError for RepoforgeError {
    fn user_message(&self) -> String {
        match self {
            Self::Config(ConfigError::MissingRequired(what)) => {
                format!("Missing required configuration: {what}")
            }
            Self::Config(err) => format!("Configuration problem: {err}"),
            Self::Transport(err) => format!("Could not reach the repository provider: {err}"),
            Self::Io(err) => format!("File operation failed: {err}"),
            Self::Json(err) => format!("Request file is not valid JSON: {err}"),
            Self::Api { status, message } => {
                format!("Repository creation failed with status {status}: {message}")
            }
        }
    }

    fn context(&self) -> Option<String> {
        match self {
            Self::Config(_) => Some(
                "Configuration is read from CLI flags, environment variables and \
                 .repoforge/config.toml, in that order."
                    .to_string(),
            ),
            Self::Transport(TransportError::Timeout { .. }) => Some(
                "The provider did not answer within the configured request timeout.".to_string(),
            ),
            Self::Api { status, .. } if *status == STATUS_BAD_REQUEST => {
                Some("The request was rejected before contacting the provider.".to_string())
            }
            Self::Api { .. } => Some("The provider rejected the request.".to_string()),
            _ => None,
        }
    }

    fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Config(ConfigError::MissingRequired(_)) => vec![
                "Export SECRET_GITHUB_ACCESS_TOKEN with a personal access token".to_string(),
                "Or set [github] access_token_env in .repoforge/config.toml".to_string(),
            ],
            Self::Config(_) => vec!["Run 'repoforge config' to inspect effective values".to_string()],
            Self::Transport(_) => vec![
                "Check network connectivity to the provider".to_string(),
                "Increase --request-timeout if the provider is slow".to_string(),
            ],
            Self::Json(_) => vec![
                "Provide a JSON array such as [{\"name\": \"repo-a\", \"description\": \"\"}]"
                    .to_string(),
            ],
            Self::Api { status, .. } if *status == 401 || *status == 403 => {
                vec!["Verify the access token and its repo scope".to_string()]
            }
            Self::Api { status, .. } if *status == 422 => {
                vec!["A repository with this name may already exist".to_string()]
            }
            _ => Vec::new(),
        }
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::Config(_) => ErrorCategory::Configuration,
            Self::Transport(_) => ErrorCategory::Transport,
            Self::Io(_) => ErrorCategory::FileSystem,
            Self::Json(_) => ErrorCategory::Validation,
            Self::Api { status, .. } if *status == STATUS_BAD_REQUEST => ErrorCategory::Validation,
            Self::Api { .. } => ErrorCategory::Provider,
        }
    }
}
