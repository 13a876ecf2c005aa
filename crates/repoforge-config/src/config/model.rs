use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use super::{
    ConfigError, ConfigSource, DEFAULT_ACCESS_TOKEN_ENV, DEFAULT_API_BASE_URL,
    DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_USER_AGENT,
};

/// Configuration for repoforge operations.
///
/// # Discovery
///
/// [`Config::discover()`] searches for `.repoforge/config.toml` upward from
/// the current directory (stopping at a repository root), honours
/// `REPOFORGE_HOME`, reads the access token from the environment and applies
/// built-in defaults for anything left unset.
///
/// # Configuration File Format
///
/// ```toml
/// [github]
/// access_token_env = "SECRET_GITHUB_ACCESS_TOKEN"
/// api_base_url = "https://api.github.com"
/// user_agent = "repoforge"
///
/// [defaults]
/// request_timeout_secs = 30
/// verbose = false
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Provider settings.
    pub github: GithubConfig,
    /// Default values for runtime behaviour.
    pub defaults: Defaults,
    /// Source attribution for each setting (for `repoforge config`).
    pub source_attribution: HashMap<String, ConfigSource>,
}

/// `[github]` section
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GithubConfig {
    /// Name of the environment variable holding the access token.
    pub access_token_env: Option<String>,
    /// Literal token. Prefer `access_token_env`; a token in a file is easy to leak.
    pub access_token: Option<String>,
    pub api_base_url: Option<String>,
    pub user_agent: Option<String>,
}

/// `[defaults]` section
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Defaults {
    pub request_timeout_secs: Option<u64>,
    pub verbose: Option<bool>,
}

/// Values supplied on the command line
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    /// Explicit config file path (skips discovery)
    pub config_path: Option<PathBuf>,
    pub api_base_url: Option<String>,
    pub access_token_env: Option<String>,
    pub request_timeout_secs: Option<u64>,
    pub verbose: Option<bool>,
}

impl Config {
    /// The configured access token.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingRequired` if no token was found or it is blank.
    pub fn access_token(&self) -> Result<&str, ConfigError> {
        match self.github.access_token.as_deref() {
            Some(token) if !token.trim().is_empty() => Ok(token),
            _ => Err(ConfigError::MissingRequired(format!(
                "GitHub access token (set the {} environment variable)",
                self.access_token_env()
            ))),
        }
    }

    /// Name of the environment variable the token is read from
    #[must_use]
    pub fn access_token_env(&self) -> &str {
        self.github
            .access_token_env
            .as_deref()
            .unwrap_or(DEFAULT_ACCESS_TOKEN_ENV)
    }

    #[must_use]
    pub fn api_base_url(&self) -> &str {
        self.github
            .api_base_url
            .as_deref()
            .unwrap_or(DEFAULT_API_BASE_URL)
    }

    #[must_use]
    pub fn user_agent(&self) -> &str {
        self.github
            .user_agent
            .as_deref()
            .unwrap_or(DEFAULT_USER_AGENT)
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(
            self.defaults
                .request_timeout_secs
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        )
    }

    #[must_use]
    pub fn verbose(&self) -> bool {
        self.defaults.verbose.unwrap_or(false)
    }

    /// Source of a setting, `Default` when never recorded
    #[must_use]
    pub fn source_of(&self, key: &str) -> ConfigSource {
        self.source_attribution
            .get(key)
            .copied()
            .unwrap_or(ConfigSource::Default)
    }
}
