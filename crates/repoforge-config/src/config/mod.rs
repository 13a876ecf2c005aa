mod builder;
mod discovery;
mod model;
mod sources;
mod validation;

pub use builder::ConfigBuilder;
pub use model::{CliArgs, Config, Defaults, GithubConfig};

pub(crate) use repoforge_utils::error::ConfigError;
pub(crate) use repoforge_utils::types::ConfigSource;

/// Environment variable holding the GitHub access token unless configured otherwise
pub const DEFAULT_ACCESS_TOKEN_ENV: &str = "SECRET_GITHUB_ACCESS_TOKEN";

/// GitHub REST API root
pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com";

/// Per-request timeout toward the provider
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// GitHub rejects requests without a User-Agent
pub const DEFAULT_USER_AGENT: &str = "repoforge";

/// Points at a directory containing `config.toml`; overrides upward discovery
pub const HOME_ENV_VAR: &str = "REPOFORGE_HOME";

/// Overrides the provider base URL from the environment
pub(crate) const API_BASE_URL_ENV_VAR: &str = "REPOFORGE_API_BASE_URL";

#[cfg(test)]
mod tests;
