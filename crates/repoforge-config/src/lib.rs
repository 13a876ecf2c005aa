//! Configuration for repoforge
//!
//! Values are resolved with precedence CLI > environment > config file >
//! built-in defaults, and every resolved value records where it came from.

mod config;

pub use config::{
    CliArgs, Config, ConfigBuilder, DEFAULT_ACCESS_TOKEN_ENV, DEFAULT_API_BASE_URL,
    DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_USER_AGENT, Defaults, GithubConfig, HOME_ENV_VAR,
};
pub use repoforge_utils::error::ConfigError;
pub use repoforge_utils::types::ConfigSource;
