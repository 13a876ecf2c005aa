//! Shared types used across repoforge crates

use serde::{Deserialize, Serialize};

/// Where a configuration value came from.
///
/// ```rust
/// use repoforge_utils::types::ConfigSource;
///
/// let json = serde_json::to_string(&ConfigSource::Env).unwrap();
/// assert_eq!(json, r#""env""#);
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ConfigSource {
    /// Value provided via CLI argument (highest precedence).
    Cli,
    /// Value read from an environment variable.
    Env,
    /// Value loaded from configuration file.
    Config,
    /// Value provided programmatically (e.g., `Config::builder()`).
    Programmatic,
    /// Built-in default value (lowest precedence).
    Default,
}

impl ConfigSource {
    /// Stable label used in `repoforge config` output
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cli => "cli",
            Self::Env => "env",
            Self::Config => "config",
            Self::Programmatic => "programmatic",
            Self::Default => "default",
        }
    }
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
