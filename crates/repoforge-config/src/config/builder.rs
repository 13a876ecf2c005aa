use std::collections::HashMap;
use std::time::Duration;

use super::{Config, ConfigError, ConfigSource, Defaults, GithubConfig};

impl Config {
    /// Create a builder for programmatic configuration.
    ///
    /// Use this when embedding repoforge and the environment or config files
    /// should not influence behaviour.
    ///
    /// # Example
    ///
    /// ```rust
    /// use repoforge_config::Config;
    /// use std::time::Duration;
    ///
    /// let config = Config::builder()
    ///     .access_token("ghp_example")
    ///     .api_base_url("https://github.example.com/api/v3")
    ///     .request_timeout(Duration::from_secs(10))
    ///     .build()
    ///     .expect("valid config");
    /// assert_eq!(config.access_token().unwrap(), "ghp_example");
    /// ```
    #[must_use]
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }
}

/// Builder for programmatic configuration.
///
/// All values set via the builder are attributed to
/// `ConfigSource::Programmatic`.
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    access_token: Option<String>,
    access_token_env: Option<String>,
    api_base_url: Option<String>,
    user_agent: Option<String>,
    request_timeout: Option<Duration>,
    verbose: Option<bool>,
}

impl ConfigBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    #[must_use]
    pub fn access_token_env(mut self, name: impl Into<String>) -> Self {
        self.access_token_env = Some(name.into());
        self
    }

    #[must_use]
    pub fn api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = Some(url.into());
        self
    }

    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Per-request timeout; sub-second precision is dropped
    #[must_use]
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    #[must_use]
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = Some(verbose);
        self
    }

    /// Build and validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if a value fails validation.
    pub fn build(self) -> Result<Config, ConfigError> {
        let mut source_attribution = HashMap::new();
        let mut track = |key: &str, set: bool| {
            let source = if set {
                ConfigSource::Programmatic
            } else {
                ConfigSource::Default
            };
            source_attribution.insert(key.to_string(), source);
        };

        track("access_token", self.access_token.is_some());
        track("access_token_env", self.access_token_env.is_some());
        track("api_base_url", self.api_base_url.is_some());
        track("user_agent", self.user_agent.is_some());
        track("request_timeout_secs", self.request_timeout.is_some());
        track("verbose", self.verbose.is_some());

        let config = Config {
            github: GithubConfig {
                access_token_env: self.access_token_env,
                access_token: self.access_token,
                api_base_url: self.api_base_url,
                user_agent: self.user_agent,
            },
            defaults: Defaults {
                request_timeout_secs: self.request_timeout.map(|d| d.as_secs()),
                verbose: self.verbose,
            },
            source_attribution,
        };

        config.validate()?;
        Ok(config)
    }
}
