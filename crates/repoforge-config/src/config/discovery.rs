use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::{
    API_BASE_URL_ENV_VAR, CliArgs, Config, ConfigError, ConfigSource, Defaults, GithubConfig,
    HOME_ENV_VAR,
};

/// TOML configuration file structure
#[derive(Debug, Default, Deserialize, Serialize)]
struct TomlConfig {
    github: Option<GithubConfig>,
    defaults: Option<Defaults>,
}

impl Config {
    /// Discover and load configuration with precedence: CLI > env > file > defaults
    ///
    /// Uses the current working directory for config file discovery when no
    /// explicit path is provided in `cli_args`.
    pub fn discover(cli_args: &CliArgs) -> Result<Self> {
        let start_dir = env::current_dir().context("Failed to get current directory")?;
        Self::discover_from(&start_dir, cli_args)
    }

    /// Discover and load configuration starting from a specific directory
    pub fn discover_from(start_dir: &Path, cli_args: &CliArgs) -> Result<Self> {
        Self::discover_from_with_env(start_dir, cli_args, |key| env::var(key).ok())
    }

    /// Discovery with an injected environment lookup.
    ///
    /// This is the variant tests use to avoid mutating process-global state.
    pub fn discover_from_with_env<F>(start_dir: &Path, cli_args: &CliArgs, env_lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut source_attribution = HashMap::new();
        let mut github = GithubConfig::default();
        let mut defaults = Defaults::default();

        for key in [
            "api_base_url",
            "access_token_env",
            "user_agent",
            "request_timeout_secs",
            "verbose",
        ] {
            source_attribution.insert(key.to_string(), ConfigSource::Default);
        }

        let config_path = match &cli_args.config_path {
            Some(explicit) => {
                if !explicit.exists() {
                    return Err(ConfigError::NotFound {
                        path: explicit.display().to_string(),
                    }
                    .into());
                }
                Some(explicit.clone())
            }
            None => Self::home_config_file(&env_lookup)
                .or_else(|| Self::discover_config_file_from(start_dir)),
        };

        if let Some(path) = &config_path {
            debug!(path = %path.display(), "Loading config file");
            let file_config = Self::load_config_file(path)
                .with_context(|| format!("Failed to load config file: {}", path.display()))?;

            if let Some(file_github) = file_config.github {
                if file_github.api_base_url.is_some() {
                    github.api_base_url = file_github.api_base_url;
                    source_attribution.insert("api_base_url".to_string(), ConfigSource::Config);
                }
                if file_github.access_token_env.is_some() {
                    github.access_token_env = file_github.access_token_env;
                    source_attribution
                        .insert("access_token_env".to_string(), ConfigSource::Config);
                }
                if file_github.access_token.is_some() {
                    github.access_token = file_github.access_token;
                    source_attribution.insert("access_token".to_string(), ConfigSource::Config);
                }
                if file_github.user_agent.is_some() {
                    github.user_agent = file_github.user_agent;
                    source_attribution.insert("user_agent".to_string(), ConfigSource::Config);
                }
            }

            if let Some(file_defaults) = file_config.defaults {
                if file_defaults.request_timeout_secs.is_some() {
                    defaults.request_timeout_secs = file_defaults.request_timeout_secs;
                    source_attribution
                        .insert("request_timeout_secs".to_string(), ConfigSource::Config);
                }
                if file_defaults.verbose.is_some() {
                    defaults.verbose = file_defaults.verbose;
                    source_attribution.insert("verbose".to_string(), ConfigSource::Config);
                }
            }
        }

        // Environment overrides the file
        if let Some(url) = env_lookup(API_BASE_URL_ENV_VAR).filter(|v| !v.is_empty()) {
            github.api_base_url = Some(url);
            source_attribution.insert("api_base_url".to_string(), ConfigSource::Env);
        }

        // CLI flags override everything
        if let Some(url) = &cli_args.api_base_url {
            github.api_base_url = Some(url.clone());
            source_attribution.insert("api_base_url".to_string(), ConfigSource::Cli);
        }
        if let Some(name) = &cli_args.access_token_env {
            github.access_token_env = Some(name.clone());
            source_attribution.insert("access_token_env".to_string(), ConfigSource::Cli);
        }
        if let Some(timeout) = cli_args.request_timeout_secs {
            defaults.request_timeout_secs = Some(timeout);
            source_attribution.insert("request_timeout_secs".to_string(), ConfigSource::Cli);
        }
        if let Some(verbose) = cli_args.verbose {
            defaults.verbose = Some(verbose);
            source_attribution.insert("verbose".to_string(), ConfigSource::Cli);
        }

        let mut config = Self {
            github,
            defaults,
            source_attribution,
        };

        // The token itself always prefers the environment over a literal in the file
        let token_env = config.access_token_env().to_string();
        if let Some(token) = env_lookup(&token_env).filter(|v| !v.trim().is_empty()) {
            config.github.access_token = Some(token);
            config
                .source_attribution
                .insert("access_token".to_string(), ConfigSource::Env);
        }

        config.validate()?;

        Ok(config)
    }

    /// `$REPOFORGE_HOME/config.toml`, if the variable is set and the file exists
    fn home_config_file<F>(env_lookup: &F) -> Option<PathBuf>
    where
        F: Fn(&str) -> Option<String>,
    {
        let home = env_lookup(HOME_ENV_VAR).filter(|v| !v.is_empty())?;
        let path = PathBuf::from(home).join("config.toml");
        path.exists().then_some(path)
    }

    /// Discover config file by searching upward from a given directory
    ///
    /// Walks up the directory tree looking for `.repoforge/config.toml`,
    /// stopping at repository root markers (.git, .hg, .svn) or filesystem root.
    #[must_use]
    pub fn discover_config_file_from(start_dir: &Path) -> Option<PathBuf> {
        let mut current_dir = start_dir;

        loop {
            let config_path = current_dir.join(".repoforge").join("config.toml");
            if config_path.exists() {
                return Some(config_path);
            }

            if current_dir.join(".git").exists()
                || current_dir.join(".hg").exists()
                || current_dir.join(".svn").exists()
            {
                return None;
            }

            current_dir = current_dir.parent()?;
        }
    }

    /// Load configuration from TOML file
    fn load_config_file(path: &Path) -> Result<TomlConfig> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: TomlConfig = toml::from_str(&content)
            .map_err(|e| ConfigError::InvalidFile(format!("{}: {e}", path.display())))?;
        Ok(config)
    }
}
