use super::{Config, ConfigError};

/// Upper bound for the per-request timeout
const MAX_REQUEST_TIMEOUT_SECS: u64 = 600;

impl Config {
    /// Validate configuration values
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if let Some(timeout) = self.defaults.request_timeout_secs {
            if timeout == 0 {
                return Err(ConfigError::InvalidValue {
                    key: "request_timeout_secs".to_string(),
                    value: "must be greater than 0".to_string(),
                });
            }
            if timeout > MAX_REQUEST_TIMEOUT_SECS {
                return Err(ConfigError::InvalidValue {
                    key: "request_timeout_secs".to_string(),
                    value: format!("exceeds maximum limit of {MAX_REQUEST_TIMEOUT_SECS} seconds"),
                });
            }
        }

        if let Some(url) = &self.github.api_base_url
            && !(url.starts_with("https://") || url.starts_with("http://"))
        {
            return Err(ConfigError::InvalidValue {
                key: "api_base_url".to_string(),
                value: format!("'{url}' must start with http:// or https://"),
            });
        }

        if let Some(name) = &self.github.access_token_env
            && name.trim().is_empty()
        {
            return Err(ConfigError::InvalidValue {
                key: "access_token_env".to_string(),
                value: "must not be empty".to_string(),
            });
        }

        if let Some(agent) = &self.github.user_agent
            && agent.trim().is_empty()
        {
            return Err(ConfigError::InvalidValue {
                key: "user_agent".to_string(),
                value: "must not be empty".to_string(),
            });
        }

        Ok(())
    }
}
