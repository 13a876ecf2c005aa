use std::collections::BTreeMap;

use repoforge_utils::redaction::mask_token;

use super::Config;

impl Config {
    /// Effective configuration as key -> (value, source).
    ///
    /// The access token is masked; everything else is shown as resolved.
    #[must_use]
    pub fn effective_config(&self) -> BTreeMap<String, (String, String)> {
        let mut config = BTreeMap::new();

        let mut add_config = |key: &str, value: String| {
            let source = self.source_of(key).as_str().to_string();
            config.insert(key.to_string(), (value, source));
        };

        add_config("api_base_url", self.api_base_url().to_string());
        add_config("access_token_env", self.access_token_env().to_string());
        add_config("user_agent", self.user_agent().to_string());
        add_config(
            "request_timeout_secs",
            self.request_timeout().as_secs().to_string(),
        );
        add_config("verbose", self.verbose().to_string());

        let token = match self.github.access_token.as_deref() {
            Some(token) if !token.is_empty() => mask_token(token),
            _ => "<unset>".to_string(),
        };
        add_config("access_token", token);

        config
    }
}
