use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tempfile::TempDir;

use super::*;

fn write_config(dir: &Path, content: &str) -> PathBuf {
    let config_dir = dir.join(".repoforge");
    fs::create_dir_all(&config_dir).unwrap();
    let path = config_dir.join("config.toml");
    fs::write(&path, content).unwrap();
    path
}

fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn test_defaults_without_file_or_env() {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join(".git")).unwrap();

    let config = Config::discover_from_with_env(temp.path(), &CliArgs::default(), env_of(&[]))
        .unwrap();

    assert_eq!(config.api_base_url(), DEFAULT_API_BASE_URL);
    assert_eq!(config.access_token_env(), DEFAULT_ACCESS_TOKEN_ENV);
    assert_eq!(
        config.request_timeout(),
        Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS)
    );
    assert!(!config.verbose());
    assert_eq!(config.source_of("api_base_url"), ConfigSource::Default);
    assert!(matches!(
        config.access_token(),
        Err(ConfigError::MissingRequired(_))
    ));
}

#[test]
fn test_token_read_from_default_env_var() {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join(".git")).unwrap();

    let config = Config::discover_from_with_env(
        temp.path(),
        &CliArgs::default(),
        env_of(&[("SECRET_GITHUB_ACCESS_TOKEN", "ghp_from_env")]),
    )
    .unwrap();

    assert_eq!(config.access_token().unwrap(), "ghp_from_env");
    assert_eq!(config.source_of("access_token"), ConfigSource::Env);
}

#[test]
fn test_upward_discovery_stops_at_git_root() {
    let temp = TempDir::new().unwrap();
    let outer = temp.path();
    write_config(outer, "[defaults]\nrequest_timeout_secs = 99\n");

    let repo = outer.join("repo");
    fs::create_dir_all(repo.join(".git")).unwrap();
    let nested = repo.join("a").join("b");
    fs::create_dir_all(&nested).unwrap();

    // The config above the .git marker must not be picked up
    assert_eq!(Config::discover_config_file_from(&nested), None);

    let found_path = write_config(&repo, "[defaults]\nrequest_timeout_secs = 12\n");
    assert_eq!(Config::discover_config_file_from(&nested), Some(found_path));

    let config =
        Config::discover_from_with_env(&nested, &CliArgs::default(), env_of(&[])).unwrap();
    assert_eq!(config.request_timeout(), Duration::from_secs(12));
    assert_eq!(config.source_of("request_timeout_secs"), ConfigSource::Config);
}

#[test]
fn test_precedence_cli_over_env_over_file() {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join(".git")).unwrap();
    write_config(
        temp.path(),
        r#"
[github]
api_base_url = "https://file.example.com"
access_token_env = "FILE_TOKEN_VAR"

[defaults]
request_timeout_secs = 20
verbose = true
"#,
    );

    let env = env_of(&[
        ("REPOFORGE_API_BASE_URL", "https://env.example.com"),
        ("CLI_TOKEN_VAR", "ghp_cli_named"),
        ("FILE_TOKEN_VAR", "ghp_file_named"),
    ]);

    let file_and_env =
        Config::discover_from_with_env(temp.path(), &CliArgs::default(), &env).unwrap();
    assert_eq!(file_and_env.api_base_url(), "https://env.example.com");
    assert_eq!(file_and_env.source_of("api_base_url"), ConfigSource::Env);
    assert_eq!(file_and_env.access_token().unwrap(), "ghp_file_named");
    assert!(file_and_env.verbose());

    let cli_args = CliArgs {
        api_base_url: Some("https://cli.example.com".to_string()),
        access_token_env: Some("CLI_TOKEN_VAR".to_string()),
        request_timeout_secs: Some(5),
        verbose: Some(false),
        ..CliArgs::default()
    };
    let config = Config::discover_from_with_env(temp.path(), &cli_args, &env).unwrap();

    assert_eq!(config.api_base_url(), "https://cli.example.com");
    assert_eq!(config.source_of("api_base_url"), ConfigSource::Cli);
    assert_eq!(config.access_token().unwrap(), "ghp_cli_named");
    assert_eq!(config.request_timeout(), Duration::from_secs(5));
    assert!(!config.verbose());
}

#[test]
fn test_env_token_beats_literal_file_token() {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join(".git")).unwrap();
    write_config(temp.path(), "[github]\naccess_token = \"ghp_literal\"\n");

    let without_env =
        Config::discover_from_with_env(temp.path(), &CliArgs::default(), env_of(&[])).unwrap();
    assert_eq!(without_env.access_token().unwrap(), "ghp_literal");
    assert_eq!(without_env.source_of("access_token"), ConfigSource::Config);

    let with_env = Config::discover_from_with_env(
        temp.path(),
        &CliArgs::default(),
        env_of(&[("SECRET_GITHUB_ACCESS_TOKEN", "ghp_env")]),
    )
    .unwrap();
    assert_eq!(with_env.access_token().unwrap(), "ghp_env");
}

#[test]
fn test_home_env_var_overrides_discovery() {
    let temp = TempDir::new().unwrap();
    let home = temp.path().join("home");
    fs::create_dir_all(&home).unwrap();
    fs::write(home.join("config.toml"), "[github]\nuser_agent = \"from-home\"\n").unwrap();

    let work = temp.path().join("work");
    fs::create_dir_all(work.join(".git")).unwrap();
    write_config(&work, "[github]\nuser_agent = \"from-work\"\n");

    let home_str = home.to_string_lossy().to_string();
    let config = Config::discover_from_with_env(
        &work,
        &CliArgs::default(),
        env_of(&[(HOME_ENV_VAR, home_str.as_str())]),
    )
    .unwrap();
    assert_eq!(config.user_agent(), "from-home");
}

#[test]
fn test_explicit_missing_config_path_is_error() {
    let temp = TempDir::new().unwrap();
    let cli_args = CliArgs {
        config_path: Some(temp.path().join("nope.toml")),
        ..CliArgs::default()
    };
    let err = Config::discover_from_with_env(temp.path(), &cli_args, env_of(&[])).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ConfigError>(),
        Some(ConfigError::NotFound { .. })
    ));
}

#[test]
fn test_invalid_toml_is_reported() {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join(".git")).unwrap();
    write_config(temp.path(), "[github\napi_base_url = ");

    let err = Config::discover_from_with_env(temp.path(), &CliArgs::default(), env_of(&[]))
        .unwrap_err();
    assert!(format!("{err:#}").contains("Invalid configuration file"));
}

#[test]
fn test_validation_rejects_bad_values() {
    let err = Config::builder()
        .request_timeout(Duration::from_secs(0))
        .build()
        .unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "request_timeout_secs"));

    let err = Config::builder()
        .request_timeout(Duration::from_secs(601))
        .build()
        .unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "request_timeout_secs"));

    let err = Config::builder()
        .api_base_url("ftp://github.com")
        .build()
        .unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "api_base_url"));
}

#[test]
fn test_builder_attributes_programmatic_source() {
    let config = Config::builder()
        .access_token("ghp_builder_token")
        .user_agent("embedder")
        .build()
        .unwrap();

    assert_eq!(config.source_of("access_token"), ConfigSource::Programmatic);
    assert_eq!(config.source_of("user_agent"), ConfigSource::Programmatic);
    assert_eq!(config.source_of("api_base_url"), ConfigSource::Default);
    assert_eq!(config.user_agent(), "embedder");
}

#[test]
fn test_blank_token_is_missing() {
    let config = Config::builder().access_token("   ").build().unwrap();
    assert!(config.access_token().is_err());
}

#[test]
fn test_effective_config_masks_token() {
    let config = Config::builder()
        .access_token("ghp_supersecretvalue1234")
        .build()
        .unwrap();
    let effective = config.effective_config();

    let (token, source) = &effective["access_token"];
    assert_eq!(token, "****1234");
    assert_eq!(source, "programmatic");

    let (url, source) = &effective["api_base_url"];
    assert_eq!(url, DEFAULT_API_BASE_URL);
    assert_eq!(source, "default");
}
