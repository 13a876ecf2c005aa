//! CLI argument definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// repoforge - create GitHub repositories one at a time or in concurrent batches
#[derive(Parser, Debug)]
#[command(name = "repoforge")]
#[command(about = "Create GitHub repositories one at a time or in concurrent batches")]
#[command(long_about = r#"
repoforge creates repositories for the authenticated GitHub user. Batches are
sent concurrently and always report one result per requested repository.

EXAMPLES:
  # Create one repository
  repoforge create my-repo --description "scratch space"

  # Create several repositories from a JSON file
  repoforge create-batch repos.json

  # Read the batch from stdin and print the full JSON result
  echo '[{"name": "repo-a"}, {"name": "repo-b"}]' | repoforge create-batch - --json

  # Show effective configuration
  repoforge config

CONFIGURATION:
  Precedence: CLI flags > environment > config file > defaults
  Config file is discovered by searching upward from CWD for .repoforge/config.toml
  The access token is read from SECRET_GITHUB_ACCESS_TOKEN unless
  [github] access_token_env names another variable

EXIT CODES:
  0  every repository was created
  1  internal error
  2  invalid arguments or configuration
  3  some repositories in the batch failed
  4  no repository was created
"#)]
#[command(version)]
pub struct Cli {
    /// Path to configuration file (overrides discovery)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// GitHub API base URL (e.g. https://ghe.example.com/api/v3)
    #[arg(long, global = true)]
    pub api_base_url: Option<String>,

    /// Environment variable holding the access token
    #[arg(long, global = true)]
    pub token_env: Option<String>,

    /// Per-request timeout in seconds (1-600)
    #[arg(long, global = true)]
    pub request_timeout: Option<u64>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create one repository
    Create {
        /// Repository name
        name: String,

        /// Repository description
        #[arg(short, long, default_value = "")]
        description: String,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create many repositories concurrently from a JSON array
    #[command(name = "create-batch")]
    CreateBatch {
        /// File holding `[{"name": ..., "description": ...}, ...]`, or `-` for stdin
        file: String,

        /// Print the full batch result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show effective configuration with the source of each value
    Config {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Commands {
    /// Operation name used in error reports
    #[must_use]
    pub fn operation(&self) -> &'static str {
        match self {
            Self::Create { .. } => "create",
            Self::CreateBatch { .. } => "create-batch",
            Self::Config { .. } => "config",
        }
    }
}
