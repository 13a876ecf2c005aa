//! repoforge - create GitHub repositories one at a time or in concurrent batches
//!
//! repoforge can be used in two ways:
//! - **CLI**: `repoforge create <NAME>` or `repoforge create-batch <FILE>`
//! - **Library**: build a [`RepositoryService`] and call
//!   [`create_repo`](RepositoryService::create_repo) or
//!   [`create_repos`](RepositoryService::create_repos)
//!
//! # Quick Start (CLI)
//!
//! ```bash
//! export SECRET_GITHUB_ACCESS_TOKEN=ghp_...
//!
//! # One repository
//! repoforge create my-repo --description "scratch space"
//!
//! # Many repositories, concurrently
//! echo '[{"name": "repo-a"}, {"name": "repo-b"}]' | repoforge create-batch - --json
//!
//! # Show effective configuration and where each value came from
//! repoforge config
//! ```
//!
//! # Quick Start (Library)
//!
//! ```rust,no_run
//! use repoforge::{Config, CreateRepoRequest, RepositoryService};
//!
//! # async fn demo() -> Result<(), repoforge::RepoforgeError> {
//! let config = Config::builder().access_token("ghp_example").build()?;
//! let service = RepositoryService::from_config(&config)?;
//!
//! let batch = service
//!     .create_repos(vec![
//!         CreateRepoRequest::new("repo-a", ""),
//!         CreateRepoRequest::new("repo-b", "second"),
//!     ])
//!     .await;
//! println!("status {}: {} created", batch.status, batch.succeeded());
//! # Ok(())
//! # }
//! ```
//!
//! # Batch status
//!
//! A batch always returns one result per request. Its `status` is 201 when
//! every item was created, 206 when outcomes were mixed, and the status of the
//! first error to arrive when nothing was created. An empty batch is 201.

// ============================================================================
// Public API
// ============================================================================

pub use repoforge_config::{CliArgs, Config, ConfigBuilder, ConfigSource};

pub use repoforge_engine::{
    CreateRepoRequest, CreateRepoResponse, CreateReposResponse, CreateRepositoriesResult,
    RepositoryService, aggregate_status,
};

pub use repoforge_github::{GithubProvider, RepoProvider};

pub use repoforge_transport::{HttpTransport, Transport, TransportRequest, TransportResponse};

pub use repoforge_utils::error::{
    ApiError, ApiErrorKind, ConfigError, RepoforgeError, TransportError, UserFriendlyError,
};
pub use repoforge_utils::exit_codes::ExitCode;

// ============================================================================
// Internal modules - not covered by semver
// ============================================================================

#[doc(hidden)]
pub mod cli;

#[doc(hidden)]
pub use repoforge_github as github;

#[doc(hidden)]
pub use repoforge_transport as transport;

#[doc(hidden)]
pub use repoforge_utils::{logging, redaction};
