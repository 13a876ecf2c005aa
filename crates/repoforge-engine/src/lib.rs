//! Repository creation engine
//!
//! [`RepositoryService::create_repo`] handles one request end to end.
//! [`RepositoryService::create_repos`] fans a batch out to one task per
//! request, collects exactly one result per request and derives an aggregate
//! status from the mix of outcomes.

mod batch;
mod repositories;
mod types;

#[cfg(test)]
mod test_support;

pub use batch::aggregate_status;
pub use repositories::RepositoryService;
pub use types::{
    CreateRepoRequest, CreateRepoResponse, CreateReposResponse, CreateRepositoriesResult,
};

pub use repoforge_utils::error::{ApiError, ApiErrorKind};
