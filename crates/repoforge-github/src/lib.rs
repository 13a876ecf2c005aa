//! GitHub adapter for repoforge
//!
//! Translates a create-repository request into GitHub's wire shape, sends it
//! through an injected [`repoforge_transport::Transport`] and translates the
//! answer back. Every failure, including transport failures and undecodable
//! bodies, comes back as a [`GithubErrorResponse`] carrying an HTTP status.

mod provider;
mod types;

pub use provider::{GithubProvider, RepoProvider};
pub use types::{
    GithubCreateRepoRequest, GithubCreateRepoResponse, GithubError, GithubErrorResponse,
    RepoOwner, RepoPermissions,
};
