//! Scripted `RepoProvider` for engine tests

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use repoforge_github::{
    GithubCreateRepoRequest, GithubCreateRepoResponse, GithubErrorResponse, RepoOwner,
    RepoProvider,
};

#[derive(Debug, Clone)]
pub(crate) enum StubOutcome {
    Created { id: i64, owner: String },
    Failed { status: u16, message: String },
    Panic,
}

impl StubOutcome {
    pub(crate) fn created(id: i64, owner: &str) -> Self {
        Self::Created {
            id,
            owner: owner.to_string(),
        }
    }

    pub(crate) fn failed(status: u16, message: &str) -> Self {
        Self::Failed {
            status,
            message: message.to_string(),
        }
    }
}

/// Answers by repository name. Unknown names get a 404.
#[derive(Default)]
pub(crate) struct StubProvider {
    outcomes: HashMap<String, (StubOutcome, Duration)>,
    requests: Mutex<Vec<(String, GithubCreateRepoRequest)>>,
}

impl StubProvider {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with(self, name: &str, outcome: StubOutcome) -> Self {
        self.with_delay(name, outcome, Duration::ZERO)
    }

    pub(crate) fn with_delay(mut self, name: &str, outcome: StubOutcome, delay: Duration) -> Self {
        self.outcomes.insert(name.to_string(), (outcome, delay));
        self
    }

    /// `(access_token, payload)` for every call, in call order
    pub(crate) fn requests(&self) -> Vec<(String, GithubCreateRepoRequest)> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub(crate) fn call_count(&self) -> usize {
        self.requests().len()
    }
}

#[async_trait]
impl RepoProvider for StubProvider {
    async fn create_repo(
        &self,
        access_token: &str,
        request: &GithubCreateRepoRequest,
    ) -> Result<GithubCreateRepoResponse, GithubErrorResponse> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push((access_token.to_string(), request.clone()));

        let (outcome, delay) = self
            .outcomes
            .get(&request.name)
            .cloned()
            .unwrap_or_else(|| (StubOutcome::failed(404, "Not Found"), Duration::ZERO));

        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        match outcome {
            StubOutcome::Created { id, owner } => Ok(GithubCreateRepoResponse {
                id,
                name: request.name.clone(),
                full_name: format!("{owner}/{}", request.name),
                owner: RepoOwner {
                    id: 1,
                    login: owner,
                    url: String::new(),
                    html_url: String::new(),
                },
                permissions: None,
            }),
            StubOutcome::Failed { status, message } => Err(GithubErrorResponse {
                status_code: status,
                message,
                ..GithubErrorResponse::default()
            }),
            StubOutcome::Panic => panic!("stub provider panicked for {}", request.name),
        }
    }
}
