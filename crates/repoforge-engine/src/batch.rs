//! Concurrent batch creation
//!
//! One task per request runs in a [`JoinSet`]. Each task hands its result to
//! a collector task over an unbounded channel. Draining the `JoinSet` is the
//! barrier: once every task has finished the last sender is dropped, the
//! collector sees the channel close and returns the accumulated results
//! through its join handle. Only then is the aggregate status derived.

use std::time::Instant;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{Instrument, error};

use repoforge_utils::error::ApiError;
use repoforge_utils::exit_codes::{STATUS_CREATED, STATUS_PARTIAL_CONTENT};
use repoforge_utils::logging::{batch_span, item_span, log_batch_complete, log_item_failed};

use crate::repositories::RepositoryService;
use crate::types::{CreateRepoRequest, CreateReposResponse, CreateRepositoriesResult};

impl RepositoryService {
    /// Create every repository in `requests` concurrently.
    ///
    /// Never fails: each request yields exactly one entry in `results`, in
    /// completion order. See [`aggregate_status`] for how `status` is chosen.
    /// There are no retries and no cancellation; every task runs to completion.
    pub async fn create_repos(&self, requests: Vec<CreateRepoRequest>) -> CreateReposResponse {
        let expected = requests.len();
        let span = batch_span(expected);
        self.run_batch(requests).instrument(span).await
    }

    async fn run_batch(&self, requests: Vec<CreateRepoRequest>) -> CreateReposResponse {
        let started = Instant::now();
        let expected = requests.len();

        let (tx, rx) = mpsc::unbounded_channel();
        let collector = tokio::spawn(collect_results(rx, expected));

        let mut tasks = JoinSet::new();
        for request in requests {
            let service = self.clone();
            let tx = tx.clone();
            let span = item_span(request.name.trim());
            tasks.spawn(
                async move {
                    let result = CreateRepositoriesResult::from(service.create_repo(&request).await);
                    if let CreateRepositoriesResult::Error(err) = &result {
                        log_item_failed(request.name.trim(), err.status, &err.message);
                    }
                    // The receiver outlives every sender
                    let _ = tx.send(result);
                }
                .instrument(span),
            );
        }

        while let Some(joined) = tasks.join_next().await {
            if let Err(join_error) = joined {
                error!(error = %join_error, "Repository creation task did not complete");
                let _ = tx.send(CreateRepositoriesResult::Error(
                    ApiError::internal_server_error(format!(
                        "repository creation task failed: {join_error}"
                    )),
                ));
            }
        }
        drop(tx);

        let mut response = match collector.await {
            Ok(response) => response,
            Err(join_error) if join_error.is_panic() => {
                std::panic::resume_unwind(join_error.into_panic())
            }
            Err(join_error) => {
                error!(error = %join_error, "Result collector was cancelled");
                CreateReposResponse {
                    status: 0,
                    results: (0..expected)
                        .map(|_| {
                            CreateRepositoriesResult::Error(ApiError::internal_server_error(
                                "result collector was cancelled",
                            ))
                        })
                        .collect(),
                }
            }
        };

        response.status = aggregate_status(&response.results);
        log_batch_complete(
            response.status,
            response.succeeded(),
            response.failed(),
            started.elapsed().as_millis(),
        );
        response
    }
}

async fn collect_results(
    mut rx: mpsc::UnboundedReceiver<CreateRepositoriesResult>,
    expected: usize,
) -> CreateReposResponse {
    let mut results = Vec::with_capacity(expected);
    while let Some(result) = rx.recv().await {
        results.push(result);
    }
    CreateReposResponse { status: 0, results }
}

/// Aggregate status of a finished batch.
///
/// - no results: 201 (nothing to fail)
/// - every item created: 201
/// - no item created: the status of the first entry, i.e. the first error to
///   arrive. Which error that is depends on completion order.
/// - otherwise: 206
#[must_use]
pub fn aggregate_status(results: &[CreateRepositoriesResult]) -> u16 {
    let succeeded = results.iter().filter(|r| r.is_success()).count();
    match results.first() {
        None => STATUS_CREATED,
        Some(_) if succeeded == results.len() => STATUS_CREATED,
        Some(first) if succeeded == 0 => first.status(),
        Some(_) => STATUS_PARTIAL_CONTENT,
    }
}
