//! Logging and observability for repoforge
//!
//! Structured logging goes through `tracing`. The CLI installs a subscriber
//! once at startup with [`init_tracing`]; library crates only emit events.
//! Output is written to stderr so stdout stays machine-readable JSON.

use tracing::{Level, error, info, span};
use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

use crate::redaction::redact_error_message;

/// Initialize the tracing subscriber.
///
/// `RUST_LOG` wins when set. Otherwise verbose mode logs repoforge at debug
/// level with span close events; the default is compact info-level output.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_tracing(verbose: bool) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| {
            if verbose {
                EnvFilter::try_new("repoforge=debug,info")
            } else {
                EnvFilter::try_new("repoforge=info,warn")
            }
        })
        .unwrap_or_else(|_| EnvFilter::new("info"));

    if verbose {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_line_number(false)
                    .with_file(false)
                    .with_span_events(FmtSpan::CLOSE)
                    .compact(),
            )
            .try_init()?;
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_line_number(false)
                    .with_file(false)
                    .compact(),
            )
            .try_init()?;
    }

    Ok(())
}

/// Span covering one batch creation call
pub fn batch_span(batch_size: usize) -> tracing::Span {
    span!(Level::INFO, "create_repos", batch_size = batch_size)
}

/// Span covering one unit of work inside a batch
pub fn item_span(repo_name: &str) -> tracing::Span {
    span!(Level::DEBUG, "create_repo", repo_name = %repo_name)
}

/// Log the aggregate outcome of a batch
pub fn log_batch_complete(status: u16, succeeded: usize, failed: usize, duration_ms: u128) {
    info!(
        status = status,
        succeeded = succeeded,
        failed = failed,
        duration_ms = %duration_ms,
        "Batch repository creation completed"
    );
}

/// Log a failed item. The message is redacted before it is emitted.
pub fn log_item_failed(repo_name: &str, status: u16, message: &str) {
    error!(
        repo_name = %repo_name,
        status = status,
        error = %redact_error_message(message),
        "Repository creation failed"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spans_construct_without_subscriber() {
        let batch = batch_span(3);
        let _entered = batch.enter();
        let item = item_span("repo-a");
        let _item_entered = item.enter();
        log_batch_complete(201, 3, 0, 12);
        log_item_failed("repo-b", 422, "Authorization: token secret-value");
    }

    #[test]
    fn test_init_tracing_twice_reports_error() {
        // The first call may fail too if another test installed a subscriber;
        // the second call must always fail.
        let _ = init_tracing(false);
        assert!(init_tracing(true).is_err());
    }
}
