//! `repoforge create-batch`

use std::io::{Read, Write};
use std::path::Path;

use repoforge_engine::{CreateRepoRequest, CreateRepositoriesResult, RepositoryService};
use repoforge_utils::error::RepoforgeError;
use repoforge_utils::exit_codes::ExitCode;

/// Read batch requests from a file, or from stdin when `source` is `-`
///
/// # Errors
///
/// `RepoforgeError::Io` if the source cannot be read, `RepoforgeError::Json`
/// if it is not a JSON array of requests.
pub fn load_requests(source: &str) -> Result<Vec<CreateRepoRequest>, RepoforgeError> {
    let text = if source == "-" {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        text
    } else {
        std::fs::read_to_string(Path::new(source))?
    };
    parse_requests(&text)
}

/// Parse a JSON array of `{"name", "description"}` objects
///
/// # Errors
///
/// Returns `RepoforgeError::Json` if `text` does not match.
pub fn parse_requests(text: &str) -> Result<Vec<CreateRepoRequest>, RepoforgeError> {
    Ok(serde_json::from_str(text)?)
}

/// Run a batch and print its outcome.
///
/// The exit code follows the aggregate status: 0 for 201, 3 for 206 and 4
/// otherwise.
pub async fn execute_create_batch_command(
    service: &RepositoryService,
    requests: Vec<CreateRepoRequest>,
    json: bool,
    out: &mut dyn Write,
) -> Result<ExitCode, RepoforgeError> {
    let response = service.create_repos(requests).await;

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&response)?)?;
    } else {
        for result in &response.results {
            match result {
                CreateRepositoriesResult::Response(created) => writeln!(
                    out,
                    "✓ {}/{} (id {})",
                    created.owner, created.name, created.id
                )?,
                CreateRepositoriesResult::Error(err) => writeln!(
                    out,
                    "✗ {} ({}): {}",
                    err.error, err.status, err.message
                )?,
            }
        }
        writeln!(
            out,
            "Batch status {}: {} created, {} failed",
            response.status,
            response.succeeded(),
            response.failed()
        )?;
    }

    Ok(ExitCode::from_batch_status(response.status))
}
