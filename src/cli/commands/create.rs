//! `repoforge create`

use std::io::Write;

use repoforge_engine::{CreateRepoRequest, CreateRepositoriesResult, RepositoryService};
use repoforge_utils::error::RepoforgeError;
use repoforge_utils::exit_codes::ExitCode;

/// Create one repository.
///
/// With `json`, both outcomes are printed as a result object and a failure
/// only shows in the exit code. Without it, a failure is returned as
/// `RepoforgeError::Api` for the caller to report.
pub async fn execute_create_command(
    service: &RepositoryService,
    name: &str,
    description: &str,
    json: bool,
    out: &mut dyn Write,
) -> Result<ExitCode, RepoforgeError> {
    let request = CreateRepoRequest::new(name, description);
    let result = service.create_repo(&request).await;

    if json {
        let code = if result.is_ok() {
            ExitCode::SUCCESS
        } else {
            ExitCode::CREATION_FAILED
        };
        let result = CreateRepositoriesResult::from(result);
        writeln!(out, "{}", serde_json::to_string_pretty(&result)?)?;
        return Ok(code);
    }

    let created = result?;
    writeln!(
        out,
        "✓ Created {}/{} (id {})",
        created.owner, created.name, created.id
    )?;
    Ok(ExitCode::SUCCESS)
}
