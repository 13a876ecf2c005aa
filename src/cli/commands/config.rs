//! `repoforge config`

use std::io::Write;

use repoforge_config::Config;
use repoforge_utils::error::RepoforgeError;
use repoforge_utils::exit_codes::ExitCode;

/// Print the effective configuration with source attribution. The token is masked.
pub fn execute_config_command(
    config: &Config,
    json: bool,
    out: &mut dyn Write,
) -> Result<ExitCode, RepoforgeError> {
    let effective = config.effective_config();

    if json {
        let map: serde_json::Map<String, serde_json::Value> = effective
            .into_iter()
            .map(|(key, (value, source))| {
                (key, serde_json::json!({ "value": value, "source": source }))
            })
            .collect();
        writeln!(out, "{}", serde_json::to_string_pretty(&map)?)?;
        return Ok(ExitCode::SUCCESS);
    }

    writeln!(out, "Effective configuration:")?;
    let width = effective.keys().map(String::len).max().unwrap_or(0);
    for (key, (value, source)) in &effective {
        writeln!(out, "  {key:<width$} = {value}  ({source})")?;
    }
    Ok(ExitCode::SUCCESS)
}
