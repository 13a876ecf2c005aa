//! Exit code constants and error mapping for repoforge.
//!
//! # Exit Code Table
//!
//! | Code | Constant | Description |
//! |------|----------|-------------|
//! | 0 | `SUCCESS` | Every repository was created |
//! | 1 | `INTERNAL` | General/internal failure |
//! | 2 | `CLI_ARGS` | Invalid CLI arguments or configuration |
//! | 3 | `PARTIAL_CONTENT` | Some repositories in a batch failed |
//! | 4 | `CREATION_FAILED` | No repository was created |

use crate::error::RepoforgeError;

/// Batch status meaning every item succeeded
pub const STATUS_CREATED: u16 = 201;
/// Batch status meaning outcomes were mixed
pub const STATUS_PARTIAL_CONTENT: u16 = 206;

/// Process exit code.
///
/// ```rust
/// use repoforge_utils::exit_codes::ExitCode;
///
/// assert_eq!(ExitCode::SUCCESS.as_i32(), 0);
/// assert_eq!(ExitCode::from_batch_status(206), ExitCode::PARTIAL_CONTENT);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const INTERNAL: ExitCode = ExitCode(1);
    pub const CLI_ARGS: ExitCode = ExitCode(2);
    pub const PARTIAL_CONTENT: ExitCode = ExitCode(3);
    pub const CREATION_FAILED: ExitCode = ExitCode(4);

    #[must_use]
    pub const fn as_i32(self) -> i32 {
        self.0
    }

    /// Map an aggregate batch status to an exit code
    #[must_use]
    pub fn from_batch_status(status: u16) -> Self {
        match status {
            STATUS_CREATED => Self::SUCCESS,
            STATUS_PARTIAL_CONTENT => Self::PARTIAL_CONTENT,
            _ => Self::CREATION_FAILED,
        }
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code.0
    }
}

impl RepoforgeError {
    /// Map this error to the exit code the CLI should return
    #[must_use]
    pub fn to_exit_code(&self) -> ExitCode {
        match self {
            Self::Config(_) | Self::Json(_) => ExitCode::CLI_ARGS,
            Self::Api { .. } => ExitCode::CREATION_FAILED,
            Self::Transport(_) | Self::Io(_) => ExitCode::INTERNAL,
        }
    }
}
