//! CLI command implementations
//!
//! Handlers write their primary output to the supplied writer and return the
//! exit code the process should end with. Errors are returned, not printed.

mod batch;
mod config;
mod create;

pub use batch::{execute_create_batch_command, load_requests, parse_requests};
pub use config::execute_config_command;
pub use create::execute_create_command;
