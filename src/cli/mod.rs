//! Command-line interface for repoforge
//!
//! - `args`: clap argument definitions
//! - `run`: entry point, configuration, runtime and dispatch
//! - `commands`: command implementations
//! - `report`: error display

pub mod args;
mod commands;
mod report;
mod run;


pub use args::{Cli, Commands};
pub use commands::{
    execute_config_command, execute_create_batch_command, execute_create_command, load_requests,
    parse_requests,
};
pub use report::render_error_report;
pub use run::run;
