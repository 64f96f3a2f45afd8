//! CLI module
//!
//! Provides command-line interface for:
//! - serve: Load datasets and run the HTTP server
//! - query: One-shot table query
//! - distinct: One-shot distinct values

mod args;
mod commands;
mod errors;
mod io;

use tracing_subscriber::{fmt, EnvFilter};

pub use args::{Cli, Command, ShapeArg};
pub use commands::{distinct, query, run_command, serve};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{parse_query_string, write_json};

/// Parse arguments, set up logging and run the selected command
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    init_logging();
    run_command(cli.command)
}

/// Log to stderr, filtered by `RUST_LOG` (default `info`)
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
