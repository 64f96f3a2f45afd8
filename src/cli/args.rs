//! CLI argument definitions using clap
//!
//! Commands:
//! - tablequery serve [--config <path>] [--host <host>] [--port <port>]
//! - tablequery query --data <path> --shape <shape> --params <query string>
//! - tablequery distinct --data <path> --shape <shape> --columns <list>

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::dataset::RowShape;

/// tablequery - server-side search, sort and paging for table clients
#[derive(Parser, Debug)]
#[command(name = "tablequery")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Dataset shape on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ShapeArg {
    /// Rows are arrays, columns addressed by index
    Positional,
    /// Rows are objects, columns addressed by field name
    Keyed,
}

impl From<ShapeArg> for RowShape {
    fn from(shape: ShapeArg) -> Self {
        match shape {
            ShapeArg::Positional => RowShape::Positional,
            ShapeArg::Keyed => RowShape::Keyed,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP server
    Serve {
        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Host to bind to (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (overrides config)
        #[arg(long)]
        port: Option<u16>,

        /// Positional dataset file (overrides config)
        #[arg(long)]
        positional_data: Option<PathBuf>,

        /// Keyed dataset file (overrides config)
        #[arg(long)]
        keyed_data: Option<PathBuf>,
    },

    /// Run a single table query and print the JSON result
    Query {
        /// Dataset file
        #[arg(long)]
        data: PathBuf,

        /// Dataset shape
        #[arg(long, value_enum)]
        shape: ShapeArg,

        /// URL-encoded query string, e.g. "order[0][column]=0&length=5"
        #[arg(long)]
        params: String,
    },

    /// Print distinct values for a comma-separated column list
    Distinct {
        /// Dataset file
        #[arg(long)]
        data: PathBuf,

        /// Dataset shape
        #[arg(long, value_enum)]
        shape: ShapeArg,

        /// Column addresses, e.g. "position,office" or "1,2"
        #[arg(long)]
        columns: Option<String>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
