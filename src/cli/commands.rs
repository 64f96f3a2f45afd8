//! CLI command implementations

use std::path::PathBuf;

use tracing::info;

use crate::dataset::DatasetLoader;
use crate::executor::TableExecutor;
use crate::http_server::{HttpServer, ServerConfig, TableState};
use crate::query::TableQuery;

use super::args::{Command, ShapeArg};
use super::errors::{CliError, CliResult};
use super::io::{parse_query_string, write_json};

/// Dispatch a parsed command
pub fn run_command(command: Command) -> CliResult<()> {
    match command {
        Command::Serve {
            config,
            host,
            port,
            positional_data,
            keyed_data,
        } => {
            let mut config = match config {
                Some(path) => ServerConfig::load(&path)?,
                None => ServerConfig::default(),
            };
            apply_overrides(&mut config, host, port, positional_data, keyed_data);
            config.validate()?;
            serve(config)
        }
        Command::Query {
            data,
            shape,
            params,
        } => query(&data, shape, &params),
        Command::Distinct {
            data,
            shape,
            columns,
        } => distinct(&data, shape, columns.as_deref()),
    }
}

fn apply_overrides(
    config: &mut ServerConfig,
    host: Option<String>,
    port: Option<u16>,
    positional_data: Option<PathBuf>,
    keyed_data: Option<PathBuf>,
) {
    if let Some(host) = host {
        config.host = host;
    }
    if let Some(port) = port {
        config.port = port;
    }
    if positional_data.is_some() {
        config.positional_data = positional_data;
    }
    if keyed_data.is_some() {
        config.keyed_data = keyed_data;
    }
}

/// Load datasets and serve until the process is stopped
pub fn serve(config: ServerConfig) -> CliResult<()> {
    let state = TableState::from_config(&config)?;
    info!(
        positional_rows = state.positional.len(),
        keyed_rows = state.keyed.len(),
        "datasets ready"
    );

    let server = HttpServer::with_state(config, state);

    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::io_error(format!("Failed to start runtime: {}", e)))?;
    runtime.block_on(server.start())?;

    Ok(())
}

/// One-shot table query
pub fn query(data: &std::path::Path, shape: ShapeArg, params: &str) -> CliResult<()> {
    let dataset = DatasetLoader::from_path(data, shape.into())?;
    let params = parse_query_string(params)?;

    let query = TableQuery::parse(&params)?;
    let result = TableExecutor::new(&dataset).execute(&query)?;

    write_json(&result)
}

/// One-shot distinct values
pub fn distinct(data: &std::path::Path, shape: ShapeArg, columns: Option<&str>) -> CliResult<()> {
    let dataset = DatasetLoader::from_path(data, shape.into())?;
    let values = TableExecutor::new(&dataset).distinct(columns);

    write_json(&values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_replace_config_values() {
        let mut config = ServerConfig::default();
        apply_overrides(
            &mut config,
            Some("127.0.0.1".to_string()),
            Some(9000),
            None,
            Some(PathBuf::from("data_2.json")),
        );

        assert_eq!(config.socket_addr(), "127.0.0.1:9000");
        assert!(config.positional_data.is_none());
        assert_eq!(config.keyed_data, Some(PathBuf::from("data_2.json")));
    }

    #[test]
    fn test_query_missing_file() {
        let err = query(
            std::path::Path::new("/nonexistent/data.json"),
            ShapeArg::Positional,
            "order[0][column]=0",
        )
        .unwrap_err();
        assert_eq!(err.code_str(), "CLI_DATASET_ERROR");
    }
}
