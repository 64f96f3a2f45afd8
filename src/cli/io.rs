//! JSON output and query-string input for one-shot commands

use std::collections::HashMap;
use std::io::{self, Write};

use serde::Serialize;

use super::errors::{CliError, CliResult};

/// Write a value as one JSON line to stdout
pub fn write_json<T: Serialize>(value: &T) -> CliResult<()> {
    let mut stdout = io::stdout();
    serde_json::to_writer(&mut stdout, value)?;
    writeln!(stdout)?;
    stdout.flush()?;

    Ok(())
}

/// Decode an `application/x-www-form-urlencoded` query string.
///
/// A leading `?` is ignored; repeated keys keep the last value.
pub fn parse_query_string(input: &str) -> CliResult<HashMap<String, String>> {
    let input = input.strip_prefix('?').unwrap_or(input);
    let mut params = HashMap::new();

    for pair in input.split('&').filter(|p| !p.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        params.insert(decode_component(key)?, decode_component(value)?);
    }

    Ok(params)
}

fn decode_component(raw: &str) -> CliResult<String> {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|decoded| decoded.into_owned())
        .map_err(|e| CliError::io_error(format!("Invalid query string component {:?}: {}", raw, e)))
}
