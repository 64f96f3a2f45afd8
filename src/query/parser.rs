//! # Table Query Parser
//!
//! Parses the flat, bracket-named query parameters sent by table clients
//! into a structured [`TableQuery`].
//!
//! ```text
//! draw=3&columns[0][data]=name&columns[0][search][value]=^A
//!     &columns[0][search][regex]=true&search[value]=lon
//!     &order[0][column]=0&order[0][dir]=desc&start=20&length=10
//! ```

use std::collections::HashMap;

use super::errors::{TableError, TableResult};

/// Page size when `length` is absent
pub const DEFAULT_LENGTH: usize = 10;

pub const PARAM_DRAW: &str = "draw";
pub const PARAM_GLOBAL_SEARCH: &str = "search[value]";
pub const PARAM_ORDER_COLUMN: &str = "order[0][column]";
pub const PARAM_ORDER_DIR: &str = "order[0][dir]";
pub const PARAM_START: &str = "start";
pub const PARAM_LENGTH: &str = "length";

/// Read access to raw request parameters.
///
/// Absent and empty are distinct: `get` returns `None` only for absent keys.
pub trait QuerySource {
    fn get(&self, key: &str) -> Option<&str>;
}

impl QuerySource for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<&str> {
        HashMap::get(self, key).map(String::as_str)
    }
}

/// A repeated key resolves to its last value, as a decoded query map would.
impl QuerySource for [(String, String)] {
    fn get(&self, key: &str) -> Option<&str> {
        self.iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

impl QuerySource for Vec<(String, String)> {
    fn get(&self, key: &str) -> Option<&str> {
        QuerySource::get(self.as_slice(), key)
    }
}

/// One column of the request, in client order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDescriptor {
    /// Position in the request column list
    pub ordinal: usize,
    /// Raw `columns[N][data]` value
    pub data: String,
    /// Per-column search text (may be empty)
    pub search_value: String,
    /// Whether `search_value` is a regular expression
    pub search_is_regex: bool,
}

impl ColumnDescriptor {
    pub fn new(ordinal: usize, data: impl Into<String>) -> Self {
        Self {
            ordinal,
            data: data.into(),
            search_value: String::new(),
            search_is_regex: false,
        }
    }

    /// Attach a regex search
    pub fn with_regex(mut self, pattern: impl Into<String>) -> Self {
        self.search_value = pattern.into();
        self.search_is_regex = true;
        self
    }

    /// Attach a plain-text search
    pub fn with_search(mut self, value: impl Into<String>) -> Self {
        self.search_value = value.into();
        self.search_is_regex = false;
        self
    }

    /// True if this column constrains the result
    pub fn has_regex_search(&self) -> bool {
        self.search_is_regex && !self.search_value.is_empty()
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// Only the exact string `desc` sorts descending
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("desc") => SortDirection::Desc,
            _ => SortDirection::Asc,
        }
    }
}

/// The single active sort
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub column_ordinal: usize,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn asc(column_ordinal: usize) -> Self {
        Self {
            column_ordinal,
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(column_ordinal: usize) -> Self {
        Self {
            column_ordinal,
            direction: SortDirection::Desc,
        }
    }
}

/// Requested page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub start: usize,
    pub length: usize,
}

impl PageWindow {
    pub fn new(start: usize, length: usize) -> Self {
        Self { start, length }
    }
}

impl Default for PageWindow {
    fn default() -> Self {
        Self {
            start: 0,
            length: DEFAULT_LENGTH,
        }
    }
}

/// Parsed table query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableQuery {
    /// Opaque token echoed back to the client
    pub draw_token: Option<String>,
    pub columns: Vec<ColumnDescriptor>,
    pub global_search: String,
    pub sort: SortSpec,
    pub page: PageWindow,
}

impl TableQuery {
    /// Query over `columns` sorted ascending by the first one, default page
    pub fn new(columns: Vec<ColumnDescriptor>) -> Self {
        Self {
            draw_token: None,
            columns,
            global_search: String::new(),
            sort: SortSpec::asc(0),
            page: PageWindow::default(),
        }
    }

    pub fn with_global_search(mut self, term: impl Into<String>) -> Self {
        self.global_search = term.into();
        self
    }

    pub fn with_sort(mut self, sort: SortSpec) -> Self {
        self.sort = sort;
        self
    }

    pub fn with_page(mut self, start: usize, length: usize) -> Self {
        self.page = PageWindow::new(start, length);
        self
    }

    pub fn with_draw(mut self, token: impl Into<String>) -> Self {
        self.draw_token = Some(token.into());
        self
    }

    /// Parse a table query from raw request parameters
    pub fn parse<Q: QuerySource + ?Sized>(params: &Q) -> TableResult<Self> {
        let columns = parse_columns(params);

        let global_search = params
            .get(PARAM_GLOBAL_SEARCH)
            .unwrap_or_default()
            .to_string();

        let column_ordinal = match params.get(PARAM_ORDER_COLUMN) {
            Some(value) => parse_count(PARAM_ORDER_COLUMN, value)?,
            None => return Err(TableError::malformed(PARAM_ORDER_COLUMN, "missing")),
        };
        let direction = SortDirection::parse(params.get(PARAM_ORDER_DIR));

        let start = parse_optional_count(params, PARAM_START, 0)?;
        let length = parse_optional_count(params, PARAM_LENGTH, DEFAULT_LENGTH)?;

        Ok(TableQuery {
            draw_token: params.get(PARAM_DRAW).map(str::to_string),
            columns,
            global_search,
            sort: SortSpec {
                column_ordinal,
                direction,
            },
            page: PageWindow { start, length },
        })
    }

    /// Descriptor for a request ordinal
    pub fn column(&self, ordinal: usize) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|c| c.ordinal == ordinal)
    }
}

/// Probe `columns[0]`, `columns[1]`, ... until the first absent or empty `data`
fn parse_columns<Q: QuerySource + ?Sized>(params: &Q) -> Vec<ColumnDescriptor> {
    let mut columns = Vec::new();

    for ordinal in 0.. {
        let data = match params.get(&format!("columns[{}][data]", ordinal)) {
            Some(data) if !data.is_empty() => data,
            _ => break,
        };

        let search_value = params
            .get(&format!("columns[{}][search][value]", ordinal))
            .unwrap_or_default();
        let search_is_regex =
            params.get(&format!("columns[{}][search][regex]", ordinal)) == Some("true");

        columns.push(ColumnDescriptor {
            ordinal,
            data: data.to_string(),
            search_value: search_value.to_string(),
            search_is_regex,
        });
    }

    columns
}

fn parse_optional_count<Q: QuerySource + ?Sized>(
    params: &Q,
    field: &str,
    default: usize,
) -> TableResult<usize> {
    match params.get(field) {
        Some(value) => parse_count(field, value),
        None => Ok(default),
    }
}

fn parse_count(field: &str, value: &str) -> TableResult<usize> {
    value
        .trim()
        .parse()
        .map_err(|_| {
            TableError::malformed(field, format!("not a non-negative integer: {:?}", value))
        })
}
