//! Table HTTP Routes
//!
//! Endpoints for table clients: the raw dataset, server-side query
//! processing and distinct values for filter drop-downs. Suffix `_1` serves
//! the positional dataset, suffix `_2` the keyed dataset.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;

use crate::dataset::{Dataset, DatasetLoader, DatasetResult, Row, RowShape};
use crate::executor::{DistinctValues, QueryResult, TableExecutor};
use crate::query::TableQuery;

use super::config::ServerConfig;
use super::errors::ApiResult;

/// Parameter naming the columns of a distinct-values request
pub const PARAM_DISTINCT_COLUMNS: &str = "columns";

// ==================
// Shared State
// ==================

/// Datasets shared, read-only, by every request
#[derive(Debug, Clone)]
pub struct TableState {
    pub positional: Arc<Dataset>,
    pub keyed: Arc<Dataset>,
}

impl TableState {
    pub fn new(positional: Dataset, keyed: Dataset) -> Self {
        Self {
            positional: Arc::new(positional),
            keyed: Arc::new(keyed),
        }
    }

    /// Load the configured datasets; unconfigured ones are empty
    pub fn from_config(config: &ServerConfig) -> DatasetResult<Self> {
        let load = |path: Option<&Path>, shape: RowShape| match path {
            Some(path) => DatasetLoader::from_path(path, shape),
            None => {
                tracing::warn!(shape = shape.as_str(), "no dataset configured, serving empty");
                Ok(Dataset::empty(shape))
            }
        };

        Ok(Self::new(
            load(config.positional_data.as_deref(), RowShape::Positional)?,
            load(config.keyed_data.as_deref(), RowShape::Keyed)?,
        ))
    }
}

impl Default for TableState {
    fn default() -> Self {
        Self::new(
            Dataset::empty(RowShape::Positional),
            Dataset::empty(RowShape::Keyed),
        )
    }
}

// ==================
// Response Types
// ==================

/// Whole dataset, for client-side processing
#[derive(Debug, Serialize)]
pub struct DatasetResponse<'a> {
    pub data: &'a [Row],
}

/// Create table routes
pub fn table_routes(state: TableState) -> Router {
    Router::new()
        .route("/data", get(data_handler))
        .route("/data_server_side_1", get(positional_query_handler))
        .route("/data_server_side_2", get(keyed_query_handler))
        .route("/data_filter_drop_down_1", get(positional_distinct_handler))
        .route("/data_filter_drop_down_2", get(keyed_distinct_handler))
        .with_state(state)
}

// ==================
// Helper Functions
// ==================

/// Parse and execute a table query against one dataset
pub fn run_query(dataset: &Dataset, params: &HashMap<String, String>) -> ApiResult<QueryResult> {
    let query = TableQuery::parse(params)?;
    let result = TableExecutor::new(dataset).execute(&query)?;

    tracing::debug!(
        shape = dataset.shape().as_str(),
        filtered = result.records_filtered,
        returned = result.len(),
        "table query served"
    );

    Ok(result)
}

/// Distinct values for the `columns` parameter
pub fn run_distinct(dataset: &Dataset, params: &HashMap<String, String>) -> DistinctValues {
    let columns = params.get(PARAM_DISTINCT_COLUMNS).map(String::as_str);
    TableExecutor::new(dataset).distinct(columns)
}

// ==================
// Handlers
// ==================

pub async fn data_handler(State(state): State<TableState>) -> Response {
    Json(DatasetResponse {
        data: state.positional.rows(),
    })
    .into_response()
}

pub async fn positional_query_handler(
    State(state): State<TableState>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<Json<QueryResult>> {
    run_query(&state.positional, &params).map(Json)
}

pub async fn keyed_query_handler(
    State(state): State<TableState>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<Json<QueryResult>> {
    run_query(&state.keyed, &params).map(Json)
}

pub async fn positional_distinct_handler(
    State(state): State<TableState>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<DistinctValues> {
    Json(run_distinct(&state.positional, &params))
}

pub async fn keyed_distinct_handler(
    State(state): State<TableState>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<DistinctValues> {
    Json(run_distinct(&state.keyed, &params))
}
