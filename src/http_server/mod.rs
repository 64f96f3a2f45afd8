//! # HTTP Server Module
//!
//! Serves the table protocol over HTTP. All responses are JSON.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/data` - Whole positional dataset
//! - `/data_server_side_1`, `/data_server_side_2` - Table queries
//! - `/data_filter_drop_down_1`, `/data_filter_drop_down_2` - Distinct values

pub mod config;
pub mod errors;
pub mod health_routes;
pub mod server;
pub mod table_routes;

pub use config::{ConfigError, ServerConfig};
pub use errors::{ApiError, ApiResult, ErrorResponse};
pub use server::HttpServer;
pub use table_routes::{run_distinct, run_query, TableState};
