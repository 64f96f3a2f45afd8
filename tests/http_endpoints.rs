//! HTTP Endpoint Tests
//!
//! Handlers are called directly with extracted state and parameters, then
//! the assembled router is driven end to end with encoded request URIs.

use std::collections::HashMap;
use std::path::PathBuf;

use axum::body::Body;
use axum::extract::{Query, State};
use axum::http::{header, Request, StatusCode};
use axum::response::IntoResponse;
use serde_json::{json, Value};
use tower::ServiceExt;

use tablequery::http_server::table_routes::{
    data_handler, keyed_distinct_handler, keyed_query_handler, positional_distinct_handler,
    positional_query_handler,
};
use tablequery::http_server::{HttpServer, ServerConfig, TableState};

fn state() -> TableState {
    let fixtures = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures");
    let config = ServerConfig {
        positional_data: Some(fixtures.join("data.json")),
        keyed_data: Some(fixtures.join("data_2.json")),
        ..Default::default()
    };
    TableState::from_config(&config).unwrap()
}

fn params(pairs: &[(&str, &str)]) -> Query<HashMap<String, String>> {
    Query(
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
    )
}

// =============================================================================
// Handlers
// =============================================================================

#[tokio::test]
async fn test_positional_query_wire_format() {
    let response = positional_query_handler(
        State(state()),
        params(&[
            ("draw", "3"),
            ("columns[0][data]", "0"),
            ("columns[1][data]", "1"),
            ("order[0][column]", "1"),
            ("order[0][dir]", "desc"),
            ("length", "2"),
        ]),
    )
    .await
    .unwrap();

    let body = serde_json::to_value(&response.0).unwrap();
    assert_eq!(body["draw"], "3");
    assert_eq!(body["recordsTotal"], 13);
    assert_eq!(body["recordsFiltered"], 13);
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
    assert_eq!(body["data"][0][1], "System Architect");
}

#[tokio::test]
async fn test_keyed_query_rows_are_objects() {
    let response = keyed_query_handler(
        State(state()),
        params(&[
            ("columns[0][data]", "name"),
            ("search[value]", "nixon"),
            ("order[0][column]", "0"),
        ]),
    )
    .await
    .unwrap();

    let body = serde_json::to_value(&response.0).unwrap();
    assert!(body["draw"].is_null());
    assert_eq!(body["data"][0]["name"], "Tiger Nixon");
    assert_eq!(body["data"][0]["office"], "Edinburgh");
}

#[tokio::test]
async fn test_query_error_is_bad_request() {
    let err = keyed_query_handler(State(state()), params(&[("columns[0][data]", "name")]))
        .await
        .unwrap_err();

    let response = err.into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_distinct_handlers() {
    let positional =
        positional_distinct_handler(State(state()), params(&[("columns", "2")])).await;
    assert!(positional.0.get("2").unwrap().iter().any(|v| v == "Edinburgh"));

    let keyed = keyed_distinct_handler(State(state()), params(&[("columns", "office")])).await;
    assert_eq!(keyed.0.get("office").unwrap().len(), 5);

    let empty = keyed_distinct_handler(State(state()), params(&[])).await;
    assert!(empty.0.is_empty());
}

#[tokio::test]
async fn test_full_dataset_response() {
    let response = data_handler(State(state())).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[test]
fn test_server_builds_with_datasets() {
    let server = HttpServer::with_state(ServerConfig::with_port(5050), state());
    assert_eq!(server.socket_addr(), "0.0.0.0:5050");
    let _router = server.router();
}

// =============================================================================
// Router
// =============================================================================

/// Send a GET through the full router; returns status, content type and body
async fn get(uri: &str) -> (StatusCode, String, Value) {
    let router = HttpServer::with_state(ServerConfig::default(), state()).router();
    let response = router
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    (status, content_type, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_router_decodes_bracket_parameters() {
    let (status, content_type, body) = get(
        "/data_server_side_1?draw=2\
         &columns%5B0%5D%5Bdata%5D=0&columns%5B1%5D%5Bdata%5D=1\
         &order%5B0%5D%5Bcolumn%5D=0&search%5Bvalue%5D=TIGER&length=3",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type, "application/json");
    assert_eq!(body["draw"], "2");
    assert_eq!(body["recordsTotal"], 1);
    assert_eq!(body["recordsFiltered"], 1);
    assert_eq!(body["data"][0][0], "Tiger Nixon");
}

#[tokio::test]
async fn test_router_keyed_regex_column_search() {
    let (status, content_type, body) = get(
        "/data_server_side_2?columns%5B0%5D%5Bdata%5D=name\
         &columns%5B1%5D%5Bdata%5D=office\
         &columns%5B1%5D%5Bsearch%5D%5Bvalue%5D=%5ETokyo%24\
         &columns%5B1%5D%5Bsearch%5D%5Bregex%5D=true\
         &order%5B0%5D%5Bcolumn%5D=0&order%5B0%5D%5Bdir%5D=asc",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type, "application/json");
    assert_eq!(body["recordsFiltered"], 3);

    let names: Vec<_> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|row| row["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Airi Satou", "Garrett Winters", "Rhona Davidson"]);
}

#[tokio::test]
async fn test_router_drop_down_values() {
    let (status, content_type, body) = get("/data_filter_drop_down_2?columns=office").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type, "application/json");
    assert_eq!(
        body,
        json!({"office": ["Edinburgh", "London", "New York", "San Francisco", "Tokyo"]})
    );

    let (status, _, body) = get("/data_filter_drop_down_1?columns=2,99,x").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_object().unwrap().len(), 1);
    assert!(body["2"].as_array().unwrap().contains(&json!("Edinburgh")));
}

#[tokio::test]
async fn test_router_malformed_query_is_json_error() {
    let (status, content_type, body) =
        get("/data_server_side_2?columns%5B0%5D%5Bdata%5D=name&order%5B0%5D%5Bcolumn%5D=x").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(content_type, "application/json");
    assert_eq!(body["kind"], "malformed_query");
    assert_eq!(body["code"], 400);
    assert!(body["error"].as_str().unwrap().contains("order[0][column]"));
}

#[tokio::test]
async fn test_router_invalid_pattern_is_json_error() {
    let (status, _, body) = get(
        "/data_server_side_1?columns%5B0%5D%5Bdata%5D=0\
         &columns%5B0%5D%5Bsearch%5D%5Bvalue%5D=%28\
         &columns%5B0%5D%5Bsearch%5D%5Bregex%5D=true\
         &order%5B0%5D%5Bcolumn%5D=0",
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "invalid_pattern");
}

#[tokio::test]
async fn test_router_full_dataset_and_health() {
    let (status, content_type, body) = get("/data").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type, "application/json");
    assert_eq!(body["data"].as_array().unwrap().len(), 13);

    let (status, _, body) = get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}
