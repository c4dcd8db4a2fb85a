#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use chrono::{Offset, Utc};
use http_body_util::BodyExt;
use tower::ServiceExt;

use crt_status::config::{Config, Environment};
use crt_status::state::AppState;

/// Application state backed by an in-memory `SQLite` database with migrations applied.
pub async fn test_state() -> AppState {
    let db = crt_status::db::connect("sqlite::memory:")
        .await
        .unwrap_or_default();

    AppState::new(
        db,
        Config {
            database_url: String::new(),
            server_host: std::net::IpAddr::from([127, 0, 0, 1]),
            server_port: 0,
            environment: Environment::Development,
            log_level: "warn".to_string(),
            frontend_url: "http://localhost:3001".to_string(),
            display_offset: Utc.fix(),
        },
    )
}

/// Build the app router over `state`.
pub fn test_app(state: AppState) -> Router {
    crt_status::routes::router().with_state(state)
}

/// Test helper: send a GET request and return (status, headers, raw body).
pub async fn get_raw(
    app: &Router,
    uri: &str,
    headers: &[(&str, &str)],
) -> (StatusCode, HeaderMap, Vec<u8>) {
    let mut builder = Request::builder().method("GET").uri(uri);
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    let request = builder.body(Body::empty()).unwrap_or_default();

    let response = app.clone().oneshot(request).await.unwrap_or_default();

    let status = response.status();
    let response_headers = response.headers().clone();
    let body = response
        .into_body()
        .collect()
        .await
        .map(http_body_util::Collected::to_bytes)
        .unwrap_or_default();

    (status, response_headers, body.to_vec())
}

/// Test helper: send a GET request to the app and return (status, body).
pub async fn get(app: &Router, uri: &str) -> (StatusCode, String) {
    get_with_headers(app, uri, &[]).await
}

/// Test helper: GET with extra request headers, returning (status, body).
pub async fn get_with_headers(
    app: &Router,
    uri: &str,
    headers: &[(&str, &str)],
) -> (StatusCode, String) {
    let (status, _, body) = get_raw(app, uri, headers).await;
    (status, String::from_utf8(body).unwrap_or_default())
}
