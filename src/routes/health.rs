use std::time::Instant;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
struct RootHealthResponse {
    status: &'static str,
    version: &'static str,
}

#[derive(Serialize)]
struct DatabaseHealth {
    connected: bool,
    latency_ms: u128,
}

#[derive(Serialize)]
struct ApiHealthResponse {
    status: &'static str,
    version: &'static str,
    visits: u64,
    database: DatabaseHealth,
}

/// `GET /health`: liveness only, no dependencies touched.
async fn root_health() -> Json<RootHealthResponse> {
    Json(RootHealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// `GET /api/v1/health`: pings the database and reports the hit counter.
async fn api_health(State(state): State<AppState>) -> Json<ApiHealthResponse> {
    let started = Instant::now();
    let connected = state.db.ping().await.is_ok();
    let latency_ms = started.elapsed().as_millis();

    Json(ApiHealthResponse {
        status: if connected { "healthy" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        visits: state.visits.current(),
        database: DatabaseHealth {
            connected,
            latency_ms,
        },
    })
}

pub fn root_router() -> Router<AppState> {
    Router::new().route("/health", get(root_health))
}

pub fn api_router() -> Router<AppState> {
    Router::new().route("/health", get(api_health))
}
