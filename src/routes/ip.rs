use axum::routing::get;
use axum::{Json, Router};

use crate::client_ip::{ClientIp, Resolution};
use crate::state::AppState;

/// `GET /api/v1/ip`: echo how the caller's address was resolved.
async fn whoami(ClientIp(resolution): ClientIp) -> Json<Resolution> {
    Json(resolution)
}

pub fn router() -> Router<AppState> {
    Router::new().route("/ip", get(whoami))
}
