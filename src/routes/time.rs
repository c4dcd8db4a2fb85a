use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
struct NowResponse {
    now: String,
}

/// `GET /time/now`
async fn now(State(state): State<AppState>) -> Json<NowResponse> {
    Json(NowResponse {
        now: state
            .config
            .display_now()
            .format("%Y-%m-%d %H:%M:%S")
            .to_string(),
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/now", get(now))
}
