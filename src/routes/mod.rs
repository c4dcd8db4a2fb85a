mod health;
mod ip;
mod magic;
mod time;

use axum::Router;

use crate::state::AppState;

/// Build the complete application router.
///
/// Structure:
/// - `GET /health` — lightweight liveness check
/// - `GET /magic/hello` — demo badge
/// - `GET /magic/{id}` — counted badge, recorded per client address
/// - `GET /time/now` — server clock
/// - `GET /api/v1/health` — detailed health check with database connectivity
/// - `GET /api/v1/ip` — client address resolution for the caller
pub fn router() -> Router<AppState> {
    let api_v1 = Router::new()
        .merge(health::api_router())
        .merge(ip::router());

    Router::new()
        .merge(health::root_router())
        .nest("/magic", magic::router())
        .nest("/time", time::router())
        .nest("/api/v1", api_v1)
}
