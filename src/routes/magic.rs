use axum::Router;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, HeaderValue, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;

use crate::client_ip::ClientIp;
use crate::error::AppError;
use crate::screen::{self, BadgeStyle, Screen};
use crate::services::VisitorService;
use crate::state::AppState;
use crate::utils::is_valid_page_id;

/// Visit count printed on the static demo badge.
const HELLO_VISITS: u64 = 1000;

/// Build the badge route group: `/magic/...`
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/hello", get(hello))
        .route("/{id}", get(visit))
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Caching {
    Default,
    Disabled,
}

/// `GET /magic/hello`: demo badge with a fixed counter. Nothing is recorded.
async fn hello(State(state): State<AppState>) -> Result<Response, AppError> {
    let png = screen::render_png(&Screen {
        visits: HELLO_VISITS,
        now: state.config.display_now(),
        badge: BadgeStyle::Classic,
        seed: rand::random(),
    })?;

    Ok(png_response(png, Caching::Default))
}

/// `GET /magic/{id}`: count the hit, record it against the caller's address
/// in the background and return a fresh, uncacheable badge.
async fn visit(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ClientIp(resolution): ClientIp,
) -> Result<Response, AppError> {
    if !is_valid_page_id(&id) {
        return Err(AppError::BadRequest(
            "Page id must be 1-64 characters of letters, digits, '_', '.' or '-'".to_string(),
        ));
    }

    let visits = state.visits.bump();
    tracing::info!(
        page_id = %id,
        ip = %resolution.ip,
        confidence = resolution.confidence,
        visits,
        "badge hit"
    );

    VisitorService::spawn_record(state.db.clone(), resolution, id);

    let png = screen::render_png(&Screen {
        visits,
        now: state.config.display_now(),
        badge: BadgeStyle::Alert,
        seed: rand::random(),
    })?;

    Ok(png_response(png, Caching::Disabled))
}

fn png_response(png: Vec<u8>, caching: Caching) -> Response {
    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("image/png"));
    headers.insert(header::CONTENT_LENGTH, HeaderValue::from(png.len()));

    if caching == Caching::Disabled {
        headers.insert(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store, no-cache, must-revalidate, proxy-revalidate"),
        );
        headers.insert(header::PRAGMA, HeaderValue::from_static("no-cache"));
        headers.insert(header::EXPIRES, HeaderValue::from_static("0"));
    }

    (headers, Bytes::from(png)).into_response()
}
