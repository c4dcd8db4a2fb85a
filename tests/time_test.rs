mod common;

use axum::http::StatusCode;
use chrono::NaiveDateTime;

#[tokio::test]
async fn time_now_returns_formatted_clock() {
    let app = common::test_app(common::test_state().await);
    let (status, body) = common::get(&app, "/time/now").await;

    assert_eq!(status, StatusCode::OK);

    let json: serde_json::Value = serde_json::from_str(&body).unwrap_or(serde_json::Value::Null);
    let now = json["now"].as_str().unwrap_or_default();

    assert_eq!(now.len(), "2026-10-18 21:04:08".len());
    assert!(NaiveDateTime::parse_from_str(now, "%Y-%m-%d %H:%M:%S").is_ok());
}
