use std::sync::OnceLock;
use std::time::Instant;

use axum::{http::StatusCode, response::IntoResponse, Json};
use chrono::Utc;

/// Process start as seen by the router; set when the app is built.
pub fn started_at() -> Instant {
    static STARTED: OnceLock<Instant> = OnceLock::new();
    *STARTED.get_or_init(Instant::now)
}

pub async fn health() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "status": "ok",
            "timestamp": Utc::now(),
            "version": env!("CARGO_PKG_VERSION"),
            "uptimeSecs": started_at().elapsed().as_secs(),
        })),
    )
}
