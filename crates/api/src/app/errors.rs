use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use jobboard_core::DomainError;
use jobboard_infra::lifecycle::LifecycleError;
use jobboard_infra::store::StoreError;

pub fn lifecycle_error_to_response(err: LifecycleError) -> axum::response::Response {
    match err {
        LifecycleError::NotFound(what) => {
            json_error(StatusCode::NOT_FOUND, "not_found", format!("{what} not found"))
        }
        LifecycleError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, "validation_error", msg),
        LifecycleError::Conflict(msg) => json_error(StatusCode::CONFLICT, "conflict", msg),
        LifecycleError::StoreUnavailable(msg) => {
            tracing::error!("store unavailable: {msg}");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "store_unavailable", msg)
        }
    }
}

pub fn store_error_to_response(err: StoreError) -> axum::response::Response {
    lifecycle_error_to_response(err.into())
}

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    lifecycle_error_to_response(err.into())
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

pub fn json_rejection_to_response(rejection: JsonRejection) -> axum::response::Response {
    json_error(StatusCode::BAD_REQUEST, "invalid_body", rejection.body_text())
}

/// Parse a path/body id, answering 400 on a blank one.
pub fn parse_id<T>(raw: &str, what: &'static str) -> Result<T, axum::response::Response>
where
    T: core::str::FromStr<Err = DomainError>,
{
    raw.parse()
        .map_err(|_| json_error(StatusCode::BAD_REQUEST, "invalid_id", format!("{what} is required")))
}
