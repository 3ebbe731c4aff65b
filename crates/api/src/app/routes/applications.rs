use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
    Json, Router,
};
use chrono::Utc;

use jobboard_core::{ApplicationId, UserId};
use jobboard_listings::{Application, NewApplication};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_application))
        .route("/:id", delete(delete_application))
        .route("/user/:user_id", get(user_applications))
}

/// One application per (user, job); a second one is a 409.
pub async fn create_application(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<NewApplication>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };

    let application = match Application::create(ApplicationId::new(), body, Utc::now()) {
        Ok(a) => a,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.store.create_application(application) {
        Ok(created) => {
            tracing::info!("user {} applied to job {}", created.user_id, created.job_id);
            (StatusCode::CREATED, Json(created)).into_response()
        }
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn delete_application(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: ApplicationId = match errors::parse_id(&id, "application id") {
        Ok(v) => v,
        Err(res) => return res,
    };

    match services.store.delete_application(&id) {
        Ok(_) => (
            StatusCode::OK,
            Json(dto::MessageResponse {
                message: "Application deleted successfully",
            }),
        )
            .into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

/// The user's applications joined with job and company.
pub async fn user_applications(
    Extension(services): Extension<Arc<AppServices>>,
    Path(user_id): Path<String>,
) -> axum::response::Response {
    let user_id: UserId = match errors::parse_id(&user_id, "user id") {
        Ok(v) => v,
        Err(res) => return res,
    };

    match services.store.user_applications(&user_id) {
        Ok(views) => (StatusCode::OK, Json(views)).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}
