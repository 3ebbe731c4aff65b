use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use chrono::Utc;

use jobboard_core::DeletedCompanyId;
use jobboard_listings::CompanyDetails;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_deleted_companies))
        .route("/:id", put(update_deleted_company).delete(permanently_delete_company))
        .route("/:id/restore", post(restore_company))
}

pub async fn list_deleted_companies(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.engine.list_deleted_companies(Utc::now()) {
        Ok(records) => (StatusCode::OK, Json(records)).into_response(),
        Err(e) => errors::lifecycle_error_to_response(e),
    }
}

pub async fn restore_company(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: DeletedCompanyId = match errors::parse_id(&id, "deleted company id") {
        Ok(v) => v,
        Err(res) => return res,
    };

    match services.engine.restore_company(&id, Utc::now()) {
        Ok(company) => (
            StatusCode::OK,
            Json(dto::RestoreCompanyResponse {
                message: "Company restored successfully",
                company,
            }),
        )
            .into_response(),
        Err(e) => errors::lifecycle_error_to_response(e),
    }
}

/// Edit a company while it sits in the trash.
pub async fn update_deleted_company(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    body: Result<Json<CompanyDetails>, JsonRejection>,
) -> axum::response::Response {
    let id: DeletedCompanyId = match errors::parse_id(&id, "deleted company id") {
        Ok(v) => v,
        Err(res) => return res,
    };
    let Json(details) = match body {
        Ok(b) => b,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };

    match services.engine.update_deleted_company(&id, details, Utc::now()) {
        Ok(view) => (
            StatusCode::OK,
            Json(dto::UpdateDeletedCompanyResponse {
                message: "Deleted company updated successfully",
                company: view,
            }),
        )
            .into_response(),
        Err(e) => errors::lifecycle_error_to_response(e),
    }
}

pub async fn permanently_delete_company(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: DeletedCompanyId = match errors::parse_id(&id, "deleted company id") {
        Ok(v) => v,
        Err(res) => return res,
    };

    match services.engine.permanently_delete_company(&id) {
        Ok(_) => (
            StatusCode::OK,
            Json(dto::MessageResponse {
                message: "Company permanently deleted",
            }),
        )
            .into_response(),
        Err(e) => errors::lifecycle_error_to_response(e),
    }
}
