use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;

use jobboard_core::CompanyId;
use jobboard_listings::{Company, CompanyDetails};

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::UserContext;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_companies).post(create_company))
        .route("/:id", get(get_company))
        .route("/:id/soft-delete", post(soft_delete_company))
}

pub async fn list_companies(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.store.list_companies() {
        Ok(companies) => (StatusCode::OK, Json(companies)).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn get_company(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: CompanyId = match errors::parse_id(&id, "company id") {
        Ok(v) => v,
        Err(res) => return res,
    };

    match services.store.get_company(&id) {
        Ok(Some(company)) => (StatusCode::OK, Json(company)).into_response(),
        Ok(None) => errors::json_error(StatusCode::NOT_FOUND, "not_found", "company not found"),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn create_company(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<CompanyDetails>, JsonRejection>,
) -> axum::response::Response {
    let Json(details) = match body {
        Ok(b) => b,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };

    let company = match Company::create(CompanyId::new(), details, Utc::now()) {
        Ok(c) => c,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.store.create_company(company) {
        Ok(company) => (StatusCode::CREATED, Json(company)).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

/// Move a company out of the active directory. Attributed to the acting user
/// when one is given, but the trash entry is global.
pub async fn soft_delete_company(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<UserContext>,
    Path(id): Path<String>,
    body: Option<Json<dto::SoftDeleteRequest>>,
) -> axum::response::Response {
    let id: CompanyId = match errors::parse_id(&id, "company id") {
        Ok(v) => v,
        Err(res) => return res,
    };
    let deleted_by = ctx.resolve(body.as_ref().and_then(|Json(b)| b.user_id.as_deref()));

    let now = Utc::now();
    match services.engine.soft_delete_company(&id, deleted_by, now) {
        Ok(outcome) => {
            let already_deleted = outcome.is_already_deleted();
            let res = dto::SoftDeleteCompanyResponse {
                success: true,
                message: if already_deleted {
                    "Company already deleted"
                } else {
                    "Company moved to deleted companies"
                },
                deleted_company: outcome.record().view(now),
                already_deleted,
            };
            (StatusCode::OK, Json(res)).into_response()
        }
        Err(e) => errors::lifecycle_error_to_response(e),
    }
}
