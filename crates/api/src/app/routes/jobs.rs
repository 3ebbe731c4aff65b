use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;

use jobboard_core::JobId;
use jobboard_listings::{Job, JobListing, NewJob};

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::UserContext;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_jobs).post(create_job))
        .route("/:id", get(get_job))
        .route("/:id/soft-delete", post(soft_delete_job))
}

/// Active jobs, minus the ones in the caller's trash.
pub async fn list_jobs(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<UserContext>,
    Query(query): Query<dto::JobsQuery>,
) -> axum::response::Response {
    let filter = match query.into_filter() {
        Ok(f) => f,
        Err(res) => return res,
    };

    match services.engine.active_jobs(ctx.user_id(), &filter) {
        Ok(jobs) => {
            tracing::debug!(
                "found {} jobs for user {}",
                jobs.len(),
                ctx.user_id().map(|u| u.as_str()).unwrap_or("anonymous")
            );
            (StatusCode::OK, Json(jobs)).into_response()
        }
        Err(e) => errors::lifecycle_error_to_response(e),
    }
}

pub async fn get_job(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: JobId = match errors::parse_id(&id, "job id") {
        Ok(v) => v,
        Err(res) => return res,
    };

    let job = match services.store.get_job(&id) {
        Ok(Some(job)) => job,
        Ok(None) => return errors::json_error(StatusCode::NOT_FOUND, "not_found", "job not found"),
        Err(e) => return errors::store_error_to_response(e),
    };

    let company = match services.store.get_company(&job.company_id) {
        Ok(c) => c,
        Err(e) => return errors::store_error_to_response(e),
    };

    (StatusCode::OK, Json(JobListing { job, company })).into_response()
}

pub async fn create_job(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<NewJob>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };

    let job = match Job::create(JobId::new(), body, Utc::now()) {
        Ok(j) => j,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.store.create_job(job) {
        Ok(job) => (StatusCode::CREATED, Json(job)).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

/// Move a job into the acting user's trash.
///
/// The user comes from the body's `userId`, falling back to the `user-id` header.
pub async fn soft_delete_job(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<UserContext>,
    Path(job_id): Path<String>,
    body: Option<Json<dto::SoftDeleteRequest>>,
) -> axum::response::Response {
    let job_id: JobId = match errors::parse_id(&job_id, "job id") {
        Ok(v) => v,
        Err(res) => return res,
    };

    let from_body = body.as_ref().and_then(|Json(b)| b.user_id.as_deref());
    let Some(user_id) = ctx.resolve(from_body) else {
        return errors::json_error(StatusCode::BAD_REQUEST, "validation_error", "user id is required");
    };

    let now = Utc::now();
    match services.engine.soft_delete_job(&job_id, &user_id, now) {
        Ok(outcome) => {
            let already_deleted = outcome.is_already_deleted();
            let message = if already_deleted {
                "Job already deleted"
            } else {
                "Job moved to trash successfully"
            };
            let res = dto::SoftDeleteJobResponse {
                success: true,
                message,
                deleted_post: outcome.record().view(now),
                already_deleted,
            };
            (StatusCode::OK, Json(res)).into_response()
        }
        Err(e) => errors::lifecycle_error_to_response(e),
    }
}
