use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
    Json, Router,
};
use chrono::Utc;

use jobboard_core::{DeletedPostId, UserId};
use jobboard_infra::lifecycle::LifecycleResult;
use jobboard_trash::DeletedPostView;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/user/:user_id", get(user_deleted_posts))
        .route("/:id/restore", post(restore_post))
        .route("/:id/permanent", delete(permanently_delete_post))
}

/// The user's trash. Always answers 200: a failed read is served as `[]`.
pub async fn user_deleted_posts(
    Extension(services): Extension<Arc<AppServices>>,
    Path(user_id): Path<String>,
) -> axum::response::Response {
    let posts = match user_id.parse::<UserId>() {
        Ok(user_id) => deleted_posts_or_empty(services.engine.list_for_user(&user_id, Utc::now())),
        Err(_) => Vec::new(),
    };
    (StatusCode::OK, Json(posts)).into_response()
}

fn deleted_posts_or_empty(result: LifecycleResult<Vec<DeletedPostView>>) -> Vec<DeletedPostView> {
    result.unwrap_or_else(|e| {
        tracing::warn!("serving empty trash after read failure: {e}");
        Vec::new()
    })
}

pub async fn restore_post(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: DeletedPostId = match errors::parse_id(&id, "deleted post id") {
        Ok(v) => v,
        Err(res) => return res,
    };

    match services.engine.restore_post(&id, Utc::now()) {
        Ok(restored) => (
            StatusCode::OK,
            Json(dto::RestorePostResponse {
                success: true,
                message: "Job restored successfully",
                job: restored.job,
                removed_applications: restored.removed_applications,
                recreated: restored.recreated,
            }),
        )
            .into_response(),
        Err(e) => errors::lifecycle_error_to_response(e),
    }
}

pub async fn permanently_delete_post(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: DeletedPostId = match errors::parse_id(&id, "deleted post id") {
        Ok(v) => v,
        Err(res) => return res,
    };

    match services.engine.permanently_delete_post(&id) {
        Ok(_) => (
            StatusCode::OK,
            Json(dto::MessageResponse {
                message: "Post permanently deleted",
            }),
        )
            .into_response(),
        Err(e) => errors::lifecycle_error_to_response(e),
    }
}
