use axum::Router;

pub mod applications;
pub mod companies;
pub mod deleted_companies;
pub mod deleted_posts;
pub mod jobs;
pub mod system;

/// Router for every `/api` endpoint.
pub fn router() -> Router {
    Router::new()
        .nest("/jobs", jobs::router())
        .nest("/applications", applications::router())
        .nest("/companies", companies::router())
        .nest("/deleted-posts", deleted_posts::router())
        .nest("/deleted-companies", deleted_companies::router())
}
