use axum::{http::HeaderMap, middleware::Next, response::Response};

use jobboard_core::UserId;

use crate::context::{UserContext, USER_ID_HEADER};

/// Attach a `UserContext` to every request. A missing or unreadable header
/// yields an anonymous context rather than a rejection.
pub async fn user_context_middleware(
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let ctx = UserContext::new(extract_user_id(req.headers()));
    req.extensions_mut().insert(ctx);
    next.run(req).await
}

fn extract_user_id(headers: &HeaderMap) -> Option<UserId> {
    headers
        .get(USER_ID_HEADER)?
        .to_str()
        .ok()?
        .parse()
        .ok()
}
