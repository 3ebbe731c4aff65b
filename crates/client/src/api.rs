//! HTTP access to the job board API.

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use jobboard_core::{DeletedPostId, JobId, UserId};
use jobboard_listings::JobListing;
use jobboard_trash::DeletedPostView;

use crate::types::{ErrorBody, RestoreResponse, SoftDeleteResponse};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("API error ({status}): {message}")]
    Status { status: u16, message: String },
    #[error("parse error: {0}")]
    Parse(String),
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status: 404, .. })
    }
}

/// The calls the reconciliation layer makes against the server.
#[async_trait]
pub trait BoardApi: Send + Sync {
    /// Active jobs as seen by `user` (server already hides that user's trash).
    async fn list_jobs(&self, user: &UserId) -> Result<Vec<JobListing>, ApiError>;

    async fn soft_delete_job(&self, job: &JobId, user: &UserId) -> Result<SoftDeleteResponse, ApiError>;

    async fn list_deleted_posts(&self, user: &UserId) -> Result<Vec<DeletedPostView>, ApiError>;

    async fn restore_post(&self, id: &DeletedPostId) -> Result<RestoreResponse, ApiError>;

    async fn permanently_delete_post(&self, id: &DeletedPostId) -> Result<(), ApiError>;

    async fn check_health(&self) -> bool;
}

/// `reqwest`-backed implementation.
#[derive(Debug, Clone)]
pub struct HttpBoardApi {
    base_url: String,
    http: reqwest::Client,
}

impl HttpBoardApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    pub fn with_client(base_url: impl Into<String>, http: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(&self, req: reqwest::RequestBuilder) -> Result<reqwest::Response, ApiError> {
        let resp = req.send().await.map_err(|e| ApiError::Network(e.to_string()))?;
        if resp.status().is_success() {
            return Ok(resp);
        }

        let status = resp.status().as_u16();
        let text = resp.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&text)
            .ok()
            .and_then(|b| b.message.or(b.error))
            .unwrap_or(text);
        Err(ApiError::Status { status, message })
    }

    async fn json<T: DeserializeOwned>(&self, req: reqwest::RequestBuilder) -> Result<T, ApiError> {
        self.send(req)
            .await?
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }
}

#[async_trait]
impl BoardApi for HttpBoardApi {
    async fn list_jobs(&self, user: &UserId) -> Result<Vec<JobListing>, ApiError> {
        let req = self.http.get(self.url("/api/jobs")).header("user-id", user.as_str());
        self.json(req).await
    }

    async fn soft_delete_job(&self, job: &JobId, user: &UserId) -> Result<SoftDeleteResponse, ApiError> {
        let req = self
            .http
            .post(self.url(&format!("/api/jobs/{job}/soft-delete")))
            .header("user-id", user.as_str())
            .json(&serde_json::json!({ "userId": user }));
        self.json(req).await
    }

    async fn list_deleted_posts(&self, user: &UserId) -> Result<Vec<DeletedPostView>, ApiError> {
        let req = self.http.get(self.url(&format!("/api/deleted-posts/user/{user}")));
        self.json(req).await
    }

    async fn restore_post(&self, id: &DeletedPostId) -> Result<RestoreResponse, ApiError> {
        let req = self.http.post(self.url(&format!("/api/deleted-posts/{id}/restore")));
        self.json(req).await
    }

    async fn permanently_delete_post(&self, id: &DeletedPostId) -> Result<(), ApiError> {
        let req = self.http.delete(self.url(&format!("/api/deleted-posts/{id}/permanent")));
        self.send(req).await.map(|_| ())
    }

    async fn check_health(&self) -> bool {
        match self.http.get(self.url("/health")).send().await {
            Ok(resp) => resp.status().is_success(),
            Err(_) => false,
        }
    }
}
