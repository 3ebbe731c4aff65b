//! Response bodies of the lifecycle endpoints, as the client reads them.

use serde::Deserialize;

use jobboard_core::ApplicationId;
use jobboard_listings::Job;
use jobboard_trash::DeletedPostView;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoftDeleteResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    pub deleted_post: DeletedPostView,
    #[serde(default)]
    pub already_deleted: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestoreResponse {
    pub success: bool,
    pub job: Job,
    #[serde(default)]
    pub removed_applications: Vec<ApplicationId>,
    #[serde(default)]
    pub recreated: bool,
}

/// `{ "error": code, "message": text }`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}
