use serde::{Deserialize, Serialize};

use jobboard_core::ApplicationId;
use jobboard_listings::{Company, ExperienceLevel, Job, JobFilter};
use jobboard_trash::{DeletedCompanyView, DeletedPostView};

use crate::app::errors;

// -------------------------
// Request DTOs
// -------------------------

/// Body of the soft-delete calls; the user may also come from the `user-id` header.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoftDeleteRequest {
    #[serde(default)]
    pub user_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobsQuery {
    pub experience_level: Option<String>,
    pub location: Option<String>,
    pub search: Option<String>,
}

impl JobsQuery {
    pub fn into_filter(self) -> Result<JobFilter, axum::response::Response> {
        let experience_level = match self.experience_level.as_deref().map(str::trim) {
            None | Some("") | Some("all") => None,
            Some(raw) => Some(
                raw.parse::<ExperienceLevel>()
                    .map_err(errors::domain_error_to_response)?,
            ),
        };
        Ok(JobFilter {
            experience_level,
            location: self.location,
            search: self.search,
        })
    }
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SoftDeleteJobResponse {
    pub success: bool,
    pub message: &'static str,
    pub deleted_post: DeletedPostView,
    pub already_deleted: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RestorePostResponse {
    pub success: bool,
    pub message: &'static str,
    pub job: Job,
    pub removed_applications: Vec<ApplicationId>,
    pub recreated: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SoftDeleteCompanyResponse {
    pub success: bool,
    pub message: &'static str,
    pub deleted_company: DeletedCompanyView,
    pub already_deleted: bool,
}

#[derive(Debug, Serialize)]
pub struct CompanyResponse<C> {
    pub message: &'static str,
    pub company: C,
}

pub type RestoreCompanyResponse = CompanyResponse<Company>;
pub type UpdateDeletedCompanyResponse = CompanyResponse<DeletedCompanyView>;

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}
