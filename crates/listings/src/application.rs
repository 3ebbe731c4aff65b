use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use jobboard_core::{ApplicationId, DomainResult, Entity, JobId, UserId};

use crate::{company::Company, job::Job};

/// A user's claim on a job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: ApplicationId,
    pub user_id: UserId,
    pub job_id: JobId,
    pub created_at: DateTime<Utc>,
}

/// Application creation body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewApplication {
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub job_id: String,
}

impl Application {
    pub fn create(id: ApplicationId, new: NewApplication, now: DateTime<Utc>) -> DomainResult<Self> {
        Ok(Self {
            id,
            user_id: new.user_id.parse()?,
            job_id: new.job_id.parse()?,
            created_at: now,
        })
    }
}

impl Entity for Application {
    type Id = ApplicationId;

    fn id(&self) -> &ApplicationId {
        &self.id
    }
}

/// Application joined with its job and company (the "my applications" view).
///
/// `job` is `None` when the posting no longer exists in the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationView {
    #[serde(flatten)]
    pub application: Application,
    pub job: Option<Job>,
    pub company: Option<Company>,
}
