//! Per-user trash record for a job posting.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use jobboard_core::{CompanyId, DeletedPostId, Entity, JobId, UserId};
use jobboard_listings::{Company, ExperienceLevel, Job};

use crate::retention::{RetentionPolicy, TrashRecord};
use crate::{UNKNOWN_COMPANY, UNKNOWN_JOB_TITLE, UNKNOWN_LOCATION};

/// Job fields captured at delete time.
///
/// Every field is optional: records written by older clients may be partial,
/// and reading them must never fail.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobSnapshot {
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub salary: Option<String>,
    pub skills: Option<String>,
    pub requirements: Option<String>,
    pub closing_date: Option<DateTime<Utc>>,
    pub experience_level: Option<ExperienceLevel>,
    pub experience_min: Option<u32>,
    pub experience_max: Option<u32>,
    pub is_active: Option<bool>,
    pub company_id: Option<CompanyId>,
    pub company_name: Option<String>,
    pub company_location: Option<String>,
    pub company_logo: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl JobSnapshot {
    pub fn capture(job: &Job, company: Option<&Company>) -> Self {
        Self {
            title: Some(job.title.clone()),
            description: Some(job.description.clone()),
            location: Some(job.location.clone()),
            salary: Some(job.salary.clone()),
            skills: Some(job.skills.clone()),
            requirements: Some(job.requirements.clone()),
            closing_date: Some(job.closing_date),
            experience_level: Some(job.experience_level),
            experience_min: Some(job.experience_min),
            experience_max: Some(job.experience_max),
            is_active: Some(job.is_active),
            company_id: Some(job.company_id.clone()),
            company_name: company.map(|c| c.name.clone()),
            company_location: company.map(|c| c.location.clone()),
            company_logo: company.and_then(|c| c.logo.clone()),
            created_at: Some(job.created_at),
        }
    }

    /// Rebuild a live job, filling gaps with display defaults.
    ///
    /// `fallback_closing` is used when the closing date was not captured.
    pub fn to_job(&self, id: JobId, fallback_closing: DateTime<Utc>, now: DateTime<Utc>) -> Job {
        let experience_min = self.experience_min.unwrap_or(0);
        Job {
            id,
            title: text_or(&self.title, UNKNOWN_JOB_TITLE),
            description: text_or(&self.description, "No description available"),
            location: self.location_or_default(),
            salary: text_or(&self.salary, "Not specified"),
            skills: self.skills.clone().unwrap_or_default(),
            requirements: self.requirements.clone().unwrap_or_default(),
            closing_date: self.closing_date.unwrap_or(fallback_closing),
            experience_level: self.experience_level.unwrap_or(ExperienceLevel::Fresher),
            experience_min,
            experience_max: self.experience_max.unwrap_or(1).max(experience_min),
            is_active: self.is_active.unwrap_or(true),
            // A dangling id joins to no company and renders as "Unknown Company".
            company_id: self.company_id.clone().unwrap_or_else(CompanyId::new),
            created_at: self.created_at.unwrap_or(now),
        }
    }

    fn location_or_default(&self) -> String {
        text_or(&self.location, UNKNOWN_LOCATION)
    }
}

fn text_or(value: &Option<String>, default: &str) -> String {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => default.to_string(),
    }
}

/// A job moved to one user's trash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedPost {
    pub id: DeletedPostId,
    pub user_id: UserId,
    pub original_id: JobId,
    pub snapshot: JobSnapshot,
    pub deleted_at: DateTime<Utc>,
    pub scheduled_deletion: DateTime<Utc>,
}

impl DeletedPost {
    pub fn new(
        id: DeletedPostId,
        user_id: UserId,
        job: &Job,
        company: Option<&Company>,
        policy: RetentionPolicy,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id,
            original_id: job.id.clone(),
            snapshot: JobSnapshot::capture(job, company),
            deleted_at: now,
            scheduled_deletion: policy.scheduled_deletion(now),
        }
    }

    /// Job as it should come back on restore when the live record is gone.
    pub fn restored_job(&self, now: DateTime<Utc>) -> Job {
        self.snapshot
            .to_job(self.original_id.clone(), self.scheduled_deletion, now)
    }

    /// Display shape with the job embedded and expiry resolved at `now`.
    pub fn view(&self, now: DateTime<Utc>) -> DeletedPostView {
        let s = &self.snapshot;
        DeletedPostView {
            id: self.id.clone(),
            user_id: self.user_id.clone(),
            original_id: self.original_id.clone(),
            deleted_at: self.deleted_at,
            scheduled_deletion: self.scheduled_deletion,
            days_left: self.days_left(now),
            expired: self.is_expired(now),
            job: DeletedJobView {
                id: self.original_id.clone(),
                title: text_or(&s.title, UNKNOWN_JOB_TITLE),
                description: text_or(&s.description, "No description available"),
                location: s.location_or_default(),
                salary: text_or(&s.salary, "Not specified"),
                skills: s.skills.clone().unwrap_or_default(),
                closing_date: s.closing_date.unwrap_or(self.scheduled_deletion),
                experience_level: s.experience_level,
                company: CompanyBadge {
                    name: text_or(&s.company_name, UNKNOWN_COMPANY),
                    location: match s.company_location.as_deref().map(str::trim) {
                        Some(l) if !l.is_empty() => l.to_string(),
                        _ => s.location_or_default(),
                    },
                    logo: s.company_logo.clone(),
                },
            },
        }
    }
}

impl Entity for DeletedPost {
    type Id = DeletedPostId;

    fn id(&self) -> &DeletedPostId {
        &self.id
    }
}

impl TrashRecord for DeletedPost {
    fn deleted_at(&self) -> DateTime<Utc> {
        self.deleted_at
    }

    fn scheduled_deletion(&self) -> DateTime<Utc> {
        self.scheduled_deletion
    }
}

/// `GET /api/deleted-posts/user/:userId` item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedPostView {
    pub id: DeletedPostId,
    pub user_id: UserId,
    pub original_id: JobId,
    pub deleted_at: DateTime<Utc>,
    pub scheduled_deletion: DateTime<Utc>,
    pub days_left: u32,
    pub expired: bool,
    pub job: DeletedJobView,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedJobView {
    pub id: JobId,
    pub title: String,
    pub description: String,
    pub location: String,
    pub salary: String,
    pub skills: String,
    pub closing_date: DateTime<Utc>,
    pub experience_level: Option<ExperienceLevel>,
    pub company: CompanyBadge,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyBadge {
    pub name: String,
    pub location: String,
    pub logo: Option<String>,
}
