use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use jobboard_core::{CompanyId, DomainError, DomainResult, Entity, JobId};

use crate::company::Company;

/// Experience bracket a posting targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceLevel {
    Fresher,
    Experienced,
}

impl ExperienceLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExperienceLevel::Fresher => "fresher",
            ExperienceLevel::Experienced => "experienced",
        }
    }
}

impl core::str::FromStr for ExperienceLevel {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fresher" => Ok(Self::Fresher),
            "experienced" => Ok(Self::Experienced),
            other => Err(DomainError::validation(format!(
                "experienceLevel must be fresher or experienced (got {other:?})"
            ))),
        }
    }
}

/// A job posting. Shared by every user; hidden per user through the trash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: JobId,
    pub title: String,
    pub description: String,
    pub location: String,
    pub salary: String,
    pub skills: String,
    pub requirements: String,
    pub closing_date: DateTime<Utc>,
    pub experience_level: ExperienceLevel,
    pub experience_min: u32,
    pub experience_max: u32,
    pub is_active: bool,
    pub company_id: CompanyId,
    pub created_at: DateTime<Utc>,
}

/// Job creation body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewJob {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub salary: String,
    #[serde(default)]
    pub skills: String,
    #[serde(default)]
    pub requirements: String,
    pub closing_date: DateTime<Utc>,
    pub experience_level: ExperienceLevel,
    #[serde(default)]
    pub experience_min: u32,
    #[serde(default = "default_experience_max")]
    pub experience_max: u32,
    #[serde(default = "default_active")]
    pub is_active: bool,
    pub company_id: CompanyId,
}

fn default_experience_max() -> u32 {
    1
}

fn default_active() -> bool {
    true
}

impl Job {
    pub fn create(id: JobId, new: NewJob, now: DateTime<Utc>) -> DomainResult<Self> {
        if new.title.trim().is_empty() {
            return Err(DomainError::validation("job title is required"));
        }
        if new.experience_min > new.experience_max {
            return Err(DomainError::validation(format!(
                "experienceMin ({}) exceeds experienceMax ({})",
                new.experience_min, new.experience_max
            )));
        }

        Ok(Self {
            id,
            title: new.title.trim().to_string(),
            description: new.description,
            location: new.location,
            salary: new.salary,
            skills: new.skills,
            requirements: new.requirements,
            closing_date: new.closing_date,
            experience_level: new.experience_level,
            experience_min: new.experience_min,
            experience_max: new.experience_max,
            is_active: new.is_active,
            company_id: new.company_id,
            created_at: now,
        })
    }

    /// A posting past its closing date is still listed, just as expired.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.closing_date < now
    }
}

impl Entity for Job {
    type Id = JobId;

    fn id(&self) -> &JobId {
        &self.id
    }
}

/// Job joined with its company for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobListing {
    #[serde(flatten)]
    pub job: Job,
    pub company: Option<Company>,
}

/// Query filters for the active job listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobFilter {
    pub experience_level: Option<ExperienceLevel>,
    pub location: Option<String>,
    pub search: Option<String>,
}

impl JobFilter {
    /// Case-insensitive match; `search` looks at title, company name and skills.
    pub fn matches(&self, job: &Job, company_name: Option<&str>) -> bool {
        if let Some(level) = self.experience_level {
            if job.experience_level != level {
                return false;
            }
        }

        if let Some(location) = non_blank(&self.location) {
            if !job.location.to_lowercase().contains(&location) {
                return false;
            }
        }

        if let Some(term) = non_blank(&self.search) {
            let in_company = company_name.is_some_and(|n| n.to_lowercase().contains(&term));
            if !(job.title.to_lowercase().contains(&term)
                || job.skills.to_lowercase().contains(&term)
                || in_company)
            {
                return false;
            }
        }

        true
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_lowercase)
}
