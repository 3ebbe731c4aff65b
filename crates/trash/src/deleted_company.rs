//! Trash record for a company. Unlike job posts this is global: deleting a
//! company takes it out of the active directory for everyone.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use jobboard_core::{CompanyId, DeletedCompanyId, Entity, UserId};
use jobboard_listings::{Company, CompanyDetails};

use crate::retention::{RetentionPolicy, TrashRecord};
use crate::{UNKNOWN_COMPANY, UNKNOWN_LOCATION};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompanySnapshot {
    pub name: Option<String>,
    pub website: Option<String>,
    pub linkedin_url: Option<String>,
    pub logo: Option<String>,
    pub location: Option<String>,
    pub industry: Option<String>,
    pub size: Option<String>,
    pub founded: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl CompanySnapshot {
    pub fn capture(company: &Company) -> Self {
        Self {
            name: Some(company.name.clone()),
            website: company.website.clone(),
            linkedin_url: company.linkedin_url.clone(),
            logo: company.logo.clone(),
            location: Some(company.location.clone()),
            industry: company.industry.clone(),
            size: company.size.clone(),
            founded: company.founded.clone(),
            created_at: Some(company.created_at),
        }
    }

    /// Overwrite the snapshot with edited details (trash-side edit).
    pub fn apply(&mut self, details: CompanyDetails) {
        self.name = Some(details.name.trim().to_string());
        self.website = details.website;
        self.linkedin_url = details.linkedin_url;
        self.logo = details.logo;
        self.location = Some(details.location);
        self.industry = details.industry;
        self.size = details.size;
        self.founded = details.founded;
    }

    pub fn to_company(&self, id: CompanyId, now: DateTime<Utc>) -> Company {
        Company {
            id,
            name: non_blank_or(&self.name, UNKNOWN_COMPANY),
            website: self.website.clone(),
            linkedin_url: self.linkedin_url.clone(),
            logo: self.logo.clone(),
            location: non_blank_or(&self.location, UNKNOWN_LOCATION),
            industry: self.industry.clone(),
            size: self.size.clone(),
            founded: self.founded.clone(),
            created_at: self.created_at.unwrap_or(now),
        }
    }
}

fn non_blank_or(value: &Option<String>, default: &str) -> String {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => default.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedCompany {
    pub id: DeletedCompanyId,
    pub original_id: CompanyId,
    pub deleted_by: Option<UserId>,
    pub snapshot: CompanySnapshot,
    pub deleted_at: DateTime<Utc>,
    pub scheduled_deletion: DateTime<Utc>,
}

impl DeletedCompany {
    pub fn new(
        id: DeletedCompanyId,
        company: &Company,
        deleted_by: Option<UserId>,
        policy: RetentionPolicy,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            original_id: company.id.clone(),
            deleted_by,
            snapshot: CompanySnapshot::capture(company),
            deleted_at: now,
            scheduled_deletion: policy.scheduled_deletion(now),
        }
    }

    pub fn restored_company(&self, now: DateTime<Utc>) -> Company {
        self.snapshot.to_company(self.original_id.clone(), now)
    }

    pub fn view(&self, now: DateTime<Utc>) -> DeletedCompanyView {
        DeletedCompanyView {
            id: self.id.clone(),
            original_id: self.original_id.clone(),
            deleted_by: self.deleted_by.clone(),
            deleted_at: self.deleted_at,
            scheduled_deletion: self.scheduled_deletion,
            days_left: self.days_left(now),
            expired: self.is_expired(now),
            company: self.restored_company(now),
        }
    }
}

impl Entity for DeletedCompany {
    type Id = DeletedCompanyId;

    fn id(&self) -> &DeletedCompanyId {
        &self.id
    }
}

impl TrashRecord for DeletedCompany {
    fn deleted_at(&self) -> DateTime<Utc> {
        self.deleted_at
    }

    fn scheduled_deletion(&self) -> DateTime<Utc> {
        self.scheduled_deletion
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedCompanyView {
    pub id: DeletedCompanyId,
    pub original_id: CompanyId,
    pub deleted_by: Option<UserId>,
    pub deleted_at: DateTime<Utc>,
    pub scheduled_deletion: DateTime<Utc>,
    pub days_left: u32,
    pub expired: bool,
    pub company: Company,
}
