use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use jobboard_core::{CompanyId, DomainError, DomainResult, Entity};

/// A company that posts jobs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: CompanyId,
    pub name: String,
    pub website: Option<String>,
    pub linkedin_url: Option<String>,
    pub logo: Option<String>,
    pub location: String,
    pub industry: Option<String>,
    pub size: Option<String>,
    pub founded: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Editable company fields (create and trash-edit bodies).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyDetails {
    pub name: String,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub linkedin_url: Option<String>,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub founded: Option<String>,
}

impl CompanyDetails {
    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("company name is required"));
        }
        Ok(())
    }
}

impl Company {
    pub fn create(id: CompanyId, details: CompanyDetails, now: DateTime<Utc>) -> DomainResult<Self> {
        details.validate()?;
        Ok(Self {
            id,
            name: details.name.trim().to_string(),
            website: details.website,
            linkedin_url: details.linkedin_url,
            logo: details.logo,
            location: details.location,
            industry: details.industry,
            size: details.size,
            founded: details.founded,
            created_at: now,
        })
    }
}

impl Entity for Company {
    type Id = CompanyId;

    fn id(&self) -> &CompanyId {
        &self.id
    }
}
