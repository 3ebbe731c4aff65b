//! Strongly-typed identifiers used across the job board.
//!
//! Ids travel as plain strings on the wire (clients may hand us ids minted
//! elsewhere), so each newtype wraps a `String`. Fresh ids are UUIDv7.

use core::str::FromStr;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

macro_rules! string_id {
    ($(#[$meta:meta])* $t:ident, $name:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $t(String);

        impl $t {
            /// Mint a new identifier (UUIDv7, time-ordered).
            ///
            /// Prefer parsing fixed ids in tests for determinism.
            pub fn new() -> Self {
                Self(Uuid::now_v7().to_string())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Err(DomainError::invalid_id(format!("{} must not be empty", $name)));
                }
                Ok(Self(trimmed.to_string()))
            }
        }

        impl From<$t> for String {
            fn from(value: $t) -> Self {
                value.0
            }
        }
    };
}

string_id!(
    /// Identifier of a user (the actor owning a trash view).
    UserId,
    "UserId"
);
string_id!(
    /// Identifier of a job posting.
    JobId,
    "JobId"
);
string_id!(
    /// Identifier of a job application.
    ApplicationId,
    "ApplicationId"
);
string_id!(
    /// Identifier of a company.
    CompanyId,
    "CompanyId"
);
string_id!(
    /// Identifier of a deleted-job (trash) record.
    DeletedPostId,
    "DeletedPostId"
);
string_id!(
    /// Identifier of a deleted-company (trash) record.
    DeletedCompanyId,
    "DeletedCompanyId"
);
