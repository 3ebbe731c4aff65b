//! `jobboard-trash` — recoverable, time-bounded trash records.
//!
//! A trash record snapshots enough of the original entity to redisplay and
//! restore it without a join. Expiry is computed lazily from
//! `scheduled_deletion`; nothing in this crate runs on a timer.

pub mod deleted_company;
pub mod deleted_post;
pub mod retention;

pub use deleted_company::{CompanySnapshot, DeletedCompany, DeletedCompanyView};
pub use deleted_post::{CompanyBadge, DeletedJobView, DeletedPost, DeletedPostView, JobSnapshot};
pub use retention::{
    days_left_until, RetentionPolicy, TrashRecord, DEFAULT_RETENTION_DAYS, MAX_RETENTION_DAYS,
};

/// Placeholder shown when a snapshot lost its company name.
pub const UNKNOWN_COMPANY: &str = "Unknown Company";
/// Placeholder shown when a snapshot lost its location.
pub const UNKNOWN_LOCATION: &str = "Unknown Location";
/// Placeholder shown when a snapshot lost its job title.
pub const UNKNOWN_JOB_TITLE: &str = "Unknown Job Title";
