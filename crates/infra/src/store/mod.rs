//! Entity store: the single shared mutable resource.
//!
//! Each call is atomic on its own; nothing spans calls. Multi-step workflows
//! (restore + application cleanup) are sequenced by the lifecycle engine.

pub mod in_memory;

pub use in_memory::InMemoryEntityStore;

use jobboard_core::{ApplicationId, CompanyId, DeletedCompanyId, DeletedPostId, JobId, UserId};
use jobboard_listings::{Application, ApplicationView, Company, Job};
use jobboard_trash::{DeletedCompany, DeletedPost};

pub type StoreResult<T> = Result<T, StoreError>;

/// Entity store error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },
    /// Uniqueness violation (duplicate id or composite key).
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    pub fn not_found(kind: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            kind,
            id: id.to_string(),
        }
    }
}

/// Record storage for every entity the job board keeps.
///
/// Applications and deleted posts are write-once, so they have no update.
pub trait EntityStore: Send + Sync {
    fn create_job(&self, job: Job) -> StoreResult<Job>;
    fn get_job(&self, id: &JobId) -> StoreResult<Option<Job>>;
    fn list_jobs(&self) -> StoreResult<Vec<Job>>;
    fn update_job(&self, job: Job) -> StoreResult<Job>;
    fn delete_job(&self, id: &JobId) -> StoreResult<Job>;

    /// Fails with `Conflict` if the user already applied to the job.
    fn create_application(&self, application: Application) -> StoreResult<Application>;
    fn get_application(&self, id: &ApplicationId) -> StoreResult<Option<Application>>;
    fn list_applications(&self) -> StoreResult<Vec<Application>>;
    fn delete_application(&self, id: &ApplicationId) -> StoreResult<Application>;
    /// Applications of a user joined with their job and company.
    fn user_applications(&self, user_id: &UserId) -> StoreResult<Vec<ApplicationView>>;

    fn create_company(&self, company: Company) -> StoreResult<Company>;
    fn get_company(&self, id: &CompanyId) -> StoreResult<Option<Company>>;
    fn list_companies(&self) -> StoreResult<Vec<Company>>;
    fn update_company(&self, company: Company) -> StoreResult<Company>;
    fn delete_company(&self, id: &CompanyId) -> StoreResult<Company>;

    /// Fails with `Conflict` if the user already trashed the same job.
    fn create_deleted_post(&self, post: DeletedPost) -> StoreResult<DeletedPost>;
    fn get_deleted_post(&self, id: &DeletedPostId) -> StoreResult<Option<DeletedPost>>;
    fn list_deleted_posts(&self) -> StoreResult<Vec<DeletedPost>>;
    fn user_deleted_posts(&self, user_id: &UserId) -> StoreResult<Vec<DeletedPost>>;
    /// Removes and returns the record; the caller that gets `Ok` owns it.
    fn delete_deleted_post(&self, id: &DeletedPostId) -> StoreResult<DeletedPost>;

    /// Fails with `Conflict` if the company is already in the trash.
    fn create_deleted_company(&self, record: DeletedCompany) -> StoreResult<DeletedCompany>;
    fn get_deleted_company(&self, id: &DeletedCompanyId) -> StoreResult<Option<DeletedCompany>>;
    fn deleted_companies(&self) -> StoreResult<Vec<DeletedCompany>>;
    fn update_deleted_company(&self, record: DeletedCompany) -> StoreResult<DeletedCompany>;
    fn delete_deleted_company(&self, id: &DeletedCompanyId) -> StoreResult<DeletedCompany>;
}
