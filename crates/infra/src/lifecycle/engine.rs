//! Lifecycle engine: moves jobs and companies through the trash.
//!
//! Every workflow is a sequence of single-call store operations. Multi-step
//! workflows start by *claiming* the trash record (removing it); whichever
//! caller gets the record owns the rest of the workflow, and a failure later
//! on puts the record back.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use jobboard_core::{
    ApplicationId, CompanyId, DeletedCompanyId, DeletedPostId, JobId, UserId,
};
use jobboard_listings::{Company, CompanyDetails, Job, JobFilter, JobListing};
use jobboard_trash::{
    DeletedCompany, DeletedCompanyView, DeletedPost, DeletedPostView, RetentionPolicy,
    TrashRecord,
};

use super::{LifecycleError, LifecycleResult, SoftDelete};
use crate::store::{EntityStore, StoreError};

/// Result of restoring a deleted post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestoredJob {
    pub job: Job,
    /// Applications of the deleting user for this job that were removed.
    pub removed_applications: Vec<ApplicationId>,
    /// The live job was gone and had to be rebuilt from the snapshot.
    pub recreated: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurgedPost {
    pub record: DeletedPost,
    pub removed_applications: Vec<ApplicationId>,
}

/// Counts from one expiry sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PurgeReport {
    pub posts: usize,
    pub companies: usize,
}

impl PurgeReport {
    pub fn is_empty(&self) -> bool {
        self.posts == 0 && self.companies == 0
    }
}

pub struct LifecycleEngine {
    store: Arc<dyn EntityStore>,
    policy: RetentionPolicy,
}

impl LifecycleEngine {
    pub fn new(store: Arc<dyn EntityStore>, policy: RetentionPolicy) -> Self {
        Self { store, policy }
    }

    // ---------------------------------------------------------------------
    // Active listing
    // ---------------------------------------------------------------------

    /// Live jobs joined with their company, minus the jobs in `user`'s trash.
    pub fn active_jobs(
        &self,
        user: Option<&UserId>,
        filter: &JobFilter,
    ) -> LifecycleResult<Vec<JobListing>> {
        let hidden: HashSet<JobId> = match user {
            Some(user) => self
                .store
                .user_deleted_posts(user)?
                .into_iter()
                .map(|p| p.original_id)
                .collect(),
            None => HashSet::new(),
        };

        let companies: HashMap<CompanyId, Company> = self
            .store
            .list_companies()?
            .into_iter()
            .map(|c| (c.id.clone(), c))
            .collect();

        let listings = self
            .store
            .list_jobs()?
            .into_iter()
            .filter(|job| !hidden.contains(&job.id))
            .filter_map(|job| {
                let company = companies.get(&job.company_id).cloned();
                filter
                    .matches(&job, company.as_ref().map(|c| c.name.as_str()))
                    .then_some(JobListing { job, company })
            })
            .collect();

        Ok(listings)
    }

    // ---------------------------------------------------------------------
    // Job trash (per user)
    // ---------------------------------------------------------------------

    /// Move `job_id` into `user_id`'s trash.
    ///
    /// Repeating the call returns the existing record as `AlreadyDeleted`.
    pub fn soft_delete_job(
        &self,
        job_id: &JobId,
        user_id: &UserId,
        now: DateTime<Utc>,
    ) -> LifecycleResult<SoftDelete<DeletedPost>> {
        if let Some(existing) = self.find_user_post(user_id, job_id)? {
            debug!("job {job_id} already in trash of user {user_id}");
            return Ok(SoftDelete::AlreadyDeleted(existing));
        }

        let job = self
            .store
            .get_job(job_id)?
            .ok_or_else(|| LifecycleError::NotFound(format!("job {job_id}")))?;
        let company = self.store.get_company(&job.company_id)?;

        let record = DeletedPost::new(
            DeletedPostId::new(),
            user_id.clone(),
            &job,
            company.as_ref(),
            self.policy,
            now,
        );

        match self.store.create_deleted_post(record) {
            Ok(created) => {
                info!(
                    deleted_post_id = %created.id,
                    "job {job_id} moved to trash of user {user_id}"
                );
                Ok(SoftDelete::Created(created))
            }
            // A concurrent call for the same (job, user) won the insert.
            Err(StoreError::Conflict(msg)) => self
                .find_user_post(user_id, job_id)?
                .map(SoftDelete::AlreadyDeleted)
                .ok_or(LifecycleError::Conflict(msg)),
            Err(e) => Err(e.into()),
        }
    }

    /// The user's trash with `daysLeft`/`expired` resolved at `now`, newest first.
    pub fn list_for_user(
        &self,
        user_id: &UserId,
        now: DateTime<Utc>,
    ) -> LifecycleResult<Vec<DeletedPostView>> {
        Ok(self
            .store
            .user_deleted_posts(user_id)?
            .iter()
            .map(|p| p.view(now))
            .collect())
    }

    /// Bring a trashed job back for its user and drop that user's applications
    /// for it, so they can apply again.
    pub fn restore_post(
        &self,
        id: &DeletedPostId,
        now: DateTime<Utc>,
    ) -> LifecycleResult<RestoredJob> {
        let record = self.claim_post(id)?;

        match self.reactivate_job(&record, now) {
            Ok(restored) => {
                info!(
                    recreated = restored.recreated,
                    removed_applications = restored.removed_applications.len(),
                    "job {} restored for user {}",
                    record.original_id,
                    record.user_id
                );
                Ok(restored)
            }
            Err(e) => {
                self.put_back_post(record);
                Err(e)
            }
        }
    }

    /// Drop a trash record for good along with the user's applications for
    /// the job. The shared job itself is left alone.
    pub fn permanently_delete_post(&self, id: &DeletedPostId) -> LifecycleResult<PurgedPost> {
        let record = self.claim_post(id)?;

        match self.remove_user_applications(&record.user_id, &record.original_id) {
            Ok(removed_applications) => {
                info!(
                    removed_applications = removed_applications.len(),
                    "deleted post {} permanently removed", record.id
                );
                Ok(PurgedPost {
                    record,
                    removed_applications,
                })
            }
            Err(e) => {
                self.put_back_post(record);
                Err(e)
            }
        }
    }

    fn find_user_post(
        &self,
        user_id: &UserId,
        job_id: &JobId,
    ) -> LifecycleResult<Option<DeletedPost>> {
        Ok(self
            .store
            .user_deleted_posts(user_id)?
            .into_iter()
            .find(|p| &p.original_id == job_id))
    }

    fn claim_post(&self, id: &DeletedPostId) -> LifecycleResult<DeletedPost> {
        self.store.delete_deleted_post(id).map_err(|e| match e {
            StoreError::NotFound { .. } => LifecycleError::NotFound(format!("deleted post {id}")),
            other => other.into(),
        })
    }

    fn put_back_post(&self, record: DeletedPost) {
        let id = record.id.clone();
        if let Err(e) = self.store.create_deleted_post(record) {
            warn!("could not put deleted post {id} back after a failed workflow: {e}");
        }
    }

    fn reactivate_job(
        &self,
        record: &DeletedPost,
        now: DateTime<Utc>,
    ) -> LifecycleResult<RestoredJob> {
        let (job, recreated) = match self.store.get_job(&record.original_id)? {
            Some(job) => (job, false),
            None => match self.store.create_job(record.restored_job(now)) {
                Ok(job) => (job, true),
                // Someone else recreated it in between.
                Err(StoreError::Conflict(_)) => {
                    let job = self.store.get_job(&record.original_id)?.ok_or_else(|| {
                        LifecycleError::NotFound(format!("job {}", record.original_id))
                    })?;
                    (job, false)
                }
                Err(e) => return Err(e.into()),
            },
        };

        let removed_applications =
            self.remove_user_applications(&record.user_id, &record.original_id)?;

        Ok(RestoredJob {
            job,
            removed_applications,
            recreated,
        })
    }

    fn remove_user_applications(
        &self,
        user_id: &UserId,
        job_id: &JobId,
    ) -> LifecycleResult<Vec<ApplicationId>> {
        let mut removed = Vec::new();
        let matching = self
            .store
            .list_applications()?
            .into_iter()
            .filter(|a| &a.user_id == user_id && &a.job_id == job_id);

        for application in matching {
            match self.store.delete_application(&application.id) {
                Ok(_) => removed.push(application.id),
                Err(StoreError::NotFound { .. }) => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(removed)
    }

    // ---------------------------------------------------------------------
    // Company trash (global)
    // ---------------------------------------------------------------------

    /// Take a company out of the active directory into the trash.
    pub fn soft_delete_company(
        &self,
        company_id: &CompanyId,
        deleted_by: Option<UserId>,
        now: DateTime<Utc>,
    ) -> LifecycleResult<SoftDelete<DeletedCompany>> {
        let Some(company) = self.store.get_company(company_id)? else {
            return match self.find_deleted_company(company_id)? {
                Some(existing) => Ok(SoftDelete::AlreadyDeleted(existing)),
                None => Err(LifecycleError::NotFound(format!("company {company_id}"))),
            };
        };

        let record = DeletedCompany::new(DeletedCompanyId::new(), &company, deleted_by, self.policy, now);
        let record = match self.store.create_deleted_company(record) {
            Ok(record) => record,
            Err(StoreError::Conflict(msg)) => {
                return self
                    .find_deleted_company(company_id)?
                    .map(SoftDelete::AlreadyDeleted)
                    .ok_or(LifecycleError::Conflict(msg));
            }
            Err(e) => return Err(e.into()),
        };

        match self.store.delete_company(company_id) {
            Ok(_) | Err(StoreError::NotFound { .. }) => {
                info!(deleted_company_id = %record.id, "company {company_id} moved to trash");
                Ok(SoftDelete::Created(record))
            }
            Err(e) => {
                if let Err(undo) = self.store.delete_deleted_company(&record.id) {
                    warn!("could not drop deleted company {} after a failed delete: {undo}", record.id);
                }
                Err(e.into())
            }
        }
    }

    pub fn list_deleted_companies(
        &self,
        now: DateTime<Utc>,
    ) -> LifecycleResult<Vec<DeletedCompanyView>> {
        Ok(self
            .store
            .deleted_companies()?
            .iter()
            .map(|c| c.view(now))
            .collect())
    }

    /// Put a company back under its original id.
    ///
    /// Fails with `Conflict` if a live company already holds that id.
    pub fn restore_company(
        &self,
        id: &DeletedCompanyId,
        now: DateTime<Utc>,
    ) -> LifecycleResult<Company> {
        let record = self.claim_company(id)?;

        match self.store.create_company(record.restored_company(now)) {
            Ok(company) => {
                info!("company {} restored", company.id);
                Ok(company)
            }
            Err(e) => {
                let original_id = record.original_id.clone();
                self.put_back_company(record);
                Err(match e {
                    StoreError::Conflict(_) => LifecycleError::Conflict(format!(
                        "company {original_id} is already active"
                    )),
                    other => other.into(),
                })
            }
        }
    }

    /// Edit the snapshot of a trashed company; the edit is what comes back on restore.
    pub fn update_deleted_company(
        &self,
        id: &DeletedCompanyId,
        details: CompanyDetails,
        now: DateTime<Utc>,
    ) -> LifecycleResult<DeletedCompanyView> {
        details.validate()?;

        let mut record = self
            .store
            .get_deleted_company(id)?
            .ok_or_else(|| LifecycleError::NotFound(format!("deleted company {id}")))?;
        record.snapshot.apply(details);

        let updated = self.store.update_deleted_company(record)?;
        Ok(updated.view(now))
    }

    pub fn permanently_delete_company(
        &self,
        id: &DeletedCompanyId,
    ) -> LifecycleResult<DeletedCompany> {
        let record = self.claim_company(id)?;
        info!("deleted company {id} permanently removed");
        Ok(record)
    }

    fn find_deleted_company(
        &self,
        company_id: &CompanyId,
    ) -> LifecycleResult<Option<DeletedCompany>> {
        Ok(self
            .store
            .deleted_companies()?
            .into_iter()
            .find(|c| &c.original_id == company_id))
    }

    fn claim_company(&self, id: &DeletedCompanyId) -> LifecycleResult<DeletedCompany> {
        self.store.delete_deleted_company(id).map_err(|e| match e {
            StoreError::NotFound { .. } => {
                LifecycleError::NotFound(format!("deleted company {id}"))
            }
            other => other.into(),
        })
    }

    fn put_back_company(&self, record: DeletedCompany) {
        let id = record.id.clone();
        if let Err(e) = self.store.create_deleted_company(record) {
            warn!("could not put deleted company {id} back after a failed workflow: {e}");
        }
    }

    // ---------------------------------------------------------------------
    // Expiry
    // ---------------------------------------------------------------------

    /// Permanently delete every trash record whose window has closed.
    ///
    /// Records claimed concurrently by someone else are skipped.
    pub fn purge_expired(&self, now: DateTime<Utc>) -> LifecycleResult<PurgeReport> {
        let mut report = PurgeReport::default();

        for post in self.store.list_deleted_posts()? {
            if !post.is_expired(now) {
                continue;
            }
            match self.permanently_delete_post(&post.id) {
                Ok(_) => report.posts += 1,
                Err(LifecycleError::NotFound(_)) => {}
                Err(e) => return Err(e),
            }
        }

        for company in self.store.deleted_companies()? {
            if !company.is_expired(now) {
                continue;
            }
            match self.permanently_delete_company(&company.id) {
                Ok(_) => report.companies += 1,
                Err(LifecycleError::NotFound(_)) => {}
                Err(e) => return Err(e),
            }
        }

        if !report.is_empty() {
            info!(
                posts = report.posts,
                companies = report.companies,
                "purged expired trash records"
            );
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use jobboard_listings::{Application, ExperienceLevel, NewApplication, NewJob};

    use crate::store::InMemoryEntityStore;

    struct Fixture {
        store: Arc<InMemoryEntityStore>,
        engine: LifecycleEngine,
    }

    fn fixture() -> Fixture {
        let store = InMemoryEntityStore::arc();
        let engine = LifecycleEngine::new(store.clone(), RetentionPolicy::default());

        store
            .create_company(
                Company::create(
                    "c-1".parse().unwrap(),
                    CompanyDetails {
                        name: "Acme".into(),
                        location: "Pune".into(),
                        ..Default::default()
                    },
                    Utc::now(),
                )
                .unwrap(),
            )
            .unwrap();
        for id in ["job-1", "job-2"] {
            store.create_job(job(id)).unwrap();
        }

        Fixture { store, engine }
    }

    fn job(id: &str) -> Job {
        Job::create(
            id.parse().unwrap(),
            NewJob {
                title: format!("Role {id}"),
                description: "desc".into(),
                location: "Remote".into(),
                salary: "10 LPA".into(),
                skills: "rust".into(),
                requirements: String::new(),
                closing_date: Utc::now() + Duration::days(30),
                experience_level: ExperienceLevel::Fresher,
                experience_min: 0,
                experience_max: 1,
                is_active: true,
                company_id: "c-1".parse().unwrap(),
            },
            Utc::now(),
        )
        .unwrap()
    }

    fn apply(store: &InMemoryEntityStore, user: &str, job: &str) -> Application {
        store
            .create_application(
                Application::create(
                    ApplicationId::new(),
                    NewApplication {
                        user_id: user.into(),
                        job_id: job.into(),
                    },
                    Utc::now(),
                )
                .unwrap(),
            )
            .unwrap()
    }

    fn user(id: &str) -> UserId {
        id.parse().unwrap()
    }

    fn job_id(id: &str) -> JobId {
        id.parse().unwrap()
    }

    fn active_ids(engine: &LifecycleEngine, user_id: Option<&UserId>) -> Vec<String> {
        engine
            .active_jobs(user_id, &JobFilter::default())
            .unwrap()
            .into_iter()
            .map(|l| l.job.id.to_string())
            .collect()
    }

    #[test]
    fn soft_delete_hides_job_only_for_that_user() {
        let f = fixture();
        let now = Utc::now();
        let u1 = user("u1");

        let outcome = f.engine.soft_delete_job(&job_id("job-1"), &u1, now).unwrap();
        assert!(!outcome.is_already_deleted());
        assert_eq!(outcome.record().original_id.as_str(), "job-1");
        assert_eq!(
            outcome.record().snapshot.company_name.as_deref(),
            Some("Acme")
        );

        let trash = f.engine.list_for_user(&u1, now).unwrap();
        assert_eq!(trash.len(), 1);
        assert_eq!(trash[0].original_id.as_str(), "job-1");
        assert_eq!(trash[0].days_left, 5);

        assert_eq!(active_ids(&f.engine, Some(&u1)), vec!["job-2"]);
        assert_eq!(active_ids(&f.engine, Some(&user("u2"))).len(), 2);
        assert_eq!(active_ids(&f.engine, None).len(), 2);
    }

    #[test]
    fn soft_delete_with_an_oversized_window_does_not_panic() {
        let f = fixture();
        let engine = LifecycleEngine::new(f.store.clone(), RetentionPolicy::days(u32::MAX));
        let now = Utc::now();

        engine.soft_delete_job(&job_id("job-1"), &user("u1"), now).unwrap();
        let trash = engine.list_for_user(&user("u1"), now).unwrap();
        assert_eq!(trash.len(), 1);
        assert!(!trash[0].expired);
        engine
            .soft_delete_company(&"c-1".parse().unwrap(), None, now)
            .unwrap();
    }

    #[test]
    fn soft_delete_is_idempotent_per_user() {
        let f = fixture();
        let now = Utc::now();
        let u1 = user("u1");

        let first = f.engine.soft_delete_job(&job_id("job-1"), &u1, now).unwrap();
        let second = f
            .engine
            .soft_delete_job(&job_id("job-1"), &u1, now + Duration::hours(1))
            .unwrap();

        assert!(second.is_already_deleted());
        assert_eq!(first.record(), second.record());
        assert_eq!(f.store.list_deleted_posts().unwrap().len(), 1);

        // Another user gets an independent record for the same job.
        f.engine
            .soft_delete_job(&job_id("job-1"), &user("u2"), now)
            .unwrap();
        assert_eq!(f.store.list_deleted_posts().unwrap().len(), 2);
    }

    #[test]
    fn soft_delete_unknown_job_is_not_found() {
        let f = fixture();
        let err = f
            .engine
            .soft_delete_job(&job_id("nope"), &user("u1"), Utc::now())
            .unwrap_err();
        assert!(matches!(err, LifecycleError::NotFound(_)));
    }

    #[test]
    fn restore_returns_job_and_removes_only_that_users_applications() {
        let f = fixture();
        let now = Utc::now();
        let u1 = user("u1");

        apply(&f.store, "u1", "job-1");
        apply(&f.store, "u2", "job-1");
        apply(&f.store, "u1", "job-2");

        let record = f
            .engine
            .soft_delete_job(&job_id("job-1"), &u1, now)
            .unwrap()
            .into_record();
        let restored = f.engine.restore_post(&record.id, now).unwrap();

        assert_eq!(restored.job.id.as_str(), "job-1");
        assert!(!restored.recreated);
        assert_eq!(restored.removed_applications.len(), 1);

        assert!(active_ids(&f.engine, Some(&u1)).contains(&"job-1".to_string()));
        assert!(f.engine.list_for_user(&u1, now).unwrap().is_empty());

        let remaining: Vec<_> = f
            .store
            .list_applications()
            .unwrap()
            .into_iter()
            .map(|a| (a.user_id.to_string(), a.job_id.to_string()))
            .collect();
        assert_eq!(remaining.len(), 2);
        assert!(remaining.contains(&("u2".into(), "job-1".into())));
        assert!(remaining.contains(&("u1".into(), "job-2".into())));

        // The user may apply again.
        apply(&f.store, "u1", "job-1");
    }

    #[test]
    fn restore_recreates_a_vanished_job_from_the_snapshot() {
        let f = fixture();
        let now = Utc::now();
        let record = f
            .engine
            .soft_delete_job(&job_id("job-1"), &user("u1"), now)
            .unwrap()
            .into_record();

        f.store.delete_job(&job_id("job-1")).unwrap();

        let restored = f.engine.restore_post(&record.id, now).unwrap();
        assert!(restored.recreated);
        assert_eq!(restored.job.title, "Role job-1");
        assert!(f.store.get_job(&job_id("job-1")).unwrap().is_some());
    }

    #[test]
    fn restore_after_permanent_delete_is_not_found() {
        let f = fixture();
        let now = Utc::now();
        apply(&f.store, "u1", "job-1");

        let record = f
            .engine
            .soft_delete_job(&job_id("job-1"), &user("u1"), now)
            .unwrap()
            .into_record();

        let purged = f.engine.permanently_delete_post(&record.id).unwrap();
        assert_eq!(purged.removed_applications.len(), 1);
        assert!(f.store.get_job(&job_id("job-1")).unwrap().is_some());

        let err = f.engine.restore_post(&record.id, now).unwrap_err();
        assert!(matches!(err, LifecycleError::NotFound(_)));
        assert!(matches!(
            f.engine.permanently_delete_post(&record.id),
            Err(LifecycleError::NotFound(_))
        ));
    }

    #[test]
    fn concurrent_permanent_deletes_have_one_winner() {
        let f = fixture();
        let record = f
            .engine
            .soft_delete_job(&job_id("job-1"), &user("u1"), Utc::now())
            .unwrap()
            .into_record();
        let engine = Arc::new(f.engine);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let engine = engine.clone();
                let id = record.id.clone();
                std::thread::spawn(move || engine.permanently_delete_post(&id).is_ok())
            })
            .collect();

        let winners = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|ok| *ok)
            .count();
        assert_eq!(winners, 1);
    }

    #[test]
    fn company_lifecycle() {
        let f = fixture();
        let now = Utc::now();
        let company_id: CompanyId = "c-1".parse().unwrap();

        let record = f
            .engine
            .soft_delete_company(&company_id, Some(user("admin")), now)
            .unwrap()
            .into_record();
        assert!(f.store.get_company(&company_id).unwrap().is_none());

        let again = f.engine.soft_delete_company(&company_id, None, now).unwrap();
        assert!(again.is_already_deleted());

        let view = f
            .engine
            .update_deleted_company(
                &record.id,
                CompanyDetails {
                    name: "Acme Labs".into(),
                    location: "Mumbai".into(),
                    ..Default::default()
                },
                now,
            )
            .unwrap();
        assert_eq!(view.company.name, "Acme Labs");
        assert_eq!(f.engine.list_deleted_companies(now).unwrap().len(), 1);

        let restored = f.engine.restore_company(&record.id, now).unwrap();
        assert_eq!(restored.id, company_id);
        assert_eq!(restored.name, "Acme Labs");
        assert!(f.engine.list_deleted_companies(now).unwrap().is_empty());
    }

    #[test]
    fn update_deleted_company_validates_name() {
        let f = fixture();
        let record = f
            .engine
            .soft_delete_company(&"c-1".parse().unwrap(), None, Utc::now())
            .unwrap()
            .into_record();

        let err = f
            .engine
            .update_deleted_company(&record.id, CompanyDetails::default(), Utc::now())
            .unwrap_err();
        assert!(matches!(err, LifecycleError::Validation(_)));
    }

    #[test]
    fn restoring_a_company_whose_id_is_live_again_conflicts() {
        let f = fixture();
        let now = Utc::now();
        let company_id: CompanyId = "c-1".parse().unwrap();
        let record = f
            .engine
            .soft_delete_company(&company_id, None, now)
            .unwrap()
            .into_record();

        f.store
            .create_company(
                Company::create(
                    company_id.clone(),
                    CompanyDetails {
                        name: "Other".into(),
                        ..Default::default()
                    },
                    now,
                )
                .unwrap(),
            )
            .unwrap();

        let err = f.engine.restore_company(&record.id, now).unwrap_err();
        assert!(matches!(err, LifecycleError::Conflict(_)));
        // The record survives the failed restore.
        assert!(f.store.get_deleted_company(&record.id).unwrap().is_some());
    }

    #[test]
    fn purge_expired_only_touches_closed_windows() {
        let f = fixture();
        let now = Utc::now();

        f.engine
            .soft_delete_job(&job_id("job-1"), &user("u1"), now - Duration::days(6))
            .unwrap();
        f.engine
            .soft_delete_job(&job_id("job-2"), &user("u1"), now - Duration::days(1))
            .unwrap();
        f.engine
            .soft_delete_company(&"c-1".parse().unwrap(), None, now - Duration::days(5))
            .unwrap();

        let report = f.engine.purge_expired(now).unwrap();
        assert_eq!(report, PurgeReport { posts: 1, companies: 1 });

        let left = f.engine.list_for_user(&user("u1"), now).unwrap();
        assert_eq!(left.len(), 1);
        assert_eq!(left[0].original_id.as_str(), "job-2");

        assert!(f.engine.purge_expired(now).unwrap().is_empty());
    }

    #[test]
    fn expired_records_stay_listed_until_purged() {
        let f = fixture();
        let now = Utc::now();
        f.engine
            .soft_delete_job(&job_id("job-1"), &user("u1"), now - Duration::days(7))
            .unwrap();

        let trash = f.engine.list_for_user(&user("u1"), now).unwrap();
        assert_eq!(trash.len(), 1);
        assert!(trash[0].expired);
        assert_eq!(trash[0].days_left, 0);
    }
}
