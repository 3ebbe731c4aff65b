//! In-memory entity store (dev/test, and the default server backend).

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use jobboard_core::{
    ApplicationId, CompanyId, DeletedCompanyId, DeletedPostId, Entity, JobId, UserId,
};
use jobboard_listings::{Application, ApplicationView, Company, Job};
use jobboard_trash::{DeletedCompany, DeletedPost};

use super::{EntityStore, StoreError, StoreResult};

#[derive(Debug, Default)]
struct Tables {
    jobs: HashMap<JobId, Job>,
    applications: HashMap<ApplicationId, Application>,
    companies: HashMap<CompanyId, Company>,
    deleted_posts: HashMap<DeletedPostId, DeletedPost>,
    deleted_companies: HashMap<DeletedCompanyId, DeletedCompany>,
}

/// All tables behind one lock, so joins and uniqueness checks see a
/// consistent view within a single call.
#[derive(Debug, Default)]
pub struct InMemoryEntityStore {
    tables: RwLock<Tables>,
}

impl InMemoryEntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arc() -> Arc<Self> {
        Arc::new(Self::new())
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, Tables>> {
        self.tables
            .read()
            .map_err(|_| StoreError::Unavailable("entity store lock poisoned".into()))
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, Tables>> {
        self.tables
            .write()
            .map_err(|_| StoreError::Unavailable("entity store lock poisoned".into()))
    }
}

fn insert_new<T: Entity + Clone>(
    table: &mut HashMap<T::Id, T>,
    kind: &str,
    item: T,
) -> StoreResult<T> {
    if table.contains_key(item.id()) {
        return Err(StoreError::Conflict(format!("{kind} {} already exists", item.id())));
    }
    table.insert(item.id().clone(), item.clone());
    Ok(item)
}

fn replace<T: Entity + Clone>(
    table: &mut HashMap<T::Id, T>,
    kind: &'static str,
    item: T,
) -> StoreResult<T> {
    let slot = table
        .get_mut(item.id())
        .ok_or_else(|| StoreError::not_found(kind, item.id()))?;
    *slot = item.clone();
    Ok(item)
}

impl EntityStore for InMemoryEntityStore {
    fn create_job(&self, job: Job) -> StoreResult<Job> {
        insert_new(&mut self.write()?.jobs, "job", job)
    }

    fn get_job(&self, id: &JobId) -> StoreResult<Option<Job>> {
        Ok(self.read()?.jobs.get(id).cloned())
    }

    fn list_jobs(&self) -> StoreResult<Vec<Job>> {
        let t = self.read()?;
        let mut jobs: Vec<_> = t.jobs.values().cloned().collect();
        jobs.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(jobs)
    }

    fn update_job(&self, job: Job) -> StoreResult<Job> {
        replace(&mut self.write()?.jobs, "job", job)
    }

    fn delete_job(&self, id: &JobId) -> StoreResult<Job> {
        self.write()?
            .jobs
            .remove(id)
            .ok_or_else(|| StoreError::not_found("job", id))
    }

    fn create_application(&self, application: Application) -> StoreResult<Application> {
        let mut t = self.write()?;
        let duplicate = t
            .applications
            .values()
            .any(|a| a.user_id == application.user_id && a.job_id == application.job_id);
        if duplicate {
            return Err(StoreError::Conflict(format!(
                "user {} already applied to job {}",
                application.user_id, application.job_id
            )));
        }
        insert_new(&mut t.applications, "application", application)
    }

    fn get_application(&self, id: &ApplicationId) -> StoreResult<Option<Application>> {
        Ok(self.read()?.applications.get(id).cloned())
    }

    fn list_applications(&self) -> StoreResult<Vec<Application>> {
        let t = self.read()?;
        let mut apps: Vec<_> = t.applications.values().cloned().collect();
        apps.sort_by_key(|a| a.created_at);
        Ok(apps)
    }

    fn delete_application(&self, id: &ApplicationId) -> StoreResult<Application> {
        self.write()?
            .applications
            .remove(id)
            .ok_or_else(|| StoreError::not_found("application", id))
    }

    fn user_applications(&self, user_id: &UserId) -> StoreResult<Vec<ApplicationView>> {
        let t = self.read()?;
        let mut views: Vec<_> = t
            .applications
            .values()
            .filter(|a| &a.user_id == user_id)
            .map(|a| {
                let job = t.jobs.get(&a.job_id).cloned();
                let company = job
                    .as_ref()
                    .and_then(|j| t.companies.get(&j.company_id))
                    .cloned();
                ApplicationView {
                    application: a.clone(),
                    job,
                    company,
                }
            })
            .collect();
        views.sort_by_key(|v| v.application.created_at);
        Ok(views)
    }

    fn create_company(&self, company: Company) -> StoreResult<Company> {
        insert_new(&mut self.write()?.companies, "company", company)
    }

    fn get_company(&self, id: &CompanyId) -> StoreResult<Option<Company>> {
        Ok(self.read()?.companies.get(id).cloned())
    }

    fn list_companies(&self) -> StoreResult<Vec<Company>> {
        let t = self.read()?;
        let mut companies: Vec<_> = t.companies.values().cloned().collect();
        companies.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        Ok(companies)
    }

    fn update_company(&self, company: Company) -> StoreResult<Company> {
        replace(&mut self.write()?.companies, "company", company)
    }

    fn delete_company(&self, id: &CompanyId) -> StoreResult<Company> {
        self.write()?
            .companies
            .remove(id)
            .ok_or_else(|| StoreError::not_found("company", id))
    }

    fn create_deleted_post(&self, post: DeletedPost) -> StoreResult<DeletedPost> {
        let mut t = self.write()?;
        let duplicate = t.deleted_posts.values().any(|p| {
            p.id == post.id || (p.user_id == post.user_id && p.original_id == post.original_id)
        });
        if duplicate {
            return Err(StoreError::Conflict(format!(
                "job {} already in trash of user {}",
                post.original_id, post.user_id
            )));
        }
        t.deleted_posts.insert(post.id.clone(), post.clone());
        Ok(post)
    }

    fn get_deleted_post(&self, id: &DeletedPostId) -> StoreResult<Option<DeletedPost>> {
        Ok(self.read()?.deleted_posts.get(id).cloned())
    }

    fn list_deleted_posts(&self) -> StoreResult<Vec<DeletedPost>> {
        let t = self.read()?;
        let mut posts: Vec<_> = t.deleted_posts.values().cloned().collect();
        posts.sort_by(|a, b| b.deleted_at.cmp(&a.deleted_at));
        Ok(posts)
    }

    fn user_deleted_posts(&self, user_id: &UserId) -> StoreResult<Vec<DeletedPost>> {
        let t = self.read()?;
        let mut posts: Vec<_> = t
            .deleted_posts
            .values()
            .filter(|p| &p.user_id == user_id)
            .cloned()
            .collect();
        posts.sort_by(|a, b| b.deleted_at.cmp(&a.deleted_at));
        Ok(posts)
    }

    fn delete_deleted_post(&self, id: &DeletedPostId) -> StoreResult<DeletedPost> {
        self.write()?
            .deleted_posts
            .remove(id)
            .ok_or_else(|| StoreError::not_found("deleted post", id))
    }

    fn create_deleted_company(&self, record: DeletedCompany) -> StoreResult<DeletedCompany> {
        let mut t = self.write()?;
        let duplicate = t
            .deleted_companies
            .values()
            .any(|c| c.id == record.id || c.original_id == record.original_id);
        if duplicate {
            return Err(StoreError::Conflict(format!(
                "company {} already in trash",
                record.original_id
            )));
        }
        t.deleted_companies
            .insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn get_deleted_company(&self, id: &DeletedCompanyId) -> StoreResult<Option<DeletedCompany>> {
        Ok(self.read()?.deleted_companies.get(id).cloned())
    }

    fn deleted_companies(&self) -> StoreResult<Vec<DeletedCompany>> {
        let t = self.read()?;
        let mut records: Vec<_> = t.deleted_companies.values().cloned().collect();
        records.sort_by(|a, b| b.deleted_at.cmp(&a.deleted_at));
        Ok(records)
    }

    fn update_deleted_company(&self, record: DeletedCompany) -> StoreResult<DeletedCompany> {
        replace(&mut self.write()?.deleted_companies, "deleted company", record)
    }

    fn delete_deleted_company(&self, id: &DeletedCompanyId) -> StoreResult<DeletedCompany> {
        self.write()?
            .deleted_companies
            .remove(id)
            .ok_or_else(|| StoreError::not_found("deleted company", id))
    }
}
