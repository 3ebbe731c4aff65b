//! One user's view of the job board: active list, trash, and the optimistic
//! delete/restore flows that keep them consistent with the server.

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use jobboard_core::{DeletedPostId, JobId, UserId};
use jobboard_listings::JobListing;
use jobboard_trash::DeletedPostView;

use crate::api::{ApiError, BoardApi};
use crate::exclusion::{ExclusionError, ExclusionStore};
use crate::reconcile::merge_active;
use crate::types::{RestoreResponse, SoftDeleteResponse};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClientError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Exclusion(#[from] ExclusionError),
}

#[derive(Debug, Default)]
struct SessionState {
    jobs: Vec<JobListing>,
    trash: Vec<DeletedPostView>,
    refreshed_at: Option<DateTime<Utc>>,
    /// Bumped by every local mutation; a refresh that started under an older
    /// generation re-reads the exclusion set before publishing.
    generation: u64,
    /// Optimistically removed, not yet confirmed or rolled back.
    pending_deletes: BTreeSet<JobId>,
    /// Restored on the server, but the exclusion could not be dropped yet.
    unhide: BTreeSet<JobId>,
}

pub struct JobBoardSession {
    user: UserId,
    api: Arc<dyn BoardApi>,
    exclusions: Arc<dyn ExclusionStore>,
    state: RwLock<SessionState>,
}

impl JobBoardSession {
    pub fn new(user: UserId, api: Arc<dyn BoardApi>, exclusions: Arc<dyn ExclusionStore>) -> Self {
        Self {
            user,
            api,
            exclusions,
            state: RwLock::new(SessionState::default()),
        }
    }

    pub fn user(&self) -> &UserId {
        &self.user
    }

    pub async fn visible_jobs(&self) -> Vec<JobListing> {
        self.state.read().await.jobs.clone()
    }

    pub async fn trash(&self) -> Vec<DeletedPostView> {
        self.state.read().await.trash.clone()
    }

    pub async fn refreshed_at(&self) -> Option<DateTime<Utc>> {
        self.state.read().await.refreshed_at
    }

    /// Refetch the active list and trash, filtered through the exclusion set.
    ///
    /// On failure the previous state is kept.
    pub async fn refresh(&self) -> Result<Vec<JobListing>, ClientError> {
        let started = self.state.read().await.generation;
        self.retry_unhide().await;

        let server_jobs = self.api.list_jobs(&self.user).await?;
        let trash = self.api.list_deleted_posts(&self.user).await?;
        let mut excluded = self.exclusions.list(&self.user).await?;

        let mut state = self.state.write().await;
        let stale = state.generation != started;
        if stale {
            tracing::debug!("local change during refresh for user {}; re-reading exclusions", self.user);
            excluded = self.exclusions.list(&self.user).await?;
        }
        excluded.extend(state.pending_deletes.iter().cloned());
        for job in &state.unhide {
            excluded.remove(job);
        }

        let merge = merge_active(server_jobs, &excluded);
        if !merge.suppressed.is_empty() {
            tracing::debug!(
                "{} job(s) hidden locally for user {}",
                merge.suppressed.len(),
                self.user
            );
        }

        state.jobs = merge.visible;
        if !stale {
            state.trash = trash;
        }
        state.refreshed_at = Some(Utc::now());
        Ok(state.jobs.clone())
    }

    /// Hide the job right away, then ask the server to move it to the trash.
    ///
    /// If the server call fails the job reappears where it was and the
    /// exclusion is dropped again.
    pub async fn delete_job(&self, job_id: &JobId) -> Result<SoftDeleteResponse, ClientError> {
        let removed = {
            let mut state = self.state.write().await;
            state.generation += 1;
            state.pending_deletes.insert(job_id.clone());
            state.unhide.remove(job_id);
            state
                .jobs
                .iter()
                .position(|l| &l.job.id == job_id)
                .map(|idx| (idx, state.jobs.remove(idx)))
        };
        let newly_excluded = match self.exclusions.insert(&self.user, job_id).await {
            Ok(inserted) => inserted,
            Err(e) => {
                self.roll_back(job_id, removed).await;
                return Err(e.into());
            }
        };

        match self.api.soft_delete_job(job_id, &self.user).await {
            Ok(resp) => {
                let mut state = self.state.write().await;
                state.pending_deletes.remove(job_id);
                if !state.trash.iter().any(|p| p.id == resp.deleted_post.id) {
                    state.trash.insert(0, resp.deleted_post.clone());
                }
                tracing::info!("job {job_id} deleted for user {}", self.user);
                Ok(resp)
            }
            Err(e) => {
                tracing::warn!("rolling back delete of job {job_id}: {e}");
                if newly_excluded {
                    if let Err(undo) = self.exclusions.remove(&self.user, job_id).await {
                        tracing::warn!("could not drop exclusion for job {job_id}: {undo}");
                    }
                }
                self.roll_back(job_id, removed).await;
                Err(e.into())
            }
        }
    }

    /// Restore a trashed job; on success it leaves the exclusion set and the
    /// list is refetched.
    ///
    /// Once the server has restored the job this returns `Ok`. A failure to
    /// update the local exclusion set is logged and retried on each refresh;
    /// meanwhile the job is shown anyway.
    pub async fn restore(&self, id: &DeletedPostId) -> Result<RestoreResponse, ClientError> {
        let resp = self.api.restore_post(id).await?;
        let job_id = resp.job.id.clone();

        {
            let mut state = self.state.write().await;
            state.generation += 1;
            state.trash.retain(|p| &p.id != id);
        }

        if let Err(e) = self.exclusions.remove(&self.user, &job_id).await {
            tracing::warn!("job {job_id} restored but its exclusion is still stored: {e}");
            self.state.write().await.unhide.insert(job_id);
        }

        if let Err(e) = self.refresh().await {
            tracing::warn!("refresh after restore failed: {e}");
        }
        Ok(resp)
    }

    /// Drop a trash entry for good. The job stays hidden locally.
    pub async fn permanently_delete(&self, id: &DeletedPostId) -> Result<(), ClientError> {
        self.api.permanently_delete_post(id).await?;
        let mut state = self.state.write().await;
        state.generation += 1;
        state.trash.retain(|p| &p.id != id);
        Ok(())
    }

    async fn roll_back(&self, job_id: &JobId, removed: Option<(usize, JobListing)>) {
        let mut state = self.state.write().await;
        state.generation += 1;
        state.pending_deletes.remove(job_id);
        if let Some((idx, listing)) = removed {
            let idx = idx.min(state.jobs.len());
            state.jobs.insert(idx, listing);
        }
    }

    async fn retry_unhide(&self) {
        let pending: Vec<JobId> = self.state.read().await.unhide.iter().cloned().collect();
        for job in pending {
            match self.exclusions.remove(&self.user, &job).await {
                Ok(_) => {
                    self.state.write().await.unhide.remove(&job);
                }
                Err(e) => tracing::warn!("exclusion for restored job {job} still not dropped: {e}"),
            }
        }
    }
}
