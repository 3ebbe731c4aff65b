//! Persisted per-user set of job ids hidden from the active view.

use std::collections::{BTreeSet, HashMap};
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Row, SqlitePool};
use tokio::sync::Mutex;

use jobboard_core::{JobId, UserId};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExclusionError {
    #[error("exclusion storage error: {0}")]
    Storage(String),
}

impl From<anyhow::Error> for ExclusionError {
    fn from(err: anyhow::Error) -> Self {
        Self::Storage(format!("{err:#}"))
    }
}

pub type ExclusionResult<T> = Result<T, ExclusionError>;

#[async_trait]
pub trait ExclusionStore: Send + Sync {
    async fn list(&self, user: &UserId) -> ExclusionResult<BTreeSet<JobId>>;

    /// Returns `false` if the id was already excluded.
    async fn insert(&self, user: &UserId, job: &JobId) -> ExclusionResult<bool>;

    /// Returns `false` if the id was not excluded.
    async fn remove(&self, user: &UserId, job: &JobId) -> ExclusionResult<bool>;

    async fn clear_user(&self, user: &UserId) -> ExclusionResult<()>;
}

/// Process-local exclusion set (tests, ephemeral sessions).
#[derive(Debug, Default)]
pub struct InMemoryExclusionStore {
    sets: Mutex<HashMap<UserId, BTreeSet<JobId>>>,
}

impl InMemoryExclusionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ExclusionStore for InMemoryExclusionStore {
    async fn list(&self, user: &UserId) -> ExclusionResult<BTreeSet<JobId>> {
        Ok(self.sets.lock().await.get(user).cloned().unwrap_or_default())
    }

    async fn insert(&self, user: &UserId, job: &JobId) -> ExclusionResult<bool> {
        Ok(self
            .sets
            .lock()
            .await
            .entry(user.clone())
            .or_default()
            .insert(job.clone()))
    }

    async fn remove(&self, user: &UserId, job: &JobId) -> ExclusionResult<bool> {
        let mut sets = self.sets.lock().await;
        Ok(sets.get_mut(user).is_some_and(|set| set.remove(job)))
    }

    async fn clear_user(&self, user: &UserId) -> ExclusionResult<()> {
        self.sets.lock().await.remove(user);
        Ok(())
    }
}

#[derive(Debug, Clone)]
enum Location {
    File(PathBuf),
    Memory,
}

/// SQLite-backed exclusion set. The pool is opened lazily on first use.
#[derive(Debug, Clone)]
pub struct SqliteExclusionStore {
    location: Location,
    pool: Arc<Mutex<Option<SqlitePool>>>,
}

impl SqliteExclusionStore {
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self::with_location(Location::File(path.into()))
    }

    /// Private in-memory database; contents vanish with the store.
    pub fn in_memory() -> Self {
        Self::with_location(Location::Memory)
    }

    /// `<data dir>/jobboard/exclusions.db`
    pub fn default_path() -> anyhow::Result<PathBuf> {
        let base = dirs::data_local_dir().context("no local data directory on this platform")?;
        Ok(base.join("jobboard").join("exclusions.db"))
    }

    fn with_location(location: Location) -> Self {
        Self {
            location,
            pool: Arc::new(Mutex::new(None)),
        }
    }

    async fn pool(&self) -> anyhow::Result<SqlitePool> {
        let mut guard = self.pool.lock().await;
        if let Some(pool) = guard.as_ref() {
            return Ok(pool.clone());
        }

        let pool = self.connect().await?;
        *guard = Some(pool.clone());
        Ok(pool)
    }

    async fn connect(&self) -> anyhow::Result<SqlitePool> {
        let options = match &self.location {
            Location::File(path) => {
                if let Some(parent) = path.parent() {
                    std::fs::create_dir_all(parent)
                        .with_context(|| format!("failed to create directory {parent:?}"))?;
                }
                SqliteConnectOptions::new().filename(path).create_if_missing(true)
            }
            Location::Memory => SqliteConnectOptions::from_str("sqlite::memory:")
                .context("invalid in-memory sqlite url")?,
        };

        // One connection: an in-memory database lives and dies with it.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .with_context(|| format!("failed to open exclusion store at {:?}", self.location))?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS excluded_jobs (
                user_id     TEXT NOT NULL,
                job_id      TEXT NOT NULL,
                excluded_at TEXT NOT NULL,
                PRIMARY KEY (user_id, job_id)
            )
            "#,
        )
        .execute(&pool)
        .await
        .context("failed to create excluded_jobs table")?;

        Ok(pool)
    }
}

#[async_trait]
impl ExclusionStore for SqliteExclusionStore {
    async fn list(&self, user: &UserId) -> ExclusionResult<BTreeSet<JobId>> {
        let pool = self.pool().await?;
        let rows = sqlx::query("SELECT job_id FROM excluded_jobs WHERE user_id = ?1")
            .bind(user.as_str())
            .fetch_all(&pool)
            .await
            .context("failed to read excluded jobs")?;

        let mut set = BTreeSet::new();
        for row in rows {
            let raw: String = row.try_get("job_id").context("bad job_id column")?;
            match raw.parse::<JobId>() {
                Ok(id) => {
                    set.insert(id);
                }
                Err(e) => tracing::warn!("skipping unreadable excluded job id {raw:?}: {e}"),
            }
        }
        Ok(set)
    }

    async fn insert(&self, user: &UserId, job: &JobId) -> ExclusionResult<bool> {
        let pool = self.pool().await?;
        let result = sqlx::query(
            r#"
            INSERT INTO excluded_jobs (user_id, job_id, excluded_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(user_id, job_id) DO NOTHING
            "#,
        )
        .bind(user.as_str())
        .bind(job.as_str())
        .bind(Utc::now().to_rfc3339())
        .execute(&pool)
        .await
        .context("failed to insert excluded job")?;

        Ok(result.rows_affected() == 1)
    }

    async fn remove(&self, user: &UserId, job: &JobId) -> ExclusionResult<bool> {
        let pool = self.pool().await?;
        let result = sqlx::query("DELETE FROM excluded_jobs WHERE user_id = ?1 AND job_id = ?2")
            .bind(user.as_str())
            .bind(job.as_str())
            .execute(&pool)
            .await
            .context("failed to remove excluded job")?;

        Ok(result.rows_affected() == 1)
    }

    async fn clear_user(&self, user: &UserId) -> ExclusionResult<()> {
        let pool = self.pool().await?;
        sqlx::query("DELETE FROM excluded_jobs WHERE user_id = ?1")
            .bind(user.as_str())
            .execute(&pool)
            .await
            .context("failed to clear excluded jobs")?;
        Ok(())
    }
}
