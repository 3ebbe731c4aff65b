//! Soft-delete lifecycle: live entity -> trash record -> restore or purge.

pub mod engine;
pub mod sweeper;

pub use engine::{LifecycleEngine, PurgeReport, PurgedPost, RestoredJob};
pub use sweeper::{ExpirySweeper, SweeperHandle};

use jobboard_core::DomainError;

use crate::store::StoreError;

pub type LifecycleResult<T> = Result<T, LifecycleError>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LifecycleError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("store unavailable: {0}")]
    StoreUnavailable(String),
}

impl From<StoreError> for LifecycleError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { kind, id } => Self::NotFound(format!("{kind} {id}")),
            StoreError::Conflict(msg) => Self::Conflict(msg),
            StoreError::Unavailable(msg) => Self::StoreUnavailable(msg),
        }
    }
}

impl From<DomainError> for LifecycleError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) | DomainError::InvalidId(msg) => Self::Validation(msg),
            DomainError::NotFound(what) => Self::NotFound(what),
            DomainError::Conflict(msg) => Self::Conflict(msg),
        }
    }
}

/// Outcome of a soft delete. A repeat call is not an error: it hands back the
/// record that already exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SoftDelete<T> {
    Created(T),
    AlreadyDeleted(T),
}

impl<T> SoftDelete<T> {
    pub fn record(&self) -> &T {
        match self {
            Self::Created(r) | Self::AlreadyDeleted(r) => r,
        }
    }

    pub fn into_record(self) -> T {
        match self {
            Self::Created(r) | Self::AlreadyDeleted(r) => r,
        }
    }

    pub fn is_already_deleted(&self) -> bool {
        matches!(self, Self::AlreadyDeleted(_))
    }
}
