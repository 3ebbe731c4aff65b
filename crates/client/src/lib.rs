//! `jobboard-client`
//!
//! Client-side reconciliation for the job board API:
//! - a persisted per-user exclusion set of hidden jobs
//! - optimistic soft delete with rollback on failure
//! - periodic and on-demand refresh that merges server state with local intent
//!
//! The API stays the authority: the client only ever hides jobs, never invents them.

pub mod api;
pub mod config;
pub mod exclusion;
pub mod poller;
pub mod reconcile;
pub mod session;
pub mod types;

pub use api::{ApiError, BoardApi, HttpBoardApi};
pub use config::ClientConfig;
pub use exclusion::{ExclusionError, ExclusionStore, InMemoryExclusionStore, SqliteExclusionStore};
pub use poller::{RefreshHandle, RefreshWorker};
pub use reconcile::{merge_active, Merge};
pub use session::{ClientError, JobBoardSession};
