//! `jobboard-infra` — storage and the soft-delete lifecycle.
//!
//! - `store`: the `EntityStore` contract and its in-memory implementation
//! - `lifecycle`: trash workflows over the store, plus the optional expiry sweeper

pub mod lifecycle;
pub mod store;
