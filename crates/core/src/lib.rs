//! `jobboard-core` — shared building blocks for the job board.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! identifiers, the domain error model and the `Entity` trait.

pub mod entity;
pub mod error;
pub mod id;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{ApplicationId, CompanyId, DeletedCompanyId, DeletedPostId, JobId, UserId};
