//! Live listings: job postings, the companies behind them and user applications.

pub mod application;
pub mod company;
pub mod job;

pub use application::{Application, ApplicationView, NewApplication};
pub use company::{Company, CompanyDetails};
pub use job::{ExperienceLevel, Job, JobFilter, JobListing, NewJob};
