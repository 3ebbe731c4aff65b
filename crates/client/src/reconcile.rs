//! Merge rule between the server's active list and the local exclusion set.
//!
//! Local intent wins until a restore succeeds: a job the user hid stays hidden
//! even if a fetch (stale, racing, or from another device) returns it. The
//! client never adds a job the server did not send.

use std::collections::BTreeSet;

use jobboard_core::JobId;
use jobboard_listings::JobListing;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Merge {
    /// What the user should see, in server order.
    pub visible: Vec<JobListing>,
    /// Ids the server returned that local intent keeps hidden.
    pub suppressed: Vec<JobId>,
}

pub fn merge_active(server: Vec<JobListing>, excluded: &BTreeSet<JobId>) -> Merge {
    let mut merge = Merge::default();
    for listing in server {
        if excluded.contains(&listing.job.id) {
            merge.suppressed.push(listing.job.id);
        } else {
            merge.visible.push(listing);
        }
    }
    merge
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use jobboard_listings::{ExperienceLevel, Job, NewJob};

    fn listing(id: &str) -> JobListing {
        let job = Job::create(
            id.parse().unwrap(),
            NewJob {
                title: id.to_string(),
                description: String::new(),
                location: String::new(),
                salary: String::new(),
                skills: String::new(),
                requirements: String::new(),
                closing_date: Utc::now(),
                experience_level: ExperienceLevel::Fresher,
                experience_min: 0,
                experience_max: 1,
                is_active: true,
                company_id: "c-1".parse().unwrap(),
            },
            Utc::now(),
        )
        .unwrap();
        JobListing { job, company: None }
    }

    fn ids(listings: &[JobListing]) -> Vec<&str> {
        listings.iter().map(|l| l.job.id.as_str()).collect()
    }

    #[test]
    fn excluded_jobs_are_suppressed_even_if_the_server_returns_them() {
        let excluded: BTreeSet<JobId> = ["job-2".parse().unwrap()].into_iter().collect();
        let merge = merge_active(vec![listing("job-1"), listing("job-2"), listing("job-3")], &excluded);

        assert_eq!(ids(&merge.visible), vec!["job-1", "job-3"]);
        assert_eq!(merge.suppressed, vec!["job-2".parse::<JobId>().unwrap()]);
    }

    #[test]
    fn exclusions_never_add_jobs() {
        let excluded: BTreeSet<JobId> = ["gone".parse().unwrap()].into_iter().collect();
        let merge = merge_active(vec![listing("job-1")], &excluded);

        assert_eq!(ids(&merge.visible), vec!["job-1"]);
        assert!(merge.suppressed.is_empty());
    }

    #[test]
    fn empty_exclusion_set_is_the_server_view() {
        let merge = merge_active(vec![listing("a"), listing("b")], &BTreeSet::new());
        assert_eq!(ids(&merge.visible), vec!["a", "b"]);
    }
}
