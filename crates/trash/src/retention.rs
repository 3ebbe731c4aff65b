//! Retention window and lazy expiry.

use chrono::{DateTime, Duration, Utc};

/// Days a trash record is kept before it becomes eligible for purge.
pub const DEFAULT_RETENTION_DAYS: u32 = 5;

/// Upper bound accepted from configuration (about a century).
pub const MAX_RETENTION_DAYS: u32 = 36_500;

const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// How long deleted records stay restorable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetentionPolicy {
    window: Duration,
}

impl RetentionPolicy {
    pub fn days(days: u32) -> Self {
        Self {
            window: Duration::days(i64::from(days)),
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Saturates at the end of representable time.
    pub fn scheduled_deletion(&self, deleted_at: DateTime<Utc>) -> DateTime<Utc> {
        deleted_at
            .checked_add_signed(self.window)
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }
}

impl Default for RetentionPolicy {
    fn default() -> Self {
        Self::days(DEFAULT_RETENTION_DAYS)
    }
}

/// Whole days remaining until `scheduled_deletion`, rounded up, floored at 0.
pub fn days_left_until(scheduled_deletion: DateTime<Utc>, now: DateTime<Utc>) -> u32 {
    let remaining_ms = (scheduled_deletion - now).num_milliseconds();
    if remaining_ms <= 0 {
        return 0;
    }
    let days = (remaining_ms + DAY_MS - 1) / DAY_MS;
    u32::try_from(days).unwrap_or(u32::MAX)
}

/// Common read-time expiry behavior of trash records.
pub trait TrashRecord {
    fn deleted_at(&self) -> DateTime<Utc>;

    fn scheduled_deletion(&self) -> DateTime<Utc>;

    fn days_left(&self, now: DateTime<Utc>) -> u32 {
        days_left_until(self.scheduled_deletion(), now)
    }

    /// Eligible for permanent deletion (still listed until someone purges it).
    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.scheduled_deletion()
    }
}
