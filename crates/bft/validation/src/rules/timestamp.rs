use alloy_consensus::Header;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::trace;

use crate::DetachedHeaderRule;

/// Header is at least `minimum_seconds_since_parent` newer than its parent.
#[derive(Debug, Clone, Copy)]
pub struct TimestampMoreRecentThanParentRule {
    minimum_seconds_since_parent: u64,
}

impl TimestampMoreRecentThanParentRule {
    /// Create a new rule
    pub const fn new(minimum_seconds_since_parent: u64) -> Self {
        Self { minimum_seconds_since_parent }
    }
}

impl DetachedHeaderRule for TimestampMoreRecentThanParentRule {
    fn validate(&self, header: &Header, parent: &Header) -> bool {
        let Some(earliest) = parent.timestamp.checked_add(self.minimum_seconds_since_parent) else {
            return false
        };
        if header.timestamp < earliest {
            trace!(
                target: "bft::validation",
                timestamp = header.timestamp,
                parent_timestamp = parent.timestamp,
                minimum = self.minimum_seconds_since_parent,
                "Timestamp too close to parent"
            );
            return false
        }
        true
    }
}

/// Header is not further in the future than the acceptable clock drift.
///
/// Depends on the local clock, so it is left out of light validation.
#[derive(Debug, Clone, Copy)]
pub struct TimestampBoundedByFutureRule {
    acceptable_drift_seconds: u64,
    now: fn() -> u64,
}

impl TimestampBoundedByFutureRule {
    /// Create a rule reading the system clock
    pub const fn new(acceptable_drift_seconds: u64) -> Self {
        Self::with_clock(acceptable_drift_seconds, unix_now)
    }

    /// Create a rule reading `now` for the current unix time in seconds
    pub const fn with_clock(acceptable_drift_seconds: u64, now: fn() -> u64) -> Self {
        Self { acceptable_drift_seconds, now }
    }
}

impl DetachedHeaderRule for TimestampBoundedByFutureRule {
    fn validate(&self, header: &Header, _parent: &Header) -> bool {
        let latest = (self.now)().saturating_add(self.acceptable_drift_seconds);
        if header.timestamp > latest {
            trace!(
                target: "bft::validation",
                timestamp = header.timestamp,
                latest,
                "Timestamp too far in the future"
            );
            return false
        }
        true
    }

    fn include_in_light_validation(&self) -> bool {
        false
    }
}

fn unix_now() -> u64 {
    SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_secs()).unwrap_or_default()
}
