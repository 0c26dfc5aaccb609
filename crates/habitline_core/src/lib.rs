//! Core domain logic for the habitline habit tracker.
//! This crate is the single source of truth for business invariants.

pub mod analytics;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod store;

pub use analytics::{AnalyticsItem, AnalyticsScreen, AnalyticsService};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::schedule::{Schedule, UnknownWeekdayToken, WeekDay};
pub use model::tracker::{Category, CompletionRecord, Tracker, TrackerId, PINNED_CATEGORY_NAME};
pub use repo::category_repo::{CategoryRepository, SqliteCategoryRepository};
pub use repo::record_repo::{RecordRepository, SqliteRecordRepository};
pub use repo::tracker_repo::{SqliteTrackerRepository, TrackerRepository};
pub use repo::{DecodeError, RepoError, RepoResult};
pub use store::category_store::CategoryStore;
pub use store::record_store::RecordStore;
pub use store::tracker_store::{IndexMove, TrackerStore, TrackerStoreUpdate};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
