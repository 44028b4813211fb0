//! Core domain logic for the Life XP tracker.
//! This crate is the single source of truth for business invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::capsule::{parse_tags, CapsuleEntryType, NewCapsuleEntry, YearCapsuleEntry};
pub use model::category::{CategoryConfig, CategoryId};
pub use model::goal::CategoryGoal;
pub use model::id::{next_id, RecordId};
pub use model::quest::{BonusQuest, NewBonusQuest};
pub use model::review::{MonthlyCategoryReview, ReviewKey, ReviewUpdate};
pub use model::state::XpState;
pub use model::xp::{clamp_quest_xp, clamp_review_score};
pub use repo::snapshot_repo::{
    JsonFileSnapshotRepository, MemorySnapshotRepository, RepoError, RepoResult,
    SnapshotRepository, SqliteSnapshotRepository, STORAGE_KEY,
};
pub use service::capsule_query::{
    capsule_years, filter_entries, group_by_month, CapsuleFilter, UNDATED_MONTH,
};
pub use service::stats::{CategoryStats, MonthSummary, ProgressLabel, YearSummary};
pub use service::timeline::quests_by_date_desc;
pub use service::xp_store::{LoadOutcome, XpStore};

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
