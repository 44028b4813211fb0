//! Persisted snapshot document.
//!
//! # Responsibility
//! - Hold the four record collections as one serializable tree.
//! - Build the default state and (de)serialize the snapshot payload.
//!
//! # Invariants
//! - Any collection missing or `null` in a loaded payload defaults to empty.
//! - A record that fails to decode is dropped; its siblings still load.
//! - The default state seeds one empty goal per registry category.

use crate::model::capsule::YearCapsuleEntry;
use crate::model::category;
use crate::model::goal::CategoryGoal;
use crate::model::id::next_id;
use crate::model::lenient::records;
use crate::model::quest::BonusQuest;
use crate::model::review::MonthlyCategoryReview;
use serde::{Deserialize, Serialize};

/// Full application state as written to durable storage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct XpState {
    #[serde(deserialize_with = "records")]
    pub monthly_reviews: Vec<MonthlyCategoryReview>,
    #[serde(deserialize_with = "records")]
    pub bonus_quests: Vec<BonusQuest>,
    #[serde(deserialize_with = "records")]
    pub capsule_entries: Vec<YearCapsuleEntry>,
    #[serde(deserialize_with = "records")]
    pub category_goals: Vec<CategoryGoal>,
}

impl XpState {
    /// Empty collections plus a blank goal per category for `year`.
    pub fn seeded(year: i32) -> Self {
        Self {
            category_goals: category::list()
                .iter()
                .map(|config| CategoryGoal {
                    id: next_id(),
                    year,
                    category_id: config.id,
                    goal_text: String::new(),
                })
                .collect(),
            ..Self::default()
        }
    }

    /// Parses a snapshot payload.
    pub fn from_json(payload: &str) -> serde_json::Result<Self> {
        serde_json::from_str(payload)
    }

    /// Serializes the snapshot payload.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::XpState;
    use crate::model::category::list;

    #[test]
    fn seeded_state_has_one_blank_goal_per_category() {
        let state = XpState::seeded(2026);
        assert!(state.monthly_reviews.is_empty());
        assert!(state.bonus_quests.is_empty());
        assert!(state.capsule_entries.is_empty());
        assert_eq!(state.category_goals.len(), list().len());
        for (goal, config) in state.category_goals.iter().zip(list()) {
            assert_eq!(goal.year, 2026);
            assert_eq!(goal.category_id, config.id);
            assert!(goal.goal_text.is_empty());
        }
    }

    #[test]
    fn missing_collections_default_to_empty() {
        let state = XpState::from_json(r#"{"bonusQuests":[]}"#).unwrap();
        assert_eq!(state, XpState::default());
    }

    #[test]
    fn undecodable_records_are_skipped_individually() {
        let state = XpState::from_json(
            r#"{
                "monthlyReviews": [
                    {"id":"r1","year":2026,"month":3,"categoryId":"career","xpScore":2,"whatIDid":"kept"},
                    {"id":"r2","year":2026,"month":3,"categoryId":"travel","xpScore":2}
                ],
                "bonusQuests": [{"id":"q1","title":"no award"}],
                "capsuleEntries": null
            }"#,
        )
        .unwrap();
        assert_eq!(state.monthly_reviews.len(), 1);
        assert_eq!(state.monthly_reviews[0].what_i_did, "kept");
        assert!(state.bonus_quests.is_empty());
        assert!(state.capsule_entries.is_empty());
    }

    #[test]
    fn malformed_payload_is_an_error() {
        assert!(XpState::from_json("{not json").is_err());
        assert!(XpState::from_json(r#"{"monthlyReviews":"nope"}"#).is_err());
    }
}
