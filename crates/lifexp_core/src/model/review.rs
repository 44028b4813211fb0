//! Monthly category review model.
//!
//! # Responsibility
//! - Define the per-(year, month, category) self-assessment record.
//! - Define partial update semantics used by upserts.
//!
//! # Invariants
//! - `(year, month, category_id)` is the natural key; `id` is a surrogate.
//! - `xp_score` is always within `0..=3` once written through an update.

use crate::model::category::CategoryId;
use crate::model::id::{next_id, RecordId};
use crate::model::lenient;
use crate::model::xp::clamp_review_score;
use serde::{Deserialize, Serialize};

/// Natural key of a monthly review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ReviewKey {
    pub year: i32,
    /// Calendar month, `1..=12`.
    pub month: u32,
    pub category_id: CategoryId,
}

/// One category's self-assessment for one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyCategoryReview {
    pub id: RecordId,
    pub year: i32,
    pub month: u32,
    pub category_id: CategoryId,
    #[serde(deserialize_with = "lenient::review_score")]
    pub xp_score: u8,
    #[serde(default)]
    pub what_i_did: String,
    #[serde(default)]
    pub what_improved: String,
    #[serde(default)]
    pub what_frustrated: String,
    #[serde(default)]
    pub next_month_intent: String,
}

impl MonthlyCategoryReview {
    /// Zero-valued template for a key with a fresh id.
    pub fn blank(key: ReviewKey) -> Self {
        Self::blank_with_id(next_id(), key)
    }

    /// Zero-valued template for a key with a caller-provided id.
    pub fn blank_with_id(id: RecordId, key: ReviewKey) -> Self {
        Self {
            id,
            year: key.year,
            month: key.month,
            category_id: key.category_id,
            xp_score: 0,
            what_i_did: String::new(),
            what_improved: String::new(),
            what_frustrated: String::new(),
            next_month_intent: String::new(),
        }
    }

    pub fn key(&self) -> ReviewKey {
        ReviewKey {
            year: self.year,
            month: self.month,
            category_id: self.category_id,
        }
    }
}

/// Partial update for a monthly review.
///
/// `None` fields leave the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewUpdate {
    /// Raw score; clamped into `0..=3` when applied.
    pub xp_score: Option<i64>,
    pub what_i_did: Option<String>,
    pub what_improved: Option<String>,
    pub what_frustrated: Option<String>,
    pub next_month_intent: Option<String>,
}

impl ReviewUpdate {
    pub fn score(value: i64) -> Self {
        Self {
            xp_score: Some(value),
            ..Self::default()
        }
    }

    pub fn what_i_did(text: impl Into<String>) -> Self {
        Self {
            what_i_did: Some(text.into()),
            ..Self::default()
        }
    }

    /// Merges provided fields into `review`.
    pub fn apply_to(&self, review: &mut MonthlyCategoryReview) {
        if let Some(score) = self.xp_score {
            review.xp_score = clamp_review_score(score);
        }
        if let Some(text) = &self.what_i_did {
            review.what_i_did.clone_from(text);
        }
        if let Some(text) = &self.what_improved {
            review.what_improved.clone_from(text);
        }
        if let Some(text) = &self.what_frustrated {
            review.what_frustrated.clone_from(text);
        }
        if let Some(text) = &self.next_month_intent {
            review.next_month_intent.clone_from(text);
        }
    }
}
