//! Bonus quest model.
//!
//! Quests are append-only: created on submission, removed by id, never
//! edited in place.

use crate::model::category::{deserialize_optional_category, CategoryId};
use crate::model::id::RecordId;
use crate::model::lenient::{self, optional_date};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// An ad-hoc achievement worth `1..=3` XP.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BonusQuest {
    pub id: RecordId,
    /// `None` when the stored date was blank or unreadable.
    #[serde(default, with = "optional_date")]
    pub date: Option<NaiveDate>,
    pub title: String,
    #[serde(default)]
    pub notes: String,
    #[serde(deserialize_with = "lenient::quest_xp")]
    pub xp_award: u8,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_optional_category"
    )]
    pub category_id: Option<CategoryId>,
}

impl BonusQuest {
    /// Calendar year the quest counts towards; undated quests count nowhere.
    pub fn year(&self) -> Option<i32> {
        self.date.map(|date| date.year())
    }
}

/// Quest submission without an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBonusQuest {
    pub date: NaiveDate,
    pub title: String,
    pub notes: String,
    /// Raw award; clamped into `1..=3` by the store.
    pub xp_award: i64,
    pub category_id: Option<CategoryId>,
}

impl NewBonusQuest {
    pub fn new(date: NaiveDate, title: impl Into<String>, xp_award: i64) -> Self {
        Self {
            date,
            title: title.into(),
            notes: String::new(),
            xp_award,
            category_id: None,
        }
    }

    pub fn with_category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }
}
