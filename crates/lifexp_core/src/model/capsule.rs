//! Year capsule entry model.
//!
//! # Responsibility
//! - Define free-form memory/reflection records and their type catalog.
//! - Parse comma-separated tag input.
//!
//! # Invariants
//! - `year` is denormalized at creation time and never re-derived from `date`.
//! - Tag order is preserved as entered.

use crate::model::category::{deserialize_optional_category, CategoryId};
use crate::model::id::RecordId;
use crate::model::lenient::optional_date;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Capsule entry kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapsuleEntryType {
    Memory,
    Win,
    Lesson,
    Dream,
    Quote,
    Other,
}

impl CapsuleEntryType {
    /// All kinds in picker order.
    pub const ALL: [Self; 6] = [
        Self::Memory,
        Self::Win,
        Self::Lesson,
        Self::Dream,
        Self::Quote,
        Self::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::Win => "win",
            Self::Lesson => "lesson",
            Self::Dream => "dream",
            Self::Quote => "quote",
            Self::Other => "other",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Memory => "Memory",
            Self::Win => "Win",
            Self::Lesson => "Lesson",
            Self::Dream => "Dream",
            Self::Quote => "Quote",
            Self::Other => "Other",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::Memory => "🧠",
            Self::Win => "🏆",
            Self::Lesson => "📘",
            Self::Dream => "💭",
            Self::Quote => "📝",
            Self::Other => "✨",
        }
    }
}

/// Free-form memory or reflection pinned to a year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearCapsuleEntry {
    pub id: RecordId,
    /// `None` when the stored date was blank or unreadable.
    #[serde(default, with = "optional_date")]
    pub date: Option<NaiveDate>,
    pub year: i32,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_optional_category"
    )]
    pub category_id: Option<CategoryId>,
    /// Serialized as `type` to match the snapshot schema.
    #[serde(rename = "type")]
    pub kind: CapsuleEntryType,
    #[serde(default)]
    pub tags: Vec<String>,
    pub content: String,
}

/// Capsule submission without an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCapsuleEntry {
    pub date: NaiveDate,
    /// Defaults to the year of `date`; may be overridden before submission.
    pub year: i32,
    pub category_id: Option<CategoryId>,
    pub kind: CapsuleEntryType,
    pub tags: Vec<String>,
    pub content: String,
}

impl NewCapsuleEntry {
    pub fn new(date: NaiveDate, kind: CapsuleEntryType, content: impl Into<String>) -> Self {
        Self {
            date,
            year: date.year(),
            category_id: None,
            kind,
            tags: Vec::new(),
            content: content.into(),
        }
    }

    pub fn with_category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }
}

/// Splits comma-separated tag input, trimming and dropping empty items.
pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}
