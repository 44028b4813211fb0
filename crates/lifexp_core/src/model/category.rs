//! Life category registry.
//!
//! # Responsibility
//! - Define the fixed catalog of life categories that XP is tracked against.
//! - Provide ordered listing and id lookup.
//!
//! # Invariants
//! - The registry is immutable for the process lifetime.
//! - `list()` order is stable and is the tie-break order for aggregates.
//! - Unknown ids are an absence, never an error.

use serde::{Deserialize, Deserializer, Serialize};

/// Identifier of one registry category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryId {
    Career,
    Emotional,
    Health,
    Wealth,
    Relationships,
    Creativity,
}

impl CategoryId {
    /// Stable storage/display key, e.g. `wealth`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Career => "career",
            Self::Emotional => "emotional",
            Self::Health => "health",
            Self::Wealth => "wealth",
            Self::Relationships => "relationships",
            Self::Creativity => "creativity",
        }
    }

    /// Parses a storage key. Returns `None` for unknown values.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "career" => Some(Self::Career),
            "emotional" => Some(Self::Emotional),
            "health" => Some(Self::Health),
            "wealth" => Some(Self::Wealth),
            "relationships" => Some(Self::Relationships),
            "creativity" => Some(Self::Creativity),
            _ => None,
        }
    }

    /// Registry entry for this id.
    pub fn config(self) -> &'static CategoryConfig {
        // Variant declaration order matches registry order.
        &CATEGORIES[self as usize]
    }
}

impl std::fmt::Display for CategoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static display metadata for one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryConfig {
    pub id: CategoryId,
    pub label: &'static str,
    pub icon: &'static str,
    /// CSS-style hex color, e.g. `#2563eb`.
    pub color: &'static str,
}

static CATEGORIES: [CategoryConfig; 6] = [
    CategoryConfig {
        id: CategoryId::Career,
        label: "Career & Skills",
        icon: "💼",
        color: "#2563eb",
    },
    CategoryConfig {
        id: CategoryId::Emotional,
        label: "Emotional & Mental",
        icon: "🧘",
        color: "#8b5cf6",
    },
    CategoryConfig {
        id: CategoryId::Health,
        label: "Health & Body",
        icon: "🏋️",
        color: "#16a34a",
    },
    CategoryConfig {
        id: CategoryId::Wealth,
        label: "Wealth & Money",
        icon: "💰",
        color: "#eab308",
    },
    CategoryConfig {
        id: CategoryId::Relationships,
        label: "Relationships & Connection",
        icon: "🫶",
        color: "#f97316",
    },
    CategoryConfig {
        id: CategoryId::Creativity,
        label: "Creativity & Projects",
        icon: "🎥",
        color: "#ec4899",
    },
];

/// Returns all categories in registry order.
pub fn list() -> &'static [CategoryConfig] {
    &CATEGORIES
}

/// Looks up a category by its storage key.
///
/// Callers render `None` as "unassigned".
pub fn by_id(id: &str) -> Option<&'static CategoryConfig> {
    CategoryId::parse(id).map(CategoryId::config)
}

/// Deserializes an optional category, mapping unknown keys to `None`.
///
/// Used on optional `categoryId` fields so a stale or foreign key does not
/// invalidate the whole snapshot.
pub(crate) fn deserialize_optional_category<'de, D>(
    deserializer: D,
) -> Result<Option<CategoryId>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(CategoryId::parse))
}
