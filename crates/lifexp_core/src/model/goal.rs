//! Yearly category goal model.

use crate::model::category::CategoryId;
use crate::model::id::RecordId;
use serde::{Deserialize, Serialize};

/// Free-text goal for one category in one year.
///
/// `(year, category_id)` is the natural key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryGoal {
    pub id: RecordId,
    pub year: i32,
    pub category_id: CategoryId,
    #[serde(default)]
    pub goal_text: String,
}
