//! Display-order helpers over raw collections.
//!
//! Sorting here is stable, so records with equal dates keep collection
//! order (newest-added first, since adds prepend). Undated records sort last.

use crate::model::category;
use crate::model::quest::BonusQuest;
use crate::model::review::{MonthlyCategoryReview, ReviewKey};

/// One review per registry category for a month, in registry order.
///
/// Missing reviews are replaced by zero-valued placeholders whose id is
/// `{year}-{month}-{category}`. Placeholders are never persisted.
pub fn month_sheet(
    year: i32,
    month: u32,
    reviews: &[MonthlyCategoryReview],
) -> Vec<MonthlyCategoryReview> {
    category::list()
        .iter()
        .map(|config| {
            let key = ReviewKey {
                year,
                month,
                category_id: config.id,
            };
            reviews
                .iter()
                .find(|review| review.key() == key)
                .cloned()
                .unwrap_or_else(|| {
                    MonthlyCategoryReview::blank_with_id(
                        format!("{year}-{month}-{}", config.id),
                        key,
                    )
                })
        })
        .collect()
}

/// Quests sorted by date, newest first.
pub fn quests_by_date_desc(quests: &[BonusQuest]) -> Vec<&BonusQuest> {
    let mut sorted: Vec<_> = quests.iter().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted
}
