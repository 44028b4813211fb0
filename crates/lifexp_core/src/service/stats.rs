//! Derived XP aggregates.
//!
//! # Responsibility
//! - Compute per-category yearly totals, averages and progress labels.
//! - Compute yearly and monthly superlatives.
//!
//! # Invariants
//! - Pure: inputs are borrowed, nothing is cached or mutated.
//! - Average is `0.0` when no month was reviewed.
//! - Ties for most/least resolve to the earliest category in registry order.

use crate::model::category::{self, CategoryId};
use crate::model::quest::BonusQuest;
use crate::model::review::MonthlyCategoryReview;
use crate::service::timeline::month_sheet;
use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};

const BREAKTHROUGH_MIN_AVERAGE: f64 = 2.5;
const GROWING_MIN_AVERAGE: f64 = 2.0;
const STABLE_MIN_AVERAGE: f64 = 1.0;

/// Qualitative label for an average monthly score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressLabel {
    Breakthrough,
    Growing,
    Stable,
    NeedsLove,
}

impl ProgressLabel {
    pub fn from_average(average: f64) -> Self {
        if average >= BREAKTHROUGH_MIN_AVERAGE {
            Self::Breakthrough
        } else if average >= GROWING_MIN_AVERAGE {
            Self::Growing
        } else if average >= STABLE_MIN_AVERAGE {
            Self::Stable
        } else {
            Self::NeedsLove
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Breakthrough => "Breakthrough",
            Self::Growing => "Growing",
            Self::Stable => "Stable",
            Self::NeedsLove => "Needs love",
        }
    }
}

impl Display for ProgressLabel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One category's aggregates for one year.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryStats {
    pub category_id: CategoryId,
    /// Distinct months with a stored review.
    pub months_reviewed: usize,
    pub monthly_xp_total: u32,
    pub bonus_xp: u32,
    pub total_xp: u32,
    /// `monthly_xp_total / months_reviewed`, or `0.0` with no reviews.
    pub average: f64,
    pub label: ProgressLabel,
}

/// Yearly totals across categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearSummary {
    pub total_xp: u32,
    /// Category with the highest total XP.
    pub most_leveled: Option<CategoryId>,
    /// Category with the lowest total XP.
    pub needs_attention: Option<CategoryId>,
}

/// Totals for one month across categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthSummary {
    pub total_xp: u32,
    pub strongest: Option<CategoryId>,
    pub weakest: Option<CategoryId>,
}

/// Computes stats for every registry category, in registry order.
pub fn category_stats(
    year: i32,
    reviews: &[MonthlyCategoryReview],
    quests: &[BonusQuest],
) -> Vec<CategoryStats> {
    category::list()
        .iter()
        .map(|config| stats_for(config.id, year, reviews, quests))
        .collect()
}

fn stats_for(
    category_id: CategoryId,
    year: i32,
    reviews: &[MonthlyCategoryReview],
    quests: &[BonusQuest],
) -> CategoryStats {
    let mut months = BTreeSet::new();
    let mut monthly_xp_total = 0u32;
    for review in reviews
        .iter()
        .filter(|review| review.year == year && review.category_id == category_id)
    {
        months.insert(review.month);
        monthly_xp_total += u32::from(review.xp_score);
    }

    let bonus_xp = quests
        .iter()
        .filter(|quest| quest.category_id == Some(category_id) && quest.year() == Some(year))
        .map(|quest| u32::from(quest.xp_award))
        .sum::<u32>();

    let months_reviewed = months.len();
    let average = if months_reviewed > 0 {
        f64::from(monthly_xp_total) / months_reviewed as f64
    } else {
        0.0
    };

    CategoryStats {
        category_id,
        months_reviewed,
        monthly_xp_total,
        bonus_xp,
        total_xp: monthly_xp_total + bonus_xp,
        average,
        label: ProgressLabel::from_average(average),
    }
}

/// Summarizes a year from `category_stats` output.
pub fn year_summary(stats: &[CategoryStats]) -> YearSummary {
    YearSummary {
        total_xp: stats.iter().map(|stat| stat.total_xp).sum(),
        most_leveled: first_extreme(stats, |stat| stat.total_xp, |a, b| a > b)
            .map(|stat| stat.category_id),
        needs_attention: first_extreme(stats, |stat| stat.total_xp, |a, b| a < b)
            .map(|stat| stat.category_id),
    }
}

/// Summarizes one month; unreviewed categories count as zero.
pub fn month_summary(year: i32, month: u32, reviews: &[MonthlyCategoryReview]) -> MonthSummary {
    let sheet = month_sheet(year, month, reviews);
    let score = |review: &MonthlyCategoryReview| u32::from(review.xp_score);
    MonthSummary {
        total_xp: sheet.iter().map(score).sum(),
        strongest: first_extreme(&sheet, score, |a, b| a > b).map(|review| review.category_id),
        weakest: first_extreme(&sheet, score, |a, b| a < b).map(|review| review.category_id),
    }
}

/// Returns the first item whose key beats every earlier one.
///
/// Only a strictly better key replaces the current pick, so ties keep the
/// earliest item.
fn first_extreme<T>(
    items: &[T],
    key: impl Fn(&T) -> u32,
    beats: impl Fn(u32, u32) -> bool,
) -> Option<&T> {
    let mut best: Option<&T> = None;
    for item in items {
        match best {
            Some(current) if !beats(key(item), key(current)) => {}
            _ => best = Some(item),
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::{first_extreme, ProgressLabel};

    #[test]
    fn label_thresholds_are_inclusive() {
        assert_eq!(ProgressLabel::from_average(3.0), ProgressLabel::Breakthrough);
        assert_eq!(ProgressLabel::from_average(2.5), ProgressLabel::Breakthrough);
        assert_eq!(ProgressLabel::from_average(2.49), ProgressLabel::Growing);
        assert_eq!(ProgressLabel::from_average(2.0), ProgressLabel::Growing);
        assert_eq!(ProgressLabel::from_average(1.0), ProgressLabel::Stable);
        assert_eq!(ProgressLabel::from_average(0.99), ProgressLabel::NeedsLove);
        assert_eq!(ProgressLabel::from_average(0.0), ProgressLabel::NeedsLove);
        assert_eq!(ProgressLabel::NeedsLove.to_string(), "Needs love");
    }

    #[test]
    fn first_extreme_keeps_earliest_on_ties() {
        let items = [(0, 2), (1, 5), (2, 5), (3, 1), (4, 1)];
        let max = first_extreme(&items, |item| item.1, |a, b| a > b).unwrap();
        let min = first_extreme(&items, |item| item.1, |a, b| a < b).unwrap();
        assert_eq!(max.0, 1);
        assert_eq!(min.0, 3);
        assert!(first_extreme(&[] as &[(u8, u32)], |item| item.1, |a, b| a > b).is_none());
    }
}
