//! Capsule entry filtering and grouping.
//!
//! # Invariants
//! - Filters are conjunctive; an unset filter matches everything.
//! - Search is a case-insensitive substring match over content or any tag.
//! - Results are ordered by date descending; equal dates keep collection order
//!   and undated entries come last.

use crate::model::capsule::{CapsuleEntryType, YearCapsuleEntry};
use crate::model::category::CategoryId;
use chrono::Datelike;

/// Bucket month used for entries without a date.
pub const UNDATED_MONTH: u32 = 0;

/// Capsule list filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapsuleFilter {
    pub year: Option<i32>,
    pub kind: Option<CapsuleEntryType>,
    pub category: Option<CategoryId>,
    /// Empty string disables search.
    pub search: String,
}

impl CapsuleFilter {
    pub fn matches(&self, entry: &YearCapsuleEntry) -> bool {
        if self.year.is_some_and(|year| entry.year != year) {
            return false;
        }
        if self.kind.is_some_and(|kind| entry.kind != kind) {
            return false;
        }
        if self.category.is_some() && entry.category_id != self.category {
            return false;
        }
        if self.search.is_empty() {
            return true;
        }

        let term = self.search.to_lowercase();
        entry.content.to_lowercase().contains(&term)
            || entry
                .tags
                .iter()
                .any(|tag| tag.to_lowercase().contains(&term))
    }
}

/// Entries of one calendar month (by entry date).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthBucket<'a> {
    /// `1..=12`, or `UNDATED_MONTH` for entries without a date.
    pub month: u32,
    pub entries: Vec<&'a YearCapsuleEntry>,
}

/// Applies `filter` and sorts matches by date, newest first.
pub fn filter_entries<'a>(
    entries: &'a [YearCapsuleEntry],
    filter: &CapsuleFilter,
) -> Vec<&'a YearCapsuleEntry> {
    let mut matched: Vec<_> = entries.iter().filter(|entry| filter.matches(entry)).collect();
    matched.sort_by(|a, b| b.date.cmp(&a.date));
    matched
}

/// Buckets entries by month of their date, months descending, undated last.
///
/// Entry order inside a bucket follows the input order.
pub fn group_by_month<'a>(entries: &[&'a YearCapsuleEntry]) -> Vec<MonthBucket<'a>> {
    let mut buckets: Vec<MonthBucket<'a>> = Vec::new();
    for entry in entries {
        let month = entry.date.map_or(UNDATED_MONTH, |date| date.month());
        match buckets.iter_mut().find(|bucket| bucket.month == month) {
            Some(bucket) => bucket.entries.push(*entry),
            None => buckets.push(MonthBucket {
                month,
                entries: vec![*entry],
            }),
        }
    }
    buckets.sort_by(|a, b| b.month.cmp(&a.month));
    buckets
}

/// Distinct entry years in first-seen order.
pub fn capsule_years(entries: &[YearCapsuleEntry]) -> Vec<i32> {
    let mut years = Vec::new();
    for entry in entries {
        if !years.contains(&entry.year) {
            years.push(entry.year);
        }
    }
    years
}

#[cfg(test)]
mod tests {
    use super::{capsule_years, filter_entries, group_by_month, CapsuleFilter, UNDATED_MONTH};
    use crate::model::capsule::{CapsuleEntryType, YearCapsuleEntry};
    use crate::model::category::CategoryId;
    use chrono::NaiveDate;

    fn entry(
        id: &str,
        date: (i32, u32, u32),
        kind: CapsuleEntryType,
        category_id: Option<CategoryId>,
        tags: &[&str],
        content: &str,
    ) -> YearCapsuleEntry {
        YearCapsuleEntry {
            id: id.to_string(),
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2),
            year: date.0,
            category_id,
            kind,
            tags: tags.iter().map(|tag| tag.to_string()).collect(),
            content: content.to_string(),
        }
    }

    fn sample() -> Vec<YearCapsuleEntry> {
        vec![
            entry("a", (2026, 2, 14), CapsuleEntryType::Memory, None, &["Joy"], "Dinner"),
            entry(
                "b",
                (2026, 5, 1),
                CapsuleEntryType::Win,
                Some(CategoryId::Career),
                &[],
                "Promotion landed",
            ),
            entry("c", (2025, 2, 3), CapsuleEntryType::Lesson, None, &["travel"], "Pack light"),
            entry("d", (2026, 2, 20), CapsuleEntryType::Quote, None, &[], "Enjoy the journey"),
        ]
    }

    fn ids(entries: &[&YearCapsuleEntry]) -> Vec<String> {
        entries.iter().map(|entry| entry.id.clone()).collect()
    }

    #[test]
    fn default_filter_matches_everything_sorted_by_date() {
        let entries = sample();
        let matched = filter_entries(&entries, &CapsuleFilter::default());
        assert_eq!(ids(&matched), vec!["b", "d", "a", "c"]);
    }

    #[test]
    fn filters_combine() {
        let entries = sample();
        let by_year = CapsuleFilter {
            year: Some(2026),
            ..CapsuleFilter::default()
        };
        assert_eq!(ids(&filter_entries(&entries, &by_year)), vec!["b", "d", "a"]);

        let by_category = CapsuleFilter {
            category: Some(CategoryId::Career),
            ..CapsuleFilter::default()
        };
        assert_eq!(ids(&filter_entries(&entries, &by_category)), vec!["b"]);

        let by_kind_and_year = CapsuleFilter {
            year: Some(2025),
            kind: Some(CapsuleEntryType::Win),
            ..CapsuleFilter::default()
        };
        assert!(filter_entries(&entries, &by_kind_and_year).is_empty());
    }

    #[test]
    fn search_matches_content_or_tags_case_insensitively() {
        let entries = sample();
        let search = |term: &str| CapsuleFilter {
            search: term.to_string(),
            ..CapsuleFilter::default()
        };
        assert_eq!(ids(&filter_entries(&entries, &search("JOY"))), vec!["d", "a"]);
        assert_eq!(ids(&filter_entries(&entries, &search("trav"))), vec!["c"]);
        assert!(filter_entries(&entries, &search("nothing")).is_empty());
    }

    #[test]
    fn groups_by_month_descending() {
        let entries = sample();
        let matched = filter_entries(&entries, &CapsuleFilter::default());
        let buckets = group_by_month(&matched);
        let months: Vec<_> = buckets.iter().map(|bucket| bucket.month).collect();
        assert_eq!(months, vec![5, 2]);
        assert_eq!(ids(&buckets[1].entries), vec!["d", "a", "c"]);
    }

    #[test]
    fn undated_entries_group_into_a_trailing_bucket() {
        let mut entries = sample();
        entries[2].date = None;
        let matched = filter_entries(&entries, &CapsuleFilter::default());
        assert_eq!(ids(&matched), vec!["b", "d", "a", "c"]);

        let buckets = group_by_month(&matched);
        let months: Vec<_> = buckets.iter().map(|bucket| bucket.month).collect();
        assert_eq!(months, vec![5, 2, UNDATED_MONTH]);
        assert_eq!(ids(&buckets[2].entries), vec!["c"]);
    }

    #[test]
    fn years_are_distinct_in_first_seen_order() {
        assert_eq!(capsule_years(&sample()), vec![2026, 2025]);
    }
}
