//! XP store: the single owner of tracker state.
//!
//! # Responsibility
//! - Load the snapshot through a `SnapshotRepository` at construction.
//! - Apply mutations with upsert/clamp/no-op semantics.
//! - Re-serialize the full state after every mutation.
//!
//! # Invariants
//! - At most one review per `(year, month, category)` and one goal per
//!   `(year, category)`.
//! - Construction always yields a usable state; unreadable snapshots fall
//!   back to the seeded default.
//! - In-memory state stays authoritative when a save fails.
//! - A stored snapshot that could not be read is never overwritten during
//!   the session; only an empty store is seeded on disk.

use crate::model::capsule::{NewCapsuleEntry, YearCapsuleEntry};
use crate::model::category::CategoryId;
use crate::model::goal::CategoryGoal;
use crate::model::id::{next_id, RecordId};
use crate::model::quest::{BonusQuest, NewBonusQuest};
use crate::model::review::{MonthlyCategoryReview, ReviewKey, ReviewUpdate};
use crate::model::state::XpState;
use crate::model::xp::clamp_quest_xp;
use crate::repo::snapshot_repo::SnapshotRepository;
use crate::service::stats::{self, CategoryStats, MonthSummary, YearSummary};
use crate::service::timeline;
use chrono::{Datelike, Local};
use log::{error, info, warn};

/// How the store obtained its initial state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A stored snapshot was parsed.
    Loaded,
    /// Nothing was stored; the seeded default is in use.
    Empty,
    /// The stored snapshot was not valid JSON; the seeded default is in use
    /// and the first mutation replaces the stored payload.
    Recovered(String),
    /// Storage failed to return the snapshot; the seeded default is in use
    /// and saves are suspended for the session.
    Unreadable(String),
}

const SAVES_SUSPENDED: &str = "stored data could not be read; changes are kept in memory only";

/// Owned tracker state persisted through an injected repository.
pub struct XpStore<R: SnapshotRepository> {
    repo: R,
    state: XpState,
    load_outcome: LoadOutcome,
    last_save_error: Option<String>,
}

impl<R: SnapshotRepository> XpStore<R> {
    /// Opens the store, seeding default goals for the current year.
    pub fn open(repo: R) -> Self {
        Self::open_for_year(repo, Local::now().year())
    }

    /// Opens the store, seeding default goals for `seed_year` when no
    /// usable snapshot exists.
    ///
    /// # Side effects
    /// - Writes the seeded default back only when storage was empty, so
    ///   seeded goal ids stay stable across sessions.
    /// - After a storage read error no save is attempted, so data that may
    ///   still exist is not replaced by the default.
    pub fn open_for_year(repo: R, seed_year: i32) -> Self {
        let (state, load_outcome) = match repo.load() {
            Ok(Some(payload)) => match XpState::from_json(&payload) {
                Ok(state) => {
                    info!(
                        "event=store_load module=store status=ok reviews={} quests={} capsule={} goals={}",
                        state.monthly_reviews.len(),
                        state.bonus_quests.len(),
                        state.capsule_entries.len(),
                        state.category_goals.len()
                    );
                    (state, LoadOutcome::Loaded)
                }
                Err(err) => {
                    warn!(
                        "event=store_load module=store status=fallback reason=parse_error bytes={} error={err}",
                        payload.len()
                    );
                    (
                        XpState::seeded(seed_year),
                        LoadOutcome::Recovered(err.to_string()),
                    )
                }
            },
            Ok(None) => {
                info!("event=store_load module=store status=empty seed_year={seed_year}");
                (XpState::seeded(seed_year), LoadOutcome::Empty)
            }
            Err(err) => {
                warn!(
                    "event=store_load module=store status=fallback reason=storage_error saves=suspended error={err}"
                );
                (
                    XpState::seeded(seed_year),
                    LoadOutcome::Unreadable(err.to_string()),
                )
            }
        };

        let mut store = Self {
            repo,
            state,
            load_outcome,
            last_save_error: None,
        };
        match store.load_outcome {
            LoadOutcome::Empty => store.persist(),
            LoadOutcome::Unreadable(_) => {
                store.last_save_error = Some(SAVES_SUSPENDED.to_string());
            }
            LoadOutcome::Loaded | LoadOutcome::Recovered(_) => {}
        }
        store
    }

    pub fn load_outcome(&self) -> &LoadOutcome {
        &self.load_outcome
    }

    /// Message of the most recent failed save, cleared by the next success.
    pub fn last_save_error(&self) -> Option<&str> {
        self.last_save_error.as_deref()
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn state(&self) -> &XpState {
        &self.state
    }

    pub fn monthly_reviews(&self) -> &[MonthlyCategoryReview] {
        &self.state.monthly_reviews
    }

    pub fn bonus_quests(&self) -> &[BonusQuest] {
        &self.state.bonus_quests
    }

    pub fn capsule_entries(&self) -> &[YearCapsuleEntry] {
        &self.state.capsule_entries
    }

    pub fn category_goals(&self) -> &[CategoryGoal] {
        &self.state.category_goals
    }

    pub fn review_for(&self, key: ReviewKey) -> Option<&MonthlyCategoryReview> {
        self.state
            .monthly_reviews
            .iter()
            .find(|review| review.key() == key)
    }

    pub fn goal_for(&self, year: i32, category_id: CategoryId) -> Option<&CategoryGoal> {
        self.state
            .category_goals
            .iter()
            .find(|goal| goal.year == year && goal.category_id == category_id)
    }

    /// Merges `update` into the review for `(year, month, category_id)`,
    /// creating a zero-valued one first when absent.
    pub fn upsert_monthly_review(
        &mut self,
        year: i32,
        month: u32,
        category_id: CategoryId,
        update: &ReviewUpdate,
    ) -> &MonthlyCategoryReview {
        let key = ReviewKey {
            year,
            month,
            category_id,
        };
        let reviews = &mut self.state.monthly_reviews;
        let index = match reviews.iter().position(|review| review.key() == key) {
            Some(index) => index,
            None => {
                reviews.push(MonthlyCategoryReview::blank(key));
                reviews.len() - 1
            }
        };
        update.apply_to(&mut reviews[index]);

        self.persist();
        &self.state.monthly_reviews[index]
    }

    /// Removes the review with `id`. Returns whether one was removed.
    ///
    /// A miss changes nothing and writes nothing.
    pub fn delete_monthly_review(&mut self, id: &str) -> bool {
        let removed = remove_by_id(&mut self.state.monthly_reviews, id, |review| &review.id);
        if removed {
            self.persist();
        }
        removed
    }

    /// Replaces the goal text for `(year, category_id)`, keeping its id.
    pub fn set_category_goal(
        &mut self,
        year: i32,
        category_id: CategoryId,
        goal_text: impl Into<String>,
    ) -> &CategoryGoal {
        let goal_text = goal_text.into();
        let goals = &mut self.state.category_goals;
        let index = match goals
            .iter()
            .position(|goal| goal.year == year && goal.category_id == category_id)
        {
            Some(index) => {
                goals[index].goal_text = goal_text;
                index
            }
            None => {
                goals.push(CategoryGoal {
                    id: next_id(),
                    year,
                    category_id,
                    goal_text,
                });
                goals.len() - 1
            }
        };

        self.persist();
        &self.state.category_goals[index]
    }

    /// Stores a quest at the front of the collection with a clamped award.
    pub fn add_bonus_quest(&mut self, quest: NewBonusQuest) -> RecordId {
        let id = next_id();
        self.state.bonus_quests.insert(
            0,
            BonusQuest {
                id: id.clone(),
                date: Some(quest.date),
                title: quest.title,
                notes: quest.notes,
                xp_award: clamp_quest_xp(quest.xp_award),
                category_id: quest.category_id,
            },
        );
        self.persist();
        id
    }

    pub fn delete_bonus_quest(&mut self, id: &str) -> bool {
        let removed = remove_by_id(&mut self.state.bonus_quests, id, |quest| &quest.id);
        if removed {
            self.persist();
        }
        removed
    }

    /// Stores a capsule entry at the front of the collection.
    pub fn add_capsule_entry(&mut self, entry: NewCapsuleEntry) -> RecordId {
        let id = next_id();
        self.state.capsule_entries.insert(
            0,
            YearCapsuleEntry {
                id: id.clone(),
                date: Some(entry.date),
                year: entry.year,
                category_id: entry.category_id,
                kind: entry.kind,
                tags: entry.tags,
                content: entry.content,
            },
        );
        self.persist();
        id
    }

    pub fn delete_capsule_entry(&mut self, id: &str) -> bool {
        let removed = remove_by_id(&mut self.state.capsule_entries, id, |entry| &entry.id);
        if removed {
            self.persist();
        }
        removed
    }

    pub fn category_stats(&self, year: i32) -> Vec<CategoryStats> {
        stats::category_stats(year, &self.state.monthly_reviews, &self.state.bonus_quests)
    }

    pub fn year_summary(&self, year: i32) -> YearSummary {
        stats::year_summary(&self.category_stats(year))
    }

    pub fn month_summary(&self, year: i32, month: u32) -> MonthSummary {
        stats::month_summary(year, month, &self.state.monthly_reviews)
    }

    pub fn month_sheet(&self, year: i32, month: u32) -> Vec<MonthlyCategoryReview> {
        timeline::month_sheet(year, month, &self.state.monthly_reviews)
    }

    fn persist(&mut self) {
        if matches!(self.load_outcome, LoadOutcome::Unreadable(_)) {
            info!("event=store_save module=store status=skipped reason=saves_suspended");
            self.last_save_error = Some(SAVES_SUSPENDED.to_string());
            return;
        }

        let payload = match self.state.to_json() {
            Ok(payload) => payload,
            Err(err) => {
                error!("event=store_save module=store status=error error_code=serialize_failed error={err}");
                self.last_save_error = Some(err.to_string());
                return;
            }
        };

        match self.repo.save(&payload) {
            Ok(()) => {
                info!(
                    "event=store_save module=store status=ok bytes={}",
                    payload.len()
                );
                self.last_save_error = None;
            }
            Err(err) => {
                error!("event=store_save module=store status=error error_code=save_failed error={err}");
                self.last_save_error = Some(err.to_string());
            }
        }
    }
}

fn remove_by_id<T>(items: &mut Vec<T>, id: &str, id_of: impl Fn(&T) -> &RecordId) -> bool {
    let before = items.len();
    items.retain(|item| id_of(item) != id);
    items.len() != before
}
