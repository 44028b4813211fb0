//! XP domain clamps.
//!
//! Pure and total: out-of-range input is clamped, never rejected.

/// Lowest monthly review score.
pub const REVIEW_SCORE_MIN: u8 = 0;
/// Highest monthly review score.
pub const REVIEW_SCORE_MAX: u8 = 3;
/// Lowest bonus quest award.
pub const QUEST_XP_MIN: u8 = 1;
/// Highest bonus quest award.
pub const QUEST_XP_MAX: u8 = 3;

/// Clamps a monthly review score into `0..=3`.
pub fn clamp_review_score(value: i64) -> u8 {
    value.clamp(i64::from(REVIEW_SCORE_MIN), i64::from(REVIEW_SCORE_MAX)) as u8
}

/// Clamps a bonus quest award into `1..=3`.
pub fn clamp_quest_xp(value: i64) -> u8 {
    value.clamp(i64::from(QUEST_XP_MIN), i64::from(QUEST_XP_MAX)) as u8
}
