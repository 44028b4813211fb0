//! Best-effort snapshot field decoding.
//!
//! # Responsibility
//! - Keep one bad field or record from invalidating the whole snapshot.
//!
//! # Invariants
//! - A collection decodes every record it can; undecodable records are
//!   skipped and counted in a `warn` event, never echoed.
//! - Stored XP values are clamped into their domain on read.

use crate::model::xp::{clamp_quest_xp, clamp_review_score};
use chrono::NaiveDate;
use log::warn;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Decodes a record collection, skipping records that fail to decode.
///
/// `null` decodes as an empty collection.
pub(crate) fn records<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = Option::<Vec<serde_json::Value>>::deserialize(deserializer)?.unwrap_or_default();
    let total = raw.len();
    let decoded: Vec<T> = raw
        .into_iter()
        .filter_map(|value| serde_json::from_value(value).ok())
        .collect();

    if decoded.len() < total {
        let record = std::any::type_name::<T>()
            .rsplit("::")
            .next()
            .unwrap_or_default();
        warn!(
            "event=snapshot_decode module=model status=partial record={record} skipped={} kept={}",
            total - decoded.len(),
            decoded.len()
        );
    }
    Ok(decoded)
}

/// Reads a review score and clamps it into `0..=3`.
pub(crate) fn review_score<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    i64::deserialize(deserializer).map(clamp_review_score)
}

/// Reads a quest award and clamps it into `1..=3`.
pub(crate) fn quest_xp<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    i64::deserialize(deserializer).map(clamp_quest_xp)
}

/// `YYYY-MM-DD` dates that may be blank.
///
/// Blank or unparseable values read as `None`; `None` is written as `""`.
/// A longer ISO timestamp is accepted by its date prefix.
pub(crate) mod optional_date {
    use super::DATE_FORMAT;
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub(crate) fn serialize<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date {
            Some(date) => serializer.collect_str(&date.format(DATE_FORMAT)),
            None => serializer.serialize_str(""),
        }
    }

    pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().and_then(super::parse_date))
    }
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .ok()
        .or_else(|| {
            trimmed
                .get(..10)
                .and_then(|prefix| NaiveDate::parse_from_str(prefix, DATE_FORMAT).ok())
        })
}

#[cfg(test)]
mod tests {
    use super::parse_date;
    use chrono::NaiveDate;

    #[test]
    fn parse_date_accepts_plain_and_timestamp_forms() {
        let expected = NaiveDate::from_ymd_opt(2026, 1, 10);
        assert_eq!(parse_date("2026-01-10"), expected);
        assert_eq!(parse_date(" 2026-01-10 "), expected);
        assert_eq!(parse_date("2026-01-10T08:30:00.000Z"), expected);
    }

    #[test]
    fn parse_date_rejects_blank_and_garbage() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("soon"), None);
        assert_eq!(parse_date("2026-13-40"), None);
    }
}
