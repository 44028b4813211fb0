//! Record identifier generation.
//!
//! # Invariants
//! - Generated ids are unique within the process and practically unique
//!   across restarts (random v4 UUIDs).
//! - Ids are opaque: callers must not parse or order them.

use uuid::Uuid;

/// Opaque surrogate identifier shared by every persisted record.
///
/// Kept as a plain string so snapshots written by other clients load as-is.
pub type RecordId = String;

/// Returns a fresh record identifier.
pub fn next_id() -> RecordId {
    Uuid::new_v4().to_string()
}
