//! Domain model for the XP tracker.
//!
//! # Responsibility
//! - Define the category registry, record shapes and XP clamps.
//! - Define the snapshot document persisted by the store.
//!
//! # Invariants
//! - Every persisted record carries an opaque `RecordId`.
//! - Records reference categories by `CategoryId` only; display metadata is
//!   looked up from the registry, never stored.

pub mod capsule;
pub mod category;
pub mod goal;
pub mod id;
pub(crate) mod lenient;
pub mod quest;
pub mod review;
pub mod state;
pub mod xp;
