//! Core use-case services.
//!
//! # Responsibility
//! - Own tracker state and its persistence side effects (`xp_store`).
//! - Derive read-side projections without touching state (`stats`,
//!   `timeline`, `capsule_query`).

pub mod capsule_query;
pub mod stats;
pub mod timeline;
pub mod xp_store;
