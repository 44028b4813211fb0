//! Storage port and persistence adapters.
//!
//! # Responsibility
//! - Define the `load()/save(snapshot)` contract the store persists through.
//! - Provide SQLite, JSON file and in-memory implementations.
//!
//! # Invariants
//! - Adapters store exactly one opaque payload under one fixed key.
//! - Adapters never interpret the payload; parsing belongs to the store.

pub mod snapshot_repo;
