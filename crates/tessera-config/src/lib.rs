//! Tessera Config - Configuration entry store core
//!
//! This crate provides:
//! - Entry CRUD with the one-enabled-entry-per-scope-key invariant
//! - The in-memory query engine (predicate filter, sort, facets)
//! - The append-only audit trail written alongside every mutation

pub mod model;
pub mod query;
pub mod service;

// Re-export commonly used types
pub use model::*;
pub use service::ScopeLocks;
