//! Tessera Persistence - Database entities and migrations
//!
//! This crate provides:
//! - sea-orm entities for the entry and audit collections
//! - The schema migration run at server startup (MySQL, PostgreSQL, SQLite)

pub mod entity;
pub mod migration;

pub use migration::Migrator;
