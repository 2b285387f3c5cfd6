//! Tessera Server - HTTP surface for the configuration store
//!
//! This crate provides:
//! - The v1 route table and request handlers
//! - Tenant/actor header extraction
//! - Error-to-status-code mapping

pub mod api;
pub mod error;
pub mod model;

pub use api::routes;
