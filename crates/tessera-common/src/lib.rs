//! Tessera Common - Shared types and constants
//!
//! This crate provides the foundational types used across all Tessera components:
//! - The application error taxonomy
//! - Common constants (headers, defaults)

pub mod error;

// Re-exports for convenience
pub use error::TesseraError;

/// Header carrying the tenant identifier, supplied by the transport layer
pub const TENANT_HEADER: &str = "x-tenant-id";

/// Header carrying the acting user identifier for audit attribution
pub const USER_HEADER: &str = "x-user-id";

/// Default page size for list requests when the client omits `limit`
pub const DEFAULT_PAGE_LIMIT: u64 = 10;

/// Default number of facet values returned per requested facet field
pub const DEFAULT_FACET_COUNT: usize = 5;
