//! Error types for the site-selection engine.
//!
//! Only genuine input errors surface as [`SitioError`]. Data-quality
//! conditions (empty catalogs, overlapping parcels, regions that never join a
//! cluster) are absorbed into result shapes (empty lists, `None`) so an
//! interactive session never fails over one bad record.

use thiserror::Error;

/// Errors produced by the engine's public operations.
#[derive(Debug, Error)]
pub enum SitioError {
    /// Invalid input rejected at the call boundary.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The catalog provider failed to produce a dataset for the given scope.
    #[error("Catalog error: {0}")]
    Catalog(String),
}

/// Convenience result type used throughout the crate.
pub type Result<T> = std::result::Result<T, SitioError>;
