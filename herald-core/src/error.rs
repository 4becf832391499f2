//! Error types for herald-core.

use thiserror::Error;

/// Configuration values that fail validation before any I/O happens.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// The status is not one of success, pending, failure, error.
    #[error("unknown status: {0}")]
    UnknownStatus(String),

    /// A required `source` field was left empty.
    #[error("missing required source field: {0}")]
    MissingSourceField(&'static str),

    /// `source.repository` is not of the form `owner/name`.
    #[error("invalid repository '{0}'; expected owner/name")]
    InvalidRepository(String),
}
