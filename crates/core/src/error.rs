//! Error model for the report run.
//!
//! Each port has its own error enum so callers can tell recoverable per-item
//! failures (an instance that no longer exists) from fatal ones.

use thiserror::Error;

use crate::id::InstanceId;

/// Result type used by the report generator.
pub type ReportResult<T> = Result<T, ReportError>;

/// Failure while listing backup jobs.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// The backup service rejected or failed the call.
    #[error("backup service error: {0}")]
    Service(String),

    /// The service answered with a record missing required fields.
    #[error("malformed backup job: {0}")]
    Malformed(String),
}

/// Failure while describing a compute instance.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// No instance matches the identifier (e.g. it was terminated).
    #[error("instance not found: {0}")]
    NotFound(InstanceId),

    /// Any other directory failure (permissions, throttling, bad response).
    #[error("instance lookup failed: {0}")]
    Service(String),
}

impl LookupError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, LookupError::NotFound(_))
    }
}

/// Failure while delivering the report email.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DeliveryError {
    /// The mail service refused the message (unverified address, bad input).
    #[error("email rejected: {0}")]
    Rejected(String),

    #[error("email service error: {0}")]
    Service(String),
}

/// Fatal error for one report run.
///
/// The `Display` text is what ends up in the failure body returned to the
/// caller, so keep messages human-readable.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReportError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error(transparent)]
    Delivery(#[from] DeliveryError),
}
