//! Error types for board domain validation.

use thiserror::Error;

/// Errors returned while constructing domain board values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BoardDomainError {
    /// A string identifier is empty after trimming.
    #[error("{0} must not be empty")]
    EmptyIdentifier(&'static str),

    /// The board number is invalid.
    #[error("invalid board number {0}, expected a positive integer")]
    InvalidBoardNumber(u64),

    /// A status mapping keyword is empty after trimming.
    #[error("status keyword must not be empty")]
    EmptyStatusKeyword,

    /// The release version is empty after trimming.
    #[error("release version must not be empty")]
    EmptyReleaseVersion,

    /// The release owner is empty after trimming.
    #[error("release owner must not be empty")]
    EmptyReleaseOwner,

    /// The release repository is empty after trimming.
    #[error("release repository must not be empty")]
    EmptyReleaseRepository,
}
