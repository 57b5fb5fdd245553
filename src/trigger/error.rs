//! Errors raised while decoding the workflow trigger context.

use camino::Utf8PathBuf;
use thiserror::Error;

use crate::board::domain::BoardDomainError;

/// Errors raised while reading worker configuration and event payloads.
#[derive(Debug, Error)]
pub enum TriggerError {
    /// A required environment variable is absent or blank.
    #[error("environment variable {0} is not set")]
    MissingVariable(&'static str),
    /// An environment variable is present but unusable.
    #[error("environment variable {name} is invalid: {reason}")]
    InvalidVariable {
        /// Name of the offending variable.
        name: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
    /// The repository slug did not look like `owner/name`.
    #[error("repository '{0}' is not in owner/name form")]
    MalformedRepository(String),
    /// The event payload file could not be read.
    #[error("cannot read event payload at {path}")]
    PayloadRead {
        /// Path the worker attempted to read.
        path: Utf8PathBuf,
        /// Underlying filesystem error.
        #[source]
        source: std::io::Error,
    },
    /// The event payload was not valid JSON for a release event.
    #[error("cannot parse event payload: {0}")]
    PayloadParse(#[from] serde_json::Error),
    /// The release carries neither a usable name nor a tag.
    #[error("release event has no version name or tag")]
    MissingReleaseVersion,
    /// Payload fields failed domain validation.
    #[error(transparent)]
    Domain(#[from] BoardDomainError),
}

/// Convenience alias for trigger results.
pub type TriggerResult<T> = Result<T, TriggerError>;
