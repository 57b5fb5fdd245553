//! Published release data and reference extraction.

use super::BoardDomainError;
use regex::Regex;
use std::collections::HashSet;

/// Published release scoped to the repository it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Release {
    version: String,
    owner: String,
    repository: String,
    body: String,
}

impl Release {
    /// Creates a validated release.
    ///
    /// The body may be empty; version, owner, and repository must not be.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyReleaseVersion`],
    /// [`BoardDomainError::EmptyReleaseOwner`], or
    /// [`BoardDomainError::EmptyReleaseRepository`] when the corresponding
    /// value is blank.
    pub fn new(
        version: impl Into<String>,
        owner: impl Into<String>,
        repository: impl Into<String>,
        body: impl Into<String>,
    ) -> Result<Self, BoardDomainError> {
        Ok(Self {
            version: required(version, BoardDomainError::EmptyReleaseVersion)?,
            owner: required(owner, BoardDomainError::EmptyReleaseOwner)?,
            repository: required(repository, BoardDomainError::EmptyReleaseRepository)?,
            body: body.into(),
        })
    }

    /// Returns the display version.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Returns the repository owner.
    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Returns the repository name.
    #[must_use]
    pub fn repository(&self) -> &str {
        &self.repository
    }

    /// Returns the release notes.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Extracts pull request numbers referenced by the release notes.
    ///
    /// Only links under this release's owner count. Each number is reported
    /// once, in first-appearance order.
    #[must_use]
    pub fn referenced_pull_requests(&self) -> Vec<u64> {
        let pattern = format!(
            r"github\.com/{}/[A-Za-z0-9_-]+/pull/(\d+)",
            regex::escape(&self.owner)
        );
        // The pattern is fixed apart from the escaped owner, so compilation
        // cannot fail.
        let Ok(matcher) = Regex::new(&pattern) else {
            return Vec::new();
        };

        let mut seen = HashSet::new();
        let mut numbers = Vec::new();
        for capture in matcher.captures_iter(&self.body) {
            let Some(digits) = capture.get(1) else {
                continue;
            };
            let Ok(number) = digits.as_str().parse::<u64>() else {
                continue;
            };
            if seen.insert(number) {
                numbers.push(number);
            }
        }
        numbers
    }
}

/// Appends `version` to an existing "Released in" value.
///
/// Existing text is preserved verbatim; versions accumulate separated by
/// commas and are never re-ordered or deduplicated.
#[must_use]
pub fn append_released_in(existing: Option<&str>, version: &str) -> String {
    existing
        .filter(|current| !current.is_empty())
        .map_or_else(|| version.to_owned(), |current| format!("{current},{version}"))
}

/// Validates and trims a required release field.
fn required(
    value: impl Into<String>,
    error: BoardDomainError,
) -> Result<String, BoardDomainError> {
    let raw = value.into();
    let normalized = raw.trim();
    if normalized.is_empty() {
        return Err(error);
    }
    Ok(normalized.to_owned())
}
