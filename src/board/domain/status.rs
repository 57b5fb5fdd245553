//! Status vocabulary and the source-to-target mapping policy.

use super::BoardDomainError;
use std::fmt;

/// Exact name of the option marking shipped work on a roadmap board.
pub const RELEASED_OPTION_NAME: &str = "Released";

/// Canonical workflow state bridging differing board vocabularies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CanonicalStatus {
    /// Work that has not started.
    Backlog,
    /// Work under active development.
    InProgress,
    /// Work awaiting review or verification.
    InReview,
    /// Work that is complete.
    Done,
    /// Work that has shipped in a release.
    Released,
}

impl CanonicalStatus {
    /// Returns the canonical display form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Backlog => "BACKLOG",
            Self::InProgress => "IN PROGRESS",
            Self::InReview => "IN REVIEW",
            Self::Done => "DONE",
            Self::Released => "RELEASED",
        }
    }
}

impl fmt::Display for CanonicalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Single keyword-to-status mapping rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusRule {
    keyword: String,
    target: CanonicalStatus,
}

impl StatusRule {
    /// Creates a rule matching source statuses that contain `keyword`.
    ///
    /// The keyword is stored upper-cased; matching ignores case.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyStatusKeyword`] when the keyword is
    /// blank.
    pub fn new(
        keyword: impl Into<String>,
        target: CanonicalStatus,
    ) -> Result<Self, BoardDomainError> {
        let raw = keyword.into();
        let normalized = raw.trim();
        if normalized.is_empty() {
            return Err(BoardDomainError::EmptyStatusKeyword);
        }
        Ok(Self { keyword: normalized.to_uppercase(), target })
    }

    /// Returns the upper-cased keyword.
    #[must_use]
    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    /// Returns the canonical status this rule maps to.
    #[must_use]
    pub const fn target(&self) -> CanonicalStatus {
        self.target
    }
}

/// Ordered mapping from source status text to canonical statuses.
///
/// Rules are evaluated in declaration order and the first keyword contained
/// in the upper-cased source text wins. Text matching no rule maps to
/// [`CanonicalStatus::Backlog`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMappingPolicy {
    rules: Vec<StatusRule>,
}

impl StatusMappingPolicy {
    /// Creates a policy from explicitly ordered rules.
    #[must_use]
    pub const fn new(rules: Vec<StatusRule>) -> Self {
        Self { rules }
    }

    /// Returns the rules in evaluation order.
    #[must_use]
    pub fn rules(&self) -> &[StatusRule] {
        &self.rules
    }

    /// Maps raw source status text to its canonical status.
    #[must_use]
    pub fn map(&self, source: &str) -> CanonicalStatus {
        let folded = source.to_uppercase();
        self.rules
            .iter()
            .find(|rule| folded.contains(rule.keyword()))
            .map_or(CanonicalStatus::Backlog, StatusRule::target)
    }
}

impl Default for StatusMappingPolicy {
    fn default() -> Self {
        Self::new(vec![
            rule("IN REVIEW", CanonicalStatus::InReview),
            rule("IN PROGRESS", CanonicalStatus::InProgress),
            rule("NEEDS QA", CanonicalStatus::InReview),
            rule("DONE", CanonicalStatus::Done),
        ])
    }
}

/// Builds a rule from a keyword known to be non-blank.
fn rule(keyword: &str, target: CanonicalStatus) -> StatusRule {
    StatusRule { keyword: keyword.to_uppercase(), target }
}
