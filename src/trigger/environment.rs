//! Worker configuration drawn from the GitHub Actions environment.

use std::env;

use camino::Utf8PathBuf;

use super::{TriggerError, TriggerResult};
use crate::board::domain::BoardNumber;
use crate::board::services::StatusSyncRequest;

/// Bearer token used for GraphQL calls.
pub const TOKEN_VAR: &str = "GITHUB_TOKEN";

/// `owner/name` slug of the repository that fired the workflow.
pub const REPOSITORY_VAR: &str = "GITHUB_REPOSITORY";

/// Path of the JSON payload describing the triggering event.
pub const EVENT_PATH_VAR: &str = "GITHUB_EVENT_PATH";

/// GraphQL endpoint the runner points at; differs on Enterprise deployments.
pub const GRAPHQL_URL_VAR: &str = "GITHUB_GRAPHQL_URL";

/// Number of the board statuses are read from.
pub const SOURCE_BOARD_VAR: &str = "SOURCE_BOARD";

/// Number of the board statuses are written onto.
pub const TARGET_BOARD_VAR: &str = "TARGET_BOARD";

/// Number of the roadmap board releases land on.
pub const ROADMAP_BOARD_VAR: &str = "ROADMAP_BOARD";

/// Environment snapshot the worker starts from.
///
/// Values are captured once via [`WorkerEnv::from_process`] and surfaced
/// through accessors that validate on demand, so each operation only pays
/// for the variables it needs.
#[derive(Debug, Clone, Default)]
pub struct WorkerEnv {
    token: Option<String>,
    repository: Option<String>,
    event_path: Option<String>,
    graphql_url: Option<String>,
    source_board: Option<String>,
    target_board: Option<String>,
    roadmap_board: Option<String>,
}

impl WorkerEnv {
    /// Captures the worker variables from the process environment.
    #[must_use]
    pub fn from_process() -> Self {
        Self {
            token: read_var(TOKEN_VAR),
            repository: read_var(REPOSITORY_VAR),
            event_path: read_var(EVENT_PATH_VAR),
            graphql_url: read_var(GRAPHQL_URL_VAR),
            source_board: read_var(SOURCE_BOARD_VAR),
            target_board: read_var(TARGET_BOARD_VAR),
            roadmap_board: read_var(ROADMAP_BOARD_VAR),
        }
    }

    /// Returns the GraphQL bearer token.
    ///
    /// # Errors
    ///
    /// Returns [`TriggerError::MissingVariable`] when the token is unset.
    pub fn github_token(&self) -> TriggerResult<&str> {
        require(self.token.as_deref(), TOKEN_VAR)
    }

    /// Returns the `(owner, name)` parts of the repository slug.
    ///
    /// # Errors
    ///
    /// Returns [`TriggerError::MissingVariable`] when the slug is unset and
    /// [`TriggerError::MalformedRepository`] when it is not `owner/name`.
    pub fn repository(&self) -> TriggerResult<(&str, &str)> {
        parse_repository(require(self.repository.as_deref(), REPOSITORY_VAR)?)
    }

    /// Returns the path of the event payload file.
    ///
    /// # Errors
    ///
    /// Returns [`TriggerError::MissingVariable`] when the path is unset.
    pub fn event_path(&self) -> TriggerResult<Utf8PathBuf> {
        require(self.event_path.as_deref(), EVENT_PATH_VAR).map(Utf8PathBuf::from)
    }

    /// Returns the GraphQL endpoint override, when the runner provides one.
    #[must_use]
    pub fn graphql_url(&self) -> Option<&str> {
        self.graphql_url.as_deref()
    }

    /// Builds the status synchronization request for this environment.
    ///
    /// # Errors
    ///
    /// Returns a [`TriggerError`] when the repository slug or either board
    /// number is missing or malformed.
    pub fn status_sync_request(&self) -> TriggerResult<StatusSyncRequest> {
        let (owner, _) = self.repository()?;
        let source = board_number(self.source_board.as_deref(), SOURCE_BOARD_VAR)?;
        let target = board_number(self.target_board.as_deref(), TARGET_BOARD_VAR)?;
        Ok(StatusSyncRequest::new(owner, source, target))
    }

    /// Returns the roadmap board number for release propagation.
    ///
    /// # Errors
    ///
    /// Returns a [`TriggerError`] when the number is missing or malformed.
    pub fn roadmap_board(&self) -> TriggerResult<BoardNumber> {
        board_number(self.roadmap_board.as_deref(), ROADMAP_BOARD_VAR)
    }
}

fn read_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

fn require<'a>(value: Option<&'a str>, name: &'static str) -> TriggerResult<&'a str> {
    value.ok_or(TriggerError::MissingVariable(name))
}

fn parse_repository(slug: &str) -> TriggerResult<(&str, &str)> {
    slug.split_once('/')
        .filter(|(owner, name)| !owner.is_empty() && !name.is_empty())
        .ok_or_else(|| TriggerError::MalformedRepository(slug.to_owned()))
}

fn board_number(value: Option<&str>, name: &'static str) -> TriggerResult<BoardNumber> {
    let raw = require(value, name)?;
    let number: u64 = raw.parse().map_err(|_| TriggerError::InvalidVariable {
        name,
        reason: format!("'{raw}' is not a board number"),
    })?;
    BoardNumber::new(number).map_err(|error| TriggerError::InvalidVariable {
        name,
        reason: error.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn populated() -> WorkerEnv {
        WorkerEnv {
            token: Some("ghp_example".to_owned()),
            repository: Some("acme/widget".to_owned()),
            event_path: Some("/tmp/event.json".to_owned()),
            graphql_url: Some("https://github.example.com/api/graphql".to_owned()),
            source_board: Some("1".to_owned()),
            target_board: Some("2".to_owned()),
            roadmap_board: Some("3".to_owned()),
        }
    }

    #[test]
    fn accessors_expose_the_captured_values() {
        let env = populated();

        assert_eq!(env.github_token().expect("token"), "ghp_example");
        assert_eq!(env.repository().expect("repository"), ("acme", "widget"));
        assert_eq!(env.event_path().expect("path").as_str(), "/tmp/event.json");
        assert_eq!(env.graphql_url(), Some("https://github.example.com/api/graphql"));
        assert_eq!(env.roadmap_board().expect("board").value(), 3);
    }

    #[test]
    fn graphql_url_is_absent_unless_the_runner_provides_one() {
        assert_eq!(WorkerEnv::default().graphql_url(), None);
    }

    #[test]
    fn status_sync_request_combines_owner_and_board_numbers() {
        let env = populated();

        let request = env.status_sync_request().expect("request");

        assert_eq!(request.owner(), "acme");
        assert_eq!(request.source_board().value(), 1);
        assert_eq!(request.target_board().value(), 2);
    }

    #[test]
    fn missing_variables_are_reported_by_name() {
        let env = WorkerEnv::default();

        let error = env.github_token().expect_err("missing token");

        assert!(matches!(error, TriggerError::MissingVariable(TOKEN_VAR)));
    }

    #[test]
    fn malformed_repository_slug_is_rejected() {
        let env = WorkerEnv { repository: Some("acme".to_owned()), ..WorkerEnv::default() };

        let error = env.repository().expect_err("malformed slug");

        assert!(matches!(error, TriggerError::MalformedRepository(slug) if slug == "acme"));
    }

    #[test]
    fn non_numeric_board_numbers_are_rejected() {
        let env = WorkerEnv { roadmap_board: Some("seven".to_owned()), ..WorkerEnv::default() };

        let error = env.roadmap_board().expect_err("bad number");

        assert!(matches!(error, TriggerError::InvalidVariable { name: ROADMAP_BOARD_VAR, .. }));
    }
}
