//! Release event payload parsing.
//!
//! The workflow hands the worker a JSON file describing the published
//! release; only the fields the propagation flow consumes are modelled.
//! The file is read through its parent directory handle via `cap-std`.

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::{TriggerError, TriggerResult};
use crate::board::domain::Release;

/// A `release` published event as delivered by the workflow.
#[derive(Debug, Clone, Deserialize)]
pub struct ReleaseEvent {
    release: ReleasePayload,
    repository: RepositoryPayload,
}

#[derive(Debug, Clone, Deserialize)]
struct ReleasePayload {
    name: Option<String>,
    tag_name: Option<String>,
    body: Option<String>,
    published_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
struct RepositoryPayload {
    name: String,
    owner: OwnerPayload,
}

#[derive(Debug, Clone, Deserialize)]
struct OwnerPayload {
    login: String,
}

impl ReleaseEvent {
    /// Returns the release version: the release name, falling back to the
    /// tag when the name is blank.
    #[must_use]
    pub fn version(&self) -> Option<&str> {
        nonblank(self.release.name.as_deref())
            .or_else(|| nonblank(self.release.tag_name.as_deref()))
    }

    /// Returns when the release was published, when the payload carries it.
    #[must_use]
    pub const fn published_at(&self) -> Option<DateTime<Utc>> {
        self.release.published_at
    }

    /// Converts the event into a domain [`Release`].
    ///
    /// # Errors
    ///
    /// Returns [`TriggerError::MissingReleaseVersion`] when neither name nor
    /// tag is usable, and domain validation errors for blank coordinates.
    pub fn into_release(self) -> TriggerResult<Release> {
        let version = self.version().ok_or(TriggerError::MissingReleaseVersion)?.to_owned();
        let Self { release, repository } = self;
        Ok(Release::new(
            version,
            repository.owner.login,
            repository.name,
            release.body.unwrap_or_default(),
        )?)
    }
}

/// Loads and parses the release event payload at `path`.
///
/// # Errors
///
/// Returns [`TriggerError::PayloadRead`] when the file cannot be opened or
/// read and [`TriggerError::PayloadParse`] when the JSON does not match the
/// release event shape.
pub fn load_release_event(path: &Utf8Path) -> TriggerResult<ReleaseEvent> {
    let text = read_payload(path)
        .map_err(|source| TriggerError::PayloadRead { path: path.to_owned(), source })?;
    Ok(serde_json::from_str(&text)?)
}

fn read_payload(path: &Utf8Path) -> Result<String, std::io::Error> {
    let parent = path
        .parent()
        .filter(|dir| !dir.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    let name = path
        .file_name()
        .ok_or_else(|| std::io::Error::other("payload path has no file name"))?;
    let dir = Dir::open_ambient_dir(parent, ambient_authority())?;
    dir.read_to_string(name)
}

fn nonblank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|trimmed| !trimmed.is_empty())
}
