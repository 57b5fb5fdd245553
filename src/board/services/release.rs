//! Service layer for propagating published releases onto a roadmap board.

use crate::board::{
    domain::{
        Board, BoardNumber, ContentCard, FieldId, ItemId, OptionId, PullRequest,
        RELEASED_OPTION_NAME, Release, append_released_in,
    },
    ports::{BoardGateway, BoardGatewayError, FieldChange, FieldPatch},
};
use futures::future::try_join_all;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Request payload for propagating one published release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseRequest {
    release: Release,
    roadmap_board: BoardNumber,
}

impl ReleaseRequest {
    /// Creates a request targeting the given roadmap board.
    #[must_use]
    pub const fn new(release: Release, roadmap_board: BoardNumber) -> Self {
        Self {
            release,
            roadmap_board,
        }
    }
}

/// Outcome summary of a completed propagation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReleaseReport {
    /// Content URLs marked released, in resolution order.
    pub released_urls: Vec<String>,
    /// Number of items newly added to the roadmap board.
    pub added: usize,
}

/// Service-level errors for release propagation.
#[derive(Debug, Error)]
pub enum ReleasePropagationError {
    /// The roadmap board's status field has no exactly-named released option.
    #[error("board {0} has no 'Released' status option")]
    ReleasedOptionMissing(BoardNumber),

    /// The roadmap board has no "Released in" text field.
    #[error("board {0} has no 'Released in' field")]
    ReleasedInFieldMissing(BoardNumber),

    /// Board access failed.
    #[error(transparent)]
    Gateway(#[from] BoardGatewayError),
}

/// Result type for release propagation operations.
pub type ReleasePropagationResult<T> = Result<T, ReleasePropagationError>;

/// Release propagation orchestration service.
#[derive(Clone)]
pub struct ReleasePropagationService<G>
where
    G: BoardGateway,
{
    gateway: Arc<G>,
}

impl<G> ReleasePropagationService<G>
where
    G: BoardGateway,
{
    /// Creates a propagation service.
    #[must_use]
    pub const fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    /// Marks the work shipped by `release` as released on the roadmap board.
    ///
    /// Pull requests referenced by the release notes are resolved to their
    /// closing issues, or kept as the unit themselves when they close none.
    /// Units absent from the board are added first; every unit then receives
    /// the release version appended to its "Released in" text and the
    /// board's "Released" status option, applied as one batched mutation.
    ///
    /// # Errors
    ///
    /// Returns [`ReleasePropagationError::ReleasedInFieldMissing`] or
    /// [`ReleasePropagationError::ReleasedOptionMissing`] when the board
    /// lacks the release schema, and [`ReleasePropagationError::Gateway`]
    /// when board access fails.
    pub async fn propagate(
        &self,
        request: ReleaseRequest,
    ) -> ReleasePropagationResult<ReleaseReport> {
        let ReleaseRequest {
            release,
            roadmap_board,
        } = request;
        let numbers = release.referenced_pull_requests();
        if numbers.is_empty() {
            info!(
                version = release.version(),
                "release notes reference no pull requests"
            );
            return Ok(ReleaseReport::default());
        }

        let board = self.gateway.fetch_board(release.owner(), roadmap_board).await?;
        let released_in_field = board
            .released_in_field()
            .cloned()
            .ok_or(ReleasePropagationError::ReleasedInFieldMissing(roadmap_board))?;
        let released_option = board
            .status_field()
            .find_named(RELEASED_OPTION_NAME)
            .map(|option| option.id().clone())
            .ok_or(ReleasePropagationError::ReleasedOptionMissing(roadmap_board))?;

        let pull_requests = self
            .gateway
            .fetch_pull_requests(release.owner(), release.repository(), &numbers)
            .await?;
        let units = release_units(&pull_requests);

        let mut targets = Vec::with_capacity(units.len());
        let mut pending = Vec::new();
        for unit in units {
            match unit.membership_on(board.id()) {
                Some(membership) => targets.push(ReleaseTarget {
                    item_id: membership.item_id().clone(),
                    url: unit.url().to_owned(),
                    released_in: membership.released_in().map(ToOwned::to_owned),
                }),
                None => pending.push(unit),
            }
        }

        let added = pending.len();
        let additions = pending
            .iter()
            .map(|unit| self.gateway.add_content_to_board(board.id(), unit.id()));
        let new_item_ids = try_join_all(additions).await?;
        for (unit, item_id) in pending.iter().zip(new_item_ids) {
            targets.push(ReleaseTarget {
                item_id,
                url: unit.url().to_owned(),
                released_in: None,
            });
        }

        let changes = release_changes(
            &board,
            &released_in_field,
            &released_option,
            release.version(),
            &targets,
        );
        if changes.is_empty() {
            info!(
                version = release.version(),
                "no roadmap items to mark released"
            );
            return Ok(ReleaseReport::default());
        }

        self.gateway.update_item_fields(&changes).await?;
        let released_urls: Vec<String> = targets.into_iter().map(|target| target.url).collect();
        info!(
            version = release.version(),
            released = released_urls.len(),
            added,
            urls = ?released_urls,
            "release propagated"
        );
        Ok(ReleaseReport {
            released_urls,
            added,
        })
    }
}

/// Roadmap item to stamp with the release version.
#[derive(Debug, Clone)]
struct ReleaseTarget {
    item_id: ItemId,
    url: String,
    released_in: Option<String>,
}

/// Expands pull requests into the content entities a release ships.
///
/// A pull request stands in for itself only when it closes no issues.
fn release_units(pull_requests: &[PullRequest]) -> Vec<&ContentCard> {
    let mut units = Vec::new();
    for pull_request in pull_requests {
        if pull_request.closing_issues().is_empty() {
            units.push(pull_request.card());
        } else {
            units.extend(pull_request.closing_issues());
        }
    }
    units
}

/// Builds the two field changes each target item receives.
fn release_changes(
    board: &Board,
    released_in_field: &FieldId,
    released_option: &OptionId,
    version: &str,
    targets: &[ReleaseTarget],
) -> Vec<FieldChange> {
    let mut changes = Vec::with_capacity(targets.len() * 2);
    for target in targets {
        changes.push(FieldChange {
            board_id: board.id().clone(),
            item_id: target.item_id.clone(),
            field_id: released_in_field.clone(),
            value: FieldPatch::Text(append_released_in(
                target.released_in.as_deref(),
                version,
            )),
        });
        changes.push(FieldChange {
            board_id: board.id().clone(),
            item_id: target.item_id.clone(),
            field_id: board.status_field().id().clone(),
            value: FieldPatch::SingleSelect(released_option.clone()),
        });
    }
    changes
}
