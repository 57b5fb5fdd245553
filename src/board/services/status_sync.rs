//! Service layer for source-to-target status synchronization.

use crate::board::{
    domain::{
        Board, BoardId, BoardItem, BoardNumber, CanonicalStatus, OptionId, StatusMappingPolicy,
        StatusValue,
    },
    ports::{BoardGateway, BoardGatewayError, FieldChange, FieldPatch},
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Request payload for one status synchronization run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusSyncRequest {
    owner: String,
    source_board: BoardNumber,
    target_board: BoardNumber,
}

impl StatusSyncRequest {
    /// Creates a request mirroring `source_board` statuses onto
    /// `target_board`.
    #[must_use]
    pub fn new(
        owner: impl Into<String>,
        source_board: BoardNumber,
        target_board: BoardNumber,
    ) -> Self {
        Self {
            owner: owner.into(),
            source_board,
            target_board,
        }
    }

    /// Owner login the boards belong to.
    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Number of the board statuses are read from.
    #[must_use]
    pub const fn source_board(&self) -> BoardNumber {
        self.source_board
    }

    /// Number of the board statuses are written onto.
    #[must_use]
    pub const fn target_board(&self) -> BoardNumber {
        self.target_board
    }
}

/// Outcome summary of a completed synchronization run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusSyncReport {
    /// Number of target items examined.
    pub examined: usize,
    /// Content URLs of items whose status changed, in board order.
    pub updated_urls: Vec<String>,
}

/// Service-level errors for status synchronization.
#[derive(Debug, Error)]
pub enum StatusSyncError {
    /// Board access failed.
    #[error(transparent)]
    Gateway(#[from] BoardGatewayError),
}

/// Result type for status synchronization operations.
pub type StatusSyncResult<T> = Result<T, StatusSyncError>;

/// Status synchronization orchestration service.
#[derive(Clone)]
pub struct StatusSyncService<G>
where
    G: BoardGateway,
{
    gateway: Arc<G>,
    policy: StatusMappingPolicy,
}

impl<G> StatusSyncService<G>
where
    G: BoardGateway,
{
    /// Creates a synchronization service with the given mapping policy.
    #[must_use]
    pub const fn new(gateway: Arc<G>, policy: StatusMappingPolicy) -> Self {
        Self { gateway, policy }
    }

    /// Mirrors source-board statuses onto the target board.
    ///
    /// Items already marked released on the target are left untouched, as
    /// are items whose stored status already matches the resolved option.
    /// When nothing needs to move, no mutation is issued at all.
    ///
    /// # Errors
    ///
    /// Returns [`StatusSyncError::Gateway`] when board access fails.
    pub async fn sync(&self, request: StatusSyncRequest) -> StatusSyncResult<StatusSyncReport> {
        let StatusSyncRequest {
            owner,
            source_board,
            target_board,
        } = request;
        let pair = self
            .gateway
            .fetch_board_pair(&owner, source_board, target_board)
            .await?;
        let items = self.gateway.fetch_board_items(pair.target.id()).await?;
        let examined = items.len();
        let (changes, updated_urls) =
            plan_status_changes(&items, pair.source.id(), &pair.target, &self.policy);

        if changes.is_empty() {
            info!(
                owner = %owner,
                source = %source_board,
                target = %target_board,
                examined,
                "boards already in step"
            );
            return Ok(StatusSyncReport {
                examined,
                updated_urls,
            });
        }

        self.gateway.update_item_fields(&changes).await?;
        info!(
            owner = %owner,
            source = %source_board,
            target = %target_board,
            examined,
            updated = updated_urls.len(),
            urls = ?updated_urls,
            "statuses synchronized"
        );
        Ok(StatusSyncReport {
            examined,
            updated_urls,
        })
    }
}

/// Computes the minimal set of status changes for the target board.
///
/// Returns the changes alongside the content URLs they touch, both in board
/// order.
fn plan_status_changes(
    items: &[BoardItem],
    source_board: &BoardId,
    target: &Board,
    policy: &StatusMappingPolicy,
) -> (Vec<FieldChange>, Vec<String>) {
    let mut changes = Vec::new();
    let mut urls = Vec::new();
    for item in items {
        let Some(option_id) = next_status_option(item, source_board, target, policy) else {
            continue;
        };
        changes.push(FieldChange {
            board_id: target.id().clone(),
            item_id: item.id().clone(),
            field_id: target.status_field().id().clone(),
            value: FieldPatch::SingleSelect(option_id),
        });
        urls.push(item.content().url().to_owned());
    }
    (changes, urls)
}

/// Resolves the status option an item should move to, if any.
fn next_status_option(
    item: &BoardItem,
    source_board: &BoardId,
    target: &Board,
    policy: &StatusMappingPolicy,
) -> Option<OptionId> {
    if is_frozen(item.status()) {
        debug!(item = %item.id(), "skipped: already marked released");
        return None;
    }
    let Some(membership) = item.content().membership_on(source_board) else {
        debug!(item = %item.id(), "skipped: content absent from source board");
        return None;
    };
    let source_status = membership.status().map(StatusValue::name).unwrap_or_default();
    if source_status.trim().is_empty() {
        debug!(item = %item.id(), "skipped: no source status to mirror");
        return None;
    }
    let canonical = policy.map(source_status);
    let Some(option) = target.status_field().find_containing(canonical.as_str()) else {
        debug!(
            item = %item.id(),
            status = canonical.as_str(),
            "skipped: target board lacks a matching option"
        );
        return None;
    };
    if item.status().map(StatusValue::option_id) == Some(option.id()) {
        return None;
    }
    Some(option.id().clone())
}

/// Whether the current status freezes the item against further syncing.
fn is_frozen(status: Option<&StatusValue>) -> bool {
    status.is_some_and(|value| {
        value
            .name()
            .to_uppercase()
            .contains(CanonicalStatus::Released.as_str())
    })
}
