//! Gateway port for project board reads and mutations.

use crate::board::domain::{
    Board, BoardId, BoardItem, BoardNumber, BoardPair, ContentId, FieldId, ItemId, OptionId,
    PullRequest,
};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for board gateway operations.
pub type BoardGatewayResult<T> = Result<T, BoardGatewayError>;

/// Single field mutation scoped to one board item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldChange {
    /// Board owning the item.
    pub board_id: BoardId,
    /// Item whose field is updated.
    pub item_id: ItemId,
    /// Field to update.
    pub field_id: FieldId,
    /// Replacement value.
    pub value: FieldPatch,
}

/// Replacement value for a board item field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldPatch {
    /// Selects a single-select option by identifier.
    SingleSelect(OptionId),
    /// Replaces a text field's content.
    Text(String),
}

/// Project board access contract.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BoardGateway: Send + Sync {
    /// Fetches the source and target boards of a synchronization run.
    ///
    /// # Errors
    ///
    /// Returns [`BoardGatewayError::BoardNotFound`] when either board does
    /// not exist under `owner`.
    async fn fetch_board_pair(
        &self,
        owner: &str,
        source: BoardNumber,
        target: BoardNumber,
    ) -> BoardGatewayResult<BoardPair>;

    /// Fetches every item on a board, following pagination to the end.
    ///
    /// # Errors
    ///
    /// Returns [`BoardGatewayError::UnknownBoard`] when the identifier does
    /// not resolve to a board.
    async fn fetch_board_items(&self, board_id: &BoardId) -> BoardGatewayResult<Vec<BoardItem>>;

    /// Fetches a single board by owner and number.
    ///
    /// # Errors
    ///
    /// Returns [`BoardGatewayError::BoardNotFound`] when no such board
    /// exists under `owner`.
    async fn fetch_board(&self, owner: &str, number: BoardNumber) -> BoardGatewayResult<Board>;

    /// Fetches pull requests by number, including their closing issues.
    ///
    /// # Errors
    ///
    /// Returns [`BoardGatewayError::PullRequestNotFound`] when a number does
    /// not resolve to a pull request in the repository.
    async fn fetch_pull_requests(
        &self,
        owner: &str,
        repository: &str,
        numbers: &[u64],
    ) -> BoardGatewayResult<Vec<PullRequest>>;

    /// Adds existing content to a board, returning the new item identifier.
    ///
    /// Content already on the board gains no second item; the service is
    /// expected to check memberships first.
    async fn add_content_to_board(
        &self,
        board_id: &BoardId,
        content_id: &ContentId,
    ) -> BoardGatewayResult<ItemId>;

    /// Applies a batch of field changes in one round trip.
    async fn update_item_fields(&self, changes: &[FieldChange]) -> BoardGatewayResult<()>;
}

/// Errors returned by board gateway implementations.
#[derive(Debug, Clone, Error)]
pub enum BoardGatewayError {
    /// No board with the given number exists under the owner.
    #[error("no board numbered {number} found under '{owner}'")]
    BoardNotFound {
        /// Owner the lookup ran against.
        owner: String,
        /// Requested board number.
        number: BoardNumber,
    },

    /// The board identifier does not resolve to a board.
    #[error("unknown board: {0}")]
    UnknownBoard(BoardId),

    /// The item identifier does not resolve to an item.
    #[error("unknown board item: {0}")]
    UnknownItem(ItemId),

    /// No pull request with the given number exists in the repository.
    #[error("pull request #{number} not found in {owner}/{repository}")]
    PullRequestNotFound {
        /// Repository owner.
        owner: String,
        /// Repository name.
        repository: String,
        /// Requested pull request number.
        number: u64,
    },

    /// The board lacks a field the flows depend on.
    #[error("board {board} lacks a usable '{field}' field")]
    MissingField {
        /// Display form of the affected board.
        board: String,
        /// Name of the missing field.
        field: &'static str,
    },

    /// The remote service rejected a request.
    #[error("board service rejected the request: {0}")]
    Api(String),

    /// A response could not be decoded into the expected shape.
    #[error("malformed board service response: {0}")]
    Decode(String),

    /// The transport layer failed.
    #[error("transport error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),
}

impl BoardGatewayError {
    /// Wraps a transport-layer error.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }
}
