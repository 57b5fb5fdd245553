//! In-memory board gateway for service and flow tests.

use async_trait::async_trait;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::board::{
    domain::{
        Board, BoardId, BoardItem, BoardMembership, BoardNumber, BoardPair, ContentCard,
        ContentId, ItemId, PullRequest, StatusValue,
    },
    ports::{BoardGateway, BoardGatewayError, BoardGatewayResult, FieldChange, FieldPatch},
};

/// Thread-safe in-memory board gateway.
///
/// Mutations are applied to the stored boards and recorded verbatim so tests
/// can assert both outcomes and call shapes. Cross-board memberships are
/// recomputed from the stored items at fetch time, the way the remote
/// service reflects live state, and adding content already on a board hands
/// back the existing item, the way the remote add mutation does.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBoardGateway {
    state: Arc<RwLock<InMemoryBoardState>>,
}

#[derive(Debug, Default)]
struct InMemoryBoardState {
    boards: Vec<StoredBoard>,
    pull_requests: Vec<StoredPullRequest>,
    additions: Vec<(BoardId, ContentId)>,
    update_batches: Vec<Vec<FieldChange>>,
    next_item: u64,
}

#[derive(Debug)]
struct StoredBoard {
    owner: String,
    board: Board,
    items: Vec<BoardItem>,
}

#[derive(Debug)]
struct StoredPullRequest {
    owner: String,
    repository: String,
    pull_request: PullRequest,
}

impl InMemoryBoardGateway {
    /// Creates an empty in-memory gateway.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a board under an owner.
    ///
    /// # Errors
    ///
    /// Returns a transport error when the state lock is poisoned.
    pub fn insert_board(&self, owner: impl Into<String>, board: Board) -> BoardGatewayResult<()> {
        let mut state = self.write_state()?;
        state.boards.push(StoredBoard {
            owner: owner.into(),
            board,
            items: Vec::new(),
        });
        Ok(())
    }

    /// Places an item on a registered board.
    ///
    /// # Errors
    ///
    /// Returns [`BoardGatewayError::UnknownBoard`] when the board has not
    /// been registered.
    pub fn insert_item(&self, board_id: &BoardId, item: BoardItem) -> BoardGatewayResult<()> {
        let mut state = self.write_state()?;
        let stored = stored_board_mut(&mut state, board_id)?;
        stored.items.push(item);
        Ok(())
    }

    /// Registers a pull request under a repository.
    ///
    /// # Errors
    ///
    /// Returns a transport error when the state lock is poisoned.
    pub fn insert_pull_request(
        &self,
        owner: impl Into<String>,
        repository: impl Into<String>,
        pull_request: PullRequest,
    ) -> BoardGatewayResult<()> {
        let mut state = self.write_state()?;
        state.pull_requests.push(StoredPullRequest {
            owner: owner.into(),
            repository: repository.into(),
            pull_request,
        });
        Ok(())
    }

    /// Returns a stored item with its current field values, if present.
    ///
    /// # Errors
    ///
    /// Returns a transport error when the state lock is poisoned.
    pub fn item(
        &self,
        board_id: &BoardId,
        item_id: &ItemId,
    ) -> BoardGatewayResult<Option<BoardItem>> {
        let state = self.read_state()?;
        Ok(state
            .boards
            .iter()
            .find(|stored| stored.board.id() == board_id)
            .and_then(|stored| stored.items.iter().find(|item| item.id() == item_id))
            .cloned())
    }

    /// Returns every recorded content addition in call order.
    ///
    /// # Errors
    ///
    /// Returns a transport error when the state lock is poisoned.
    pub fn recorded_additions(&self) -> BoardGatewayResult<Vec<(BoardId, ContentId)>> {
        let state = self.read_state()?;
        Ok(state.additions.clone())
    }

    /// Returns every recorded field-change batch in call order.
    ///
    /// # Errors
    ///
    /// Returns a transport error when the state lock is poisoned.
    pub fn recorded_update_batches(&self) -> BoardGatewayResult<Vec<Vec<FieldChange>>> {
        let state = self.read_state()?;
        Ok(state.update_batches.clone())
    }

    fn read_state(&self) -> BoardGatewayResult<RwLockReadGuard<'_, InMemoryBoardState>> {
        self.state
            .read()
            .map_err(|err| BoardGatewayError::transport(std::io::Error::other(err.to_string())))
    }

    fn write_state(&self) -> BoardGatewayResult<RwLockWriteGuard<'_, InMemoryBoardState>> {
        self.state
            .write()
            .map_err(|err| BoardGatewayError::transport(std::io::Error::other(err.to_string())))
    }
}

fn stored_board_mut<'a>(
    state: &'a mut InMemoryBoardState,
    board_id: &BoardId,
) -> BoardGatewayResult<&'a mut StoredBoard> {
    state
        .boards
        .iter_mut()
        .find(|stored| stored.board.id() == board_id)
        .ok_or_else(|| BoardGatewayError::UnknownBoard(board_id.clone()))
}

fn stored_item_mut<'a>(
    stored: &'a mut StoredBoard,
    item_id: &ItemId,
) -> BoardGatewayResult<&'a mut BoardItem> {
    stored
        .items
        .iter_mut()
        .find(|item| item.id() == item_id)
        .ok_or_else(|| BoardGatewayError::UnknownItem(item_id.clone()))
}

fn find_board(
    state: &InMemoryBoardState,
    owner: &str,
    number: BoardNumber,
) -> BoardGatewayResult<Board> {
    state
        .boards
        .iter()
        .find(|stored| stored.owner == owner && stored.board.number() == number)
        .map(|stored| stored.board.clone())
        .ok_or_else(|| BoardGatewayError::BoardNotFound {
            owner: owner.to_owned(),
            number,
        })
}

/// Recomputes a content entity's memberships from the stored board items.
fn membership_view(state: &InMemoryBoardState, content_id: &ContentId) -> Vec<BoardMembership> {
    let mut memberships = Vec::new();
    for stored in &state.boards {
        for item in &stored.items {
            if item.content().id() != content_id {
                continue;
            }
            let mut membership =
                BoardMembership::new(stored.board.id().clone(), item.id().clone());
            if let Some(status) = item.status() {
                membership = membership.with_status(status.clone());
            }
            if let Some(text) = item.released_in() {
                membership = membership.with_released_in(text);
            }
            memberships.push(membership);
        }
    }
    memberships
}

fn card_view(state: &InMemoryBoardState, card: &ContentCard) -> ContentCard {
    ContentCard::new(card.id().clone(), card.url())
        .with_memberships(membership_view(state, card.id()))
}

fn item_view(state: &InMemoryBoardState, item: &BoardItem) -> BoardItem {
    let mut view = BoardItem::new(item.id().clone(), card_view(state, item.content()));
    if let Some(status) = item.status() {
        view = view.with_status(status.clone());
    }
    if let Some(text) = item.released_in() {
        view = view.with_released_in(text);
    }
    view
}

fn pull_request_view(state: &InMemoryBoardState, pull_request: &PullRequest) -> PullRequest {
    PullRequest::new(pull_request.number(), card_view(state, pull_request.card()))
        .with_closing_issues(
            pull_request
                .closing_issues()
                .iter()
                .map(|issue| card_view(state, issue)),
        )
}

/// Looks up a known content URL so added items carry realistic cards.
fn find_content_url(state: &InMemoryBoardState, content_id: &ContentId) -> Option<String> {
    for stored in &state.pull_requests {
        if stored.pull_request.card().id() == content_id {
            return Some(stored.pull_request.card().url().to_owned());
        }
        if let Some(issue) = stored
            .pull_request
            .closing_issues()
            .iter()
            .find(|card| card.id() == content_id)
        {
            return Some(issue.url().to_owned());
        }
    }
    for stored in &state.boards {
        if let Some(item) = stored
            .items
            .iter()
            .find(|item| item.content().id() == content_id)
        {
            return Some(item.content().url().to_owned());
        }
    }
    None
}

/// Finds the item already holding a content entity on a board, if any.
fn existing_item_id(
    state: &InMemoryBoardState,
    board_id: &BoardId,
    content_id: &ContentId,
) -> Option<ItemId> {
    state
        .boards
        .iter()
        .find(|stored| stored.board.id() == board_id)?
        .items
        .iter()
        .find(|item| item.content().id() == content_id)
        .map(|item| item.id().clone())
}

fn apply_change(state: &mut InMemoryBoardState, change: &FieldChange) -> BoardGatewayResult<()> {
    let stored = stored_board_mut(state, &change.board_id)?;
    match &change.value {
        FieldPatch::SingleSelect(option_id) => {
            if change.field_id != *stored.board.status_field().id() {
                return Err(BoardGatewayError::Api(format!(
                    "field {} is not the status field of board {}",
                    change.field_id,
                    stored.board.number()
                )));
            }
            let name = stored
                .board
                .status_field()
                .options()
                .iter()
                .find(|option| option.id() == option_id)
                .map(|option| option.name().to_owned())
                .ok_or_else(|| {
                    BoardGatewayError::Api(format!("unknown status option {option_id}"))
                })?;
            let item = stored_item_mut(stored, &change.item_id)?;
            item.set_status(StatusValue::new(name, option_id.clone()));
        }
        FieldPatch::Text(text) => {
            if stored.board.released_in_field() != Some(&change.field_id) {
                return Err(BoardGatewayError::Api(format!(
                    "field {} is not a text field of board {}",
                    change.field_id,
                    stored.board.number()
                )));
            }
            let item = stored_item_mut(stored, &change.item_id)?;
            item.set_released_in(text.clone());
        }
    }
    Ok(())
}

#[async_trait]
impl BoardGateway for InMemoryBoardGateway {
    async fn fetch_board_pair(
        &self,
        owner: &str,
        source: BoardNumber,
        target: BoardNumber,
    ) -> BoardGatewayResult<BoardPair> {
        let state = self.read_state()?;
        let source_board = find_board(&state, owner, source)?;
        let target_board = find_board(&state, owner, target)?;
        Ok(BoardPair {
            source: source_board,
            target: target_board,
        })
    }

    async fn fetch_board_items(&self, board_id: &BoardId) -> BoardGatewayResult<Vec<BoardItem>> {
        let state = self.read_state()?;
        let stored = state
            .boards
            .iter()
            .find(|entry| entry.board.id() == board_id)
            .ok_or_else(|| BoardGatewayError::UnknownBoard(board_id.clone()))?;
        Ok(stored
            .items
            .iter()
            .map(|item| item_view(&state, item))
            .collect())
    }

    async fn fetch_board(&self, owner: &str, number: BoardNumber) -> BoardGatewayResult<Board> {
        let state = self.read_state()?;
        find_board(&state, owner, number)
    }

    async fn fetch_pull_requests(
        &self,
        owner: &str,
        repository: &str,
        numbers: &[u64],
    ) -> BoardGatewayResult<Vec<PullRequest>> {
        let state = self.read_state()?;
        numbers
            .iter()
            .map(|number| {
                state
                    .pull_requests
                    .iter()
                    .find(|stored| {
                        stored.owner == owner
                            && stored.repository == repository
                            && stored.pull_request.number() == *number
                    })
                    .map(|stored| pull_request_view(&state, &stored.pull_request))
                    .ok_or_else(|| BoardGatewayError::PullRequestNotFound {
                        owner: owner.to_owned(),
                        repository: repository.to_owned(),
                        number: *number,
                    })
            })
            .collect()
    }

    async fn add_content_to_board(
        &self,
        board_id: &BoardId,
        content_id: &ContentId,
    ) -> BoardGatewayResult<ItemId> {
        let mut state = self.write_state()?;
        let item_id = match existing_item_id(&state, board_id, content_id) {
            Some(existing) => existing,
            None => {
                state.next_item += 1;
                let minted = ItemId::new(format!("ITEM-{}", state.next_item))
                    .map_err(|err| BoardGatewayError::Decode(err.to_string()))?;
                let url = find_content_url(&state, content_id).unwrap_or_default();
                let item =
                    BoardItem::new(minted.clone(), ContentCard::new(content_id.clone(), url));
                stored_board_mut(&mut state, board_id)?.items.push(item);
                minted
            }
        };
        state.additions.push((board_id.clone(), content_id.clone()));
        Ok(item_id)
    }

    async fn update_item_fields(&self, changes: &[FieldChange]) -> BoardGatewayResult<()> {
        let mut state = self.write_state()?;
        for change in changes {
            apply_change(&mut state, change)?;
        }
        state.update_batches.push(changes.to_vec());
        Ok(())
    }
}
