//! GitHub GraphQL implementation of the [`BoardGateway`] port.
//!
//! Speaks to the Projects v2 API with a bearer token. Board items are read
//! through cursor pagination, and field updates are batched into a single
//! aliased mutation document so one run needs one write round trip.

mod models;
mod queries;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::debug;

use crate::board::domain::{
    Board, BoardId, BoardItem, BoardNumber, BoardPair, ContentId, ItemId, PullRequest,
};
use crate::board::ports::{BoardGateway, BoardGatewayError, BoardGatewayResult, FieldChange};

use models::{
    AddItemData, BoardPairNode, GraphQlEnvelope, ItemConnection, ItemsPageData, OrganizationData,
    PageInfo, RepositoryData, SingleBoardNode,
};
use queries::{
    ADD_ITEM_MUTATION, BOARD_ITEMS_QUERY, BOARD_PAIR_QUERY, BOARD_QUERY, PULL_REQUEST_QUERY,
    field_update_document,
};

/// Public GitHub GraphQL endpoint.
const DEFAULT_ENDPOINT: &str = "https://api.github.com/graphql";

/// Items fetched per page when walking a board.
const PAGE_SIZE: u32 = 100;

/// User agent sent with every request; GitHub rejects anonymous clients.
const USER_AGENT: &str = concat!("switchboard/", env!("CARGO_PKG_VERSION"));

/// GitHub-backed [`BoardGateway`] speaking GraphQL over HTTPS.
#[derive(Debug, Clone)]
pub struct GitHubBoardGateway {
    http: Client,
    endpoint: String,
    token: String,
}

impl GitHubBoardGateway {
    /// Creates a gateway against the public GitHub API.
    ///
    /// # Errors
    ///
    /// Returns [`BoardGatewayError::Transport`] when the HTTP client cannot
    /// be constructed.
    pub fn new(token: impl Into<String>) -> BoardGatewayResult<Self> {
        Self::with_endpoint(token, DEFAULT_ENDPOINT)
    }

    /// Creates a gateway against a custom GraphQL endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`BoardGatewayError::Transport`] when the HTTP client cannot
    /// be constructed.
    pub fn with_endpoint(
        token: impl Into<String>,
        endpoint: impl Into<String>,
    ) -> BoardGatewayResult<Self> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(BoardGatewayError::transport)?;
        Ok(Self { http, endpoint: endpoint.into(), token: token.into() })
    }

    async fn post<T: DeserializeOwned>(
        &self,
        document: &str,
        variables: Value,
    ) -> BoardGatewayResult<T> {
        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.token)
            .json(&json!({ "query": document, "variables": variables }))
            .send()
            .await
            .map_err(BoardGatewayError::transport)?;
        let status = response.status();
        let body = response.text().await.map_err(BoardGatewayError::transport)?;
        if !status.is_success() {
            return Err(BoardGatewayError::Api(format!("{status}: {body}")));
        }
        let envelope: GraphQlEnvelope<T> = serde_json::from_str(&body)
            .map_err(|error| BoardGatewayError::Decode(error.to_string()))?;
        if !envelope.errors.is_empty() {
            let joined = envelope
                .errors
                .into_iter()
                .map(|error| error.message)
                .collect::<Vec<_>>()
                .join("; ");
            return Err(BoardGatewayError::Api(joined));
        }
        envelope
            .data
            .ok_or_else(|| BoardGatewayError::Decode("response carried no data".to_owned()))
    }
}

#[async_trait]
impl BoardGateway for GitHubBoardGateway {
    async fn fetch_board_pair(
        &self,
        owner: &str,
        source: BoardNumber,
        target: BoardNumber,
    ) -> BoardGatewayResult<BoardPair> {
        let variables =
            json!({ "owner": owner, "source": source.value(), "target": target.value() });
        let data: OrganizationData<BoardPairNode> = self.post(BOARD_PAIR_QUERY, variables).await?;
        let boards = organization(data, owner)?;
        let source_board = boards
            .source
            .ok_or_else(|| board_not_found(owner, source))?
            .into_board()?;
        let target_board = boards
            .target
            .ok_or_else(|| board_not_found(owner, target))?
            .into_board()?;
        Ok(BoardPair { source: source_board, target: target_board })
    }

    async fn fetch_board_items(&self, board: &BoardId) -> BoardGatewayResult<Vec<BoardItem>> {
        let mut items = Vec::new();
        let mut cursor: Option<String> = None;
        loop {
            let variables =
                json!({ "board": board.as_str(), "first": PAGE_SIZE, "after": cursor.as_deref() });
            let data: ItemsPageData = self.post(BOARD_ITEMS_QUERY, variables).await?;
            let connection = data
                .node
                .and_then(|node| node.items)
                .ok_or_else(|| BoardGatewayError::UnknownBoard(board.clone()))?;
            cursor = collect_page(board, connection, &mut items)?;
            if cursor.is_none() {
                break;
            }
        }
        Ok(items)
    }

    async fn fetch_board(&self, owner: &str, number: BoardNumber) -> BoardGatewayResult<Board> {
        let variables = json!({ "owner": owner, "number": number.value() });
        let data: OrganizationData<SingleBoardNode> = self.post(BOARD_QUERY, variables).await?;
        let node = organization(data, owner)?;
        node.board.ok_or_else(|| board_not_found(owner, number))?.into_board()
    }

    async fn fetch_pull_requests(
        &self,
        owner: &str,
        repository: &str,
        numbers: &[u64],
    ) -> BoardGatewayResult<Vec<PullRequest>> {
        let mut pull_requests = Vec::with_capacity(numbers.len());
        for number in numbers {
            let variables = json!({ "owner": owner, "name": repository, "number": number });
            let data: RepositoryData = self.post(PULL_REQUEST_QUERY, variables).await?;
            let pull_node = data
                .repository
                .and_then(|repository_node| repository_node.pull_request)
                .ok_or_else(|| BoardGatewayError::PullRequestNotFound {
                    owner: owner.to_owned(),
                    repository: repository.to_owned(),
                    number: *number,
                })?;
            pull_requests.push(pull_node.into_pull_request()?);
        }
        Ok(pull_requests)
    }

    async fn add_content_to_board(
        &self,
        board: &BoardId,
        content: &ContentId,
    ) -> BoardGatewayResult<ItemId> {
        let variables = json!({ "project": board.as_str(), "content": content.as_str() });
        let data: AddItemData = self.post(ADD_ITEM_MUTATION, variables).await?;
        let item = data
            .add_project_v2_item_by_id
            .and_then(|payload| payload.item)
            .ok_or_else(|| BoardGatewayError::Decode("add mutation returned no item".to_owned()))?;
        ItemId::new(item.id).map_err(|error| BoardGatewayError::Decode(error.to_string()))
    }

    async fn update_item_fields(&self, changes: &[FieldChange]) -> BoardGatewayResult<()> {
        if changes.is_empty() {
            return Ok(());
        }
        let (document, variables) = field_update_document(changes);
        let _: Value = self.post(&document, variables).await?;
        Ok(())
    }
}

fn organization<T>(data: OrganizationData<T>, owner: &str) -> BoardGatewayResult<T> {
    data.organization
        .ok_or_else(|| BoardGatewayError::Api(format!("organization '{owner}' not found")))
}

fn board_not_found(owner: &str, number: BoardNumber) -> BoardGatewayError {
    BoardGatewayError::BoardNotFound { owner: owner.to_owned(), number }
}

/// Folds one page of item nodes into `items`, returning the cursor to
/// request the next page with while the connection reports more.
fn collect_page(
    board: &BoardId,
    connection: ItemConnection,
    items: &mut Vec<BoardItem>,
) -> BoardGatewayResult<Option<String>> {
    for item_node in connection.nodes {
        let Some(item) = item_node.into_item()? else {
            debug!(board = %board, "skipping item without issue or pull request content");
            continue;
        };
        items.push(item);
    }
    let PageInfo { has_next_page, end_cursor } = connection.page_info;
    Ok(end_cursor.filter(|_| has_next_page))
}
