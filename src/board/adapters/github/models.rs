//! Deserialization models for GitHub GraphQL responses.
//!
//! Each model mirrors the shape selected by the documents in
//! [`super::queries`] and converts into domain types via `into_*` methods.
//! Conversion rejects identifiers the domain would not accept, surfacing
//! them as [`BoardGatewayError::Decode`].

use serde::Deserialize;

use crate::board::domain::{
    Board, BoardDomainError, BoardId, BoardItem, BoardMembership, BoardNumber, ContentCard,
    ContentId, FieldId, ItemId, OptionId, PullRequest, RELEASED_IN_FIELD_NAME, SelectOption,
    STATUS_FIELD_NAME, StatusField, StatusValue,
};
use crate::board::ports::BoardGatewayError;

/// Top-level GraphQL response wrapper.
#[derive(Debug, Deserialize)]
pub(super) struct GraphQlEnvelope<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

/// A single error entry from the GraphQL `errors` array.
#[derive(Debug, Deserialize)]
pub(super) struct GraphQlError {
    pub message: String,
}

/// `data` payload for queries rooted at `organization`.
#[derive(Debug, Deserialize)]
pub(super) struct OrganizationData<T> {
    pub organization: Option<T>,
}

/// Aliased source and target boards from the pair query.
#[derive(Debug, Deserialize)]
pub(super) struct BoardPairNode {
    pub source: Option<ProjectNode>,
    pub target: Option<ProjectNode>,
}

/// Single aliased board from the board query.
#[derive(Debug, Deserialize)]
pub(super) struct SingleBoardNode {
    pub board: Option<ProjectNode>,
}

/// A `ProjectV2` node with its field schema.
#[derive(Debug, Deserialize)]
pub(super) struct ProjectNode {
    pub id: String,
    pub number: u64,
    pub fields: FieldConnection,
}

#[derive(Debug, Deserialize)]
pub(super) struct FieldConnection {
    pub nodes: Vec<FieldNode>,
}

/// One field of a board; `options` is present only for single-select fields.
#[derive(Debug, Deserialize)]
pub(super) struct FieldNode {
    pub id: String,
    pub name: String,
    pub options: Option<Vec<OptionNode>>,
}

#[derive(Debug, Deserialize)]
pub(super) struct OptionNode {
    pub id: String,
    pub name: String,
}

impl ProjectNode {
    /// Converts the node into a [`Board`], requiring a single-select status
    /// field and wiring up the release text field when the board has one.
    pub(super) fn into_board(self) -> Result<Board, BoardGatewayError> {
        let Self { id, number, fields } = self;
        let mut status = None;
        let mut released_in = None;
        for field in fields.nodes {
            if field.name == STATUS_FIELD_NAME {
                if let Some(options) = field.options {
                    status = Some((field.id, options));
                }
            } else if field.name == RELEASED_IN_FIELD_NAME {
                released_in = Some(field.id);
            }
        }
        let (status_id, options) = status.ok_or_else(|| BoardGatewayError::MissingField {
            board: number.to_string(),
            field: STATUS_FIELD_NAME,
        })?;
        let select_options = options
            .into_iter()
            .map(|option| Ok(SelectOption::new(OptionId::new(option.id)?, option.name)))
            .collect::<Result<Vec<_>, BoardDomainError>>()
            .map_err(decode_error)?;
        let status_field =
            StatusField::new(FieldId::new(status_id).map_err(decode_error)?, select_options);
        let mut board = Board::new(
            BoardId::new(id).map_err(decode_error)?,
            BoardNumber::new(number).map_err(decode_error)?,
            status_field,
        );
        if let Some(raw_field) = released_in {
            board = board.with_released_in_field(FieldId::new(raw_field).map_err(decode_error)?);
        }
        Ok(board)
    }
}

/// `data` payload for the board items page query.
#[derive(Debug, Deserialize)]
pub(super) struct ItemsPageData {
    pub node: Option<ItemsNode>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ItemsNode {
    pub items: Option<ItemConnection>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ItemConnection {
    pub page_info: PageInfo,
    pub nodes: Vec<ItemNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct PageInfo {
    pub has_next_page: bool,
    pub end_cursor: Option<String>,
}

/// One board item with its tracked field values and content card.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ItemNode {
    pub id: String,
    pub status: Option<FieldValueNode>,
    pub released_in: Option<FieldValueNode>,
    pub content: Option<CardNode>,
}

impl ItemNode {
    /// Converts the node into a [`BoardItem`], or `None` for items whose
    /// content is absent or a draft the inline fragments did not match.
    pub(super) fn into_item(self) -> Result<Option<BoardItem>, BoardGatewayError> {
        let Self { id, status, released_in, content } = self;
        let Some(card_node) = content else {
            return Ok(None);
        };
        let Some(card) = card_node.into_card()? else {
            return Ok(None);
        };
        let status_value = status.map(FieldValueNode::into_status_value).transpose()?.flatten();
        let released_text = released_in.and_then(|value| value.text);
        let mut item = BoardItem::new(ItemId::new(id).map_err(decode_error)?, card);
        if let Some(value) = status_value {
            item.set_status(value);
        }
        if let Some(text) = released_text {
            item.set_released_in(text);
        }
        Ok(Some(item))
    }
}

/// A `fieldValueByName` result; fields land only when the inline fragment
/// matched the value's concrete type.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct FieldValueNode {
    pub name: Option<String>,
    pub option_id: Option<String>,
    pub text: Option<String>,
}

impl FieldValueNode {
    /// Reads a single-select value; `None` when the value was not one.
    pub(super) fn into_status_value(self) -> Result<Option<StatusValue>, BoardGatewayError> {
        let (Some(name), Some(raw_option)) = (self.name, self.option_id) else {
            return Ok(None);
        };
        let option_id = OptionId::new(raw_option).map_err(decode_error)?;
        Ok(Some(StatusValue::new(name, option_id)))
    }
}

/// An issue or pull request card with its board memberships.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct CardNode {
    pub id: Option<String>,
    pub url: Option<String>,
    pub project_items: Option<ProjectItemConnection>,
}

impl CardNode {
    /// Converts the node into a [`ContentCard`], or `None` when the content
    /// union matched neither issue nor pull request.
    pub(super) fn into_card(self) -> Result<Option<ContentCard>, BoardGatewayError> {
        let Self { id, url, project_items } = self;
        let (Some(raw_id), Some(url_value)) = (id, url) else {
            return Ok(None);
        };
        build_card(raw_id, url_value, project_items).map(Some)
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct ProjectItemConnection {
    pub nodes: Vec<ProjectItemNode>,
}

impl ProjectItemConnection {
    pub(super) fn into_memberships(self) -> Result<Vec<BoardMembership>, BoardGatewayError> {
        self.nodes.into_iter().map(ProjectItemNode::into_membership).collect()
    }
}

/// A card's item on some board, with the field values tracked there.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ProjectItemNode {
    pub id: String,
    pub project: ProjectRef,
    pub status: Option<FieldValueNode>,
    pub released_in: Option<FieldValueNode>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ProjectRef {
    pub id: String,
}

impl ProjectItemNode {
    pub(super) fn into_membership(self) -> Result<BoardMembership, BoardGatewayError> {
        let Self { id, project, status, released_in } = self;
        let mut membership = BoardMembership::new(
            BoardId::new(project.id).map_err(decode_error)?,
            ItemId::new(id).map_err(decode_error)?,
        );
        let status_value = status.map(FieldValueNode::into_status_value).transpose()?.flatten();
        if let Some(value) = status_value {
            membership = membership.with_status(value);
        }
        if let Some(text) = released_in.and_then(|value| value.text) {
            membership = membership.with_released_in(text);
        }
        Ok(membership)
    }
}

/// `data` payload for the pull request query.
#[derive(Debug, Deserialize)]
pub(super) struct RepositoryData {
    pub repository: Option<RepositoryNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct RepositoryNode {
    pub pull_request: Option<PullRequestNode>,
}

/// A pull request with its card, memberships, and closing issues.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct PullRequestNode {
    pub id: String,
    pub number: u64,
    pub url: String,
    pub project_items: Option<ProjectItemConnection>,
    pub closing_issues_references: Option<IssueConnection>,
}

#[derive(Debug, Deserialize)]
pub(super) struct IssueConnection {
    pub nodes: Vec<CardNode>,
}

impl PullRequestNode {
    pub(super) fn into_pull_request(self) -> Result<PullRequest, BoardGatewayError> {
        let Self { id, number, url, project_items, closing_issues_references } = self;
        let card = build_card(id, url, project_items)?;
        let closing_nodes =
            closing_issues_references.map(|connection| connection.nodes).unwrap_or_default();
        let mut closing_issues = Vec::with_capacity(closing_nodes.len());
        for node in closing_nodes {
            if let Some(issue) = node.into_card()? {
                closing_issues.push(issue);
            }
        }
        Ok(PullRequest::new(number, card).with_closing_issues(closing_issues))
    }
}

/// `data` payload for the add-item mutation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct AddItemData {
    pub add_project_v2_item_by_id: Option<AddItemPayload>,
}

#[derive(Debug, Deserialize)]
pub(super) struct AddItemPayload {
    pub item: Option<ItemRef>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ItemRef {
    pub id: String,
}

fn build_card(
    raw_id: String,
    url: String,
    project_items: Option<ProjectItemConnection>,
) -> Result<ContentCard, BoardGatewayError> {
    let memberships = project_items
        .map(ProjectItemConnection::into_memberships)
        .transpose()?
        .unwrap_or_default();
    let content_id = ContentId::new(raw_id).map_err(decode_error)?;
    Ok(ContentCard::new(content_id, url).with_memberships(memberships))
}

fn decode_error(error: BoardDomainError) -> BoardGatewayError {
    BoardGatewayError::Decode(error.to_string())
}
