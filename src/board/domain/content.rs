//! Content entities shared across project boards.

use super::{BoardId, ContentId, ItemId, OptionId};

/// Status field value stored on a board item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusValue {
    name: String,
    option_id: OptionId,
}

impl StatusValue {
    /// Creates a status value from the option's display name and identifier.
    #[must_use]
    pub fn new(name: impl Into<String>, option_id: OptionId) -> Self {
        Self {
            name: name.into(),
            option_id,
        }
    }

    /// Returns the option display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the selected option identifier.
    #[must_use]
    pub const fn option_id(&self) -> &OptionId {
        &self.option_id
    }
}

/// Appearance of a content entity on one board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardMembership {
    board_id: BoardId,
    item_id: ItemId,
    status: Option<StatusValue>,
    released_in: Option<String>,
}

impl BoardMembership {
    /// Creates a membership without field values.
    #[must_use]
    pub const fn new(board_id: BoardId, item_id: ItemId) -> Self {
        Self {
            board_id,
            item_id,
            status: None,
            released_in: None,
        }
    }

    /// Sets the status value recorded on the board.
    #[must_use]
    pub fn with_status(mut self, status: StatusValue) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets the "Released in" text recorded on the board.
    #[must_use]
    pub fn with_released_in(mut self, released_in: impl Into<String>) -> Self {
        self.released_in = Some(released_in.into());
        self
    }

    /// Returns the board this membership belongs to.
    #[must_use]
    pub const fn board_id(&self) -> &BoardId {
        &self.board_id
    }

    /// Returns the item representing the content on the board.
    #[must_use]
    pub const fn item_id(&self) -> &ItemId {
        &self.item_id
    }

    /// Returns the recorded status value, if any.
    #[must_use]
    pub const fn status(&self) -> Option<&StatusValue> {
        self.status.as_ref()
    }

    /// Returns the recorded "Released in" text, if any.
    #[must_use]
    pub fn released_in(&self) -> Option<&str> {
        self.released_in.as_deref()
    }
}

/// Issue or pull request as it appears across project boards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentCard {
    id: ContentId,
    url: String,
    memberships: Vec<BoardMembership>,
}

impl ContentCard {
    /// Creates a card without board memberships.
    #[must_use]
    pub fn new(id: ContentId, url: impl Into<String>) -> Self {
        Self {
            id,
            url: url.into(),
            memberships: Vec::new(),
        }
    }

    /// Sets the card's board memberships.
    #[must_use]
    pub fn with_memberships(
        mut self,
        memberships: impl IntoIterator<Item = BoardMembership>,
    ) -> Self {
        self.memberships = memberships.into_iter().collect();
        self
    }

    /// Returns the content identifier.
    #[must_use]
    pub const fn id(&self) -> &ContentId {
        &self.id
    }

    /// Returns the content URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns every known board membership.
    #[must_use]
    pub fn memberships(&self) -> &[BoardMembership] {
        &self.memberships
    }

    /// Returns this content's membership on the given board, if any.
    #[must_use]
    pub fn membership_on(&self, board_id: &BoardId) -> Option<&BoardMembership> {
        self.memberships
            .iter()
            .find(|membership| membership.board_id() == board_id)
    }
}

/// Pull request together with the issues it closes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequest {
    number: u64,
    card: ContentCard,
    closing_issues: Vec<ContentCard>,
}

impl PullRequest {
    /// Creates a pull request with no closing issues.
    #[must_use]
    pub const fn new(number: u64, card: ContentCard) -> Self {
        Self {
            number,
            card,
            closing_issues: Vec::new(),
        }
    }

    /// Sets the issues this pull request closes.
    #[must_use]
    pub fn with_closing_issues(mut self, issues: impl IntoIterator<Item = ContentCard>) -> Self {
        self.closing_issues = issues.into_iter().collect();
        self
    }

    /// Returns the pull request number.
    #[must_use]
    pub const fn number(&self) -> u64 {
        self.number
    }

    /// Returns the pull request's own content card.
    #[must_use]
    pub const fn card(&self) -> &ContentCard {
        &self.card
    }

    /// Returns the closing issues in reference order.
    #[must_use]
    pub fn closing_issues(&self) -> &[ContentCard] {
        &self.closing_issues
    }
}
