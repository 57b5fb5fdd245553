//! Board item aggregate linking content to field values.

use super::{ContentCard, ItemId, StatusValue};

/// Item on a project board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardItem {
    id: ItemId,
    content: ContentCard,
    status: Option<StatusValue>,
    released_in: Option<String>,
}

impl BoardItem {
    /// Creates an item without field values.
    #[must_use]
    pub const fn new(id: ItemId, content: ContentCard) -> Self {
        Self {
            id,
            content,
            status: None,
            released_in: None,
        }
    }

    /// Sets the item's status value.
    #[must_use]
    pub fn with_status(mut self, status: StatusValue) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets the item's "Released in" text.
    #[must_use]
    pub fn with_released_in(mut self, released_in: impl Into<String>) -> Self {
        self.released_in = Some(released_in.into());
        self
    }

    /// Returns the item identifier.
    #[must_use]
    pub const fn id(&self) -> &ItemId {
        &self.id
    }

    /// Returns the content shown by this item.
    #[must_use]
    pub const fn content(&self) -> &ContentCard {
        &self.content
    }

    /// Returns the stored status value, if any.
    #[must_use]
    pub const fn status(&self) -> Option<&StatusValue> {
        self.status.as_ref()
    }

    /// Returns the stored "Released in" text, if any.
    #[must_use]
    pub fn released_in(&self) -> Option<&str> {
        self.released_in.as_deref()
    }

    /// Replaces the stored status value.
    pub fn set_status(&mut self, status: StatusValue) {
        self.status = Some(status);
    }

    /// Replaces the stored "Released in" text.
    pub fn set_released_in(&mut self, released_in: impl Into<String>) {
        self.released_in = Some(released_in.into());
    }
}
