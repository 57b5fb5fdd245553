//! Project board schema aggregate.

use super::{BoardId, BoardNumber, FieldId, StatusField};

/// Name of the single-select field driving board workflow columns.
pub const STATUS_FIELD_NAME: &str = "Status";

/// Name of the text field recording shipped release versions.
pub const RELEASED_IN_FIELD_NAME: &str = "Released in";

/// Project board with the field schema the services operate on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    id: BoardId,
    number: BoardNumber,
    status_field: StatusField,
    released_in_field: Option<FieldId>,
}

impl Board {
    /// Creates a board without a "Released in" field.
    #[must_use]
    pub const fn new(id: BoardId, number: BoardNumber, status_field: StatusField) -> Self {
        Self {
            id,
            number,
            status_field,
            released_in_field: None,
        }
    }

    /// Sets the board's "Released in" field.
    #[must_use]
    pub fn with_released_in_field(mut self, field_id: FieldId) -> Self {
        self.released_in_field = Some(field_id);
        self
    }

    /// Returns the board identifier.
    #[must_use]
    pub const fn id(&self) -> &BoardId {
        &self.id
    }

    /// Returns the user-facing board number.
    #[must_use]
    pub const fn number(&self) -> BoardNumber {
        self.number
    }

    /// Returns the board's status field schema.
    #[must_use]
    pub const fn status_field(&self) -> &StatusField {
        &self.status_field
    }

    /// Returns the board's "Released in" field, if it has one.
    #[must_use]
    pub const fn released_in_field(&self) -> Option<&FieldId> {
        self.released_in_field.as_ref()
    }
}

/// Source and target boards resolved for one synchronization run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardPair {
    /// Board whose statuses drive the synchronization.
    pub source: Board,
    /// Board whose items are updated.
    pub target: Board,
}
