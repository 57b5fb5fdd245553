//! Single-select field schema for project boards.

use super::{FieldId, OptionId};

/// Selectable option of a single-select board field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    id: OptionId,
    name: String,
}

impl SelectOption {
    /// Creates an option from its identifier and display name.
    #[must_use]
    pub fn new(id: OptionId, name: impl Into<String>) -> Self {
        Self { id, name: name.into() }
    }

    /// Returns the option identifier.
    #[must_use]
    pub const fn id(&self) -> &OptionId {
        &self.id
    }

    /// Returns the option display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Single-select field with its options in board-declared order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusField {
    id: FieldId,
    options: Vec<SelectOption>,
}

impl StatusField {
    /// Creates a field from its identifier and ordered options.
    #[must_use]
    pub const fn new(id: FieldId, options: Vec<SelectOption>) -> Self {
        Self { id, options }
    }

    /// Returns the field identifier.
    #[must_use]
    pub const fn id(&self) -> &FieldId {
        &self.id
    }

    /// Returns the options in board-declared order.
    #[must_use]
    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    /// Finds the first option whose name contains `needle`, ignoring case.
    ///
    /// Options are scanned in board-declared order.
    #[must_use]
    pub fn find_containing(&self, needle: &str) -> Option<&SelectOption> {
        let folded = needle.to_uppercase();
        self.options
            .iter()
            .find(|option| option.name.to_uppercase().contains(&folded))
    }

    /// Finds the option whose name equals `name` exactly.
    #[must_use]
    pub fn find_named(&self, name: &str) -> Option<&SelectOption> {
        self.options.iter().find(|option| option.name == name)
    }
}
