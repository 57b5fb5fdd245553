//! Domain model for project board synchronization.
//!
//! The board domain models board schemas, cross-board content memberships,
//! the status mapping policy, and published releases while keeping all
//! infrastructure concerns outside of the domain boundary.

mod board;
mod content;
mod error;
mod field;
mod ids;
mod item;
mod release;
mod status;

pub use board::{Board, BoardPair, RELEASED_IN_FIELD_NAME, STATUS_FIELD_NAME};
pub use content::{BoardMembership, ContentCard, PullRequest, StatusValue};
pub use error::BoardDomainError;
pub use field::{SelectOption, StatusField};
pub use ids::{BoardId, BoardNumber, ContentId, FieldId, ItemId, OptionId};
pub use item::BoardItem;
pub use release::{Release, append_released_in};
pub use status::{CanonicalStatus, RELEASED_OPTION_NAME, StatusMappingPolicy, StatusRule};
