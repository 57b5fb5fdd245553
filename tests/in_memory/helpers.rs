//! Shared test helpers for in-memory board gateway integration tests.

use rstest::fixture;
use std::io;
use switchboard::board::{
    adapters::memory::InMemoryBoardGateway,
    domain::{
        Board, BoardDomainError, BoardId, BoardItem, BoardNumber, ContentCard, ContentId, FieldId,
        ItemId, OptionId, SelectOption, StatusField, StatusValue,
    },
};
use tokio::runtime::Runtime;

/// Owner login shared by every seeded board and repository.
pub const OWNER: &str = "acme";

/// Repository name the seeded pull requests and issues belong to.
pub const REPOSITORY: &str = "widget";

/// Provides a tokio runtime for async operations in tests.
///
/// # Errors
///
/// Returns an error if the runtime cannot be created.
#[fixture]
pub fn runtime() -> io::Result<Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
}

/// Provides a fresh gateway for each test.
#[fixture]
pub fn gateway() -> InMemoryBoardGateway {
    InMemoryBoardGateway::new()
}

/// Builds the delivery board statuses are mirrored from.
///
/// # Errors
///
/// Returns an error if a seeded identifier fails validation.
pub fn delivery_board() -> Result<Board, BoardDomainError> {
    Ok(Board::new(
        BoardId::new("B-DELIVERY")?,
        BoardNumber::new(1)?,
        StatusField::new(
            FieldId::new("F-DELIVERY-STATUS")?,
            vec![
                SelectOption::new(OptionId::new("D-PROGRESS")?, "In Progress"),
                SelectOption::new(OptionId::new("D-QA")?, "Needs QA"),
                SelectOption::new(OptionId::new("D-DONE")?, "Done"),
            ],
        ),
    ))
}

/// Builds the roadmap board receiving mirrored statuses and releases.
///
/// # Errors
///
/// Returns an error if a seeded identifier fails validation.
pub fn roadmap_board() -> Result<Board, BoardDomainError> {
    Ok(Board::new(
        BoardId::new("B-ROADMAP")?,
        BoardNumber::new(2)?,
        StatusField::new(
            FieldId::new("F-ROADMAP-STATUS")?,
            vec![
                SelectOption::new(OptionId::new("R-BACKLOG")?, "Backlog"),
                SelectOption::new(OptionId::new("R-PROGRESS")?, "In progress"),
                SelectOption::new(OptionId::new("R-REVIEW")?, "In review"),
                SelectOption::new(OptionId::new("R-DONE")?, "Done"),
                SelectOption::new(OptionId::new("R-RELEASED")?, "Released"),
            ],
        ),
    )
    .with_released_in_field(FieldId::new("F-RELEASED-IN")?))
}

/// Registers the delivery and roadmap boards under [`OWNER`].
///
/// # Errors
///
/// Returns an error if board construction or registration fails.
pub fn seed_boards(
    gateway: &InMemoryBoardGateway,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    gateway.insert_board(OWNER, delivery_board()?)?;
    gateway.insert_board(OWNER, roadmap_board()?)?;
    Ok(())
}

/// Builds a status value for seeding items.
///
/// # Errors
///
/// Returns an error if the option identifier fails validation.
pub fn status(name: &str, option: &str) -> Result<StatusValue, BoardDomainError> {
    Ok(StatusValue::new(name, OptionId::new(option)?))
}

/// Builds an issue card with its canonical URL.
///
/// # Errors
///
/// Returns an error if the content identifier fails validation.
pub fn issue_card(number: u64) -> Result<ContentCard, BoardDomainError> {
    Ok(ContentCard::new(
        ContentId::new(format!("ISSUE-{number}"))?,
        format!("https://github.com/{OWNER}/{REPOSITORY}/issues/{number}"),
    ))
}

/// Builds a pull request card with its canonical URL.
///
/// # Errors
///
/// Returns an error if the content identifier fails validation.
pub fn pull_card(number: u64) -> Result<ContentCard, BoardDomainError> {
    Ok(ContentCard::new(
        ContentId::new(format!("PR-{number}"))?,
        format!("https://github.com/{OWNER}/{REPOSITORY}/pull/{number}"),
    ))
}

/// Places an issue on both boards with the given statuses.
///
/// The shared content links the two items, so the source status becomes
/// visible through the roadmap item's memberships.
///
/// # Errors
///
/// Returns an error if construction or insertion fails.
pub fn seed_linked_issue(
    gateway: &InMemoryBoardGateway,
    number: u64,
    delivery_status: Option<StatusValue>,
    roadmap_status: Option<StatusValue>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let shared = issue_card(number)?;
    let mut on_delivery = BoardItem::new(ItemId::new(format!("D-ITEM-{number}"))?, shared.clone());
    if let Some(value) = delivery_status {
        on_delivery = on_delivery.with_status(value);
    }
    gateway.insert_item(&BoardId::new("B-DELIVERY")?, on_delivery)?;
    let mut on_roadmap = BoardItem::new(ItemId::new(format!("R-ITEM-{number}"))?, shared);
    if let Some(value) = roadmap_status {
        on_roadmap = on_roadmap.with_status(value);
    }
    gateway.insert_item(&BoardId::new("B-ROADMAP")?, on_roadmap)?;
    Ok(())
}
