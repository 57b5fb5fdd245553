//! Status synchronization flow tests against [`InMemoryBoardGateway`].
//!
//! Drives the complete flow through the public API: board pair lookup,
//! target item retrieval, planning, and the batched mutation.

use crate::in_memory::helpers::{
    OWNER, gateway, issue_card, runtime, seed_boards, seed_linked_issue, status,
};
use eyre::eyre;
use rstest::rstest;
use std::io;
use std::sync::Arc;
use switchboard::board::{
    adapters::memory::InMemoryBoardGateway,
    domain::{BoardDomainError, BoardId, BoardNumber, ItemId, OptionId, StatusMappingPolicy},
    services::{StatusSyncRequest, StatusSyncService},
};
use tokio::runtime::Runtime;

fn sync_request() -> Result<StatusSyncRequest, BoardDomainError> {
    Ok(StatusSyncRequest::new(
        OWNER,
        BoardNumber::new(1)?,
        BoardNumber::new(2)?,
    ))
}

/// Tests that a delivery status reaches the roadmap item through the full
/// service flow.
#[rstest]
fn mirrors_delivery_statuses_onto_the_roadmap(
    runtime: io::Result<Runtime>,
    gateway: InMemoryBoardGateway,
) -> eyre::Result<()> {
    let rt = runtime?;
    seed_boards(&gateway)?;
    seed_linked_issue(&gateway, 1, Some(status("Needs QA", "D-QA")?), None)?;

    let shared = Arc::new(gateway);
    let service = StatusSyncService::new(Arc::clone(&shared), StatusMappingPolicy::default());
    let report = rt.block_on(service.sync(sync_request()?))?;

    assert_eq!(report.examined, 1);
    assert_eq!(report.updated_urls, vec![issue_card(1)?.url().to_owned()]);

    let updated = shared
        .item(&BoardId::new("B-ROADMAP")?, &ItemId::new("R-ITEM-1")?)?
        .ok_or_else(|| eyre!("roadmap item should exist"))?;
    let current = updated
        .status()
        .ok_or_else(|| eyre!("roadmap status should be set"))?;
    assert_eq!(current.option_id(), &OptionId::new("R-REVIEW")?);
    assert_eq!(current.name(), "In review");
    Ok(())
}

/// Tests that a second run over converged boards issues no mutation.
#[rstest]
fn rerunning_after_convergence_issues_no_mutation(
    runtime: io::Result<Runtime>,
    gateway: InMemoryBoardGateway,
) -> eyre::Result<()> {
    let rt = runtime?;
    seed_boards(&gateway)?;
    seed_linked_issue(&gateway, 1, Some(status("In Progress", "D-PROGRESS")?), None)?;

    let shared = Arc::new(gateway);
    let service = StatusSyncService::new(Arc::clone(&shared), StatusMappingPolicy::default());
    let first = rt.block_on(service.sync(sync_request()?))?;
    let second = rt.block_on(service.sync(sync_request()?))?;

    assert_eq!(first.updated_urls.len(), 1);
    assert!(second.updated_urls.is_empty());
    assert_eq!(shared.recorded_update_batches()?.len(), 1);
    Ok(())
}

/// Tests that released roadmap items keep their status whatever the
/// delivery board says.
#[rstest]
fn released_roadmap_items_keep_their_status(
    runtime: io::Result<Runtime>,
    gateway: InMemoryBoardGateway,
) -> eyre::Result<()> {
    let rt = runtime?;
    seed_boards(&gateway)?;
    seed_linked_issue(
        &gateway,
        1,
        Some(status("In Progress", "D-PROGRESS")?),
        Some(status("Released", "R-RELEASED")?),
    )?;

    let shared = Arc::new(gateway);
    let service = StatusSyncService::new(Arc::clone(&shared), StatusMappingPolicy::default());
    let report = rt.block_on(service.sync(sync_request()?))?;

    assert!(report.updated_urls.is_empty());
    let untouched = shared
        .item(&BoardId::new("B-ROADMAP")?, &ItemId::new("R-ITEM-1")?)?
        .ok_or_else(|| eyre!("roadmap item should exist"))?;
    let current = untouched
        .status()
        .ok_or_else(|| eyre!("roadmap status should be set"))?;
    assert_eq!(current.option_id(), &OptionId::new("R-RELEASED")?);
    Ok(())
}
