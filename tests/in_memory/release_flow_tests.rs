//! Release propagation flow tests against [`InMemoryBoardGateway`].
//!
//! Exercises reference extraction, closing-issue resolution, roadmap
//! additions, and the batched release stamp end to end.

use crate::in_memory::helpers::{
    OWNER, REPOSITORY, gateway, issue_card, pull_card, runtime, seed_boards, seed_linked_issue,
    status,
};
use eyre::eyre;
use rstest::rstest;
use std::io;
use std::sync::Arc;
use switchboard::board::{
    adapters::memory::InMemoryBoardGateway,
    domain::{BoardId, BoardNumber, ItemId, OptionId, PullRequest, Release},
    services::{ReleasePropagationService, ReleaseRequest},
};
use tokio::runtime::Runtime;

fn release_request(version: &str, body: &str) -> eyre::Result<ReleaseRequest> {
    Ok(ReleaseRequest::new(
        Release::new(version, OWNER, REPOSITORY, body)?,
        BoardNumber::new(2)?,
    ))
}

/// Tests that a release adds its closing issues to the roadmap and stamps
/// them released.
#[rstest]
fn propagates_closing_issues_onto_the_roadmap(
    runtime: io::Result<Runtime>,
    gateway: InMemoryBoardGateway,
) -> eyre::Result<()> {
    let rt = runtime?;
    seed_boards(&gateway)?;
    let shipped = PullRequest::new(30, pull_card(30)?)
        .with_closing_issues(vec![issue_card(10)?]);
    gateway.insert_pull_request(OWNER, REPOSITORY, shipped)?;

    let shared = Arc::new(gateway);
    let service = ReleasePropagationService::new(Arc::clone(&shared));
    let body = format!("Ships {}.", pull_card(30)?.url());
    let report = rt.block_on(service.propagate(release_request("v1.0.0", &body)?))?;

    assert_eq!(report.added, 1);
    assert_eq!(report.released_urls, vec![issue_card(10)?.url().to_owned()]);
    assert_eq!(shared.recorded_additions()?.len(), 1);

    let added = shared
        .item(&BoardId::new("B-ROADMAP")?, &ItemId::new("ITEM-1")?)?
        .ok_or_else(|| eyre!("added roadmap item should exist"))?;
    let current = added
        .status()
        .ok_or_else(|| eyre!("added item should carry a status"))?;
    assert_eq!(current.option_id(), &OptionId::new("R-RELEASED")?);
    assert_eq!(added.released_in(), Some("v1.0.0"));
    Ok(())
}

/// Tests that a later release appends its version to items already
/// released once.
#[rstest]
fn re_release_appends_each_version(
    runtime: io::Result<Runtime>,
    gateway: InMemoryBoardGateway,
) -> eyre::Result<()> {
    let rt = runtime?;
    seed_boards(&gateway)?;
    let shipped = PullRequest::new(30, pull_card(30)?)
        .with_closing_issues(vec![issue_card(10)?]);
    gateway.insert_pull_request(OWNER, REPOSITORY, shipped)?;

    let shared = Arc::new(gateway);
    let service = ReleasePropagationService::new(Arc::clone(&shared));
    let body = format!("Ships {}.", pull_card(30)?.url());
    rt.block_on(service.propagate(release_request("v1.0.0", &body)?))?;
    let second = rt.block_on(service.propagate(release_request("v1.1.0", &body)?))?;

    assert_eq!(second.added, 0, "the item should already be tracked");
    assert_eq!(shared.recorded_additions()?.len(), 1);

    let stamped = shared
        .item(&BoardId::new("B-ROADMAP")?, &ItemId::new("ITEM-1")?)?
        .ok_or_else(|| eyre!("roadmap item should exist"))?;
    assert_eq!(stamped.released_in(), Some("v1.0.0,v1.1.0"));
    Ok(())
}

/// Tests a mixed release touching one tracked issue and one standalone
/// pull request.
#[rstest]
fn stamps_existing_and_new_roadmap_items(
    runtime: io::Result<Runtime>,
    gateway: InMemoryBoardGateway,
) -> eyre::Result<()> {
    let rt = runtime?;
    seed_boards(&gateway)?;
    seed_linked_issue(
        &gateway,
        10,
        Some(status("Done", "D-DONE")?),
        Some(status("In review", "R-REVIEW")?),
    )?;
    let closing = PullRequest::new(30, pull_card(30)?)
        .with_closing_issues(vec![issue_card(10)?]);
    gateway.insert_pull_request(OWNER, REPOSITORY, closing)?;
    let standalone = PullRequest::new(31, pull_card(31)?);
    gateway.insert_pull_request(OWNER, REPOSITORY, standalone)?;

    let shared = Arc::new(gateway);
    let service = ReleasePropagationService::new(Arc::clone(&shared));
    let body = format!(
        "Ships {} and {}.",
        pull_card(30)?.url(),
        pull_card(31)?.url()
    );
    let report = rt.block_on(service.propagate(release_request("v2.0.0", &body)?))?;

    assert_eq!(report.added, 1, "only the standalone pull request is new");
    assert_eq!(
        report.released_urls,
        vec![issue_card(10)?.url().to_owned(), pull_card(31)?.url().to_owned()]
    );

    let tracked = shared
        .item(&BoardId::new("B-ROADMAP")?, &ItemId::new("R-ITEM-10")?)?
        .ok_or_else(|| eyre!("tracked roadmap item should exist"))?;
    let tracked_status = tracked
        .status()
        .ok_or_else(|| eyre!("tracked item should carry a status"))?;
    assert_eq!(tracked_status.option_id(), &OptionId::new("R-RELEASED")?);
    assert_eq!(tracked.released_in(), Some("v2.0.0"));

    let added = shared
        .item(&BoardId::new("B-ROADMAP")?, &ItemId::new("ITEM-1")?)?
        .ok_or_else(|| eyre!("added roadmap item should exist"))?;
    assert_eq!(added.released_in(), Some("v2.0.0"));
    Ok(())
}

/// Tests that two pull requests closing the same issue converge on a
/// single roadmap item.
#[rstest]
fn adds_a_jointly_closed_issue_only_once(
    runtime: io::Result<Runtime>,
    gateway: InMemoryBoardGateway,
) -> eyre::Result<()> {
    let rt = runtime?;
    seed_boards(&gateway)?;
    let first = PullRequest::new(30, pull_card(30)?)
        .with_closing_issues(vec![issue_card(10)?]);
    gateway.insert_pull_request(OWNER, REPOSITORY, first)?;
    let second = PullRequest::new(31, pull_card(31)?)
        .with_closing_issues(vec![issue_card(10)?]);
    gateway.insert_pull_request(OWNER, REPOSITORY, second)?;

    let shared = Arc::new(gateway);
    let service = ReleasePropagationService::new(Arc::clone(&shared));
    let body = format!(
        "Ships {} and {}.",
        pull_card(30)?.url(),
        pull_card(31)?.url()
    );
    let report = rt.block_on(service.propagate(release_request("v1.0.0", &body)?))?;

    assert_eq!(report.added, 2, "each closing reference counts an addition");
    assert_eq!(
        report.released_urls,
        vec![issue_card(10)?.url().to_owned(), issue_card(10)?.url().to_owned()]
    );
    assert_eq!(shared.recorded_additions()?.len(), 2);

    let added = shared
        .item(&BoardId::new("B-ROADMAP")?, &ItemId::new("ITEM-1")?)?
        .ok_or_else(|| eyre!("added roadmap item should exist"))?;
    let current = added
        .status()
        .ok_or_else(|| eyre!("added item should carry a status"))?;
    assert_eq!(current.option_id(), &OptionId::new("R-RELEASED")?);
    assert_eq!(added.released_in(), Some("v1.0.0"));
    assert!(
        shared.item(&BoardId::new("B-ROADMAP")?, &ItemId::new("ITEM-2")?)?.is_none(),
        "the second addition should reuse the existing item"
    );
    Ok(())
}
