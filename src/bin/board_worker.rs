//! Propagates project board changes for a repository's linked boards.
//!
//! Usage:
//!
//! ```text
//! board_worker <operation>
//! ```
//!
//! The `operation` must be `status-sync` or `release`. Configuration comes
//! from the environment: `GITHUB_TOKEN` and `GITHUB_REPOSITORY` always, plus
//! the board numbers `SOURCE_BOARD`/`TARGET_BOARD` for status
//! synchronization, or `ROADMAP_BOARD` and `GITHUB_EVENT_PATH` for release
//! propagation. `GITHUB_GRAPHQL_URL` overrides the GraphQL endpoint when
//! set, as on GitHub Enterprise runners.
//!
//! `status-sync` mirrors the source board's status column onto the target
//! board; `release` stamps a published release onto the roadmap board.

use std::env;
use std::sync::Arc;

use switchboard::board::adapters::github::GitHubBoardGateway;
use switchboard::board::domain::StatusMappingPolicy;
use switchboard::board::ports::BoardGatewayError;
use switchboard::board::services::{
    ReleasePropagationError, ReleasePropagationService, ReleaseRequest, StatusSyncError,
    StatusSyncService,
};
use switchboard::trigger::{TriggerError, WorkerEnv, load_release_event};
use thiserror::Error;
use tokio::runtime::Builder;
use tracing::info;

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur while driving a worker run.
#[derive(Debug, Error)]
enum WorkerError {
    #[error("invalid arguments: {0}")]
    InvalidArgs(String),
    #[error(transparent)]
    Trigger(#[from] TriggerError),
    #[error("runtime init failed: {0}")]
    RuntimeInit(#[source] std::io::Error),
    #[error(transparent)]
    Gateway(#[from] BoardGatewayError),
    #[error(transparent)]
    StatusSync(#[from] StatusSyncError),
    #[error(transparent)]
    Release(#[from] ReleasePropagationError),
}

#[derive(Debug, PartialEq, Eq)]
enum Operation {
    StatusSync,
    Release,
}

impl Operation {
    fn parse(arg: &str) -> Result<Self, WorkerError> {
        match arg {
            "status-sync" => Ok(Self::StatusSync),
            "release" => Ok(Self::Release),
            other => Err(WorkerError::InvalidArgs(format!(
                "unknown operation '{other}'; expected status-sync or release"
            ))),
        }
    }
}

fn main() -> Result<(), BoxError> {
    init_logging();
    let args = collect_args()?;
    run(args.into_iter()).map_err(Into::into)
}

fn init_logging() {
    let filter = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_owned());
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}

fn collect_args() -> Result<Vec<String>, WorkerError> {
    env::args_os()
        .map(|arg_os| {
            arg_os
                .into_string()
                .map_err(|_| WorkerError::InvalidArgs("argument is not valid UTF-8".into()))
        })
        .collect()
}

fn run(args: impl Iterator<Item = String>) -> Result<(), WorkerError> {
    let operation = parse_args(args)?;
    let environment = WorkerEnv::from_process();
    let token = environment.github_token()?;
    let gateway = Arc::new(match environment.graphql_url() {
        Some(endpoint) => GitHubBoardGateway::with_endpoint(token, endpoint)?,
        None => GitHubBoardGateway::new(token)?,
    });
    let runtime = build_runtime()?;
    runtime.block_on(async {
        match operation {
            Operation::StatusSync => run_status_sync(gateway, &environment).await,
            Operation::Release => run_release(gateway, &environment).await,
        }
    })
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Operation, WorkerError> {
    let _program = args.next();
    let operation = args
        .next()
        .ok_or_else(|| WorkerError::InvalidArgs("missing operation argument".into()))
        .and_then(|arg| Operation::parse(&arg))?;
    if args.next().is_some() {
        return Err(WorkerError::InvalidArgs(
            "unexpected extra arguments after the operation".into(),
        ));
    }
    Ok(operation)
}

fn build_runtime() -> Result<tokio::runtime::Runtime, WorkerError> {
    Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(WorkerError::RuntimeInit)
}

async fn run_status_sync(
    gateway: Arc<GitHubBoardGateway>,
    environment: &WorkerEnv,
) -> Result<(), WorkerError> {
    let request = environment.status_sync_request()?;
    let service = StatusSyncService::new(gateway, StatusMappingPolicy::default());
    let report = service.sync(request).await?;
    info!(
        examined = report.examined,
        updated = report.updated_urls.len(),
        "status synchronization finished"
    );
    Ok(())
}

async fn run_release(
    gateway: Arc<GitHubBoardGateway>,
    environment: &WorkerEnv,
) -> Result<(), WorkerError> {
    let event = load_release_event(&environment.event_path()?)?;
    if let Some(published_at) = event.published_at() {
        info!(%published_at, "handling published release");
    }
    let request = ReleaseRequest::new(event.into_release()?, environment.roadmap_board()?);
    let service = ReleasePropagationService::new(gateway);
    let report = service.propagate(request).await?;
    info!(
        released = report.released_urls.len(),
        added = report.added,
        "release propagation finished"
    );
    Ok(())
}
