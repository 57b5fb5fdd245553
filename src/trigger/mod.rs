//! Workflow trigger boundary: environment and event payload decoding.
//!
//! Everything the worker needs from the outside world is parsed here, once,
//! into typed values before any service runs.

mod environment;
mod error;
mod payload;

pub use environment::{
    EVENT_PATH_VAR, GRAPHQL_URL_VAR, REPOSITORY_VAR, ROADMAP_BOARD_VAR, SOURCE_BOARD_VAR,
    TARGET_BOARD_VAR, TOKEN_VAR, WorkerEnv,
};
pub use error::{TriggerError, TriggerResult};
pub use payload::{ReleaseEvent, load_release_event};
