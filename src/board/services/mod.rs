//! Application services orchestrating board synchronization flows.

mod release;
mod status_sync;

pub use release::{
    ReleasePropagationError, ReleasePropagationResult, ReleasePropagationService, ReleaseReport,
    ReleaseRequest,
};
pub use status_sync::{
    StatusSyncError, StatusSyncReport, StatusSyncRequest, StatusSyncResult, StatusSyncService,
};
