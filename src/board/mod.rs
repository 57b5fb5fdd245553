//! Project board synchronization for Switchboard.
//!
//! This module keeps the status column of a target board in step with a
//! source board through an ordered keyword mapping, and stamps published
//! releases onto a roadmap board: referenced pull requests are resolved to
//! their closing issues, added to the board when absent, and marked with
//! the release version. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
