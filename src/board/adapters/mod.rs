//! Adapter implementations for board ports.

pub mod github;
pub mod memory;
