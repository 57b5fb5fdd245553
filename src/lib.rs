//! Switchboard: project board status synchronization and release stamping.
//!
//! This crate keeps two linked GitHub project boards in step and propagates
//! published releases onto a roadmap board, driven by a small worker binary
//! invoked from workflow runs.
//!
//! # Architecture
//!
//! Switchboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure board, card, and release logic with no infrastructure
//!   dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (GitHub GraphQL, an
//!   in-memory fake for tests)
//!
//! # Modules
//!
//! - [`board`]: Board synchronization domain, services, and adapters
//! - [`trigger`]: Environment and event payload decoding for the worker

pub mod board;
pub mod trigger;
