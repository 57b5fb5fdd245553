//! Unit tests for the board module.
//!
//! Tests are organised by concern: domain value construction, the status
//! mapping policy, pull request reference extraction, and the two
//! orchestration services.
