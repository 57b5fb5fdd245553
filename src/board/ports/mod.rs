//! Port contracts for project board access.
//!
//! Ports define infrastructure-agnostic interfaces used by board services.

pub mod gateway;

pub use gateway::{BoardGateway, BoardGatewayError, BoardGatewayResult, FieldChange, FieldPatch};
