//! In-memory adapter for the board gateway port.

mod gateway;

pub use gateway::InMemoryBoardGateway;
