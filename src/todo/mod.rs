//! Todo tracking: lifecycle state machine, queries, and durable storage.
//!
//! The module follows hexagonal architecture:
//!
//! - Domain types and pure transitions in [`domain`]
//! - Filtering, ordering, and pagination in [`query`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Command and query orchestration in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod query;
pub mod services;

#[cfg(test)]
mod tests;
