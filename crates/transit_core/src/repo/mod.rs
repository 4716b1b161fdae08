//! Repository layer contracts and SQLite implementations.
//!
//! # Responsibility
//! - Define per-entity data access contracts.
//! - Enforce the ticket-issuance invariants at the boundary, so callers get
//!   typed failures instead of storage-engine constraint messages.
//!
//! # Invariants
//! - Write paths validate field shape before SQL mutations.
//! - Reference existence is checked explicitly; declared foreign keys are
//!   the second line of enforcement.

pub mod error;
pub mod network_repo;
pub mod passenger_repo;
mod support;
pub mod ticket_repo;
