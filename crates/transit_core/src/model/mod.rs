//! Domain model for the ticketing network.
//!
//! # Responsibility
//! - Define the records persisted by the repository layer.
//! - Keep identifier kinds explicit in signatures.
//!
//! # Invariants
//! - Identifiers are caller-supplied and never generated by core.
//! - Money values are integer cents.

pub mod money;
pub mod network;
pub mod passenger;
pub mod ticket;
pub mod validation;
