//! Use-case services for the data-entry screens.
//!
//! # Responsibility
//! - Compose repository calls into purchase and management workflows.
//! - Convert typed repository failures into `ActionOutcome` pairs.

pub mod outcome;
pub mod ticketing_service;
