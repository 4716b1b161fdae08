//! Field-level validation shared by all write paths.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Validation failure raised before any SQL mutation runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required text field is empty after trimming.
    EmptyField(&'static str),
    /// Seat numbers start at 1.
    InvalidSeatNumber(u32),
    /// A key field carries leading or trailing whitespace.
    PaddedKey(&'static str),
    /// Zone prices cannot be negative.
    NegativePrice(i64),
    /// Zone price above the supported ceiling.
    PriceTooHigh { cents: i64, max_cents: i64 },
    /// Line length must be a finite, non-negative number of kilometers.
    InvalidLength,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyField(field) => write!(f, "{field} is required"),
            Self::InvalidSeatNumber(seat) => {
                write!(f, "seat_number must be at least 1, got {seat}")
            }
            Self::PaddedKey(field) => {
                write!(f, "{field} must not have leading or trailing whitespace")
            }
            Self::PriceTooHigh { cents, max_cents } => {
                write!(f, "price {cents} cents exceeds the maximum of {max_cents} cents")
            }
            Self::NegativePrice(cents) => {
                write!(f, "price cannot be negative, got {cents} cents")
            }
            Self::InvalidLength => write!(f, "length_km must be a finite non-negative value"),
        }
    }
}

impl Error for ValidationError {}

pub(crate) fn require_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyField(field));
    }
    Ok(())
}

/// Key fields must be non-empty and already trimmed.
pub(crate) fn require_key(field: &'static str, value: &str) -> Result<(), ValidationError> {
    require_text(field, value)?;
    if value.trim() != value {
        return Err(ValidationError::PaddedKey(field));
    }
    Ok(())
}
