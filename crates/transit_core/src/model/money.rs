//! Fixed-point money amounts.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Amount in integer cents.
///
/// Zone prices are declared with two decimals, so cents are exact and avoid
/// float drift when fares are summed in reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money {
    cents: i64,
}

impl Money {
    pub const ZERO: Money = Money { cents: 0 };

    pub const fn from_cents(cents: i64) -> Self {
        Self { cents }
    }

    pub const fn cents(self) -> i64 {
        self.cents
    }

    /// Multiplies the amount by a whole factor (fare multipliers, counts).
    ///
    /// Returns `None` when the product does not fit in `i64` cents.
    pub const fn checked_times(self, factor: i64) -> Option<Self> {
        match self.cents.checked_mul(factor) {
            Some(cents) => Some(Self { cents }),
            None => None,
        }
    }

    /// Returns `None` on overflow.
    pub const fn checked_add(self, rhs: Money) -> Option<Self> {
        match self.cents.checked_add(rhs.cents) {
            Some(cents) => Some(Self { cents }),
            None => None,
        }
    }
}

impl Display for Money {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let sign = if self.cents < 0 { "-" } else { "" };
        let abs = self.cents.unsigned_abs();
        write!(f, "{sign}${}.{:02}", abs / 100, abs % 100)
    }
}
