//! Reference network records: operators, lines, stops, vehicles, crew and
//! fare zones.
//!
//! # Invariants
//! - A `BusLine` belongs to an existing `Company`.
//! - `Station` and `Bus` rows belong to an existing `BusLine`.
//! - `Crew` rows belong to an existing `Bus`.

use crate::model::money::Money;
use crate::model::validation::{require_text, ValidationError};
use serde::{Deserialize, Serialize};

pub type CompanyName = String;
pub type BusLineId = i64;
pub type StationNumber = i64;
pub type BusNumber = String;
pub type CrewId = i64;
pub type ZoneId = i64;

/// Transit operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub name: CompanyName,
    pub vat: String,
}

impl Company {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("company_name", &self.name)
    }
}

/// Named route operated by a company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusLine {
    pub id: BusLineId,
    pub route: String,
    pub name: String,
    pub length_km: f64,
    pub company: CompanyName,
    pub seats: u32,
    pub crew_count: u32,
    pub in_service: bool,
}

impl BusLine {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("bus_line_name", &self.name)?;
        require_text("company_name", &self.company)?;
        if !self.length_km.is_finite() || self.length_km < 0.0 {
            return Err(ValidationError::InvalidLength);
        }
        Ok(())
    }
}

/// Stop served by one bus line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Station {
    pub number: StationNumber,
    pub name: String,
    pub bus_line: BusLineId,
}

impl Station {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("station_name", &self.name)
    }
}

/// Vehicle assigned to one bus line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bus {
    pub number: BusNumber,
    pub bus_line: BusLineId,
    pub seats: u32,
    pub crew_count: u32,
    pub in_service: bool,
}

impl Bus {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("bus_number", &self.number)
    }
}

/// Crew member working on one bus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Crew {
    pub id: CrewId,
    pub role: String,
    pub name: String,
    pub bus: BusNumber,
}

impl Crew {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("crew_name", &self.name)?;
        require_text("bus_number", &self.bus)
    }
}

/// Highest accepted zone price: $1,000,000.00.
pub const MAX_ZONE_PRICE_CENTS: i64 = 100_000_000;

/// Fare band with a fixed price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    pub id: ZoneId,
    pub price: Money,
}

impl Zone {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.price.cents() < 0 {
            return Err(ValidationError::NegativePrice(self.price.cents()));
        }
        if self.price.cents() > MAX_ZONE_PRICE_CENTS {
            return Err(ValidationError::PriceTooHigh {
                cents: self.price.cents(),
                max_cents: MAX_ZONE_PRICE_CENTS,
            });
        }
        Ok(())
    }

    /// Picker/report label, e.g. `Zone 1 - $2.50`.
    pub fn label(&self) -> String {
        format!("Zone {} - {}", self.id, self.price)
    }
}
