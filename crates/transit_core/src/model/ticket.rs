//! Ticket domain model.
//!
//! # Responsibility
//! - Define the purchase record linking a passenger to a line, station,
//!   bus, seat, zone and fare type.
//! - Provide the read model used by ticket detail views.
//!
//! # Invariants
//! - Every reference field points at an existing row when persisted.
//! - `seat_number` starts at 1.

use crate::model::money::Money;
use crate::model::network::{BusLineId, BusNumber, StationNumber, ZoneId};
use crate::model::passenger::PassengerId;
use crate::model::validation::{require_key, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

pub type TicketNumber = String;

/// Fare type. Serialized and persisted as the variant name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TicketType {
    SingleTicket,
    MonthlyPass,
}

impl TicketType {
    pub const ALL: [TicketType; 2] = [TicketType::SingleTicket, TicketType::MonthlyPass];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::SingleTicket => "SingleTicket",
            Self::MonthlyPass => "MonthlyPass",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "SingleTicket" => Some(Self::SingleTicket),
            "MonthlyPass" => Some(Self::MonthlyPass),
            _ => None,
        }
    }
}

impl Display for TicketType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Persisted ticket row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    pub number: TicketNumber,
    #[serde(rename = "type")]
    pub kind: TicketType,
    pub zone: ZoneId,
    pub seat_number: u32,
    pub passenger: PassengerId,
    pub bus_line: BusLineId,
    pub station: StationNumber,
    pub bus: BusNumber,
}

impl Ticket {
    /// Checks field shape only; reference existence is a repository concern.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_key("ticket_number", &self.number)?;
        require_key("passenger_id", &self.passenger)?;
        require_key("bus_number", &self.bus)?;
        if self.seat_number == 0 {
            return Err(ValidationError::InvalidSeatNumber(self.seat_number));
        }
        Ok(())
    }
}

/// Ticket joined with the labels of everything it references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketDetail {
    pub ticket: Ticket,
    pub bus_line_name: String,
    pub zone_price: Money,
    pub passenger_name: String,
    pub station_name: String,
    /// Line the referenced bus is assigned to; may differ from `ticket.bus_line`.
    pub bus_home_line: BusLineId,
}
