//! Ticketing use-case service.
//!
//! # Responsibility
//! - Purchase workflow: compose picker selections into one ticket insert.
//! - Passenger and ticket management saves/removals for the CRUD screens.
//! - Typed picker lists for every reference field.
//!
//! # Invariants
//! - Required-field checks run before any repository call.
//! - Mutations return `ActionOutcome`; repository errors never escape them.
//! - Logged events carry keys only, never passenger names.

use crate::model::network::{BusLineId, BusNumber, StationNumber, ZoneId};
use crate::model::passenger::{Passenger, PassengerId};
use crate::model::ticket::{Ticket, TicketDetail, TicketType};
use crate::repo::error::{RepoError, RepoResult};
use crate::repo::network_repo::NetworkRepository;
use crate::repo::passenger_repo::PassengerRepository;
use crate::repo::ticket_repo::TicketRepository;
use crate::service::outcome::{ActionOutcome, PickerOption};
use log::{info, warn};

const MSG_ALL_FIELDS_REQUIRED: &str = "All fields are required!";
const MSG_PURCHASE_KEYS_REQUIRED: &str = "Passenger and Ticket Number are required!";
const MSG_PASSENGER_FIELDS_REQUIRED: &str = "Passenger ID and name are required!";
const MSG_PASSENGER_HAS_TICKETS: &str = "Cannot delete passenger with existing tickets";

/// Whether a management-screen save inserts a new row or edits the
/// selected one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveMode {
    Create,
    Update,
}

/// Purchase form state. Unselected pickers are `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseRequest {
    pub ticket_number: String,
    pub ticket_type: TicketType,
    pub passenger: Option<PassengerId>,
    pub bus_line: Option<BusLineId>,
    pub zone: Option<ZoneId>,
    pub station: Option<StationNumber>,
    pub bus: Option<BusNumber>,
    pub seat_number: Option<u32>,
}

impl PurchaseRequest {
    /// Builds the ticket, or returns the message for the first missing input.
    fn to_ticket(&self) -> Result<Ticket, &'static str> {
        let ticket_number = self.ticket_number.trim();
        let passenger = self
            .passenger
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty());
        let (Some(passenger), false) = (passenger, ticket_number.is_empty()) else {
            return Err(MSG_PURCHASE_KEYS_REQUIRED);
        };

        let bus = self
            .bus
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty());
        match (self.bus_line, self.zone, self.station, bus, self.seat_number) {
            (Some(bus_line), Some(zone), Some(station), Some(bus), Some(seat_number)) => {
                Ok(Ticket {
                    number: ticket_number.to_string(),
                    kind: self.ticket_type,
                    zone,
                    seat_number,
                    passenger: passenger.to_string(),
                    bus_line,
                    station,
                    bus: bus.to_string(),
                })
            }
            _ => Err(MSG_ALL_FIELDS_REQUIRED),
        }
    }
}

fn trimmed_keys(ticket: &Ticket) -> Ticket {
    Ticket {
        number: ticket.number.trim().to_string(),
        passenger: ticket.passenger.trim().to_string(),
        bus: ticket.bus.trim().to_string(),
        ..ticket.clone()
    }
}

/// Service wrapper composing the passenger, ticket and network repositories.
pub struct TicketingService<P, T, N>
where
    P: PassengerRepository,
    T: TicketRepository,
    N: NetworkRepository,
{
    passengers: P,
    tickets: T,
    network: N,
}

impl<P, T, N> TicketingService<P, T, N>
where
    P: PassengerRepository,
    T: TicketRepository,
    N: NetworkRepository,
{
    pub fn new(passengers: P, tickets: T, network: N) -> Self {
        Self {
            passengers,
            tickets,
            network,
        }
    }

    /// Issues one ticket from the purchase form.
    ///
    /// # Contract
    /// - Blank ticket number or passenger: `Passenger and Ticket Number are required!`.
    /// - Any other unselected field: `All fields are required!`.
    /// - Duplicate number or missing reference: failure naming the cause;
    ///   nothing is inserted.
    pub fn purchase_ticket(&self, request: &PurchaseRequest) -> ActionOutcome {
        let ticket = match request.to_ticket() {
            Ok(ticket) => ticket,
            Err(message) => return ActionOutcome::failure(message),
        };

        match self.tickets.create_ticket(&ticket) {
            Ok(number) => {
                info!(
                    "event=ticket_purchase module=service status=ok ticket_number={number} zone_id={} bus_line_id={}",
                    ticket.zone, ticket.bus_line
                );
                ActionOutcome::success(
                    format!("Ticket purchased successfully! Ticket Number: {number}"),
                    number,
                )
            }
            Err(err) => {
                warn!(
                    "event=ticket_purchase module=service status=error ticket_number={} error={err}",
                    ticket.number
                );
                ActionOutcome::failure(format!("Failed to create ticket: {err}"))
            }
        }
    }

    /// Creates or updates a ticket from the management screen.
    ///
    /// Key fields are trimmed before the repository call.
    pub fn save_ticket(&self, ticket: &Ticket, mode: SaveMode) -> ActionOutcome {
        let ticket = &trimmed_keys(ticket);
        let result = match mode {
            SaveMode::Create => self.tickets.create_ticket(ticket).map(|_| ()),
            SaveMode::Update => self.tickets.update_ticket(ticket),
        };

        match (mode, result) {
            (SaveMode::Create, Ok(())) => {
                info!(
                    "event=ticket_create module=service status=ok ticket_number={}",
                    ticket.number
                );
                ActionOutcome::success(
                    format!("Ticket created successfully! Ticket Number: {}", ticket.number),
                    ticket.number.clone(),
                )
            }
            (SaveMode::Update, Ok(())) => {
                info!(
                    "event=ticket_update module=service status=ok ticket_number={}",
                    ticket.number
                );
                ActionOutcome::success("Ticket updated successfully!", ticket.number.clone())
            }
            (SaveMode::Create, Err(err)) => {
                warn!("event=ticket_create module=service status=error error={err}");
                ActionOutcome::failure(format!("Failed to create ticket: {err}"))
            }
            (SaveMode::Update, Err(err)) => {
                warn!("event=ticket_update module=service status=error error={err}");
                ActionOutcome::failure(format!("Failed to update ticket: {err}"))
            }
        }
    }

    /// Deletes one ticket.
    pub fn remove_ticket(&self, number: &str) -> ActionOutcome {
        match self.tickets.delete_ticket(number) {
            Ok(()) => {
                info!("event=ticket_delete module=service status=ok ticket_number={number}");
                ActionOutcome::success("Ticket deleted successfully", number)
            }
            Err(err) => {
                warn!("event=ticket_delete module=service status=error error={err}");
                ActionOutcome::failure(format!("Error: {err}"))
            }
        }
    }

    /// Creates or renames a passenger. Both fields are trimmed first.
    pub fn save_passenger(&self, id: &str, name: &str, mode: SaveMode) -> ActionOutcome {
        let passenger = Passenger::new(id.trim(), name.trim());
        if passenger.validate().is_err() {
            return ActionOutcome::failure(MSG_PASSENGER_FIELDS_REQUIRED);
        }

        match mode {
            SaveMode::Create => match self.passengers.create_passenger(&passenger) {
                Ok(id) => {
                    info!("event=passenger_create module=service status=ok passenger_id={id}");
                    ActionOutcome::success(
                        format!("Passenger created successfully! ID: {id}"),
                        id,
                    )
                }
                Err(err) => {
                    warn!("event=passenger_create module=service status=error error={err}");
                    ActionOutcome::failure(format!("Failed to create passenger: {err}"))
                }
            },
            SaveMode::Update => match self.passengers.update_passenger(&passenger) {
                Ok(()) => {
                    info!(
                        "event=passenger_update module=service status=ok passenger_id={}",
                        passenger.id
                    );
                    ActionOutcome::success("Passenger updated successfully!", passenger.id)
                }
                Err(err) => {
                    warn!("event=passenger_update module=service status=error error={err}");
                    ActionOutcome::failure(format!("Failed to update passenger: {err}"))
                }
            },
        }
    }

    /// Deletes a passenger unless tickets still reference it.
    pub fn remove_passenger(&self, id: &str) -> ActionOutcome {
        match self.passengers.delete_passenger(id) {
            Ok(()) => {
                info!("event=passenger_delete module=service status=ok passenger_id={id}");
                ActionOutcome::success("Passenger deleted successfully", id)
            }
            Err(RepoError::HasDependentTickets { ticket_count, .. }) => {
                info!(
                    "event=passenger_delete module=service status=blocked passenger_id={id} ticket_count={ticket_count}"
                );
                ActionOutcome::failure(MSG_PASSENGER_HAS_TICKETS)
            }
            Err(err) => {
                warn!("event=passenger_delete module=service status=error error={err}");
                ActionOutcome::failure(format!("Error: {err}"))
            }
        }
    }

    pub fn list_passengers(&self) -> RepoResult<Vec<Passenger>> {
        self.passengers.list_passengers()
    }

    pub fn get_passenger(&self, id: &str) -> RepoResult<Option<Passenger>> {
        self.passengers.get_passenger(id)
    }

    pub fn list_tickets(&self) -> RepoResult<Vec<Ticket>> {
        self.tickets.list_tickets()
    }

    /// Ticket with resolved labels for the management detail pane.
    pub fn ticket_detail(&self, number: &str) -> RepoResult<Option<TicketDetail>> {
        self.tickets.get_ticket_detail(number)
    }

    /// Passengers labelled by name.
    pub fn passenger_options(&self) -> RepoResult<Vec<PickerOption<PassengerId>>> {
        Ok(self
            .passengers
            .list_passengers()?
            .into_iter()
            .map(|passenger| PickerOption::new(passenger.id, passenger.name))
            .collect())
    }

    /// Bus lines labelled by line name.
    pub fn bus_line_options(&self) -> RepoResult<Vec<PickerOption<BusLineId>>> {
        Ok(self
            .network
            .list_bus_lines()?
            .into_iter()
            .map(|line| PickerOption::new(line.id, line.name))
            .collect())
    }

    /// Zones labelled `Zone N - $P`.
    pub fn zone_options(&self) -> RepoResult<Vec<PickerOption<ZoneId>>> {
        Ok(self
            .network
            .list_zones()?
            .into_iter()
            .map(|zone| PickerOption::new(zone.id, zone.label()))
            .collect())
    }

    /// Stations labelled by station name.
    pub fn station_options(&self) -> RepoResult<Vec<PickerOption<StationNumber>>> {
        Ok(self
            .network
            .list_stations()?
            .into_iter()
            .map(|station| PickerOption::new(station.number, station.name))
            .collect())
    }

    /// Buses labelled with the line they run on, e.g. `BusLine 2`.
    pub fn bus_options(&self) -> RepoResult<Vec<PickerOption<BusNumber>>> {
        Ok(self
            .network
            .list_buses()?
            .into_iter()
            .map(|bus| PickerOption::new(bus.number, format!("BusLine {}", bus.bus_line)))
            .collect())
    }

    pub fn ticket_type_options(&self) -> Vec<PickerOption<TicketType>> {
        TicketType::ALL
            .into_iter()
            .map(|kind| PickerOption::new(kind, kind.as_str()))
            .collect()
    }
}
