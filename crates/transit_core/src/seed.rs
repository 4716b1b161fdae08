//! Fixture reset and seeding.
//!
//! # Responsibility
//! - Clear all ticketing tables in dependency order and reinsert the fixed
//!   Metro Transit fixture set.
//! - Report per-table row counts.
//!
//! # Invariants
//! - Reset runs in one transaction; a failure leaves the previous data.
//! - Reset is idempotent: repeated runs yield identical row counts.
//! - Fixture rows go through the checked repository inserts, so the
//!   reference graph is validated exactly like caller writes.

use crate::model::money::Money;
use crate::model::network::{Bus, BusLine, Company, Crew, Station, Zone};
use crate::model::passenger::Passenger;
use crate::model::ticket::{Ticket, TicketType};
use crate::repo::error::RepoResult;
use crate::repo::network_repo::{NetworkRepository, SqliteNetworkRepository};
use crate::repo::passenger_repo::{PassengerRepository, SqlitePassengerRepository};
use crate::repo::ticket_repo::{SqliteTicketRepository, TicketRepository};
use log::info;
use rusqlite::Connection;

/// Tables in child-to-parent order; deleting in this order never trips a
/// foreign key.
const RESET_ORDER: [&str; 8] = [
    "tickets",
    "passengers",
    "zones",
    "crew",
    "buses",
    "stations",
    "bus_lines",
    "companies",
];

const FIXTURE_COMPANY: (&str, &str) = ("Metro Transit", "MT123456789");

const FIXTURE_BUS_LINES: [(i64, &str, &str, f64); 3] = [
    (1, "Downtown to North End", "Red Line", 15.5),
    (2, "Airport to South Side", "Blue Line", 18.2),
    (3, "East to West", "Green Line", 12.8),
];
const FIXTURE_LINE_SEATS: [u32; 3] = [50, 40, 60];

const FIXTURE_STATIONS: [(i64, &str, i64); 6] = [
    (1, "Downtown Central", 1),
    (2, "North End Terminal", 1),
    (3, "Airport Terminal", 2),
    (4, "South Side Station", 2),
    (5, "East Terminal", 3),
    (6, "West Terminal", 3),
];

const FIXTURE_CREW: [(i64, &str, &str, &str); 6] = [
    (1, "Driver", "John Smith", "B001"),
    (2, "Attendant", "Mary Johnson", "B001"),
    (3, "Driver", "James Brown", "B002"),
    (4, "Attendant", "Sarah Davis", "B002"),
    (5, "Driver", "Michael Wilson", "B003"),
    (6, "Attendant", "Lisa Thompson", "B003"),
];

const FIXTURE_ZONE_PRICES: [(i64, i64); 3] = [(1, 250), (2, 375), (3, 500)];

const FIXTURE_PASSENGERS: [(&str, &str); 3] = [
    ("P001", "John Doe"),
    ("P002", "Jane Smith"),
    ("P003", "Robert Johnson"),
];

// (number, type, zone, seat, passenger, bus line, station, bus)
type TicketFixture = (
    &'static str,
    TicketType,
    i64,
    u32,
    &'static str,
    i64,
    i64,
    &'static str,
);

const FIXTURE_TICKETS: [TicketFixture; 15] = [
    ("T001", TicketType::SingleTicket, 1, 10, "P001", 1, 1, "B001"),
    ("T002", TicketType::MonthlyPass, 2, 15, "P002", 1, 1, "B001"),
    ("T003", TicketType::SingleTicket, 3, 20, "P003", 2, 3, "B002"),
    ("T004", TicketType::SingleTicket, 1, 25, "P001", 2, 4, "B002"),
    ("T005", TicketType::MonthlyPass, 2, 30, "P002", 3, 5, "B003"),
    ("T006", TicketType::SingleTicket, 3, 5, "P003", 3, 6, "B003"),
    ("T007", TicketType::SingleTicket, 1, 12, "P001", 1, 2, "B001"),
    ("T008", TicketType::MonthlyPass, 2, 18, "P002", 2, 3, "B002"),
    ("T009", TicketType::SingleTicket, 3, 22, "P003", 3, 5, "B003"),
    ("T010", TicketType::SingleTicket, 1, 28, "P001", 1, 1, "B001"),
    ("T011", TicketType::MonthlyPass, 2, 8, "P002", 2, 4, "B002"),
    ("T012", TicketType::SingleTicket, 3, 14, "P003", 3, 6, "B003"),
    ("T013", TicketType::SingleTicket, 1, 16, "P001", 1, 1, "B001"),
    ("T014", TicketType::MonthlyPass, 2, 21, "P002", 2, 3, "B002"),
    ("T015", TicketType::SingleTicket, 3, 27, "P003", 3, 5, "B003"),
];

/// Row count per ticketing table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableCounts {
    pub companies: u64,
    pub bus_lines: u64,
    pub stations: u64,
    pub buses: u64,
    pub crew: u64,
    pub zones: u64,
    pub passengers: u64,
    pub tickets: u64,
}

/// Clears every table and reinserts the fixture set.
///
/// # Side effects
/// - Deletes all rows, including caller-created passengers and tickets.
/// - Emits a `fixtures_reset` event with the resulting ticket count.
pub fn reset_fixtures(conn: &mut Connection) -> RepoResult<TableCounts> {
    let tx = conn.transaction()?;
    for table in RESET_ORDER {
        tx.execute(&format!("DELETE FROM {table};"), [])?;
    }
    insert_fixtures(&tx)?;
    let counts = table_counts(&tx)?;
    tx.commit()?;

    info!(
        "event=fixtures_reset module=seed status=ok companies={} tickets={}",
        counts.companies, counts.tickets
    );
    Ok(counts)
}

/// Seeds the fixture set only when no company exists yet.
///
/// Returns `true` when fixtures were inserted.
pub fn seed_if_empty(conn: &mut Connection) -> RepoResult<bool> {
    if table_counts(conn)?.companies > 0 {
        return Ok(false);
    }
    reset_fixtures(conn)?;
    Ok(true)
}

/// Counts rows in every ticketing table.
pub fn table_counts(conn: &Connection) -> RepoResult<TableCounts> {
    let count = |table: &str| -> RepoResult<u64> {
        let value = conn.query_row(&format!("SELECT COUNT(*) FROM {table};"), [], |row| {
            row.get::<_, u64>(0)
        })?;
        Ok(value)
    };

    Ok(TableCounts {
        companies: count("companies")?,
        bus_lines: count("bus_lines")?,
        stations: count("stations")?,
        buses: count("buses")?,
        crew: count("crew")?,
        zones: count("zones")?,
        passengers: count("passengers")?,
        tickets: count("tickets")?,
    })
}

fn insert_fixtures(conn: &Connection) -> RepoResult<()> {
    let network = SqliteNetworkRepository::try_new(conn)?;
    let passengers = SqlitePassengerRepository::try_new(conn)?;
    let tickets = SqliteTicketRepository::try_new(conn)?;

    let (company_name, vat) = FIXTURE_COMPANY;
    network.create_company(&Company {
        name: company_name.to_string(),
        vat: vat.to_string(),
    })?;

    for ((id, route, name, length_km), seats) in
        FIXTURE_BUS_LINES.into_iter().zip(FIXTURE_LINE_SEATS)
    {
        network.create_bus_line(&BusLine {
            id,
            route: route.to_string(),
            name: name.to_string(),
            length_km,
            company: company_name.to_string(),
            seats,
            crew_count: 2,
            in_service: true,
        })?;
    }

    for (number, name, bus_line) in FIXTURE_STATIONS {
        network.create_station(&Station {
            number,
            name: name.to_string(),
            bus_line,
        })?;
    }

    // One bus per line, numbered after the line and sized like it.
    for ((line_id, _, _, _), seats) in FIXTURE_BUS_LINES.into_iter().zip(FIXTURE_LINE_SEATS) {
        network.create_bus(&Bus {
            number: format!("B{line_id:03}"),
            bus_line: line_id,
            seats,
            crew_count: 2,
            in_service: true,
        })?;
    }

    for (id, role, name, bus) in FIXTURE_CREW {
        network.create_crew(&Crew {
            id,
            role: role.to_string(),
            name: name.to_string(),
            bus: bus.to_string(),
        })?;
    }

    for (id, cents) in FIXTURE_ZONE_PRICES {
        network.create_zone(&Zone {
            id,
            price: Money::from_cents(cents),
        })?;
    }

    for (id, name) in FIXTURE_PASSENGERS {
        passengers.create_passenger(&Passenger::new(id, name))?;
    }

    for (number, kind, zone, seat_number, passenger, bus_line, station, bus) in FIXTURE_TICKETS {
        tickets.create_ticket(&Ticket {
            number: number.to_string(),
            kind,
            zone,
            seat_number,
            passenger: passenger.to_string(),
            bus_line,
            station,
            bus: bus.to_string(),
        })?;
    }

    Ok(())
}
