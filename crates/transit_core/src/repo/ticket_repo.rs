//! Ticket repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Full CRUD over `tickets`.
//! - Enforce the issuance contract: every reference on a ticket points at an
//!   existing zone, passenger, bus line, station and bus.
//!
//! # Invariants
//! - Duplicate ticket numbers fail with `DuplicateKey` before any reference
//!   is inspected.
//! - Missing references fail with `ForeignKeyViolation` naming the field,
//!   checked in order zone, passenger, bus line, station, bus.
//! - A rejected write inserts or changes nothing.
//! - Delete is unconditional: nothing references a ticket.

use crate::model::money::Money;
use crate::model::ticket::{Ticket, TicketDetail, TicketNumber, TicketType};
use crate::repo::error::{EntityKind, ReferenceField, RepoError, RepoResult};
use crate::repo::support::{
    ensure_absent, ensure_connection_ready, ensure_present, ensure_reference, map_write_error,
    Key,
};
use rusqlite::{params, Connection, OptionalExtension, Row};

const TICKET_SELECT_SQL: &str = "SELECT
    ticket_number,
    ticket_type,
    zone_id,
    seat_number,
    passenger_id,
    bus_line_id,
    station_number,
    bus_number
FROM tickets";

/// Repository interface for ticket CRUD.
pub trait TicketRepository {
    fn create_ticket(&self, ticket: &Ticket) -> RepoResult<TicketNumber>;
    fn get_ticket(&self, number: &str) -> RepoResult<Option<Ticket>>;
    /// Ticket plus the names/prices of everything it references.
    fn get_ticket_detail(&self, number: &str) -> RepoResult<Option<TicketDetail>>;
    /// All tickets in insertion order.
    fn list_tickets(&self) -> RepoResult<Vec<Ticket>>;
    /// Replaces every non-key field of an existing ticket.
    fn update_ticket(&self, ticket: &Ticket) -> RepoResult<()>;
    fn delete_ticket(&self, number: &str) -> RepoResult<()>;
}

/// SQLite-backed ticket repository.
pub struct SqliteTicketRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTicketRepository<'conn> {
    /// Constructs a repository over a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl TicketRepository for SqliteTicketRepository<'_> {
    fn create_ticket(&self, ticket: &Ticket) -> RepoResult<TicketNumber> {
        ticket.validate()?;
        let key = Key::Text(&ticket.number);
        ensure_absent(self.conn, EntityKind::Ticket, key)?;
        ensure_ticket_references(self.conn, ticket)?;

        self.conn
            .execute(
                "INSERT INTO tickets (
                    ticket_number,
                    ticket_type,
                    zone_id,
                    seat_number,
                    passenger_id,
                    bus_line_id,
                    station_number,
                    bus_number
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8);",
                params![
                    ticket.number,
                    ticket.kind.as_str(),
                    ticket.zone,
                    ticket.seat_number,
                    ticket.passenger,
                    ticket.bus_line,
                    ticket.station,
                    ticket.bus,
                ],
            )
            .map_err(|err| map_write_error(err, EntityKind::Ticket, key))?;

        Ok(ticket.number.clone())
    }

    fn get_ticket(&self, number: &str) -> RepoResult<Option<Ticket>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TICKET_SELECT_SQL} WHERE ticket_number = ?1;"))?;
        let mut rows = stmt.query([number])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_ticket_row(row)?));
        }
        Ok(None)
    }

    fn get_ticket_detail(&self, number: &str) -> RepoResult<Option<TicketDetail>> {
        let Some(ticket) = self.get_ticket(number)? else {
            return Ok(None);
        };

        let labels = self
            .conn
            .query_row(
                "SELECT
                    bl.name,
                    z.price_cents,
                    p.name,
                    s.name,
                    b.bus_line_id
                 FROM tickets t
                 JOIN bus_lines bl ON bl.bus_line_id = t.bus_line_id
                 JOIN zones z ON z.zone_id = t.zone_id
                 JOIN passengers p ON p.passenger_id = t.passenger_id
                 JOIN stations s ON s.station_number = t.station_number
                 JOIN buses b ON b.bus_number = t.bus_number
                 WHERE t.ticket_number = ?1;",
                [number],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, i64>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, String>(3)?,
                        row.get::<_, i64>(4)?,
                    ))
                },
            )
            .optional()?;

        let Some((bus_line_name, price_cents, passenger_name, station_name, bus_home_line)) =
            labels
        else {
            return Err(RepoError::InvalidData(format!(
                "ticket {number} references rows that no longer exist"
            )));
        };

        Ok(Some(TicketDetail {
            ticket,
            bus_line_name,
            zone_price: Money::from_cents(price_cents),
            passenger_name,
            station_name,
            bus_home_line,
        }))
    }

    fn list_tickets(&self) -> RepoResult<Vec<Ticket>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TICKET_SELECT_SQL} ORDER BY rowid ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut tickets = Vec::new();
        while let Some(row) = rows.next()? {
            tickets.push(parse_ticket_row(row)?);
        }
        Ok(tickets)
    }

    fn update_ticket(&self, ticket: &Ticket) -> RepoResult<()> {
        ticket.validate()?;
        ensure_present(self.conn, EntityKind::Ticket, Key::Text(&ticket.number))?;
        ensure_ticket_references(self.conn, ticket)?;

        let changed = self.conn.execute(
            "UPDATE tickets
             SET
                ticket_type = ?1,
                zone_id = ?2,
                seat_number = ?3,
                passenger_id = ?4,
                bus_line_id = ?5,
                station_number = ?6,
                bus_number = ?7
             WHERE ticket_number = ?8;",
            params![
                ticket.kind.as_str(),
                ticket.zone,
                ticket.seat_number,
                ticket.passenger,
                ticket.bus_line,
                ticket.station,
                ticket.bus,
                ticket.number,
            ],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: EntityKind::Ticket,
                key: ticket.number.clone(),
            });
        }

        Ok(())
    }

    fn delete_ticket(&self, number: &str) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM tickets WHERE ticket_number = ?1;", [number])?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: EntityKind::Ticket,
                key: number.to_string(),
            });
        }
        Ok(())
    }
}

fn ensure_ticket_references(conn: &Connection, ticket: &Ticket) -> RepoResult<()> {
    ensure_reference(conn, ReferenceField::Zone, Key::Int(ticket.zone))?;
    ensure_reference(conn, ReferenceField::Passenger, Key::Text(&ticket.passenger))?;
    ensure_reference(conn, ReferenceField::BusLine, Key::Int(ticket.bus_line))?;
    ensure_reference(conn, ReferenceField::Station, Key::Int(ticket.station))?;
    ensure_reference(conn, ReferenceField::Bus, Key::Text(&ticket.bus))?;
    Ok(())
}

fn parse_ticket_row(row: &Row<'_>) -> RepoResult<Ticket> {
    let type_text: String = row.get("ticket_type")?;
    let kind = TicketType::parse(&type_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid ticket type `{type_text}` in tickets.ticket_type"
        ))
    })?;

    Ok(Ticket {
        number: row.get("ticket_number")?,
        kind,
        zone: row.get("zone_id")?,
        seat_number: row.get("seat_number")?,
        passenger: row.get("passenger_id")?,
        bus_line: row.get("bus_line_id")?,
        station: row.get("station_number")?,
        bus: row.get("bus_number")?,
    })
}
