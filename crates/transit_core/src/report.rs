//! Read-only aggregate reports over issued tickets.
//!
//! # Responsibility
//! - Zone usage, bus line usage and fare totals for back-office review.
//!
//! # Invariants
//! - Reports never mutate storage.
//! - Zones and bus lines without tickets still appear with a zero count.

use crate::model::money::Money;
use crate::model::network::{BusLineId, Zone, ZoneId};
use crate::model::ticket::TicketType;
use crate::repo::error::{RepoError, RepoResult};
use rusqlite::Connection;

/// A monthly pass costs this many single fares of its zone.
///
/// Report-only business constant; the repository never prices tickets.
pub const MONTHLY_PASS_ZONE_MULTIPLIER: i64 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneUsageRow {
    pub zone_id: ZoneId,
    /// `Zone N - $P`.
    pub zone_label: String,
    pub tickets_sold: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineUsageRow {
    pub bus_line_id: BusLineId,
    pub ticket_count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FareTotalRow {
    pub ticket_type: TicketType,
    pub zone_id: ZoneId,
    pub zone_label: String,
    pub total_fare: Money,
}

/// Price of one ticket of `ticket_type` in a zone priced `zone_price`.
///
/// Returns `None` when the fare overflows.
pub fn fare_for(ticket_type: TicketType, zone_price: Money) -> Option<Money> {
    match ticket_type {
        TicketType::SingleTicket => Some(zone_price),
        TicketType::MonthlyPass => zone_price.checked_times(MONTHLY_PASS_ZONE_MULTIPLIER),
    }
}

/// Tickets sold per zone, ordered by zone id.
pub fn zone_usage(conn: &Connection) -> RepoResult<Vec<ZoneUsageRow>> {
    let mut stmt = conn.prepare(
        "SELECT z.zone_id, z.price_cents, COUNT(t.ticket_number)
         FROM zones z
         LEFT JOIN tickets t ON t.zone_id = z.zone_id
         GROUP BY z.zone_id
         ORDER BY z.zone_id ASC;",
    )?;
    let rows = stmt
        .query_map([], |row| {
            let zone_id: ZoneId = row.get(0)?;
            let price = Money::from_cents(row.get(1)?);
            Ok(ZoneUsageRow {
                zone_id,
                zone_label: Zone { id: zone_id, price }.label(),
                tickets_sold: row.get(2)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// Tickets per bus line, ordered by line id.
pub fn line_usage(conn: &Connection) -> RepoResult<Vec<LineUsageRow>> {
    let mut stmt = conn.prepare(
        "SELECT bl.bus_line_id, COUNT(t.ticket_number)
         FROM bus_lines bl
         LEFT JOIN tickets t ON t.bus_line_id = bl.bus_line_id
         GROUP BY bl.bus_line_id
         ORDER BY bl.bus_line_id ASC;",
    )?;
    let rows = stmt
        .query_map([], |row| {
            Ok(LineUsageRow {
                bus_line_id: row.get(0)?,
                ticket_count: row.get(1)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// Total fare per (zone, ticket type) pair that has at least one ticket.
///
/// Ordered by zone id, then ticket type name.
///
/// # Errors
/// - `RepoError::InvalidData` when a total does not fit in `i64` cents.
pub fn fare_totals(conn: &Connection) -> RepoResult<Vec<FareTotalRow>> {
    let mut stmt = conn.prepare(
        "SELECT t.ticket_type, z.zone_id, z.price_cents, COUNT(*)
         FROM tickets t
         JOIN zones z ON z.zone_id = t.zone_id
         GROUP BY t.ticket_type, z.zone_id
         ORDER BY z.zone_id ASC, t.ticket_type ASC;",
    )?;
    let mut rows = stmt.query([])?;
    let mut totals = Vec::new();

    while let Some(row) = rows.next()? {
        let type_text: String = row.get(0)?;
        let ticket_type = TicketType::parse(&type_text).ok_or_else(|| {
            RepoError::InvalidData(format!(
                "invalid ticket type `{type_text}` in tickets.ticket_type"
            ))
        })?;
        let zone_id: ZoneId = row.get(1)?;
        let price = Money::from_cents(row.get(2)?);
        let ticket_count: i64 = row.get(3)?;
        let total_fare = fare_for(ticket_type, price)
            .and_then(|fare| fare.checked_times(ticket_count))
            .ok_or_else(|| {
                RepoError::InvalidData(format!(
                    "fare total overflow for {ticket_type} in zone {zone_id}"
                ))
            })?;

        totals.push(FareTotalRow {
            ticket_type,
            zone_id,
            zone_label: Zone { id: zone_id, price }.label(),
            total_fare,
        });
    }

    Ok(totals)
}
