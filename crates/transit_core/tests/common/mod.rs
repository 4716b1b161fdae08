#![allow(dead_code)]

use transit_core::{Ticket, TicketType, TicketingSession};

/// In-memory session loaded with the Metro Transit fixtures.
pub fn seeded_session() -> TicketingSession {
    let mut session = TicketingSession::open_in_memory().unwrap();
    session.reset_fixtures().unwrap();
    session
}

/// Ticket referencing only fixture rows.
pub fn fixture_ticket(number: &str) -> Ticket {
    Ticket {
        number: number.to_string(),
        kind: TicketType::SingleTicket,
        zone: 1,
        seat_number: 10,
        passenger: "P001".to_string(),
        bus_line: 1,
        station: 1,
        bus: "B001".to_string(),
    }
}
