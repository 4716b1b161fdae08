mod common;

use common::{fixture_ticket, seeded_session};
use transit_core::{
    EntityKind, Money, ReferenceField, RepoError, TicketRepository, TicketType, ValidationError,
};

#[test]
fn create_ticket_then_duplicate_number_fails_with_duplicate_key() {
    let session = seeded_session();
    let repo = session.tickets().unwrap();

    let number = repo.create_ticket(&fixture_ticket("T016")).unwrap();
    assert_eq!(number, "T016");

    let err = repo.create_ticket(&fixture_ticket("T016")).unwrap_err();
    assert!(matches!(
        err,
        RepoError::DuplicateKey { entity: EntityKind::Ticket, ref key } if key == "T016"
    ));
    assert_eq!(repo.list_tickets().unwrap().len(), 16);
}

#[test]
fn duplicate_is_reported_before_broken_references() {
    let session = seeded_session();
    let repo = session.tickets().unwrap();

    let mut ticket = fixture_ticket("T001");
    ticket.zone = 99;
    let err = repo.create_ticket(&ticket).unwrap_err();
    assert!(matches!(err, RepoError::DuplicateKey { .. }));
}

#[test]
fn each_missing_reference_is_named_and_nothing_is_inserted() {
    let session = seeded_session();
    let repo = session.tickets().unwrap();

    let cases: [(ReferenceField, fn(&mut transit_core::Ticket)); 5] = [
        (ReferenceField::Zone, |ticket| ticket.zone = 99),
        (ReferenceField::Passenger, |ticket| {
            ticket.passenger = "P999".to_string()
        }),
        (ReferenceField::BusLine, |ticket| ticket.bus_line = 99),
        (ReferenceField::Station, |ticket| ticket.station = 99),
        (ReferenceField::Bus, |ticket| ticket.bus = "B999".to_string()),
    ];

    for (expected_field, break_reference) in cases {
        let mut ticket = fixture_ticket("T500");
        break_reference(&mut ticket);

        let err = repo.create_ticket(&ticket).unwrap_err();
        match err {
            RepoError::ForeignKeyViolation { field, .. } => assert_eq!(field, expected_field),
            other => panic!("expected foreign key violation, got {other}"),
        }
        assert!(repo.get_ticket("T500").unwrap().is_none());
    }
    assert_eq!(repo.list_tickets().unwrap().len(), 15);
}

#[test]
fn zero_seat_number_is_rejected() {
    let session = seeded_session();
    let repo = session.tickets().unwrap();

    let mut ticket = fixture_ticket("T016");
    ticket.seat_number = 0;
    let err = repo.create_ticket(&ticket).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ValidationError::InvalidSeatNumber(0))
    ));
}

#[test]
fn padded_keys_are_rejected_before_storage() {
    let session = seeded_session();
    let repo = session.tickets().unwrap();

    let err = repo.create_ticket(&fixture_ticket(" T001 ")).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ValidationError::PaddedKey("ticket_number"))
    ));

    let mut ticket = fixture_ticket("T016");
    ticket.bus = "B001 ".to_string();
    assert!(matches!(
        repo.create_ticket(&ticket).unwrap_err(),
        RepoError::Validation(ValidationError::PaddedKey("bus_number"))
    ));
    assert_eq!(repo.list_tickets().unwrap().len(), 15);
}

#[test]
fn update_type_roundtrip_keeps_other_fields() {
    let session = seeded_session();
    let repo = session.tickets().unwrap();

    let original = fixture_ticket("T016");
    repo.create_ticket(&original).unwrap();

    let mut updated = original.clone();
    updated.kind = TicketType::MonthlyPass;
    repo.update_ticket(&updated).unwrap();

    let loaded = repo.get_ticket("T016").unwrap().unwrap();
    assert_eq!(loaded.kind, TicketType::MonthlyPass);
    assert_eq!(
        loaded,
        transit_core::Ticket {
            kind: TicketType::MonthlyPass,
            ..original
        }
    );
}

#[test]
fn update_with_missing_reference_leaves_row_unchanged() {
    let session = seeded_session();
    let repo = session.tickets().unwrap();

    let before = repo.get_ticket("T002").unwrap().unwrap();
    let mut broken = before.clone();
    broken.station = 42;
    broken.kind = TicketType::SingleTicket;

    let err = repo.update_ticket(&broken).unwrap_err();
    assert!(matches!(
        err,
        RepoError::ForeignKeyViolation {
            field: ReferenceField::Station,
            ..
        }
    ));
    assert_eq!(repo.get_ticket("T002").unwrap().unwrap(), before);
}

#[test]
fn update_missing_ticket_returns_not_found() {
    let session = seeded_session();
    let repo = session.tickets().unwrap();

    let err = repo.update_ticket(&fixture_ticket("T404")).unwrap_err();
    assert!(matches!(err, RepoError::NotFound { entity: EntityKind::Ticket, .. }));
}

#[test]
fn delete_removes_only_target_ticket() {
    let session = seeded_session();
    let repo = session.tickets().unwrap();

    repo.create_ticket(&fixture_ticket("T016")).unwrap();
    repo.delete_ticket("T016").unwrap();

    assert!(repo.get_ticket("T016").unwrap().is_none());
    assert!(repo.get_ticket("T015").unwrap().is_some());
    assert!(matches!(
        repo.delete_ticket("T016").unwrap_err(),
        RepoError::NotFound { .. }
    ));
}

#[test]
fn list_returns_fixture_tickets_in_insertion_order() {
    let session = seeded_session();
    let repo = session.tickets().unwrap();

    let tickets = repo.list_tickets().unwrap();
    assert_eq!(tickets.len(), 15);
    assert_eq!(tickets.first().unwrap().number, "T001");
    assert_eq!(tickets.last().unwrap().number, "T015");
}

#[test]
fn ticket_detail_resolves_referenced_labels() {
    let session = seeded_session();
    let repo = session.tickets().unwrap();

    let detail = repo.get_ticket_detail("T003").unwrap().unwrap();
    assert_eq!(detail.ticket.kind, TicketType::SingleTicket);
    assert_eq!(detail.bus_line_name, "Blue Line");
    assert_eq!(detail.zone_price, Money::from_cents(500));
    assert_eq!(detail.passenger_name, "Robert Johnson");
    assert_eq!(detail.station_name, "Airport Terminal");
    assert_eq!(detail.bus_home_line, 2);

    assert!(repo.get_ticket_detail("T404").unwrap().is_none());
}
