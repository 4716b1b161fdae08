mod common;

use common::{fixture_ticket, seeded_session};
use transit_core::{
    EntityKind, Passenger, PassengerRepository, RepoError, TicketRepository, TicketingSession,
    ValidationError,
};

#[test]
fn create_and_get_roundtrip() {
    let session = TicketingSession::open_in_memory().unwrap();
    let repo = session.passengers().unwrap();

    let id = repo
        .create_passenger(&Passenger::new("P004", "Alice Brown"))
        .unwrap();
    assert_eq!(id, "P004");

    let loaded = repo.get_passenger("P004").unwrap().unwrap();
    assert_eq!(loaded, Passenger::new("P004", "Alice Brown"));
    assert!(repo.get_passenger("P999").unwrap().is_none());
}

#[test]
fn duplicate_id_fails_with_duplicate_key() {
    let session = TicketingSession::open_in_memory().unwrap();
    let repo = session.passengers().unwrap();

    repo.create_passenger(&Passenger::new("P004", "Alice Brown"))
        .unwrap();
    let err = repo
        .create_passenger(&Passenger::new("P004", "Somebody Else"))
        .unwrap_err();

    assert!(matches!(
        err,
        RepoError::DuplicateKey { entity: EntityKind::Passenger, ref key } if key == "P004"
    ));
    assert_eq!(
        repo.get_passenger("P004").unwrap().unwrap().name,
        "Alice Brown"
    );
}

#[test]
fn blank_fields_are_rejected_before_storage() {
    let session = TicketingSession::open_in_memory().unwrap();
    let repo = session.passengers().unwrap();

    let err = repo
        .create_passenger(&Passenger::new("P004", "   "))
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ValidationError::EmptyField("passenger_name"))
    ));
    assert!(repo.list_passengers().unwrap().is_empty());
}

#[test]
fn padded_id_is_rejected() {
    let session = seeded_session();
    let repo = session.passengers().unwrap();

    let err = repo
        .create_passenger(&Passenger::new("P001 ", "John Again"))
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ValidationError::PaddedKey("passenger_id"))
    ));
    assert_eq!(repo.list_passengers().unwrap().len(), 3);
}

#[test]
fn update_renames_existing_passenger() {
    let session = TicketingSession::open_in_memory().unwrap();
    let repo = session.passengers().unwrap();

    repo.create_passenger(&Passenger::new("P004", "Alice Brown"))
        .unwrap();
    repo.update_passenger(&Passenger::new("P004", "Alice Green"))
        .unwrap();

    assert_eq!(
        repo.get_passenger("P004").unwrap().unwrap().name,
        "Alice Green"
    );
}

#[test]
fn update_missing_passenger_returns_not_found() {
    let session = TicketingSession::open_in_memory().unwrap();
    let repo = session.passengers().unwrap();

    let err = repo
        .update_passenger(&Passenger::new("P404", "Nobody"))
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::NotFound { entity: EntityKind::Passenger, ref key } if key == "P404"
    ));
}

#[test]
fn list_returns_insertion_order() {
    let session = TicketingSession::open_in_memory().unwrap();
    let repo = session.passengers().unwrap();

    for (id, name) in [("P010", "Zed"), ("P002", "Amy"), ("P005", "Moe")] {
        repo.create_passenger(&Passenger::new(id, name)).unwrap();
    }

    let ids: Vec<String> = repo
        .list_passengers()
        .unwrap()
        .into_iter()
        .map(|passenger| passenger.id)
        .collect();
    assert_eq!(ids, ["P010", "P002", "P005"]);
}

#[test]
fn delete_passenger_without_tickets_succeeds() {
    let session = seeded_session();
    let repo = session.passengers().unwrap();

    repo.create_passenger(&Passenger::new("P004", "Alice Brown"))
        .unwrap();
    assert_eq!(repo.count_tickets_for_passenger("P004").unwrap(), 0);

    repo.delete_passenger("P004").unwrap();
    assert!(repo.get_passenger("P004").unwrap().is_none());
}

#[test]
fn delete_passenger_with_tickets_is_blocked_and_row_kept() {
    let session = seeded_session();
    let repo = session.passengers().unwrap();

    let err = repo.delete_passenger("P001").unwrap_err();
    assert!(matches!(
        err,
        RepoError::HasDependentTickets { ref passenger_id, ticket_count: 5 } if passenger_id == "P001"
    ));
    assert!(repo.get_passenger("P001").unwrap().is_some());
    assert_eq!(repo.count_tickets_for_passenger("P001").unwrap(), 5);
}

#[test]
fn delete_is_allowed_once_last_ticket_is_gone() {
    let session = seeded_session();
    let passengers = session.passengers().unwrap();
    let tickets = session.tickets().unwrap();

    passengers
        .create_passenger(&Passenger::new("P004", "Alice Brown"))
        .unwrap();
    let mut ticket = fixture_ticket("T100");
    ticket.passenger = "P004".to_string();
    tickets.create_ticket(&ticket).unwrap();

    assert!(matches!(
        passengers.delete_passenger("P004").unwrap_err(),
        RepoError::HasDependentTickets { ticket_count: 1, .. }
    ));

    tickets.delete_ticket("T100").unwrap();
    passengers.delete_passenger("P004").unwrap();
    assert!(passengers.get_passenger("P004").unwrap().is_none());
}

#[test]
fn delete_missing_passenger_returns_not_found() {
    let session = TicketingSession::open_in_memory().unwrap();
    let repo = session.passengers().unwrap();

    let err = repo.delete_passenger("P404").unwrap_err();
    assert!(matches!(err, RepoError::NotFound { entity: EntityKind::Passenger, .. }));
}
