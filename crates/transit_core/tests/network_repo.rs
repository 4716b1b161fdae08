mod common;

use common::seeded_session;
use transit_core::{
    Bus, BusLine, Company, Crew, EntityKind, Money, NetworkRepository, ReferenceField, RepoError,
    Station, TicketingSession, ValidationError, Zone, MAX_ZONE_PRICE_CENTS,
};

#[test]
fn fixture_network_lists_in_insertion_order() {
    let session = seeded_session();
    let repo = session.network().unwrap();

    let companies = repo.list_companies().unwrap();
    assert_eq!(
        companies,
        vec![Company {
            name: "Metro Transit".to_string(),
            vat: "MT123456789".to_string(),
        }]
    );

    let line_names: Vec<String> = repo
        .list_bus_lines()
        .unwrap()
        .into_iter()
        .map(|line| line.name)
        .collect();
    assert_eq!(line_names, ["Red Line", "Blue Line", "Green Line"]);

    assert_eq!(repo.list_stations().unwrap().len(), 6);
    assert_eq!(repo.list_crew().unwrap().len(), 6);

    let buses: Vec<(String, i64)> = repo
        .list_buses()
        .unwrap()
        .into_iter()
        .map(|bus| (bus.number, bus.bus_line))
        .collect();
    assert_eq!(
        buses,
        vec![
            ("B001".to_string(), 1),
            ("B002".to_string(), 2),
            ("B003".to_string(), 3),
        ]
    );
}

#[test]
fn getters_resolve_fixture_rows() {
    let session = seeded_session();
    let repo = session.network().unwrap();

    let line = repo.get_bus_line(2).unwrap().unwrap();
    assert_eq!(line.route, "Airport to South Side");
    assert_eq!(line.seats, 40);
    assert!(line.in_service);

    assert_eq!(repo.get_station(5).unwrap().unwrap().name, "East Terminal");
    assert_eq!(repo.get_bus("B003").unwrap().unwrap().bus_line, 3);
    assert_eq!(
        repo.get_zone(2).unwrap().unwrap().price,
        Money::from_cents(375)
    );

    assert!(repo.get_bus_line(9).unwrap().is_none());
    assert!(repo.get_bus("B404").unwrap().is_none());
}

#[test]
fn station_on_missing_line_is_rejected() {
    let session = seeded_session();
    let repo = session.network().unwrap();

    let err = repo
        .create_station(&Station {
            number: 7,
            name: "Harbor".to_string(),
            bus_line: 9,
        })
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::ForeignKeyViolation {
            field: ReferenceField::BusLine,
            ref key,
        } if key == "9"
    ));
    assert!(repo.get_station(7).unwrap().is_none());
}

#[test]
fn bus_line_requires_existing_company() {
    let session = TicketingSession::open_in_memory().unwrap();
    let repo = session.network().unwrap();

    let line = BusLine {
        id: 1,
        route: "Loop".to_string(),
        name: "Orange Line".to_string(),
        length_km: 4.0,
        company: "Nobody Inc".to_string(),
        seats: 30,
        crew_count: 1,
        in_service: false,
    };
    assert!(matches!(
        repo.create_bus_line(&line).unwrap_err(),
        RepoError::ForeignKeyViolation {
            field: ReferenceField::Company,
            ..
        }
    ));

    repo.create_company(&Company {
        name: "Nobody Inc".to_string(),
        vat: "NI000".to_string(),
    })
    .unwrap();
    assert_eq!(repo.create_bus_line(&line).unwrap(), 1);
    assert!(!repo.get_bus_line(1).unwrap().unwrap().in_service);
}

#[test]
fn crew_requires_existing_bus() {
    let session = seeded_session();
    let repo = session.network().unwrap();

    let err = repo
        .create_crew(&Crew {
            id: 7,
            role: "Driver".to_string(),
            name: "Pat Lee".to_string(),
            bus: "B009".to_string(),
        })
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::ForeignKeyViolation {
            field: ReferenceField::Bus,
            ..
        }
    ));
}

#[test]
fn duplicate_keys_are_reported_per_entity() {
    let session = seeded_session();
    let repo = session.network().unwrap();

    let company_err = repo
        .create_company(&Company {
            name: "Metro Transit".to_string(),
            vat: "OTHER".to_string(),
        })
        .unwrap_err();
    assert!(matches!(
        company_err,
        RepoError::DuplicateKey {
            entity: EntityKind::Company,
            ..
        }
    ));

    let bus_err = repo
        .create_bus(&Bus {
            number: "B001".to_string(),
            bus_line: 1,
            seats: 50,
            crew_count: 2,
            in_service: true,
        })
        .unwrap_err();
    assert!(matches!(
        bus_err,
        RepoError::DuplicateKey {
            entity: EntityKind::Bus,
            ..
        }
    ));
}

#[test]
fn negative_zone_price_is_rejected() {
    let session = TicketingSession::open_in_memory().unwrap();
    let repo = session.network().unwrap();

    let err = repo
        .create_zone(&Zone {
            id: 4,
            price: Money::from_cents(-1),
        })
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ValidationError::NegativePrice(-1))
    ));
    assert!(repo.list_zones().unwrap().is_empty());
}

#[test]
fn zone_price_above_ceiling_is_rejected() {
    let session = TicketingSession::open_in_memory().unwrap();
    let repo = session.network().unwrap();

    let err = repo
        .create_zone(&Zone {
            id: 4,
            price: Money::from_cents(i64::MAX / 5),
        })
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ValidationError::PriceTooHigh {
            max_cents: MAX_ZONE_PRICE_CENTS,
            ..
        })
    ));
    assert!(repo.list_zones().unwrap().is_empty());

    let ceiling = Zone {
        id: 5,
        price: Money::from_cents(MAX_ZONE_PRICE_CENTS),
    };
    assert_eq!(repo.create_zone(&ceiling).unwrap(), 5);
}
