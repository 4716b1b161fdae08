//! Core data layer for the transit ticketing desk.
//! This crate is the single source of truth for the ticket-issuance
//! invariants over the company, network, passenger and ticket tables.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod report;
pub mod repo;
pub mod seed;
pub mod service;
pub mod session;

pub use config::{AppConfig, ConfigError, StoreConfig, StoreLocation};
pub use db::{DbError, DbResult};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::money::Money;
pub use model::network::{
    Bus, BusLine, BusLineId, BusNumber, Company, CompanyName, Crew, CrewId, Station,
    StationNumber, Zone, ZoneId, MAX_ZONE_PRICE_CENTS,
};
pub use model::passenger::{Passenger, PassengerId};
pub use model::ticket::{Ticket, TicketDetail, TicketNumber, TicketType};
pub use model::validation::ValidationError;
pub use repo::error::{EntityKind, ReferenceField, RepoError, RepoResult};
pub use repo::network_repo::{NetworkRepository, SqliteNetworkRepository};
pub use repo::passenger_repo::{PassengerRepository, SqlitePassengerRepository};
pub use repo::ticket_repo::{SqliteTicketRepository, TicketRepository};
pub use seed::TableCounts;
pub use service::outcome::{ActionOutcome, PickerOption};
pub use service::ticketing_service::{PurchaseRequest, SaveMode, TicketingService};
pub use session::{SqliteTicketingService, TicketingSession};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
