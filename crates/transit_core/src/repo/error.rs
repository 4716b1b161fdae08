//! Repository error taxonomy.
//!
//! Callers match on these variants to produce user-facing messages; the
//! storage-level error is kept only for transport failures.

use crate::db::DbError;
use crate::model::validation::ValidationError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Table-backed entity kinds, used to name the subject of a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Company,
    BusLine,
    Station,
    Bus,
    Crew,
    Zone,
    Passenger,
    Ticket,
}

impl EntityKind {
    pub(crate) fn table(self) -> &'static str {
        match self {
            Self::Company => "companies",
            Self::BusLine => "bus_lines",
            Self::Station => "stations",
            Self::Bus => "buses",
            Self::Crew => "crew",
            Self::Zone => "zones",
            Self::Passenger => "passengers",
            Self::Ticket => "tickets",
        }
    }

    pub(crate) fn key_column(self) -> &'static str {
        match self {
            Self::Company => "company_name",
            Self::BusLine => "bus_line_id",
            Self::Station => "station_number",
            Self::Bus => "bus_number",
            Self::Crew => "crew_id",
            Self::Zone => "zone_id",
            Self::Passenger => "passenger_id",
            Self::Ticket => "ticket_number",
        }
    }
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Company => "company",
            Self::BusLine => "bus line",
            Self::Station => "station",
            Self::Bus => "bus",
            Self::Crew => "crew member",
            Self::Zone => "zone",
            Self::Passenger => "passenger",
            Self::Ticket => "ticket",
        };
        f.write_str(label)
    }
}

/// Foreign-key field whose target row is missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceField {
    Company,
    BusLine,
    Station,
    Bus,
    Zone,
    Passenger,
}

impl ReferenceField {
    /// Entity the field points at.
    pub fn target(self) -> EntityKind {
        match self {
            Self::Company => EntityKind::Company,
            Self::BusLine => EntityKind::BusLine,
            Self::Station => EntityKind::Station,
            Self::Bus => EntityKind::Bus,
            Self::Zone => EntityKind::Zone,
            Self::Passenger => EntityKind::Passenger,
        }
    }
}

impl Display for ReferenceField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.target().key_column())
    }
}

/// Error for ticketing persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    /// Field shape rejected before touching storage.
    Validation(ValidationError),
    /// Transport or bootstrap failure.
    Db(DbError),
    /// Caller-chosen primary key already in use.
    DuplicateKey { entity: EntityKind, key: String },
    /// Target row does not exist.
    NotFound { entity: EntityKind, key: String },
    /// A reference field points at a row that does not exist.
    ForeignKeyViolation { field: ReferenceField, key: String },
    /// Passenger still referenced by tickets; the row is left intact.
    HasDependentTickets {
        passenger_id: String,
        ticket_count: u64,
    },
    /// Connection schema is not at the version this binary expects.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Persisted data cannot be converted into a domain record.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::DuplicateKey { entity, key } => write!(f, "{entity} already exists: {key}"),
            Self::NotFound { entity, key } => write!(f, "{entity} not found: {key}"),
            Self::ForeignKeyViolation { field, key } => {
                write!(f, "{field} references a missing {}: {key}", field.target())
            }
            Self::HasDependentTickets {
                passenger_id,
                ticket_count,
            } => write!(
                f,
                "passenger {passenger_id} still has {ticket_count} ticket(s)"
            ),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "ticketing repository requires schema version {expected_version}, got {actual_version}"
            ),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}
