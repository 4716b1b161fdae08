//! Explicit store session owned by the application.
//!
//! # Responsibility
//! - Acquire the ticketing connection at startup and release it on close.
//! - Hand out repositories and the ticketing service borrowing that
//!   connection.
//!
//! # Invariants
//! - One session owns exactly one connection for its whole lifetime.
//! - The connection is released on `close` or when the session is dropped.

use crate::config::{StoreConfig, StoreLocation};
use crate::db::{open_db, open_db_in_memory, DbError, DbResult};
use crate::repo::error::RepoResult;
use crate::repo::network_repo::SqliteNetworkRepository;
use crate::repo::passenger_repo::SqlitePassengerRepository;
use crate::repo::ticket_repo::SqliteTicketRepository;
use crate::seed::{self, TableCounts};
use crate::service::ticketing_service::TicketingService;
use log::{error, info};
use rusqlite::Connection;

/// Service type produced by [`TicketingSession::service`].
pub type SqliteTicketingService<'conn> = TicketingService<
    SqlitePassengerRepository<'conn>,
    SqliteTicketRepository<'conn>,
    SqliteNetworkRepository<'conn>,
>;

/// Open handle to the ticketing store.
pub struct TicketingSession {
    conn: Connection,
}

impl TicketingSession {
    /// Opens the configured store, creating the schema if absent.
    ///
    /// # Errors
    /// - Any `DbError` here is a connection failure and fatal for startup.
    pub fn open(config: &StoreConfig) -> DbResult<Self> {
        let conn = match &config.location {
            StoreLocation::File(path) => open_db(path)?,
            StoreLocation::Memory => open_db_in_memory()?,
        };
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> DbResult<Self> {
        Self::open(&StoreConfig::in_memory())
    }

    /// Borrow of the underlying connection, for reports and diagnostics.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn passengers(&self) -> RepoResult<SqlitePassengerRepository<'_>> {
        SqlitePassengerRepository::try_new(&self.conn)
    }

    pub fn tickets(&self) -> RepoResult<SqliteTicketRepository<'_>> {
        SqliteTicketRepository::try_new(&self.conn)
    }

    pub fn network(&self) -> RepoResult<SqliteNetworkRepository<'_>> {
        SqliteNetworkRepository::try_new(&self.conn)
    }

    /// Ticketing service over this session's repositories.
    pub fn service(&self) -> RepoResult<SqliteTicketingService<'_>> {
        Ok(TicketingService::new(
            self.passengers()?,
            self.tickets()?,
            self.network()?,
        ))
    }

    /// Replaces all data with the fixture set.
    pub fn reset_fixtures(&mut self) -> RepoResult<TableCounts> {
        seed::reset_fixtures(&mut self.conn)
    }

    /// Seeds fixtures into an empty store. Returns `true` when seeded.
    pub fn seed_if_empty(&mut self) -> RepoResult<bool> {
        seed::seed_if_empty(&mut self.conn)
    }

    pub fn table_counts(&self) -> RepoResult<TableCounts> {
        seed::table_counts(&self.conn)
    }

    /// Releases the connection, surfacing any close failure.
    pub fn close(self) -> DbResult<()> {
        match self.conn.close() {
            Ok(()) => {
                info!("event=db_close module=db status=ok");
                Ok(())
            }
            Err((_conn, err)) => {
                error!("event=db_close module=db status=error error={err}");
                Err(DbError::Sqlite(err))
            }
        }
    }
}
