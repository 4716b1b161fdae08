//! Passenger repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Full CRUD over `passengers`.
//! - Own the one business rule beyond plain CRUD: a passenger referenced by
//!   tickets cannot be deleted.
//!
//! # Invariants
//! - Write paths call `Passenger::validate()` before SQL mutations.
//! - The dependent-ticket check runs in the same immediate transaction as the
//!   delete, so the count cannot go stale between check and write.
//! - The check is explicit and never relies on storage cascade behavior.

use crate::model::passenger::{Passenger, PassengerId};
use crate::repo::error::{EntityKind, RepoError, RepoResult};
use crate::repo::support::{ensure_absent, ensure_connection_ready, map_write_error, Key};
use rusqlite::{params, Connection, OptionalExtension, Row, Transaction, TransactionBehavior};

/// Repository interface for passenger CRUD.
pub trait PassengerRepository {
    fn create_passenger(&self, passenger: &Passenger) -> RepoResult<PassengerId>;
    fn get_passenger(&self, id: &str) -> RepoResult<Option<Passenger>>;
    /// All passengers in insertion order.
    fn list_passengers(&self) -> RepoResult<Vec<Passenger>>;
    fn update_passenger(&self, passenger: &Passenger) -> RepoResult<()>;
    /// Deletes a passenger that has no tickets.
    ///
    /// Fails with `HasDependentTickets` and leaves the row intact otherwise.
    fn delete_passenger(&self, id: &str) -> RepoResult<()>;
    fn count_tickets_for_passenger(&self, id: &str) -> RepoResult<u64>;
}

/// SQLite-backed passenger repository.
pub struct SqlitePassengerRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqlitePassengerRepository<'conn> {
    /// Constructs a repository over a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl PassengerRepository for SqlitePassengerRepository<'_> {
    fn create_passenger(&self, passenger: &Passenger) -> RepoResult<PassengerId> {
        passenger.validate()?;
        let key = Key::Text(&passenger.id);
        ensure_absent(self.conn, EntityKind::Passenger, key)?;

        self.conn
            .execute(
                "INSERT INTO passengers (passenger_id, name) VALUES (?1, ?2);",
                params![passenger.id, passenger.name],
            )
            .map_err(|err| map_write_error(err, EntityKind::Passenger, key))?;

        Ok(passenger.id.clone())
    }

    fn get_passenger(&self, id: &str) -> RepoResult<Option<Passenger>> {
        let passenger = self
            .conn
            .query_row(
                "SELECT passenger_id, name FROM passengers WHERE passenger_id = ?1;",
                [id],
                parse_passenger_row,
            )
            .optional()?;
        Ok(passenger)
    }

    fn list_passengers(&self) -> RepoResult<Vec<Passenger>> {
        let mut stmt = self
            .conn
            .prepare("SELECT passenger_id, name FROM passengers ORDER BY rowid ASC;")?;
        let passengers = stmt
            .query_map([], parse_passenger_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(passengers)
    }

    fn update_passenger(&self, passenger: &Passenger) -> RepoResult<()> {
        passenger.validate()?;

        let changed = self.conn.execute(
            "UPDATE passengers SET name = ?2 WHERE passenger_id = ?1;",
            params![passenger.id, passenger.name],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: EntityKind::Passenger,
                key: passenger.id.clone(),
            });
        }

        Ok(())
    }

    fn delete_passenger(&self, id: &str) -> RepoResult<()> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;

        let ticket_count = count_tickets(&tx, id)?;
        if ticket_count > 0 {
            return Err(RepoError::HasDependentTickets {
                passenger_id: id.to_string(),
                ticket_count,
            });
        }

        let changed = tx.execute("DELETE FROM passengers WHERE passenger_id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: EntityKind::Passenger,
                key: id.to_string(),
            });
        }

        tx.commit()?;
        Ok(())
    }

    fn count_tickets_for_passenger(&self, id: &str) -> RepoResult<u64> {
        count_tickets(self.conn, id)
    }
}

fn count_tickets(conn: &Connection, passenger_id: &str) -> RepoResult<u64> {
    let count = conn.query_row(
        "SELECT COUNT(*) FROM tickets WHERE passenger_id = ?1;",
        [passenger_id],
        |row| row.get::<_, u64>(0),
    )?;
    Ok(count)
}

fn parse_passenger_row(row: &Row<'_>) -> rusqlite::Result<Passenger> {
    Ok(Passenger {
        id: row.get("passenger_id")?,
        name: row.get("name")?,
    })
}
