//! Shared SQL helpers for repository implementations.

use crate::db::migrations::latest_version;
use crate::repo::error::{EntityKind, ReferenceField, RepoError, RepoResult};
use rusqlite::ffi;
use rusqlite::types::ToSqlOutput;
use rusqlite::{Connection, ToSql};
use std::fmt::{Display, Formatter};

/// Primary-key value of either key shape used by the schema.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Key<'a> {
    Int(i64),
    Text(&'a str),
}

impl ToSql for Key<'_> {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        match self {
            Self::Int(value) => Ok(ToSqlOutput::from(*value)),
            Self::Text(value) => Ok(ToSqlOutput::from(*value)),
        }
    }
}

impl Display for Key<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
        }
    }
}

pub(crate) fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }
    Ok(())
}

pub(crate) fn row_exists(conn: &Connection, entity: EntityKind, key: Key<'_>) -> RepoResult<bool> {
    let sql = format!(
        "SELECT EXISTS(SELECT 1 FROM {} WHERE {} = ?1);",
        entity.table(),
        entity.key_column()
    );
    let exists: i64 = conn.query_row(&sql, [key], |row| row.get(0))?;
    Ok(exists == 1)
}

/// Fails with `DuplicateKey` when `key` is already taken.
pub(crate) fn ensure_absent(conn: &Connection, entity: EntityKind, key: Key<'_>) -> RepoResult<()> {
    if row_exists(conn, entity, key)? {
        return Err(RepoError::DuplicateKey {
            entity,
            key: key.to_string(),
        });
    }
    Ok(())
}

/// Fails with `NotFound` when no row has `key`.
pub(crate) fn ensure_present(conn: &Connection, entity: EntityKind, key: Key<'_>) -> RepoResult<()> {
    if !row_exists(conn, entity, key)? {
        return Err(RepoError::NotFound {
            entity,
            key: key.to_string(),
        });
    }
    Ok(())
}

/// Fails with `ForeignKeyViolation` when the referenced row is missing.
pub(crate) fn ensure_reference(
    conn: &Connection,
    field: ReferenceField,
    key: Key<'_>,
) -> RepoResult<()> {
    if !row_exists(conn, field.target(), key)? {
        return Err(RepoError::ForeignKeyViolation {
            field,
            key: key.to_string(),
        });
    }
    Ok(())
}

/// Maps a write failure, turning primary-key conflicts that slipped past the
/// pre-check into `DuplicateKey`.
pub(crate) fn map_write_error(err: rusqlite::Error, entity: EntityKind, key: Key<'_>) -> RepoError {
    if let rusqlite::Error::SqliteFailure(failure, _) = &err {
        if matches!(
            failure.extended_code,
            ffi::SQLITE_CONSTRAINT_PRIMARYKEY | ffi::SQLITE_CONSTRAINT_UNIQUE
        ) {
            return RepoError::DuplicateKey {
                entity,
                key: key.to_string(),
            };
        }
    }
    err.into()
}

pub(crate) fn bool_to_int(value: bool) -> i64 {
    i64::from(value)
}

pub(crate) fn int_to_bool(value: i64, column: &'static str) -> RepoResult<bool> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(RepoError::InvalidData(format!(
            "invalid boolean `{other}` in {column}"
        ))),
    }
}
