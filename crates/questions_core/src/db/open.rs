//! Connection bootstrap utilities for SQLite.
//!
//! # Responsibility
//! - Open file or in-memory SQLite connections.
//! - Configure connection pragmas required by the query layer.
//! - Apply the schema baseline before returning a usable connection.
//!
//! # Invariants
//! - Returned connections have `foreign_keys=ON`.
//! - Returned connections contain the four entity tables.
//! - Files that already hold the full baseline are opened without writes.

use super::migrations::apply_migrations;
use super::{DbError, DbResult};
use log::{error, info};
use rusqlite::{Connection, ErrorCode, OpenFlags};
use std::path::Path;
use std::time::{Duration, Instant};

const IN_MEMORY_PATH: &str = ":memory:";

/// Opens a SQLite database file and applies the schema baseline.
///
/// The file is created when missing. An existing file that already holds the
/// four tables is accepted as-is.
///
/// # Errors
/// - `DbError::Connection` when the file cannot be opened or is not a database.
/// - `DbError::UnsupportedSchemaVersion` when the file was written by a newer build.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    let path = path.as_ref();
    let display_path = path.display().to_string();
    open_with("file", &display_path, || Connection::open(path))
}

/// Opens an existing SQLite database file without write access.
///
/// The file must already hold the four entity tables; unlike [`open_db`] the
/// file is never created or stamped.
///
/// # Errors
/// - `DbError::Connection` when the file is missing or is not a database.
/// - `DbError::Query` when the baseline is incomplete and would need a write.
pub fn open_db_read_only(path: impl AsRef<Path>) -> DbResult<Connection> {
    let path = path.as_ref();
    let display_path = path.display().to_string();
    open_with("file_read_only", &display_path, || {
        Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY
                | OpenFlags::SQLITE_OPEN_URI
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
    })
}

/// Opens an in-memory SQLite database and applies the schema baseline.
pub fn open_db_in_memory() -> DbResult<Connection> {
    open_with("memory", IN_MEMORY_PATH, Connection::open_in_memory)
}

fn open_with<F>(mode: &str, path: &str, open: F) -> DbResult<Connection>
where
    F: FnOnce() -> rusqlite::Result<Connection>,
{
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode={mode}");

    let mut conn = match open() {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={mode} duration_ms={} error_code=db_open_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            return Err(DbError::Connection {
                path: path.to_string(),
                source: err,
            });
        }
    };

    match bootstrap_connection(&mut conn).map_err(|err| classify_bootstrap_error(path, err)) {
        Ok(()) => {
            info!(
                "event=db_open module=db status=ok mode={mode} duration_ms={}",
                started_at.elapsed().as_millis()
            );
            Ok(conn)
        }
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={mode} duration_ms={} error_code=db_bootstrap_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

fn bootstrap_connection(conn: &mut Connection) -> DbResult<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_secs(5))?;
    apply_migrations(conn)?;
    Ok(())
}

// SQLite defers reading the file header until the first statement, so a
// non-database file only fails here.
fn classify_bootstrap_error(path: &str, err: DbError) -> DbError {
    match err {
        DbError::Query(source)
            if matches!(
                source.sqlite_error_code(),
                Some(ErrorCode::NotADatabase | ErrorCode::CannotOpen)
            ) =>
        {
            DbError::Connection {
                path: path.to_string(),
                source,
            }
        }
        other => other,
    }
}
