//! SQLite schema baseline registry and executor.
//!
//! # Responsibility
//! - Register schema steps in strictly increasing order.
//! - Apply pending steps atomically.
//!
//! # Invariants
//! - `version` values must remain monotonic.
//! - Applied version is mirrored to `PRAGMA user_version`.
//! - A database created outside this crate (`user_version = 0`) that already
//!   holds every baseline table and column is left untouched, so read-only
//!   files open without any write.

use crate::db::{table_exists, table_has_column, DbError, DbResult};
use log::info;
use rusqlite::Connection;

pub(crate) const USER_COLUMNS: &[&str] = &["id", "fname", "lname"];
pub(crate) const QUESTION_COLUMNS: &[&str] = &["id", "title", "body", "user_id"];
pub(crate) const REPLY_COLUMNS: &[&str] =
    &["id", "question_id", "parent_reply_id", "user_id", "body"];
pub(crate) const FOLLOW_COLUMNS: &[&str] = &["id", "user_id", "question_id"];

const BASELINE_TABLES: &[(&str, &[&str])] = &[
    ("users", USER_COLUMNS),
    ("questions", QUESTION_COLUMNS),
    ("replies", REPLY_COLUMNS),
    ("question_follows", FOLLOW_COLUMNS),
];

#[derive(Debug, Clone, Copy)]
struct Migration {
    version: u32,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    sql: include_str!("0001_baseline.sql"),
}];

/// Returns the latest schema version known by this binary.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |migration| migration.version)
}

/// Applies all pending schema steps on the provided connection.
///
/// Unversioned databases that already carry the full baseline are accepted
/// as-is and keep `user_version = 0`.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let current_version = current_user_version(conn)?;
    let latest = latest_version();

    if current_version > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: current_version,
            latest_supported: latest,
        });
    }

    if current_version == latest {
        return Ok(());
    }

    if current_version == 0 && baseline_present(conn)? {
        info!("event=db_migrate module=db status=skipped reason=baseline_present");
        return Ok(());
    }

    let tx = conn.transaction()?;
    for migration in MIGRATIONS {
        if migration.version <= current_version {
            continue;
        }

        tx.execute_batch(migration.sql)?;
        tx.execute_batch(&format!("PRAGMA user_version = {};", migration.version))?;
    }
    tx.commit()?;

    info!("event=db_migrate module=db status=ok from={current_version} to={latest}");
    Ok(())
}

fn baseline_present(conn: &Connection) -> DbResult<bool> {
    for &(table, columns) in BASELINE_TABLES {
        if !table_exists(conn, table)? {
            return Ok(false);
        }
        for column in columns {
            if !table_has_column(conn, table, column)? {
                return Ok(false);
            }
        }
    }
    Ok(true)
}

fn current_user_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}
