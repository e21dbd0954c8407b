//! User repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide finder APIs over the `users` table.
//!
//! # Invariants
//! - Scans are ordered by `id ASC`.
//! - `find_user_by_name` returns the lowest-id match when names collide.

use crate::db::migrations::USER_COLUMNS;
use crate::model::user::{User, UserId};
use crate::repo::{ensure_table_ready, RepoResult};
use log::debug;
use rusqlite::{params, Connection, OptionalExtension, Row};

const USER_SELECT_SQL: &str = "SELECT
    id,
    fname,
    lname
FROM users";

/// Repository interface for user lookups.
pub trait UserRepository {
    /// Returns every user.
    fn list_all_users(&self) -> RepoResult<Vec<User>>;
    /// Looks up one user by primary key.
    fn find_user_by_id(&self, id: UserId) -> RepoResult<Option<User>>;
    /// Exact match on both name fields.
    fn find_user_by_name(&self, fname: &str, lname: &str) -> RepoResult<Option<User>>;
}

/// SQLite-backed user repository.
pub struct SqliteUserRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteUserRepository<'conn> {
    /// Constructs a repository after checking the `users` table shape.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_table_ready(conn, "users", USER_COLUMNS)?;
        Ok(Self { conn })
    }
}

impl UserRepository for SqliteUserRepository<'_> {
    fn list_all_users(&self) -> RepoResult<Vec<User>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{USER_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut users = Vec::new();
        while let Some(row) = rows.next()? {
            users.push(parse_user_row(row)?);
        }

        debug!(
            "event=list_all_users module=repo status=ok rows={}",
            users.len()
        );
        Ok(users)
    }

    fn find_user_by_id(&self, id: UserId) -> RepoResult<Option<User>> {
        let user = self
            .conn
            .query_row(
                &format!("{USER_SELECT_SQL} WHERE id = ?1;"),
                [id],
                parse_user_row,
            )
            .optional()?;

        debug!(
            "event=find_user_by_id module=repo status=ok id={} rows={}",
            id,
            usize::from(user.is_some())
        );
        Ok(user)
    }

    fn find_user_by_name(&self, fname: &str, lname: &str) -> RepoResult<Option<User>> {
        let mut stmt = self.conn.prepare(&format!(
            "{USER_SELECT_SQL}
             WHERE fname = ?1
               AND lname = ?2
             ORDER BY id ASC
             LIMIT 1;"
        ))?;

        let mut rows = stmt.query(params![fname, lname])?;
        let user = match rows.next()? {
            Some(row) => Some(parse_user_row(row)?),
            None => None,
        };

        // Names stay out of the log; only the outcome is recorded.
        debug!(
            "event=find_user_by_name module=repo status=ok rows={}",
            usize::from(user.is_some())
        );
        Ok(user)
    }
}

/// Decodes a row carrying `id`, `fname` and `lname` columns.
pub(crate) fn parse_user_row(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get("id")?,
        fname: row.get("fname")?,
        lname: row.get("lname")?,
    })
}
