//! Reply repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide finder APIs over the `replies` table.
//!
//! # Invariants
//! - Results are ordered by `id ASC`.
//! - Thread lookups go one level deep; callers recurse explicitly if needed.

use crate::db::migrations::REPLY_COLUMNS;
use crate::model::question::QuestionId;
use crate::model::reply::{Reply, ReplyId};
use crate::model::user::UserId;
use crate::repo::{ensure_table_ready, RepoResult};
use log::debug;
use rusqlite::{Connection, OptionalExtension, Row};

const REPLY_SELECT_SQL: &str = "SELECT
    id,
    question_id,
    parent_reply_id,
    user_id,
    body
FROM replies";

/// Repository interface for reply lookups.
pub trait ReplyRepository {
    /// Returns every reply.
    fn list_all_replies(&self) -> RepoResult<Vec<Reply>>;
    /// Looks up one reply by primary key.
    fn find_reply_by_id(&self, id: ReplyId) -> RepoResult<Option<Reply>>;
    /// Returns replies authored by `user_id`.
    fn find_replies_by_user(&self, user_id: UserId) -> RepoResult<Vec<Reply>>;
    /// Returns every reply posted under `question_id`, at any depth.
    fn find_replies_by_question(&self, question_id: QuestionId) -> RepoResult<Vec<Reply>>;
    /// Returns direct children of `parent_reply_id`.
    fn find_child_replies(&self, parent_reply_id: ReplyId) -> RepoResult<Vec<Reply>>;
}

/// SQLite-backed reply repository.
pub struct SqliteReplyRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteReplyRepository<'conn> {
    /// Constructs a repository after checking the `replies` table shape.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_table_ready(conn, "replies", REPLY_COLUMNS)?;
        Ok(Self { conn })
    }

    /// Runs the reply select, optionally filtered by `column = value`.
    fn query_replies(
        &self,
        event: &str,
        filter: Option<(&'static str, i64)>,
    ) -> RepoResult<Vec<Reply>> {
        let mut replies = Vec::new();
        match filter {
            Some((column, value)) => {
                let mut stmt = self.conn.prepare(&format!(
                    "{REPLY_SELECT_SQL} WHERE {column} = ?1 ORDER BY id ASC;"
                ))?;
                let mut rows = stmt.query([value])?;
                while let Some(row) = rows.next()? {
                    replies.push(parse_reply_row(row)?);
                }
                debug!(
                    "event={event} module=repo status=ok {column}={value} rows={}",
                    replies.len()
                );
            }
            None => {
                let mut stmt = self
                    .conn
                    .prepare(&format!("{REPLY_SELECT_SQL} ORDER BY id ASC;"))?;
                let mut rows = stmt.query([])?;
                while let Some(row) = rows.next()? {
                    replies.push(parse_reply_row(row)?);
                }
                debug!("event={event} module=repo status=ok rows={}", replies.len());
            }
        }

        Ok(replies)
    }
}

impl ReplyRepository for SqliteReplyRepository<'_> {
    fn list_all_replies(&self) -> RepoResult<Vec<Reply>> {
        self.query_replies("list_all_replies", None)
    }

    fn find_reply_by_id(&self, id: ReplyId) -> RepoResult<Option<Reply>> {
        let reply = self
            .conn
            .query_row(
                &format!("{REPLY_SELECT_SQL} WHERE id = ?1;"),
                [id],
                parse_reply_row,
            )
            .optional()?;

        debug!(
            "event=find_reply_by_id module=repo status=ok id={} rows={}",
            id,
            usize::from(reply.is_some())
        );
        Ok(reply)
    }

    fn find_replies_by_user(&self, user_id: UserId) -> RepoResult<Vec<Reply>> {
        self.query_replies("find_replies_by_user", Some(("user_id", user_id)))
    }

    fn find_replies_by_question(&self, question_id: QuestionId) -> RepoResult<Vec<Reply>> {
        self.query_replies("find_replies_by_question", Some(("question_id", question_id)))
    }

    fn find_child_replies(&self, parent_reply_id: ReplyId) -> RepoResult<Vec<Reply>> {
        self.query_replies("find_child_replies", Some(("parent_reply_id", parent_reply_id)))
    }
}

fn parse_reply_row(row: &Row<'_>) -> rusqlite::Result<Reply> {
    Ok(Reply {
        id: row.get("id")?,
        question_id: row.get("question_id")?,
        parent_reply_id: row.get("parent_reply_id")?,
        user_id: row.get("user_id")?,
        body: row.get("body")?,
    })
}
