//! Question-follow repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide finder APIs over `question_follows` and its joins with
//!   `users` and `questions`.
//! - Own the "most followed" aggregation.
//!
//! # Invariants
//! - Join finders emit one row per matching follow row, so duplicate follows
//!   produce duplicate results. Rows come back in follow id order.
//! - `find_most_followed_questions` orders by follow count descending, then
//!   question id ascending, and never returns unfollowed questions.

use crate::db::migrations::{FOLLOW_COLUMNS, QUESTION_COLUMNS, USER_COLUMNS};
use crate::model::question::{Question, QuestionId};
use crate::model::question_follow::QuestionFollow;
use crate::model::user::{User, UserId};
use crate::repo::question_repo::collect_questions;
use crate::repo::user_repo::parse_user_row;
use crate::repo::{ensure_table_ready, RepoResult};
use log::debug;
use rusqlite::{Connection, Row};

/// Repository interface for follow lookups.
pub trait QuestionFollowRepository {
    /// Returns every follow row.
    fn list_all_follows(&self) -> RepoResult<Vec<QuestionFollow>>;
    /// Returns one user per follow row on `question_id`.
    fn find_followers_of_question(&self, question_id: QuestionId) -> RepoResult<Vec<User>>;
    /// Returns one question per follow row owned by `user_id`.
    fn find_questions_followed_by_user(&self, user_id: UserId) -> RepoResult<Vec<Question>>;
    /// Returns up to `n` followed questions, most followers first.
    fn find_most_followed_questions(&self, n: u32) -> RepoResult<Vec<Question>>;
}

/// SQLite-backed follow repository.
///
/// Joins touch `users` and `questions`, so construction checks all three
/// tables.
pub struct SqliteQuestionFollowRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteQuestionFollowRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_table_ready(conn, "question_follows", FOLLOW_COLUMNS)?;
        ensure_table_ready(conn, "users", USER_COLUMNS)?;
        ensure_table_ready(conn, "questions", QUESTION_COLUMNS)?;
        Ok(Self { conn })
    }
}

impl QuestionFollowRepository for SqliteQuestionFollowRepository<'_> {
    fn list_all_follows(&self) -> RepoResult<Vec<QuestionFollow>> {
        let mut stmt = self.conn.prepare(
            "SELECT
                id,
                user_id,
                question_id
             FROM question_follows
             ORDER BY id ASC;",
        )?;
        let mut rows = stmt.query([])?;
        let mut follows = Vec::new();
        while let Some(row) = rows.next()? {
            follows.push(parse_follow_row(row)?);
        }

        debug!(
            "event=list_all_follows module=repo status=ok rows={}",
            follows.len()
        );
        Ok(follows)
    }

    fn find_followers_of_question(&self, question_id: QuestionId) -> RepoResult<Vec<User>> {
        let mut stmt = self.conn.prepare(
            "SELECT
                u.id AS id,
                u.fname AS fname,
                u.lname AS lname
             FROM users u
             INNER JOIN question_follows qf ON u.id = qf.user_id
             WHERE qf.question_id = ?1
             ORDER BY qf.id ASC;",
        )?;
        let mut rows = stmt.query([question_id])?;
        let mut users = Vec::new();
        while let Some(row) = rows.next()? {
            users.push(parse_user_row(row)?);
        }

        debug!(
            "event=find_followers_of_question module=repo status=ok question_id={} rows={}",
            question_id,
            users.len()
        );
        Ok(users)
    }

    fn find_questions_followed_by_user(&self, user_id: UserId) -> RepoResult<Vec<Question>> {
        let mut stmt = self.conn.prepare(
            "SELECT
                q.id AS id,
                q.title AS title,
                q.body AS body,
                q.user_id AS user_id
             FROM questions q
             INNER JOIN question_follows qf ON q.id = qf.question_id
             WHERE qf.user_id = ?1
             ORDER BY qf.id ASC;",
        )?;
        let questions = collect_questions(stmt.query([user_id])?)?;

        debug!(
            "event=find_questions_followed_by_user module=repo status=ok user_id={} rows={}",
            user_id,
            questions.len()
        );
        Ok(questions)
    }

    fn find_most_followed_questions(&self, n: u32) -> RepoResult<Vec<Question>> {
        if n == 0 {
            return Ok(Vec::new());
        }

        let mut stmt = self.conn.prepare(
            "SELECT
                q.id AS id,
                q.title AS title,
                q.body AS body,
                q.user_id AS user_id
             FROM question_follows qf
             INNER JOIN questions q ON q.id = qf.question_id
             GROUP BY q.id
             ORDER BY COUNT(*) DESC, q.id ASC
             LIMIT ?1;",
        )?;
        let questions = collect_questions(stmt.query([i64::from(n)])?)?;

        debug!(
            "event=find_most_followed_questions module=repo status=ok limit={} rows={}",
            n,
            questions.len()
        );
        Ok(questions)
    }
}

fn parse_follow_row(row: &Row<'_>) -> rusqlite::Result<QuestionFollow> {
    Ok(QuestionFollow {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        question_id: row.get("question_id")?,
    })
}
