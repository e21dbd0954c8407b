//! Question repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide finder APIs over the `questions` table.
//!
//! # Invariants
//! - Results are ordered by `id ASC`.

use crate::db::migrations::QUESTION_COLUMNS;
use crate::model::question::{Question, QuestionId};
use crate::model::user::UserId;
use crate::repo::{ensure_table_ready, RepoResult};
use log::debug;
use rusqlite::{Connection, OptionalExtension, Row};

const QUESTION_SELECT_SQL: &str = "SELECT
    id,
    title,
    body,
    user_id
FROM questions";

/// Repository interface for question lookups.
pub trait QuestionRepository {
    /// Returns every question.
    fn list_all_questions(&self) -> RepoResult<Vec<Question>>;
    /// Looks up one question by primary key.
    fn find_question_by_id(&self, id: QuestionId) -> RepoResult<Option<Question>>;
    /// Returns questions whose author is `user_id`.
    fn find_questions_by_author(&self, user_id: UserId) -> RepoResult<Vec<Question>>;
}

/// SQLite-backed question repository.
pub struct SqliteQuestionRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteQuestionRepository<'conn> {
    /// Constructs a repository after checking the `questions` table shape.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_table_ready(conn, "questions", QUESTION_COLUMNS)?;
        Ok(Self { conn })
    }
}

impl QuestionRepository for SqliteQuestionRepository<'_> {
    fn list_all_questions(&self) -> RepoResult<Vec<Question>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{QUESTION_SELECT_SQL} ORDER BY id ASC;"))?;
        let questions = collect_questions(stmt.query([])?)?;

        debug!(
            "event=list_all_questions module=repo status=ok rows={}",
            questions.len()
        );
        Ok(questions)
    }

    fn find_question_by_id(&self, id: QuestionId) -> RepoResult<Option<Question>> {
        let question = self
            .conn
            .query_row(
                &format!("{QUESTION_SELECT_SQL} WHERE id = ?1;"),
                [id],
                parse_question_row,
            )
            .optional()?;

        debug!(
            "event=find_question_by_id module=repo status=ok id={} rows={}",
            id,
            usize::from(question.is_some())
        );
        Ok(question)
    }

    fn find_questions_by_author(&self, user_id: UserId) -> RepoResult<Vec<Question>> {
        let mut stmt = self.conn.prepare(&format!(
            "{QUESTION_SELECT_SQL}
             WHERE user_id = ?1
             ORDER BY id ASC;"
        ))?;
        let questions = collect_questions(stmt.query([user_id])?)?;

        debug!(
            "event=find_questions_by_author module=repo status=ok user_id={} rows={}",
            user_id,
            questions.len()
        );
        Ok(questions)
    }
}

/// Drains a result set whose rows carry the question columns.
pub(crate) fn collect_questions(mut rows: rusqlite::Rows<'_>) -> RepoResult<Vec<Question>> {
    let mut questions = Vec::new();
    while let Some(row) = rows.next()? {
        questions.push(parse_question_row(row)?);
    }
    Ok(questions)
}

pub(crate) fn parse_question_row(row: &Row<'_>) -> rusqlite::Result<Question> {
    Ok(Question {
        id: row.get("id")?,
        title: row.get("title")?,
        body: row.get("body")?,
        user_id: row.get("user_id")?,
    })
}
