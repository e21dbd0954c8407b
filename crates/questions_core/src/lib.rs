//! Read-only query layer over the questions/replies/follows SQLite schema.
//! Callers open a connection, build a [`QuestionsService`] on it, and get
//! plain value objects back.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use db::{open_db, open_db_in_memory, open_db_read_only, DbError, DbResult};
pub use logging::{default_log_level, flush_logs, init_logging, logging_status, LogLevel};
pub use model::question::{Question, QuestionId};
pub use model::question_follow::{QuestionFollow, QuestionFollowId};
pub use model::reply::{Reply, ReplyId};
pub use model::user::{User, UserId};
pub use repo::follow_repo::{QuestionFollowRepository, SqliteQuestionFollowRepository};
pub use repo::question_repo::{QuestionRepository, SqliteQuestionRepository};
pub use repo::reply_repo::{ReplyRepository, SqliteReplyRepository};
pub use repo::user_repo::{SqliteUserRepository, UserRepository};
pub use repo::{RepoError, RepoResult};
pub use service::questions_service::{QuestionsService, SqliteQuestionsService};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
