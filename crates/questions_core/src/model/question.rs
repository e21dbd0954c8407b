//! Question value object (`questions` table).

use crate::model::user::UserId;
use serde::{Deserialize, Serialize};

/// Primary key of the `questions` table.
pub type QuestionId = i64;

/// Snapshot of one `questions` row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub title: String,
    pub body: String,
    /// Author. Stored in the `user_id` column.
    pub user_id: UserId,
}
