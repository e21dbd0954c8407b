//! Follow association (`question_follows` table).

use crate::model::question::QuestionId;
use crate::model::user::UserId;
use serde::{Deserialize, Serialize};

/// Primary key of the `question_follows` table.
pub type QuestionFollowId = i64;

/// Links a user's interest to a question.
///
/// The same `(user_id, question_id)` pair may appear on several rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionFollow {
    pub id: QuestionFollowId,
    pub user_id: UserId,
    pub question_id: QuestionId,
}
