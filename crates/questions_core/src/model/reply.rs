//! Reply value object (`replies` table).
//!
//! # Invariants
//! - `parent_reply_id` is a nullable back-reference to another reply in the
//!   same table. Threads are walked lazily, one level per query.

use crate::model::question::QuestionId;
use crate::model::user::UserId;
use serde::{Deserialize, Serialize};

/// Primary key of the `replies` table.
pub type ReplyId = i64;

/// Snapshot of one `replies` row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    pub id: ReplyId,
    pub question_id: QuestionId,
    /// `None` for top-level replies.
    pub parent_reply_id: Option<ReplyId>,
    /// Author.
    pub user_id: UserId,
    pub body: String,
}

impl Reply {
    /// Returns whether this reply answers the question directly.
    pub fn is_top_level(&self) -> bool {
        self.parent_reply_id.is_none()
    }
}
