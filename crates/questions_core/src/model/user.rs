//! User value object (`users` table).

use serde::{Deserialize, Serialize};

/// Primary key of the `users` table.
pub type UserId = i64;

/// Snapshot of one `users` row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub fname: String,
    pub lname: String,
}

impl User {
    /// Returns `"fname lname"`.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.fname, self.lname)
    }
}
