use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::queue::PostedMessage;

/// Author name stored for posts submitted without one.
pub const ANONYMOUS: &str = "名無し";

/// A row about to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMessage {
    pub author: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

/// A committed row of the `messages` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredMessage {
    pub id: u64,
    pub author: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

/// `created_at` is the submission time carried by the post, not the time
/// the worker got to it.
impl From<PostedMessage> for NewMessage {
    fn from(posted: PostedMessage) -> Self {
        let author = if posted.author.is_empty() {
            ANONYMOUS.to_string()
        } else {
            posted.author
        };
        Self {
            author,
            body: posted.body,
            created_at: posted.posted_at,
        }
    }
}

impl StoredMessage {
    pub fn from_new(id: u64, row: NewMessage) -> Self {
        Self {
            id,
            author: row.author,
            body: row.body,
            created_at: row.created_at,
        }
    }
}
