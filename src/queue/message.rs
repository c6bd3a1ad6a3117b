use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One delivered copy of a queue message.
///
/// `receipt_handle` authorizes deleting exactly this delivery; a later
/// redelivery of the same message carries a different handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueMessage {
    pub body: String,
    pub receipt_handle: String,
    /// Queue-assigned id, only used to correlate log lines.
    pub message_id: Option<String>,
}

impl QueueMessage {
    pub fn new(body: impl Into<String>, receipt_handle: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            receipt_handle: receipt_handle.into(),
            message_id: None,
        }
    }
}

/// A bulletin board post as it travels through the queue.
///
/// On the wire this is a JSON object with the keys `name`, `message` and
/// `time`. `time` is the moment the post was submitted, stamped by the
/// producer.
///
/// # Example
///
/// ```rust
/// use bbs_worker::queue::PostedMessage;
///
/// let json = r#"{"name":"Ann","message":"hello","time":"2024-01-01T00:00:00Z"}"#;
/// let posted = PostedMessage::decode(json).unwrap();
/// assert_eq!(posted.author, "Ann");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostedMessage {
    #[serde(rename = "name")]
    pub author: String,
    #[serde(rename = "message")]
    pub body: String,
    #[serde(rename = "time")]
    pub posted_at: DateTime<Utc>,
}

impl PostedMessage {
    pub fn new(
        author: impl Into<String>,
        body: impl Into<String>,
        posted_at: DateTime<Utc>,
    ) -> Self {
        Self {
            author: author.into(),
            body: body.into(),
            posted_at,
        }
    }

    /// Structural decoding only: free-form text is accepted as is.
    pub fn decode(payload: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(payload)
    }

    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
