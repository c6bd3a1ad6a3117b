use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::queue::{PostedMessage, QueueClient};
use crate::utils::error::QueueError;

/// Sends bulletin board posts to the queue.
pub struct Publisher {
    queue: Arc<dyn QueueClient>,
}

impl Publisher {
    pub fn new(queue: Arc<dyn QueueClient>) -> Self {
        Self { queue }
    }

    /// Publishes a post stamped with the current time and returns it.
    pub async fn publish(
        &self,
        author: impl Into<String>,
        body: impl Into<String>,
    ) -> Result<PostedMessage, QueueError> {
        let posted = PostedMessage::new(author, body, Utc::now());
        self.publish_message(&posted).await?;
        Ok(posted)
    }

    pub async fn publish_message(&self, posted: &PostedMessage) -> Result<(), QueueError> {
        let json = posted.encode()?;
        info!(
            "name: {} message: {} time: {}",
            posted.author, posted.body, posted.posted_at
        );
        self.queue.send(&json).await?;
        info!("Sent message json: {}", json);
        Ok(())
    }
}
