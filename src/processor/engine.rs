use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::persistence::{MessageStore, NewMessage, StoreTransaction};
use crate::processor::policy::ProcessorConfig;
use crate::queue::{PostedMessage, QueueClient, QueueMessage};
use crate::utils::error::WorkerError;

/// Result of a single receive-and-process iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// The receive failed and the retry delay has been waited out.
    ReceiveFailed,
    /// The receive succeeded with no messages.
    Idle,
    /// Messages were received; `stored` were committed and deleted,
    /// `skipped` were left on the queue.
    Processed { stored: usize, skipped: usize },
}

/// Single consumer that moves posts from the queue into the store.
///
/// Messages are handled strictly one after another, in the order the
/// queue delivered them.
pub struct MessageProcessor {
    queue: Arc<dyn QueueClient>,
    store: Arc<dyn MessageStore>,
    config: ProcessorConfig,
}

impl MessageProcessor {
    pub fn new(
        queue: Arc<dyn QueueClient>,
        store: Arc<dyn MessageStore>,
        config: ProcessorConfig,
    ) -> Self {
        Self {
            queue,
            store,
            config,
        }
    }

    pub fn config(&self) -> &ProcessorConfig {
        &self.config
    }

    /// Polls the queue until the retry policy gives up.
    ///
    /// With the default policy this never returns. Only consecutive receive
    /// failures count towards `max_attempts`; processing failures do not.
    pub async fn run(&self) -> Result<(), WorkerError> {
        info!(
            "Worker started (batch {}, wait {}s, retry delay {:?})",
            self.config.max_messages, self.config.wait_secs, self.config.retry.delay
        );

        let mut failures = 0u32;
        loop {
            match self.poll_once().await {
                PollOutcome::ReceiveFailed => {
                    failures = failures.saturating_add(1);
                    if self.config.retry.is_exhausted(failures) {
                        return Err(WorkerError::RetriesExhausted { attempts: failures });
                    }
                }
                _ => failures = 0,
            }
        }
    }

    /// One iteration: receive, then process every delivered message in order.
    ///
    /// A failed receive is followed by the fixed retry delay before this
    /// returns. An empty receive returns immediately.
    pub async fn poll_once(&self) -> PollOutcome {
        let messages = match self
            .queue
            .receive(self.config.max_messages, self.config.wait_secs)
            .await
        {
            Ok(messages) => messages,
            Err(e) => {
                error!("{}", WorkerError::Transport(e));
                tokio::time::sleep(self.config.retry.delay).await;
                return PollOutcome::ReceiveFailed;
            }
        };

        if messages.is_empty() {
            debug!("No messages received");
            return PollOutcome::Idle;
        }

        let mut stored = 0;
        let mut skipped = 0;
        for message in &messages {
            match self.process(message).await {
                Ok(_) => stored += 1,
                Err(e) => {
                    error!("Failed to process message {:?}: {}", message.message_id, e);
                    skipped += 1;
                }
            }
        }

        PollOutcome::Processed { stored, skipped }
    }

    /// Persists and acknowledges one delivery, returning the new row id.
    ///
    /// On any error before the commit the message has not been deleted and
    /// no row for it is kept.
    pub async fn process(&self, message: &QueueMessage) -> Result<u64, WorkerError> {
        info!("Received message json: {}", message.body);

        let posted = PostedMessage::decode(&message.body)?;
        let row = NewMessage::from(posted);

        let mut tx = self.store.begin().await?;

        let id = match tx.insert(&row).await {
            Ok(id) => id,
            Err(e) => {
                abort(tx).await;
                return Err(e.into());
            }
        };

        if let Err(e) = self.queue.delete(&message.receipt_handle).await {
            abort(tx).await;
            return Err(WorkerError::Acknowledge(e));
        }
        info!("Deleted message json: {}", message.body);

        if let Err(e) = tx.commit().await {
            error!(
                "Commit failed after message {:?} was deleted from the queue",
                message.message_id
            );
            return Err(e.into());
        }
        info!("Stored message {} from {}", id, row.author);

        Ok(id)
    }
}

async fn abort(tx: Box<dyn StoreTransaction>) {
    if let Err(e) = tx.rollback().await {
        warn!("Rollback failed: {}", e);
    }
}
