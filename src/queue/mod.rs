//! The `queue` module is the worker's view of the external message queue.
//!
//! `QueueClient` is the narrow interface the processor and publisher depend
//! on. `SqsQueue` talks to AWS SQS (or a local emulator); `MemoryQueue`
//! keeps everything in process.

pub mod memory;
pub mod message;
pub mod sqs;

use async_trait::async_trait;

use crate::utils::error::QueueError;

pub use memory::MemoryQueue;
pub use message::{PostedMessage, QueueMessage};
pub use sqs::SqsQueue;

/// An at-least-once message queue.
#[async_trait]
pub trait QueueClient: Send + Sync {
    /// Long-polls for up to `wait_secs` and returns at most `max_messages`
    /// deliveries. Received messages stay on the queue until deleted.
    async fn receive(
        &self,
        max_messages: i32,
        wait_secs: i32,
    ) -> Result<Vec<QueueMessage>, QueueError>;

    /// Removes the delivery identified by `receipt_handle`. Stale or
    /// already-used handles may fail.
    async fn delete(&self, receipt_handle: &str) -> Result<(), QueueError>;

    /// Enqueues one message body.
    async fn send(&self, body: &str) -> Result<(), QueueError>;
}
