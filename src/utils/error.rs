//! The `error` module defines the error types used across the worker.
//!
//! Each collaborator has its own leaf error (`QueueError`, `StoreError`);
//! `WorkerError` is the taxonomy the message processor logs and reports.

use thiserror::Error;

/// Failures talking to the message queue.
#[derive(Debug, Error)]
pub enum QueueError {
    /// The queue service could not be reached or rejected the request.
    #[error("queue transport error: {0}")]
    Transport(String),

    /// A delete was attempted with a handle the queue does not recognise.
    #[error("unknown receipt handle: {0}")]
    UnknownHandle(String),

    /// The payload could not be serialized for sending.
    #[error("failed to encode message body: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Failures talking to the relational store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// The store refused the row without a driver-level error.
    #[error("insert rejected: {0}")]
    Rejected(String),
}

/// What can go wrong while processing the queue.
#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("failed to receive from queue: {0}")]
    Transport(#[source] QueueError),

    #[error("failed to decode message payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("failed to persist message: {0}")]
    Persistence(#[from] StoreError),

    #[error("failed to delete message from queue: {0}")]
    Acknowledge(#[source] QueueError),

    #[error("queue receive failed {attempts} times in a row")]
    RetriesExhausted { attempts: u32 },
}
