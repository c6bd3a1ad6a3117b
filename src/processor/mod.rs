//! The `processor` module drains the queue into the store.
//!
//! Each received message is handled in one unit of work: decode, insert
//! inside a store transaction, delete from the queue, commit. A failed
//! delete rolls the insert back, so a row is kept only when its queue
//! message was acknowledged.
//!
//! The queue delete and the store commit are separate systems. A crash
//! after the delete succeeds and before the commit finishes loses the
//! message; nothing here closes that window.
//!
//! Payloads that fail to decode are never deleted and will be redelivered
//! for as long as the queue keeps them.

pub mod engine;
pub mod policy;

pub use engine::{MessageProcessor, PollOutcome};
pub use policy::{ProcessorConfig, RetryPolicy};
