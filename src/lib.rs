//! # bbs-worker
//!
//! `bbs-worker` is the back end of a small bulletin board. Posts arrive on a
//! message queue as JSON; the worker stores each one in a relational table
//! and only then acknowledges it.
//!
//! ## Core Modules
//!
//! - `queue`: the `QueueClient` interface, with SQS and in-memory implementations.
//! - `persistence`: the transactional `MessageStore`, with MySQL and in-memory implementations, plus migrations.
//! - `processor`: the receive, store, acknowledge loop.
//! - `client`: the `Publisher` that produces posts.
//! - `config`: loading settings from `config/default` and the environment.
//! - `utils`: error types and logging.

pub mod client;
pub mod config;
pub mod persistence;
pub mod processor;
pub mod queue;
pub mod utils;

#[cfg(test)]
mod tests;
