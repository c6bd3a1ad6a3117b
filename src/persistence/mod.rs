//! The `persistence` module stores processed posts in a relational table.
//!
//! `MessageStore` is the narrow interface the processor uses. Inserts are
//! only possible through a `StoreTransaction`, which the caller must finish
//! with `commit` or `rollback`; a dropped transaction is rolled back.
//!
//! `MySqlStore` is backed by `sqlx`; `MemoryStore` keeps rows in process
//! with the same commit/rollback visibility rules.

pub mod memory_store;
pub mod migrate;
pub mod model;
pub mod mysql_store;

use async_trait::async_trait;

use crate::utils::error::StoreError;

pub use memory_store::MemoryStore;
pub use model::{ANONYMOUS, NewMessage, StoredMessage};
pub use mysql_store::MySqlStore;

/// A relational store for bulletin board posts.
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Opens a transaction. Rows inserted through it become visible on commit.
    async fn begin(&self) -> Result<Box<dyn StoreTransaction>, StoreError>;

    /// All committed rows, oldest `created_at` first.
    async fn list(&self) -> Result<Vec<StoredMessage>, StoreError>;
}

/// An open transaction on a `MessageStore`.
#[async_trait]
pub trait StoreTransaction: Send {
    /// Inserts one row and returns its surrogate id.
    async fn insert(&mut self, row: &NewMessage) -> Result<u64, StoreError>;

    async fn commit(self: Box<Self>) -> Result<(), StoreError>;

    async fn rollback(self: Box<Self>) -> Result<(), StoreError>;
}
