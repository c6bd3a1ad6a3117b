use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use crate::persistence::{MessageStore, NewMessage, StoreTransaction, StoredMessage};
use crate::utils::error::StoreError;

#[derive(Debug, Default)]
struct MemoryStoreState {
    rows: Vec<StoredMessage>,
    next_id: u64,
}

/// In-process `MessageStore`.
///
/// Ids are reserved at insert time, so a rolled back insert leaves a gap
/// just like an auto-increment column does.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<MemoryStoreState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of committed rows.
    pub fn len(&self) -> usize {
        lock(&self.state).rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn lock(state: &Mutex<MemoryStoreState>) -> MutexGuard<'_, MemoryStoreState> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[async_trait]
impl MessageStore for MemoryStore {
    async fn begin(&self) -> Result<Box<dyn StoreTransaction>, StoreError> {
        Ok(Box::new(MemoryTransaction {
            state: self.state.clone(),
            staged: Vec::new(),
        }))
    }

    async fn list(&self) -> Result<Vec<StoredMessage>, StoreError> {
        let mut rows = lock(&self.state).rows.clone();
        rows.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(rows)
    }
}

struct MemoryTransaction {
    state: Arc<Mutex<MemoryStoreState>>,
    staged: Vec<StoredMessage>,
}

#[async_trait]
impl StoreTransaction for MemoryTransaction {
    async fn insert(&mut self, row: &NewMessage) -> Result<u64, StoreError> {
        let id = {
            let mut state = lock(&self.state);
            state.next_id += 1;
            state.next_id
        };
        self.staged.push(StoredMessage::from_new(id, row.clone()));
        Ok(id)
    }

    async fn commit(self: Box<Self>) -> Result<(), StoreError> {
        let MemoryTransaction { state, staged } = *self;
        lock(&state).rows.extend(staged);
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<(), StoreError> {
        Ok(())
    }
}
