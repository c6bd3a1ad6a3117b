//! In-process queue with SQS-like delivery semantics.
//!
//! Received messages move to an in-flight list and stay there until deleted.
//! There is no visibility timeout: `redeliver_in_flight` puts every
//! unacknowledged message back at the front of the queue, which is what an
//! expired timeout would do.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Notify;
use tokio::time::Instant;
use uuid::Uuid;

use crate::queue::{QueueClient, QueueMessage};
use crate::utils::error::QueueError;

#[derive(Debug, Clone)]
struct Enqueued {
    id: String,
    body: String,
}

#[derive(Debug, Default)]
struct MemoryQueueState {
    ready: VecDeque<Enqueued>,
    in_flight: Vec<(String, Enqueued)>,
}

#[derive(Debug, Default)]
pub struct MemoryQueue {
    state: Mutex<MemoryQueueState>,
    arrivals: Notify,
}

impl MemoryQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages waiting to be received.
    pub fn len(&self) -> usize {
        self.lock().ready.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Messages received but not yet deleted.
    pub fn in_flight(&self) -> usize {
        self.lock().in_flight.len()
    }

    /// Returns every unacknowledged delivery to the head of the queue, in
    /// the order it was received. Old receipt handles become invalid.
    pub fn redeliver_in_flight(&self) -> usize {
        let mut state = self.lock();
        let returned: Vec<Enqueued> = state.in_flight.drain(..).map(|(_, m)| m).collect();
        let count = returned.len();
        for message in returned.into_iter().rev() {
            state.ready.push_front(message);
        }
        drop(state);
        if count > 0 {
            self.arrivals.notify_waiters();
        }
        count
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryQueueState> {
        // every mutation is a single push or pop, a poisoned state is still valid
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn take_ready(&self, max_messages: usize) -> Vec<QueueMessage> {
        let mut state = self.lock();
        let mut delivered = Vec::new();
        while delivered.len() < max_messages {
            let Some(message) = state.ready.pop_front() else {
                break;
            };
            let handle = Uuid::new_v4().to_string();
            delivered.push(QueueMessage {
                body: message.body.clone(),
                receipt_handle: handle.clone(),
                message_id: Some(message.id.clone()),
            });
            state.in_flight.push((handle, message));
        }
        delivered
    }
}

#[async_trait]
impl QueueClient for MemoryQueue {
    async fn receive(
        &self,
        max_messages: i32,
        wait_secs: i32,
    ) -> Result<Vec<QueueMessage>, QueueError> {
        let max_messages = usize::try_from(max_messages.max(1)).unwrap_or(1);
        let deadline = Instant::now() + Duration::from_secs(wait_secs.max(0) as u64);

        loop {
            // Register interest before checking so a send in between is not missed.
            let arrival = self.arrivals.notified();
            let delivered = self.take_ready(max_messages);
            if !delivered.is_empty() {
                return Ok(delivered);
            }
            if tokio::time::timeout_at(deadline, arrival).await.is_err() {
                return Ok(Vec::new());
            }
        }
    }

    async fn delete(&self, receipt_handle: &str) -> Result<(), QueueError> {
        let mut state = self.lock();
        match state
            .in_flight
            .iter()
            .position(|(handle, _)| handle == receipt_handle)
        {
            Some(index) => {
                state.in_flight.remove(index);
                Ok(())
            }
            None => Err(QueueError::UnknownHandle(receipt_handle.to_string())),
        }
    }

    async fn send(&self, body: &str) -> Result<(), QueueError> {
        self.lock().ready.push_back(Enqueued {
            id: Uuid::new_v4().to_string(),
            body: body.to_string(),
        });
        self.arrivals.notify_waiters();
        Ok(())
    }
}
