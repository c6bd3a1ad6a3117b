use std::sync::Arc;
use std::time::Duration;

use crate::client::Publisher;
use crate::persistence::{MemoryStore, MessageStore};
use crate::processor::{MessageProcessor, PollOutcome, ProcessorConfig, RetryPolicy};
use crate::queue::MemoryQueue;

#[tokio::test]
async fn integration_publish_process_list() {
    let queue = Arc::new(MemoryQueue::new());
    let store = Arc::new(MemoryStore::new());
    let publisher = Publisher::new(queue.clone());
    let processor = MessageProcessor::new(
        queue.clone(),
        store.clone(),
        ProcessorConfig {
            max_messages: 1,
            wait_secs: 0,
            retry: RetryPolicy::forever(Duration::from_millis(10)),
        },
    );

    let first = publisher.publish("Ann", "hello").await.unwrap();
    let second = publisher.publish("", "anonymous post").await.unwrap();

    let mut stored = 0;
    while let PollOutcome::Processed { stored: n, .. } = processor.poll_once().await {
        stored += n;
    }
    assert_eq!(stored, 2);
    assert!(queue.is_empty());
    assert_eq!(queue.in_flight(), 0);

    let rows = store.list().await.unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].author, "Ann");
    assert_eq!(rows[0].created_at, first.posted_at);
    assert_eq!(rows[1].author, crate::persistence::ANONYMOUS);
    assert_eq!(rows[1].created_at, second.posted_at);
}

#[tokio::test]
async fn integration_worker_picks_up_late_posts() {
    let queue = Arc::new(MemoryQueue::new());
    let store = Arc::new(MemoryStore::new());
    let processor = MessageProcessor::new(
        queue.clone(),
        store.clone(),
        ProcessorConfig {
            max_messages: 1,
            wait_secs: 1,
            retry: RetryPolicy::forever(Duration::from_millis(10)),
        },
    );

    let worker = tokio::spawn(async move { processor.run().await });

    Publisher::new(queue.clone())
        .publish("Ann", "late")
        .await
        .unwrap();

    let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
    while store.is_empty() && tokio::time::Instant::now() < deadline {
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    worker.abort();

    let rows = store.list().await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].body, "late");
}
