use super::Publisher;
use crate::queue::{MemoryQueue, PostedMessage, QueueClient};
use chrono::{TimeZone, Utc};
use std::sync::Arc;

#[tokio::test]
async fn test_publish_enqueues_decodable_post() {
    let queue = Arc::new(MemoryQueue::new());
    let publisher = Publisher::new(queue.clone());

    let before = Utc::now();
    let posted = publisher.publish("Ann", "hello").await.unwrap();
    assert!(posted.posted_at >= before);

    let received = queue.receive(1, 0).await.unwrap();
    assert_eq!(received.len(), 1);
    let decoded = PostedMessage::decode(&received[0].body).unwrap();
    assert_eq!(decoded, posted);
}

#[tokio::test]
async fn test_publish_message_keeps_caller_timestamp() {
    let queue = Arc::new(MemoryQueue::new());
    let publisher = Publisher::new(queue.clone());
    let posted = PostedMessage::new(
        "Bob",
        "改行\nand \"quotes\"",
        Utc.with_ymd_and_hms(2023, 12, 31, 23, 59, 59).unwrap(),
    );

    publisher.publish_message(&posted).await.unwrap();

    let received = queue.receive(1, 0).await.unwrap();
    assert_eq!(PostedMessage::decode(&received[0].body).unwrap(), posted);
}
