use async_trait::async_trait;
use aws_config::meta::region::RegionProviderChain;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_sqs::Client;
use aws_sdk_sqs::error::DisplayErrorContext;
use tracing::{debug, warn};

use crate::config::Settings;
use crate::queue::{QueueClient, QueueMessage};
use crate::utils::error::QueueError;

/// Group id attached to every message sent to a FIFO queue.
const MESSAGE_GROUP_ID: &str = "message";

/// `QueueClient` backed by AWS SQS.
#[derive(Debug, Clone)]
pub struct SqsQueue {
    client: Client,
    queue_url: String,
}

impl SqsQueue {
    pub fn new(client: Client, queue_url: impl Into<String>) -> Self {
        Self {
            client,
            queue_url: queue_url.into(),
        }
    }

    /// Builds a client from the ambient AWS configuration.
    ///
    /// In the `local` environment the endpoint is pointed at the emulator
    /// and the configured region is forced; otherwise the SDK's default
    /// region chain applies, falling back to the configured region.
    pub async fn from_settings(settings: &Settings) -> Self {
        let fallback = Region::new(settings.queue.region.clone());
        let loader = match settings.queue_endpoint() {
            Some(endpoint) => {
                debug!("Using queue emulator at {}", endpoint);
                aws_config::defaults(BehaviorVersion::latest())
                    .region(fallback)
                    .endpoint_url(endpoint)
            }
            None => aws_config::defaults(BehaviorVersion::latest())
                .region(RegionProviderChain::default_provider().or_else(fallback)),
        };

        let sdk_config = loader.load().await;
        Self::new(Client::new(&sdk_config), settings.queue.url.clone())
    }

    pub fn queue_url(&self) -> &str {
        &self.queue_url
    }

    fn is_fifo(&self) -> bool {
        self.queue_url.ends_with(".fifo")
    }
}

fn transport<E>(err: E) -> QueueError
where
    E: std::error::Error,
{
    QueueError::Transport(DisplayErrorContext(err).to_string())
}

#[async_trait]
impl QueueClient for SqsQueue {
    async fn receive(
        &self,
        max_messages: i32,
        wait_secs: i32,
    ) -> Result<Vec<QueueMessage>, QueueError> {
        let output = self
            .client
            .receive_message()
            .queue_url(&self.queue_url)
            .max_number_of_messages(max_messages)
            .wait_time_seconds(wait_secs)
            .send()
            .await
            .map_err(transport)?;

        let messages = output
            .messages
            .unwrap_or_default()
            .into_iter()
            .filter_map(|m| match m.receipt_handle {
                Some(handle) => Some(QueueMessage {
                    body: m.body.unwrap_or_default(),
                    receipt_handle: handle,
                    message_id: m.message_id,
                }),
                None => {
                    warn!(
                        "Dropping delivery without a receipt handle (id: {:?})",
                        m.message_id
                    );
                    None
                }
            })
            .collect();

        Ok(messages)
    }

    async fn delete(&self, receipt_handle: &str) -> Result<(), QueueError> {
        self.client
            .delete_message()
            .queue_url(&self.queue_url)
            .receipt_handle(receipt_handle)
            .send()
            .await
            .map_err(transport)?;
        Ok(())
    }

    async fn send(&self, body: &str) -> Result<(), QueueError> {
        let mut request = self
            .client
            .send_message()
            .queue_url(&self.queue_url)
            .message_body(body);
        if self.is_fifo() {
            request = request.message_group_id(MESSAGE_GROUP_ID);
        }
        request.send().await.map_err(transport)?;
        Ok(())
    }
}
