//! AWS SQS work queue implementation.
//!
//! Maps the [`WorkQueue`] contract onto SQS primitives: `send_message`,
//! `receive_message` (single message, bounded long poll), `delete_message`
//! for acknowledge, and `change_message_visibility` with a zero timeout
//! for release.

use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_sqs::Client;

use super::{QueueMessage, ReceiptHandle, WorkQueue};
use crate::error::{Error, Result};

/// SQS maximum long-poll wait.
const MAX_WAIT_SECONDS: i32 = 20;

/// Work queue backed by an AWS SQS queue.
///
/// ## Example
///
/// ```rust,ignore
/// let config = gantry_core::aws::load_config(None).await;
/// let queue = SqsWorkQueue::new(
///     aws_sdk_sqs::Client::new(&config),
///     "https://sqs.us-east-2.amazonaws.com/123456789012/gantry-attempts",
/// );
/// ```
#[derive(Debug, Clone)]
pub struct SqsWorkQueue {
    client: Client,
    queue_url: String,
}

impl SqsWorkQueue {
    /// Creates a queue handle for the given SQS queue URL.
    #[must_use]
    pub fn new(client: Client, queue_url: impl Into<String>) -> Self {
        Self {
            client,
            queue_url: queue_url.into(),
        }
    }

    /// Returns the queue URL this handle targets.
    #[must_use]
    pub fn queue_url(&self) -> &str {
        &self.queue_url
    }
}

#[async_trait]
impl WorkQueue for SqsWorkQueue {
    async fn send(&self, body: String) -> Result<()> {
        self.client
            .send_message()
            .queue_url(&self.queue_url)
            .message_body(body)
            .send()
            .await
            .map_err(|e| Error::queue_with_source("failed to send message", e))?;
        Ok(())
    }

    async fn receive(&self, wait: Duration) -> Result<Option<QueueMessage>> {
        let wait_seconds = i32::try_from(wait.as_secs())
            .unwrap_or(i32::MAX)
            .min(MAX_WAIT_SECONDS);

        let response = self
            .client
            .receive_message()
            .queue_url(&self.queue_url)
            .max_number_of_messages(1)
            .wait_time_seconds(wait_seconds)
            .send()
            .await
            .map_err(|e| Error::queue_with_source("failed to receive message", e))?;

        let Some(message) = response.messages.unwrap_or_default().into_iter().next() else {
            return Ok(None);
        };

        match (message.body, message.receipt_handle) {
            (Some(body), Some(receipt)) => Ok(Some(QueueMessage {
                body,
                receipt: ReceiptHandle::new(receipt),
            })),
            _ => Err(Error::queue(
                "received message without body or receipt handle",
            )),
        }
    }

    async fn acknowledge(&self, receipt: &ReceiptHandle) -> Result<()> {
        self.client
            .delete_message()
            .queue_url(&self.queue_url)
            .receipt_handle(receipt.as_str())
            .send()
            .await
            .map_err(|e| Error::queue_with_source("failed to delete message", e))?;
        Ok(())
    }

    async fn release(&self, receipt: &ReceiptHandle) -> Result<()> {
        self.client
            .change_message_visibility()
            .queue_url(&self.queue_url)
            .receipt_handle(receipt.as_str())
            .visibility_timeout(0)
            .send()
            .await
            .map_err(|e| Error::queue_with_source("failed to change message visibility", e))?;
        Ok(())
    }
}
