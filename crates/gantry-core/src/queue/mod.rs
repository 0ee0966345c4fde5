//! Work queue abstraction for attempt distribution.
//!
//! This module provides:
//!
//! - [`WorkQueue`]: Trait for sending and claiming work items
//! - [`QueueMessage`]: A claimed message plus its receipt handle
//! - [`SqsWorkQueue`]: AWS SQS implementation
//! - [`InMemoryWorkQueue`]: In-memory queue for testing
//!
//! ## Delivery Semantics
//!
//! The queue is at-least-once: a received message stays invisible to other
//! consumers for the backend's visibility window. Acknowledging deletes it;
//! releasing resets its visibility to zero so it is immediately eligible
//! for redelivery. A consumer that crashes mid-processing simply lets the
//! window lapse.

pub mod memory;
pub mod sqs;

use std::time::Duration;

use async_trait::async_trait;

use crate::error::Result;

pub use memory::InMemoryWorkQueue;
pub use sqs::SqsWorkQueue;

/// Opaque handle identifying one claimed delivery of a message.
///
/// Valid only for the visibility window of the receive that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReceiptHandle(String);

impl ReceiptHandle {
    /// Wraps a backend-issued receipt string.
    #[must_use]
    pub fn new(handle: impl Into<String>) -> Self {
        Self(handle.into())
    }

    /// Returns the backend-issued receipt string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A message claimed from the queue.
#[derive(Debug, Clone)]
pub struct QueueMessage {
    /// The raw message body (a serialized work item).
    pub body: String,
    /// Handle used to acknowledge or release this delivery.
    pub receipt: ReceiptHandle,
}

/// Backend-agnostic work queue.
///
/// Implementations target AWS SQS in production and an in-memory queue in
/// tests. All methods are `Send + Sync` so one queue handle can be shared
/// across tasks.
#[async_trait]
pub trait WorkQueue: Send + Sync {
    /// Enqueues one message.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Queue`] if the backend rejects the send.
    async fn send(&self, body: String) -> Result<()>;

    /// Polls for at most one message, long-polling up to `wait`.
    ///
    /// Returns `Ok(None)` when the wait elapses without a message.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Queue`] on a failed poll.
    async fn receive(&self, wait: Duration) -> Result<Option<QueueMessage>>;

    /// Acknowledges (deletes) a claimed message.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Queue`] if the delete fails.
    async fn acknowledge(&self, receipt: &ReceiptHandle) -> Result<()>;

    /// Releases a claimed message for immediate redelivery by resetting
    /// its visibility timeout to zero.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Queue`] if the visibility change fails.
    async fn release(&self, receipt: &ReceiptHandle) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn receipt_handle_is_opaque_but_comparable() {
        let a = ReceiptHandle::new("r-1");
        let b = ReceiptHandle::new("r-1");
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "r-1");
    }
}
