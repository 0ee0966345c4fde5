//! In-memory work queue implementation for testing.
//!
//! ## Limitations
//!
//! - **NOT suitable for production**: No persistence, no distribution
//! - **Single-process only**: Messages are not visible across processes
//! - **No visibility timer**: An in-flight message stays claimed until it
//!   is acknowledged or released; crashed-consumer expiry is not simulated

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use ulid::Ulid;

use super::{QueueMessage, ReceiptHandle, WorkQueue};
use crate::error::{Error, Result};

/// Internal queue state protected by a single lock.
#[derive(Debug, Default)]
struct QueueState {
    ready: VecDeque<String>,
    in_flight: HashMap<ReceiptHandle, String>,
}

/// In-memory work queue for testing.
#[derive(Debug, Default)]
pub struct InMemoryWorkQueue {
    state: Mutex<QueueState>,
}

/// Converts a lock poison error to a queue error.
fn poison_err<T>(_: PoisonError<T>) -> Error {
    Error::queue("work queue lock poisoned")
}

impl InMemoryWorkQueue {
    /// Creates a new empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of messages ready for delivery.
    ///
    /// # Errors
    ///
    /// Returns an error if the lock is poisoned.
    pub fn depth(&self) -> Result<usize> {
        let state = self.state.lock().map_err(poison_err)?;
        Ok(state.ready.len())
    }

    /// Returns the number of claimed, not-yet-settled messages.
    ///
    /// # Errors
    ///
    /// Returns an error if the lock is poisoned.
    pub fn in_flight(&self) -> Result<usize> {
        let state = self.state.lock().map_err(poison_err)?;
        Ok(state.in_flight.len())
    }

    /// Returns all ready message bodies, emptying the queue.
    ///
    /// # Errors
    ///
    /// Returns an error if the lock is poisoned.
    pub fn drain(&self) -> Result<Vec<String>> {
        let mut state = self.state.lock().map_err(poison_err)?;
        Ok(state.ready.drain(..).collect())
    }
}

#[async_trait]
impl WorkQueue for InMemoryWorkQueue {
    async fn send(&self, body: String) -> Result<()> {
        let mut state = self.state.lock().map_err(poison_err)?;
        state.ready.push_back(body);
        Ok(())
    }

    async fn receive(&self, wait: Duration) -> Result<Option<QueueMessage>> {
        {
            let mut state = self.state.lock().map_err(poison_err)?;
            if let Some(body) = state.ready.pop_front() {
                let receipt = ReceiptHandle::new(Ulid::new().to_string());
                state.in_flight.insert(receipt.clone(), body.clone());
                return Ok(Some(QueueMessage { body, receipt }));
            }
        }

        // Simulate the long-poll wait when the queue is empty.
        tokio::time::sleep(wait).await;
        Ok(None)
    }

    async fn acknowledge(&self, receipt: &ReceiptHandle) -> Result<()> {
        let mut state = self.state.lock().map_err(poison_err)?;
        state
            .in_flight
            .remove(receipt)
            .map(|_| ())
            .ok_or_else(|| Error::queue(format!("unknown receipt: {}", receipt.as_str())))
    }

    async fn release(&self, receipt: &ReceiptHandle) -> Result<()> {
        let mut state = self.state.lock().map_err(poison_err)?;
        let body = state
            .in_flight
            .remove(receipt)
            .ok_or_else(|| Error::queue(format!("unknown receipt: {}", receipt.as_str())))?;
        state.ready.push_front(body);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WAIT: Duration = Duration::from_millis(1);

    #[tokio::test]
    async fn send_and_receive() -> Result<()> {
        let queue = InMemoryWorkQueue::new();
        queue.send("first".to_string()).await?;
        queue.send("second".to_string()).await?;
        assert_eq!(queue.depth()?, 2);

        let message = queue.receive(WAIT).await?.expect("message available");
        assert_eq!(message.body, "first");
        assert_eq!(queue.depth()?, 1);
        assert_eq!(queue.in_flight()?, 1);
        Ok(())
    }

    #[tokio::test]
    async fn empty_receive_returns_none() -> Result<()> {
        let queue = InMemoryWorkQueue::new();
        assert!(queue.receive(WAIT).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn acknowledge_settles_delivery() -> Result<()> {
        let queue = InMemoryWorkQueue::new();
        queue.send("body".to_string()).await?;

        let message = queue.receive(WAIT).await?.expect("message");
        queue.acknowledge(&message.receipt).await?;

        assert_eq!(queue.depth()?, 0);
        assert_eq!(queue.in_flight()?, 0);
        assert!(queue.receive(WAIT).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn release_makes_message_immediately_redeliverable() -> Result<()> {
        let queue = InMemoryWorkQueue::new();
        queue.send("retry-me".to_string()).await?;

        let message = queue.receive(WAIT).await?.expect("message");
        queue.release(&message.receipt).await?;
        assert_eq!(queue.in_flight()?, 0);

        let redelivered = queue.receive(WAIT).await?.expect("redelivered");
        assert_eq!(redelivered.body, "retry-me");
        assert_ne!(redelivered.receipt, message.receipt);
        Ok(())
    }

    #[tokio::test]
    async fn released_message_goes_to_the_front() -> Result<()> {
        let queue = InMemoryWorkQueue::new();
        queue.send("a".to_string()).await?;
        queue.send("b".to_string()).await?;

        let first = queue.receive(WAIT).await?.expect("a");
        queue.release(&first.receipt).await?;

        let next = queue.receive(WAIT).await?.expect("front of queue");
        assert_eq!(next.body, "a");
        Ok(())
    }

    #[tokio::test]
    async fn settling_an_unknown_receipt_fails() -> Result<()> {
        let queue = InMemoryWorkQueue::new();
        let bogus = ReceiptHandle::new("no-such-receipt");
        assert!(queue.acknowledge(&bogus).await.is_err());
        assert!(queue.release(&bogus).await.is_err());
        Ok(())
    }
}
