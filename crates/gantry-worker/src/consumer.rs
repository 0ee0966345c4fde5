//! The consumer control loop.
//!
//! Polls the queue for one message at a time, paces attempt execution
//! through the [`Throttle`], and settles each delivery: acknowledge on
//! success, discard invalid payloads, release failures for immediate
//! redelivery. The loop runs until its cancellation token fires and only
//! observes cancellation between iterations: a claimed message is always
//! processed to completion.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use gantry_core::queue::{QueueMessage, WorkQueue};
use gantry_core::WorkItem;

use crate::runner::AttemptRunner;
use crate::throttle::Throttle;

/// Minimum spacing between attempt-processing invocations.
pub const ATTEMPT_INTERVAL: Duration = Duration::from_secs(20);

/// Long-poll wait per receive.
pub const RECEIVE_WAIT: Duration = Duration::from_secs(10);

/// Pause after a failed poll before retrying.
pub const POLL_BACKOFF: Duration = Duration::from_secs(5);

/// How one claimed delivery was settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageDisposition {
    /// The attempt completed; the message was deleted.
    Acknowledged,
    /// The payload was invalid; the message was deleted without
    /// processing (it can never become valid).
    Discarded,
    /// The attempt failed; visibility was reset to zero for immediate
    /// redelivery.
    Released,
}

/// The queue-driven worker loop.
pub struct Consumer {
    queue: Arc<dyn WorkQueue>,
    runner: Arc<dyn AttemptRunner>,
    throttle: Throttle,
    receive_wait: Duration,
    poll_backoff: Duration,
}

impl Consumer {
    /// Creates a consumer with the standard pacing (20s throttle, 10s
    /// receive wait, 5s poll backoff).
    #[must_use]
    pub fn new(queue: Arc<dyn WorkQueue>, runner: Arc<dyn AttemptRunner>) -> Self {
        Self {
            queue,
            runner,
            throttle: Throttle::new(ATTEMPT_INTERVAL),
            receive_wait: RECEIVE_WAIT,
            poll_backoff: POLL_BACKOFF,
        }
    }

    /// Overrides the attempt throttle interval.
    #[must_use]
    pub fn with_throttle_interval(mut self, interval: Duration) -> Self {
        self.throttle = Throttle::new(interval);
        self
    }

    /// Overrides the receive long-poll wait.
    #[must_use]
    pub fn with_receive_wait(mut self, wait: Duration) -> Self {
        self.receive_wait = wait;
        self
    }

    /// Overrides the failed-poll backoff.
    #[must_use]
    pub fn with_poll_backoff(mut self, backoff: Duration) -> Self {
        self.poll_backoff = backoff;
        self
    }

    /// Runs the control loop until `shutdown` is cancelled.
    ///
    /// Cancellation is observed between iterations; an attempt already in
    /// progress completes before the loop exits.
    pub async fn run(&self, shutdown: CancellationToken) {
        info!("consumer started");

        loop {
            if shutdown.is_cancelled() {
                break;
            }

            let received = tokio::select! {
                () = shutdown.cancelled() => break,
                received = self.queue.receive(self.receive_wait) => received,
            };

            match received {
                Ok(Some(message)) => {
                    self.process_message(message).await;
                }
                Ok(None) => {}
                Err(error) => {
                    warn!(error = %error, "queue poll failed");
                    tokio::time::sleep(self.poll_backoff).await;
                }
            }
        }

        info!("consumer stopped");
    }

    /// Processes one claimed delivery end to end and settles it.
    ///
    /// Waits on the throttle first, so at most one invocation makes
    /// progress per interval. Settlement failures are logged; the
    /// returned disposition reflects the decision that was attempted.
    pub async fn process_message(&self, message: QueueMessage) -> MessageDisposition {
        self.throttle.acquire().await;

        let disposition = match WorkItem::from_json(&message.body) {
            Ok(item) => {
                if self.runner.execute(&item).await.is_success() {
                    MessageDisposition::Acknowledged
                } else {
                    MessageDisposition::Released
                }
            }
            Err(error) => {
                warn!(error = %error, body = %message.body, "discarding invalid message");
                MessageDisposition::Discarded
            }
        };

        match disposition {
            MessageDisposition::Acknowledged | MessageDisposition::Discarded => {
                if let Err(error) = self.queue.acknowledge(&message.receipt).await {
                    error!(error = %error, "failed to delete message");
                }
            }
            MessageDisposition::Released => {
                if let Err(error) = self.queue.release(&message.receipt).await {
                    error!(error = %error, "failed to release message");
                }
            }
        }

        disposition
    }
}
