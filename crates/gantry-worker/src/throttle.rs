//! Process-wide pacing for attempt execution.
//!
//! Build/run cycles are resource-heavy, so the consumer caps itself at
//! one attempt per fixed interval no matter how fast the queue delivers.
//! The throttle is an explicit guard object held by the consumer rather
//! than module-level state, so tests can drive it with the paused tokio
//! clock.

use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;

/// Admits one acquisition per interval, measured start to start.
#[derive(Debug)]
pub struct Throttle {
    interval: Duration,
    last_start: Mutex<Option<Instant>>,
}

impl Throttle {
    /// Creates a throttle admitting one acquisition per `interval`.
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_start: Mutex::new(None),
        }
    }

    /// Returns the configured interval.
    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Suspends until a full interval has elapsed since the start of the
    /// previous acquisition, then opens a new window.
    ///
    /// Concurrent callers queue on the internal lock, so acquisitions are
    /// serialized process-wide.
    pub async fn acquire(&self) {
        let mut last_start = self.last_start.lock().await;
        if let Some(previous) = *last_start {
            tokio::time::sleep_until(previous + self.interval).await;
        }
        *last_start = Some(Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTERVAL: Duration = Duration::from_secs(20);

    #[tokio::test(start_paused = true)]
    async fn first_acquisition_is_immediate() {
        let throttle = Throttle::new(INTERVAL);
        let started = Instant::now();
        throttle.acquire().await;
        assert_eq!(started.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn second_acquisition_waits_out_the_interval() {
        let throttle = Throttle::new(INTERVAL);
        let started = Instant::now();

        throttle.acquire().await;
        throttle.acquire().await;

        assert!(started.elapsed() >= INTERVAL);
    }

    #[tokio::test(start_paused = true)]
    async fn window_is_measured_from_the_previous_start() {
        let throttle = Throttle::new(INTERVAL);
        let started = Instant::now();

        throttle.acquire().await;
        // Work happening inside the window does not extend it.
        tokio::time::sleep(Duration::from_secs(5)).await;
        throttle.acquire().await;

        assert_eq!(started.elapsed(), INTERVAL);
    }

    #[tokio::test(start_paused = true)]
    async fn idle_past_the_interval_admits_immediately() {
        let throttle = Throttle::new(INTERVAL);

        throttle.acquire().await;
        tokio::time::sleep(INTERVAL * 2).await;

        let before = Instant::now();
        throttle.acquire().await;
        assert_eq!(before.elapsed(), Duration::ZERO);
    }
}
