//! Bounded exponential-backoff retry around a transport call.

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::error::{ProviderFailure, TransportError};

/// How many times to try and how long to wait between tries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    backoff_base: Duration,
}

impl RetryPolicy {
    /// Create a policy. `max_attempts` is clamped to at least 1.
    pub fn new(max_attempts: u32, backoff_base: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            backoff_base,
        }
    }

    /// Policy for live conversation: 3 attempts, 1 second base.
    pub fn conversation() -> Self {
        Self::new(3, Duration::from_secs(1))
    }

    /// Policy for journal summaries: 2 attempts, 1 second base.
    pub fn summary() -> Self {
        Self::new(2, Duration::from_secs(1))
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn backoff_base(&self) -> Duration {
        self.backoff_base
    }

    /// Delay after the failure of zero-based `attempt`: base * 2^attempt.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let factor = 1u32.checked_shl(attempt).unwrap_or(u32::MAX);
        self.backoff_base.saturating_mul(factor)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::conversation()
    }
}

/// Emitted before each backoff delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryEvent {
    /// One-based attempt that just failed.
    pub attempt: u32,
    pub max_attempts: u32,
    pub wait: Duration,
}

/// Callback receiving retry events. Advisory only.
pub type RetryObserver = Arc<dyn Fn(&RetryEvent) + Send + Sync>;

/// Runs operations under a [`RetryPolicy`].
///
/// Only rate-limit failures are retried. A scheduler attached to a shutdown
/// signal stops retrying as soon as the signal fires or its sender is
/// dropped; the pending delay is abandoned and the last failure returned.
#[derive(Clone, Default)]
pub struct RetryScheduler {
    shutdown: Option<watch::Receiver<bool>>,
    observer: Option<RetryObserver>,
}

impl fmt::Debug for RetryScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryScheduler")
            .field("shutdown", &self.shutdown.is_some())
            .field("observer", &self.observer.is_some())
            .finish()
    }
}

impl RetryScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop retrying once `shutdown` becomes true or its sender is dropped.
    pub fn with_shutdown(mut self, shutdown: watch::Receiver<bool>) -> Self {
        self.shutdown = Some(shutdown);
        self
    }

    /// Install an observer for retry events.
    pub fn with_observer(mut self, observer: RetryObserver) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Invoke `operation` up to `policy.max_attempts()` times.
    ///
    /// After a rate-limited failure with attempts remaining, waits
    /// `backoff_base * 2^attempt` and tries again. Any other failure, or
    /// running out of attempts, returns the last failure.
    pub async fn execute<T, F, Fut>(
        &self,
        policy: &RetryPolicy,
        mut operation: F,
    ) -> Result<T, TransportError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, ProviderFailure>>,
    {
        let max_attempts = policy.max_attempts();
        let mut attempt = 0;

        loop {
            let failure = match operation().await {
                Ok(value) => return Ok(value),
                Err(failure) => failure,
            };

            let error = TransportError::classify(&failure);
            if !error.is_retryable() || attempt + 1 >= max_attempts {
                debug!(attempt = attempt + 1, max_attempts, error = %error, "Giving up");
                return Err(error);
            }

            let wait = policy.delay_for_attempt(attempt);
            let event = RetryEvent {
                attempt: attempt + 1,
                max_attempts,
                wait,
            };
            warn!(
                attempt = event.attempt,
                max_attempts,
                wait_ms = millis(wait),
                "Rate limit hit, backing off"
            );
            if let Some(observer) = &self.observer {
                observer(&event);
            }

            if !self.pause(wait).await {
                debug!("Shut down during backoff, not retrying");
                return Err(error);
            }

            attempt += 1;
        }
    }

    /// Sleep for `wait`. Returns false if shut down first.
    async fn pause(&self, wait: Duration) -> bool {
        let Some(shutdown) = &self.shutdown else {
            sleep(wait).await;
            return true;
        };

        let mut shutdown = shutdown.clone();
        if *shutdown.borrow() {
            return false;
        }

        let delay = sleep(wait);
        tokio::pin!(delay);

        loop {
            tokio::select! {
                _ = &mut delay => return true,
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        return false;
                    }
                }
            }
        }
    }
}

/// Milliseconds in `wait`, saturating at `u64::MAX`.
fn millis(wait: Duration) -> u64 {
    u64::try_from(wait.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;
    use tokio::time::Instant;

    fn recorder() -> (RetryObserver, Arc<Mutex<Vec<RetryEvent>>>) {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = events.clone();
        let observer: RetryObserver = Arc::new(move |event: &RetryEvent| {
            sink.lock().unwrap().push(*event);
        });
        (observer, events)
    }

    #[test]
    fn test_policy_clamps_attempts() {
        let policy = RetryPolicy::new(0, Duration::from_secs(1));
        assert_eq!(policy.max_attempts(), 1);
    }

    #[test]
    fn test_delay_doubles() {
        let policy = RetryPolicy::new(5, Duration::from_millis(250));
        assert_eq!(policy.delay_for_attempt(0), Duration::from_millis(250));
        assert_eq!(policy.delay_for_attempt(1), Duration::from_millis(500));
        assert_eq!(policy.delay_for_attempt(2), Duration::from_secs(1));
        assert_eq!(policy.delay_for_attempt(40), Duration::from_millis(250).saturating_mul(u32::MAX));
    }

    #[test]
    fn test_named_policies() {
        assert_eq!(RetryPolicy::conversation(), RetryPolicy::new(3, Duration::from_secs(1)));
        assert_eq!(RetryPolicy::summary(), RetryPolicy::new(2, Duration::from_secs(1)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_always_rate_limited_uses_every_attempt() {
        for max_attempts in 1..=5u32 {
            let calls = &AtomicU32::new(0);
            let policy = RetryPolicy::new(max_attempts, Duration::from_secs(1));
            let start = Instant::now();

            let result: Result<(), _> = RetryScheduler::new()
                .execute(&policy, || async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Err(ProviderFailure::new("429 Too Many Requests"))
                })
                .await;

            assert!(matches!(result, Err(TransportError::RateLimited(_))));
            assert_eq!(calls.load(Ordering::SeqCst), max_attempts);

            // 2^0 + 2^1 + ... + 2^(n-2) seconds
            let expected = Duration::from_secs((1u64 << (max_attempts - 1)) - 1);
            assert_eq!(start.elapsed(), expected);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_single_attempt_never_waits() {
        let policy = RetryPolicy::new(1, Duration::from_secs(1));
        let (observer, events) = recorder();

        for message in ["429", "quota", "safety", "boom"] {
            let start = Instant::now();
            let result: Result<(), _> = RetryScheduler::new()
                .with_observer(observer.clone())
                .execute(&policy, || async move { Err(ProviderFailure::new(message)) })
                .await;

            assert!(result.is_err());
            assert_eq!(start.elapsed(), Duration::ZERO);
        }

        assert!(events.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_non_rate_limit_failure_short_circuits() {
        let calls = &AtomicU32::new(0);
        let start = Instant::now();

        let result: Result<(), _> = RetryScheduler::new()
            .execute(&RetryPolicy::conversation(), || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(ProviderFailure::with_status(500, "internal error"))
            })
            .await;

        assert_eq!(
            result,
            Err(TransportError::Unknown(Some("internal error".to_string())))
        );
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_network_failure_not_retried() {
        let calls = &AtomicU32::new(0);

        let result: Result<(), _> = RetryScheduler::new()
            .execute(&RetryPolicy::conversation(), || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(ProviderFailure::connection("connection reset"))
            })
            .await;

        assert!(matches!(result, Err(TransportError::Network(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_recovers_after_rate_limits() {
        let calls = &AtomicU32::new(0);
        let (observer, events) = recorder();
        let start = Instant::now();

        let result = RetryScheduler::new()
            .with_observer(observer)
            .execute(&RetryPolicy::conversation(), || async move {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                if n < 2 {
                    Err(ProviderFailure::new("429 Too Many Requests"))
                } else {
                    Ok("done")
                }
            })
            .await;

        assert_eq!(result, Ok("done"));
        assert_eq!(start.elapsed(), Duration::from_secs(3));

        let events = events.lock().unwrap();
        assert_eq!(
            *events,
            vec![
                RetryEvent {
                    attempt: 1,
                    max_attempts: 3,
                    wait: Duration::from_secs(1)
                },
                RetryEvent {
                    attempt: 2,
                    max_attempts: 3,
                    wait: Duration::from_secs(2)
                },
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_abandons_backoff() {
        let (tx, rx) = watch::channel(false);
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();
        let scheduler = RetryScheduler::new().with_shutdown(rx);

        let task = tokio::spawn(async move {
            scheduler
                .execute(&RetryPolicy::new(3, Duration::from_secs(60)), || {
                    let counter = counter.clone();
                    async move {
                        counter.fetch_add(1, Ordering::SeqCst);
                        Err::<(), _>(ProviderFailure::new("quota exceeded"))
                    }
                })
                .await
        });

        tokio::time::sleep(Duration::from_secs(1)).await;
        let start = Instant::now();
        tx.send_replace(true);

        let result = task.await.unwrap();
        assert!(matches!(result, Err(TransportError::RateLimited(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(start.elapsed() < Duration::from_secs(60));
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_shutdown_sender_stops_retrying() {
        let (tx, rx) = watch::channel(false);
        drop(tx);
        let calls = &AtomicU32::new(0);

        let result: Result<(), _> = RetryScheduler::new()
            .with_shutdown(rx)
            .execute(&RetryPolicy::conversation(), || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(ProviderFailure::new("429"))
            })
            .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_already_shut_down_returns_immediately() {
        let (_tx, rx) = watch::channel(true);
        let start = Instant::now();

        let result: Result<(), _> = RetryScheduler::new()
            .with_shutdown(rx)
            .execute(&RetryPolicy::conversation(), || async move {
                Err(ProviderFailure::new("429"))
            })
            .await;

        assert!(result.is_err());
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[test]
    fn test_saturated_delay_logs_max_millis() {
        let policy = RetryPolicy::new(64, Duration::from_secs(u64::MAX / 2));
        let wait = policy.delay_for_attempt(40);
        assert_eq!(wait, Duration::MAX);
        assert_eq!(millis(wait), u64::MAX);
        assert_eq!(millis(Duration::from_millis(1500)), 1500);
    }
}
