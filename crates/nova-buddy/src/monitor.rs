//! The Stress Signal Monitor.
//!
//! Periodically samples a [`StressSource`] and hands spikes to a handler.
//! This is a trigger source for proactive check-ins, not a sensor driver.

use std::future::Future;
use std::time::Duration;

use buddy_core::StressSignal;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::config::DEFAULT_STRESS_INTERVAL;
use crate::task::TaskHandle;

/// Produces biometric readings.
pub trait StressSource: Send + 'static {
    fn sample(&mut self) -> StressSignal;
}

/// Synthetic readings: heart rate in [60, 100), HRV in [20, 100).
#[derive(Debug)]
pub struct RandomStressSource {
    rng: StdRng,
}

impl RandomStressSource {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic readings for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomStressSource {
    fn default() -> Self {
        Self::new()
    }
}

impl StressSource for RandomStressSource {
    fn sample(&mut self) -> StressSignal {
        let heart_rate = self.rng.gen_range(60.0..100.0);
        let hrv = self.rng.gen_range(20.0..100.0);
        StressSignal::from_readings(heart_rate, hrv)
    }
}

/// Samples a source on a fixed period.
pub struct StressMonitor<S: StressSource = RandomStressSource> {
    source: S,
    interval: Duration,
}

impl StressMonitor<RandomStressSource> {
    /// Monitor synthetic readings every 10 seconds.
    pub fn new() -> Self {
        Self::with_source(RandomStressSource::new())
    }
}

impl Default for StressMonitor<RandomStressSource> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: StressSource> StressMonitor<S> {
    pub fn with_source(source: S) -> Self {
        Self {
            source,
            interval: DEFAULT_STRESS_INTERVAL,
        }
    }

    /// Set the sampling period. Zero is replaced by the default.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = if interval.is_zero() {
            DEFAULT_STRESS_INTERVAL
        } else {
            interval
        };
        self
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Start sampling in the background.
    ///
    /// The first sample is taken one full period after start. `on_spike` is
    /// awaited for each spike; non-spike readings are dropped. Dropping the
    /// returned handle stops the monitor.
    pub fn spawn<F, Fut>(self, on_spike: F) -> TaskHandle
    where
        F: Fn(StressSignal) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let Self { mut source, interval } = self;

        info!(interval = ?interval, "Starting stress monitor");

        TaskHandle::new(tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + interval, interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;

                let signal = source.sample();
                if signal.is_spike {
                    info!(
                        heart_rate = signal.heart_rate,
                        hrv = signal.hrv,
                        "Stress spike detected"
                    );
                    on_spike(signal).await;
                } else {
                    debug!(heart_rate = signal.heart_rate, hrv = signal.hrv, "Stress reading");
                }
            }
        }))
    }
}
