//! Delayed transport - wraps another transport with artificial latency.

use std::time::Duration;

use buddy_core::{async_trait, ChatRequest, GenerateRequest, ProviderFailure, Transport};
use tokio::time::sleep;

/// A transport that wraps another transport and adds artificial delay.
///
/// Useful for testing single-flight handling and simulating provider latency.
pub struct DelayedTransport<T: Transport> {
    inner: T,
    delay: Duration,
}

impl<T: Transport> DelayedTransport<T> {
    /// Create a new DelayedTransport wrapping the given transport with the specified delay.
    pub fn new(inner: T, delay: Duration) -> Self {
        Self { inner, delay }
    }

    /// Create a transport with a delay in milliseconds.
    pub fn with_millis(inner: T, millis: u64) -> Self {
        Self::new(inner, Duration::from_millis(millis))
    }

    /// Create a transport with a delay in seconds.
    pub fn with_secs(inner: T, secs: u64) -> Self {
        Self::new(inner, Duration::from_secs(secs))
    }

    /// The wrapped transport.
    pub fn inner(&self) -> &T {
        &self.inner
    }
}

#[async_trait]
impl<T: Transport> Transport for DelayedTransport<T> {
    async fn chat(&self, request: &ChatRequest) -> Result<Option<String>, ProviderFailure> {
        sleep(self.delay).await;
        self.inner.chat(request).await
    }

    async fn generate(&self, request: &GenerateRequest) -> Result<Option<String>, ProviderFailure> {
        sleep(self.delay).await;
        self.inner.generate(request).await
    }

    fn name(&self) -> &str {
        "DelayedTransport"
    }
}
