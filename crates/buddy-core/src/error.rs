//! Error types for transport calls and companion setup.

use thiserror::Error;

use crate::classifier::FailureSignal;

/// A raw, unclassified failure returned by a transport.
///
/// Providers give us little more than a status code and a free-text
/// message, so classification into [`TransportError`] happens on the text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderFailure {
    /// HTTP status code, if the failure came from an HTTP response.
    pub status: Option<u16>,
    /// Raw provider message.
    pub message: String,
    /// True when the request never reached the provider (connect, timeout).
    pub connection: bool,
}

impl ProviderFailure {
    /// Create a failure from a message alone.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: message.into(),
            connection: false,
        }
    }

    /// Create a failure from an HTTP status and message.
    pub fn with_status(status: u16, message: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            message: message.into(),
            connection: false,
        }
    }

    /// Create a connection-level failure.
    pub fn connection(message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: message.into(),
            connection: true,
        }
    }
}

impl From<&str> for ProviderFailure {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

impl From<String> for ProviderFailure {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

/// A classified transport failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The provider is throttling us (HTTP 429 or a quota message).
    #[error("rate limited{}", detail(.0))]
    RateLimited(Option<String>),

    /// The provider's safety filter rejected the exchange.
    #[error("rejected by safety filter{}", detail(.0))]
    SafetyRejected(Option<String>),

    /// The request never reached the provider.
    #[error("network failure{}", detail(.0))]
    Network(Option<String>),

    /// Anything else.
    #[error("unknown transport failure{}", detail(.0))]
    Unknown(Option<String>),
}

fn detail(message: &Option<String>) -> String {
    match message {
        Some(message) => format!(": {}", message),
        None => String::new(),
    }
}

impl TransportError {
    /// Classify a raw provider failure.
    ///
    /// Rate-limit markers win over safety markers; an HTTP 429 status is a
    /// rate limit regardless of its message.
    pub fn classify(failure: &ProviderFailure) -> Self {
        let raw = if failure.message.is_empty() {
            None
        } else {
            Some(failure.message.clone())
        };

        match FailureSignal::detect(&failure.message) {
            Some(FailureSignal::RateLimit) => Self::RateLimited(raw),
            _ if failure.status == Some(429) => Self::RateLimited(raw),
            Some(FailureSignal::Safety) => Self::SafetyRejected(raw),
            None if failure.connection => Self::Network(raw),
            None => Self::Unknown(raw),
        }
    }

    /// Whether the Retry Scheduler may try again after this failure.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::RateLimited(_))
    }

    /// The raw provider message, if any.
    pub fn raw_message(&self) -> Option<&str> {
        match self {
            Self::RateLimited(m) | Self::SafetyRejected(m) | Self::Network(m) | Self::Unknown(m) => {
                m.as_deref()
            }
        }
    }
}

/// Errors raised while setting up the companion.
#[derive(Debug, Error)]
pub enum BuddyError {
    /// Missing or invalid configuration.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The transport could not be constructed.
    #[error("transport error: {0}")]
    Transport(String),
}
