//! Safety classification of provider replies and failures.
//!
//! Upstream providers only hand back free-text error messages, so the
//! failure signals are an ordered table of case-insensitive substring rules.
//! The first matching rule wins.

use crate::copy;
use crate::error::TransportError;

/// A signal recognised in a raw provider failure message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureSignal {
    /// The provider is throttling requests.
    RateLimit,
    /// The provider's safety filter fired.
    Safety,
}

struct SignalRule {
    needle: &'static str,
    signal: FailureSignal,
}

/// Evaluated top to bottom against the lowercased message.
const SIGNAL_RULES: &[SignalRule] = &[
    SignalRule {
        needle: "429",
        signal: FailureSignal::RateLimit,
    },
    SignalRule {
        needle: "quota",
        signal: FailureSignal::RateLimit,
    },
    SignalRule {
        needle: "safety",
        signal: FailureSignal::Safety,
    },
];

impl FailureSignal {
    /// Find the first signal whose marker appears in `message`.
    pub fn detect(message: &str) -> Option<Self> {
        let lowered = message.to_lowercase();
        SIGNAL_RULES
            .iter()
            .find(|rule| lowered.contains(rule.needle))
            .map(|rule| rule.signal)
    }
}

/// The user-facing outcome of one exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassifiedOutcome {
    /// A reply to show as-is (or the empty-reply fallback).
    Normal(String),
    /// Crisis-resource guidance replacing the reply.
    SafetyEscalation(String),
    /// A calm retry-later notice.
    RateLimitNotice(String),
    /// A neutral fallback for unrecognised failures.
    GenericFailure(String),
}

impl ClassifiedOutcome {
    /// The text to display.
    pub fn text(&self) -> &str {
        match self {
            Self::Normal(text)
            | Self::SafetyEscalation(text)
            | Self::RateLimitNotice(text)
            | Self::GenericFailure(text) => text,
        }
    }

    /// Consume the outcome, returning the text to display.
    pub fn into_text(self) -> String {
        match self {
            Self::Normal(text)
            | Self::SafetyEscalation(text)
            | Self::RateLimitNotice(text)
            | Self::GenericFailure(text) => text,
        }
    }

    /// Whether this outcome was produced by a failure.
    pub fn is_failure(&self) -> bool {
        !matches!(self, Self::Normal(_))
    }
}

/// Classify the result of one exchange with the provider.
///
/// A successful reply is never escalated based on its content; escalation is
/// keyed off the provider's own failure signals.
pub fn classify(reply: &Result<Option<String>, TransportError>) -> ClassifiedOutcome {
    match reply {
        Ok(Some(text)) if !text.trim().is_empty() => ClassifiedOutcome::Normal(text.clone()),
        Ok(_) => ClassifiedOutcome::Normal(copy::EMPTY_REPLY.to_string()),
        Err(error) => classify_failure(error),
    }
}

fn classify_failure(error: &TransportError) -> ClassifiedOutcome {
    let signal = error
        .raw_message()
        .and_then(FailureSignal::detect)
        .or(match error {
            TransportError::RateLimited(_) => Some(FailureSignal::RateLimit),
            TransportError::SafetyRejected(_) => Some(FailureSignal::Safety),
            _ => None,
        });

    match signal {
        Some(FailureSignal::RateLimit) => {
            ClassifiedOutcome::RateLimitNotice(copy::RATE_LIMIT_NOTICE.to_string())
        }
        Some(FailureSignal::Safety) => {
            ClassifiedOutcome::SafetyEscalation(copy::SAFETY_ESCALATION.to_string())
        }
        None => ClassifiedOutcome::GenericFailure(copy::GENERIC_FAILURE.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failure(message: &str) -> Result<Option<String>, TransportError> {
        Err(TransportError::classify(&message.into()))
    }

    #[test]
    fn test_detect_is_case_insensitive() {
        assert_eq!(FailureSignal::detect("Quota exceeded"), Some(FailureSignal::RateLimit));
        assert_eq!(FailureSignal::detect("HTTP 429"), Some(FailureSignal::RateLimit));
        assert_eq!(FailureSignal::detect("SAFETY block"), Some(FailureSignal::Safety));
        assert_eq!(FailureSignal::detect("internal error"), None);
    }

    #[test]
    fn test_rate_limit_notice() {
        let outcome = classify(&failure("429 Too Many Requests"));
        assert_eq!(
            outcome,
            ClassifiedOutcome::RateLimitNotice(copy::RATE_LIMIT_NOTICE.to_string())
        );
        assert!(outcome.is_failure());
    }

    #[test]
    fn test_quota_notice() {
        let outcome = classify(&failure("You exceeded your current QUOTA"));
        assert!(matches!(outcome, ClassifiedOutcome::RateLimitNotice(_)));
    }

    #[test]
    fn test_safety_escalation() {
        let outcome = classify(&failure("safety violation"));
        assert_eq!(
            outcome,
            ClassifiedOutcome::SafetyEscalation(copy::SAFETY_ESCALATION.to_string())
        );
    }

    #[test]
    fn test_generic_failure() {
        let outcome = classify(&failure("internal server error"));
        assert_eq!(
            outcome,
            ClassifiedOutcome::GenericFailure(copy::GENERIC_FAILURE.to_string())
        );

        let outcome = classify(&Err(TransportError::Network(None)));
        assert!(matches!(outcome, ClassifiedOutcome::GenericFailure(_)));
    }

    #[test]
    fn test_kind_without_message_still_classified() {
        let outcome = classify(&Err(TransportError::RateLimited(None)));
        assert!(matches!(outcome, ClassifiedOutcome::RateLimitNotice(_)));

        let outcome = classify(&Err(TransportError::SafetyRejected(None)));
        assert!(matches!(outcome, ClassifiedOutcome::SafetyEscalation(_)));
    }

    #[test]
    fn test_empty_reply_fallback() {
        assert_eq!(
            classify(&Ok(None)),
            ClassifiedOutcome::Normal(copy::EMPTY_REPLY.to_string())
        );
        assert_eq!(
            classify(&Ok(Some("  \n".to_string()))),
            ClassifiedOutcome::Normal(copy::EMPTY_REPLY.to_string())
        );
    }

    #[test]
    fn test_successful_reply_passes_through_unmodified() {
        let text = "I want to hurt myself, but let's sit with that.".to_string();
        let outcome = classify(&Ok(Some(text.clone())));
        assert_eq!(outcome, ClassifiedOutcome::Normal(text));
        assert!(!outcome.is_failure());
    }

    #[test]
    fn test_classify_is_pure() {
        let inputs = vec![
            failure("429"),
            failure("safety"),
            failure("boom"),
            Ok(Some("hello".to_string())),
            Ok(None),
        ];

        for input in &inputs {
            assert_eq!(classify(input), classify(input));
        }
    }
}
