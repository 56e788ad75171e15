//! User-visible copy.
//!
//! Failure paths must never show raw provider text to the user; every one of
//! them resolves to one of these strings.

/// Shown when the provider is rate limiting us.
pub const RATE_LIMIT_NOTICE: &str = "The tide is currently too high for our connection (Rate limit exceeded). Please take a few deep breaths and try again in a moment.";

/// Shown when the provider's safety filter fired.
pub const SAFETY_ESCALATION: &str = "I'm concerned about what you're saying. Please reach out to a professional or use the crisis resources in the header.";

/// Shown for any other failure.
pub const GENERIC_FAILURE: &str = "The signal is a bit murky. Let's refocus.";

/// Shown when the provider succeeded but produced no text.
pub const EMPTY_REPLY: &str = "I'm here, but I'm having trouble finding the words. Can we try again?";

/// First model turn of a fresh chat.
pub const OPENING_GREETING: &str =
    "I'm here. Below the surface, it's quiet. How are you navigating your day?";

/// Proactive check-in appended when a stress spike is detected.
pub const STRESS_CHECK_IN: &str =
    "I noticed a slight ripple in your signals. Take a breath with me. How are you feeling right now?";

/// Returned by the Summary Generator for an empty journal.
pub const NO_ENTRIES: &str = "No entries to summarize.";

/// Returned by the Summary Generator when the provider produced no text.
pub const SUMMARY_UNAVAILABLE: &str = "Could not generate summary.";

/// Returned by the Summary Generator when rate limited.
pub const SUMMARY_RATE_LIMITED: &str = "The system is currently overwhelmed with requests. Please try summarizing again in a few minutes.";

/// A crisis line the escalation flow can point to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrisisResource {
    pub title: &'static str,
    pub action: &'static str,
    pub link: &'static str,
}

/// Crisis lines behind [`SAFETY_ESCALATION`].
pub const CRISIS_RESOURCES: &[CrisisResource] = &[
    CrisisResource {
        title: "988 Suicide & Crisis Lifeline",
        action: "Call or Text 988",
        link: "tel:988",
    },
    CrisisResource {
        title: "Crisis Text Line",
        action: "Text HOME to 741741",
        link: "sms:741741",
    },
];
