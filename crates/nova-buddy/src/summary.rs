//! The Summary Generator.
//!
//! One-shot generation over journal entries. Entries are read, never kept.

use std::sync::Arc;

use buddy_core::{
    copy, referral_prompt, summary_prompt, GenerateRequest, MoodEntry, RetryPolicy,
    RetryScheduler, Transport, TransportError, SUMMARY_INSTRUCTION,
};
use tracing::{debug, error, warn};

/// Turns mood-journal entries into prose for a human professional.
pub struct SummaryGenerator {
    transport: Arc<dyn Transport>,
    scheduler: RetryScheduler,
}

impl SummaryGenerator {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            scheduler: RetryScheduler::new(),
        }
    }

    /// Use a custom scheduler (observer, shutdown signal).
    pub fn with_scheduler(mut self, scheduler: RetryScheduler) -> Self {
        self.scheduler = scheduler;
        self
    }

    /// Summarize entries for the user's therapist.
    ///
    /// An empty list short-circuits without contacting the provider. A rate
    /// limit that outlasts the retries becomes an explanatory string; any
    /// other failure is returned.
    pub async fn summarize(&self, entries: &[MoodEntry]) -> Result<String, TransportError> {
        if entries.is_empty() {
            return Ok(copy::NO_ENTRIES.to_string());
        }

        let request = GenerateRequest::new(summary_prompt(entries)).with_instruction(SUMMARY_INSTRUCTION);
        debug!(entries = entries.len(), "Requesting therapist summary");

        let result = self
            .scheduler
            .execute(&RetryPolicy::summary(), || self.transport.generate(&request))
            .await;

        match result {
            Ok(Some(text)) if !text.trim().is_empty() => Ok(text),
            Ok(_) => Ok(copy::SUMMARY_UNAVAILABLE.to_string()),
            Err(TransportError::RateLimited(message)) => {
                warn!(message = ?message, "Summary rate limited");
                Ok(copy::SUMMARY_RATE_LIMITED.to_string())
            }
            Err(err) => {
                error!(error = %err, "Summary generation failed");
                Err(err)
            }
        }
    }

    /// Two-sentence summary of emotional state and needs for a referral.
    ///
    /// Best effort: any failure yields an empty string.
    pub async fn referral_summary(&self, entries: &[MoodEntry]) -> String {
        let prompt = match referral_prompt(entries) {
            Ok(prompt) => prompt,
            Err(err) => {
                error!(error = %err, "Failed to encode entries for referral summary");
                return String::new();
            }
        };
        let request = GenerateRequest::new(prompt);

        match self
            .scheduler
            .execute(&RetryPolicy::conversation(), || self.transport.generate(&request))
            .await
        {
            Ok(text) => text.unwrap_or_default(),
            Err(err) => {
                error!(error = %err, "Referral summary failed");
                String::new()
            }
        }
    }
}
