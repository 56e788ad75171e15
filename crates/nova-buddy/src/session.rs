//! The Conversation Session.

use std::sync::Arc;

use buddy_core::{
    classify, hash_prompt, system_instruction, ChatRequest, ClassifiedOutcome, ConversationTurn,
    RetryObserver, RetryPolicy, RetryScheduler, Transport, TransportError, UserSettings,
};
use tokio::sync::watch;
use tracing::{debug, error, info};

/// Exchanges user utterances for generated replies.
///
/// The system instruction is fixed at construction from the user's settings.
/// The session assumes at most one `send` in flight; independent sessions
/// share nothing and need no coordination. Closing or dropping the session
/// stops any pending backoff.
pub struct ConversationSession {
    transport: Arc<dyn Transport>,
    settings: UserSettings,
    system_instruction: String,
    system_instruction_hash: String,
    policy: RetryPolicy,
    scheduler: RetryScheduler,
    shutdown: watch::Sender<bool>,
}

impl ConversationSession {
    /// Create a session over the given transport.
    pub fn new(transport: Arc<dyn Transport>, settings: UserSettings) -> Self {
        let system_instruction = system_instruction(&settings);
        let system_instruction_hash = hash_prompt(&system_instruction);
        let (shutdown, shutdown_rx) = watch::channel(false);

        info!(
            transport = transport.name(),
            tone = %settings.tone,
            "Conversation session created, system instruction fingerprint: {}",
            system_instruction_hash
        );

        Self {
            transport,
            settings,
            system_instruction,
            system_instruction_hash,
            policy: RetryPolicy::conversation(),
            scheduler: RetryScheduler::new().with_shutdown(shutdown_rx),
            shutdown,
        }
    }

    /// Install an observer for retry events.
    pub fn with_retry_observer(mut self, observer: RetryObserver) -> Self {
        self.scheduler = self.scheduler.with_observer(observer);
        self
    }

    pub fn settings(&self) -> &UserSettings {
        &self.settings
    }

    /// The fixed system instruction sent with every exchange.
    pub fn system_instruction(&self) -> &str {
        &self.system_instruction
    }

    /// SHA-256 fingerprint of the system instruction.
    pub fn system_instruction_hash(&self) -> &str {
        &self.system_instruction_hash
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Send one utterance and return the text to display.
    ///
    /// Rate limits are retried and, if they persist, become a calm notice;
    /// safety rejections become crisis guidance. Any other failure is
    /// returned for the caller to replace with a generic fallback.
    pub async fn send(
        &self,
        utterance: &str,
        prior_turns: &[ConversationTurn],
    ) -> Result<String, TransportError> {
        let request = ChatRequest::new(
            self.system_instruction.clone(),
            prior_turns.to_vec(),
            utterance,
        );

        debug!(history = prior_turns.len(), "Sending utterance");

        let reply = self
            .scheduler
            .execute(&self.policy, || self.transport.chat(&request))
            .await;

        let outcome = classify(&reply);
        match (reply, outcome) {
            (Err(error), ClassifiedOutcome::GenericFailure(_)) => {
                error!(error = %error, "Nova exchange failed");
                Err(error)
            }
            (Err(error), outcome) => {
                error!(error = %error, "Nova exchange failed, showing fallback");
                Ok(outcome.into_text())
            }
            (Ok(_), outcome) => Ok(outcome.into_text()),
        }
    }

    /// Stop retrying. Pending and future backoffs end immediately.
    pub fn close(&self) {
        self.shutdown.send_replace(true);
    }

    pub fn is_closed(&self) -> bool {
        *self.shutdown.borrow()
    }
}
