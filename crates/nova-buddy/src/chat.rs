//! The chat screen's state: one session, one transcript, one stress monitor.

use std::sync::{Arc, Weak};

use buddy_core::{copy, ConversationTurn, Role, Transcript};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::monitor::{StressMonitor, StressSource};
use crate::session::ConversationSession;
use crate::task::TaskHandle;

/// Drives a [`ConversationSession`] on behalf of a chat UI.
///
/// Owns the transcript that user replies and stress check-ins both append
/// to. Only one utterance is in flight at a time; a submission made while
/// another is pending is refused. Dropping the chat stops the stress monitor
/// and any pending retry backoff.
pub struct BuddyChat {
    session: ConversationSession,
    transcript: Arc<Transcript>,
    in_flight: Mutex<()>,
    monitor: Option<TaskHandle>,
}

impl BuddyChat {
    pub fn new(session: ConversationSession) -> Self {
        Self {
            session,
            transcript: Arc::new(Transcript::new()),
            in_flight: Mutex::new(()),
            monitor: None,
        }
    }

    /// Greet the user if nothing has been said yet.
    pub async fn open(&self) {
        self.transcript
            .append_if_empty(Role::Model, copy::OPENING_GREETING)
            .await;
    }

    /// Submit user text and wait for Nova's reply.
    ///
    /// Returns the appended reply turn, or `None` when the text is blank or
    /// another submission is still pending. Failures the session cannot
    /// phrase are shown as the generic fallback.
    pub async fn submit(&self, text: &str) -> Option<ConversationTurn> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        let Ok(_guard) = self.in_flight.try_lock() else {
            debug!("Submission refused, reply still pending");
            return None;
        };

        let prior = self.transcript.snapshot().await;
        self.transcript.append(Role::User, text).await;

        let reply = match self.session.send(text, &prior).await {
            Ok(reply) => reply,
            Err(err) => {
                warn!(error = %err, "Showing generic fallback");
                copy::GENERIC_FAILURE.to_string()
            }
        };

        Some(self.transcript.append(Role::Model, reply).await)
    }

    /// Start proactive check-ins driven by `monitor`.
    ///
    /// Replaces any monitor already running.
    pub fn watch_stress<S: StressSource>(&mut self, monitor: StressMonitor<S>) {
        let transcript = Arc::downgrade(&self.transcript);

        let handle = monitor.spawn(move |_signal| {
            let transcript = transcript.clone();
            async move {
                append_check_in(&transcript).await;
            }
        });

        self.monitor = Some(handle);
    }

    pub fn is_watching_stress(&self) -> bool {
        self.monitor.as_ref().is_some_and(|handle| !handle.is_finished())
    }

    pub fn transcript(&self) -> &Arc<Transcript> {
        &self.transcript
    }

    pub fn session(&self) -> &ConversationSession {
        &self.session
    }

    /// Stop the stress monitor and any pending backoff.
    pub fn close(&mut self) {
        if let Some(mut handle) = self.monitor.take() {
            handle.cancel();
        }
        self.session.close();
    }
}

/// Append the stress check-in. A no-op once the chat is gone.
async fn append_check_in(transcript: &Weak<Transcript>) -> Option<ConversationTurn> {
    let Some(transcript) = transcript.upgrade() else {
        debug!("Stress check-in dropped, chat closed");
        return None;
    };
    Some(transcript.append(Role::Model, copy::STRESS_CHECK_IN).await)
}

impl Drop for BuddyChat {
    fn drop(&mut self) {
        self.close();
    }
}
