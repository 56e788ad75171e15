//! The transport boundary to a generative-language provider.

use async_trait::async_trait;

use crate::error::ProviderFailure;
use crate::turn::ConversationTurn;

/// A stateful chat exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatRequest {
    /// System instruction fixed for the session.
    pub system_instruction: String,
    /// Prior transcript, oldest first.
    pub history: Vec<ConversationTurn>,
    /// The new user utterance.
    pub message: String,
}

impl ChatRequest {
    pub fn new(
        system_instruction: impl Into<String>,
        history: Vec<ConversationTurn>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            system_instruction: system_instruction.into(),
            history,
            message: message.into(),
        }
    }
}

/// A stateless one-shot generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateRequest {
    pub prompt: String,
    pub system_instruction: Option<String>,
}

impl GenerateRequest {
    /// A prompt with no system instruction.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            system_instruction: None,
        }
    }

    /// Attach a system instruction.
    pub fn with_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = Some(instruction.into());
        self
    }
}

/// A generative-language provider.
///
/// Both call shapes return the generated text, `None` when the provider
/// succeeded without producing any, or a raw [`ProviderFailure`] that the
/// Retry Scheduler classifies. This trait is object-safe and can be used
/// with `Arc<dyn Transport>`.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send one utterance in the context of a chat.
    async fn chat(&self, request: &ChatRequest) -> Result<Option<String>, ProviderFailure>;

    /// Generate text from a single prompt.
    async fn generate(&self, request: &GenerateRequest) -> Result<Option<String>, ProviderFailure>;

    /// Get a human-readable name for this transport.
    fn name(&self) -> &str;
}
