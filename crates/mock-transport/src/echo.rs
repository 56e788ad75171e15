//! Echo transport - echoes the utterance or prompt back.

use buddy_core::{async_trait, ChatRequest, GenerateRequest, ProviderFailure, Transport};

/// A transport that echoes its input back as the generated text.
///
/// Useful for testing the conversation flow without any provider.
#[derive(Debug, Clone, Default)]
pub struct EchoTransport {
    /// Optional prefix to add before the echo.
    prefix: Option<String>,
}

impl EchoTransport {
    /// Create a new EchoTransport with no prefix.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new EchoTransport with a custom prefix.
    ///
    /// # Example
    ///
    /// ```rust
    /// use mock_transport::EchoTransport;
    ///
    /// let transport = EchoTransport::with_prefix("Nova: ");
    /// // Will reply with "Nova: <utterance>"
    /// ```
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
        }
    }

    fn echo(&self, text: &str) -> String {
        match &self.prefix {
            Some(prefix) => format!("{}{}", prefix, text),
            None => text.to_string(),
        }
    }
}

#[async_trait]
impl Transport for EchoTransport {
    async fn chat(&self, request: &ChatRequest) -> Result<Option<String>, ProviderFailure> {
        Ok(Some(self.echo(&request.message)))
    }

    async fn generate(&self, request: &GenerateRequest) -> Result<Option<String>, ProviderFailure> {
        Ok(Some(self.echo(&request.prompt)))
    }

    fn name(&self) -> &str {
        "EchoTransport"
    }
}
