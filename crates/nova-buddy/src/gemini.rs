//! Transport implementation using the Gemini API.

use buddy_core::{
    async_trait, BuddyError, ChatRequest, GenerateRequest, ProviderFailure, Role, Transport,
};
use reqwest::Client;
use tracing::{debug, warn};

use crate::api_types::{
    ApiError, Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig,
};
use crate::config::NovaConfig;

/// Finish reasons that mean the provider withheld the reply on policy grounds.
const BLOCKED_FINISH_REASONS: &[&str] = &["SAFETY", "PROHIBITED_CONTENT", "BLOCKLIST", "SPII"];

/// A transport that talks to Gemini's `generateContent` endpoint.
///
/// Holds one HTTP client for the lifetime of the transport. Share it between
/// a session and a summary generator with `Arc`.
pub struct GeminiTransport {
    client: Client,
    config: NovaConfig,
}

impl GeminiTransport {
    /// Create a new GeminiTransport with the given configuration.
    pub fn new(config: NovaConfig) -> Result<Self, BuddyError> {
        if config.api_key.is_empty() {
            return Err(BuddyError::Configuration("API key is empty".to_string()));
        }

        let client = Client::builder()
            .build()
            .map_err(|e| BuddyError::Transport(format!("Failed to create HTTP client: {}", e)))?;

        debug!("GeminiTransport initialized with model: {}", config.model);

        Ok(Self { client, config })
    }

    /// Create a GeminiTransport from environment variables.
    ///
    /// See [`NovaConfig::from_env`] for required environment variables.
    pub fn from_env() -> Result<Self, BuddyError> {
        let config = NovaConfig::from_env()?;
        Self::new(config)
    }

    /// Get the configuration.
    pub fn config(&self) -> &NovaConfig {
        &self.config
    }

    fn generation_config(&self) -> GenerationConfig {
        GenerationConfig {
            temperature: self.config.temperature,
            max_output_tokens: self.config.max_output_tokens,
        }
    }

    /// Make a `generateContent` request.
    async fn generate_content(
        &self,
        request: GenerateContentRequest,
    ) -> Result<Option<String>, ProviderFailure> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.api_url.trim_end_matches('/'),
            self.config.model
        );

        debug!("Sending request to Gemini API: {:?}", request);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                let message = format!("Failed to send request: {}", e);
                if e.is_connect() || e.is_timeout() {
                    ProviderFailure::connection(message)
                } else {
                    ProviderFailure::new(message)
                }
            })?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();

            let message = match serde_json::from_str::<ApiError>(&error_text) {
                Ok(api_error) => api_error.error.message,
                Err(_) => error_text,
            };

            return Err(ProviderFailure::with_status(
                status.as_u16(),
                format!("API error ({}): {}", status.as_u16(), message),
            ));
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| ProviderFailure::new(format!("Failed to parse response: {}", e)))?;

        if let Some(usage) = &body.usage_metadata {
            debug!(
                "Token usage - prompt: {}, completion: {}, total: {}",
                usage.prompt_token_count, usage.candidates_token_count, usage.total_token_count
            );
        }

        extract_text(body)
    }
}

/// Pull the reply text out of a successful response.
///
/// A prompt or candidate withheld by the provider's safety filter becomes a
/// failure mentioning "safety" so it classifies as a safety rejection.
fn extract_text(body: GenerateContentResponse) -> Result<Option<String>, ProviderFailure> {
    if let Some(reason) = body
        .prompt_feedback
        .as_ref()
        .and_then(|feedback| feedback.block_reason.as_deref())
    {
        warn!(reason, "Prompt blocked by provider");
        return Err(ProviderFailure::new(format!(
            "Prompt blocked by provider safety filter ({})",
            reason
        )));
    }

    let Some(candidate) = body.candidates.into_iter().next() else {
        return Ok(None);
    };

    if let Some(reason) = candidate
        .finish_reason
        .as_deref()
        .filter(|reason| BLOCKED_FINISH_REASONS.contains(reason))
    {
        warn!(reason, "Reply blocked by provider");
        return Err(ProviderFailure::new(format!(
            "Reply blocked by provider safety filter ({})",
            reason
        )));
    }

    let text = candidate
        .content
        .map(|content| content.joined_text())
        .filter(|text| !text.is_empty());

    Ok(text)
}

#[async_trait]
impl Transport for GeminiTransport {
    async fn chat(&self, request: &ChatRequest) -> Result<Option<String>, ProviderFailure> {
        let mut contents: Vec<Content> = request
            .history
            .iter()
            .map(|turn| Content::with_role(turn.role().as_str(), turn.text()))
            .collect();
        contents.push(Content::with_role(Role::User.as_str(), request.message.as_str()));

        self.generate_content(GenerateContentRequest {
            system_instruction: Some(Content::instruction(request.system_instruction.as_str())),
            contents,
            generation_config: self.generation_config(),
        })
        .await
    }

    async fn generate(&self, request: &GenerateRequest) -> Result<Option<String>, ProviderFailure> {
        self.generate_content(GenerateContentRequest {
            system_instruction: request
                .system_instruction
                .as_deref()
                .map(Content::instruction),
            contents: vec![Content::with_role(Role::User.as_str(), request.prompt.as_str())],
            generation_config: self.generation_config(),
        })
        .await
    }

    fn name(&self) -> &str {
        "GeminiTransport"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use buddy_core::TransportError;

    fn parse(body: &str) -> GenerateContentResponse {
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn test_new_requires_api_key() {
        let result = GeminiTransport::new(NovaConfig::default());
        assert!(matches!(result, Err(BuddyError::Configuration(_))));
    }

    #[test]
    fn test_transport_name() {
        let config = NovaConfig::builder().api_key("test-key").build();
        let transport = GeminiTransport::new(config).unwrap();
        assert_eq!(transport.name(), "GeminiTransport");
        assert_eq!(transport.config().model, "gemini-3-flash-preview");
    }

    #[test]
    fn test_extract_text() {
        let body = parse(
            r#"{"candidates": [{"content": {"parts": [{"text": "I'm listening."}]}, "finishReason": "STOP"}]}"#,
        );
        assert_eq!(extract_text(body), Ok(Some("I'm listening.".to_string())));
    }

    #[test]
    fn test_extract_missing_text() {
        assert_eq!(extract_text(parse(r#"{"candidates": []}"#)), Ok(None));
        assert_eq!(
            extract_text(parse(r#"{"candidates": [{"finishReason": "STOP"}]}"#)),
            Ok(None)
        );
    }

    #[test]
    fn test_blocked_prompt_classifies_as_safety() {
        let failure = extract_text(parse(r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#))
            .unwrap_err();
        assert!(matches!(
            TransportError::classify(&failure),
            TransportError::SafetyRejected(_)
        ));
    }

    #[test]
    fn test_blocked_candidate_classifies_as_safety() {
        let failure = extract_text(parse(
            r#"{"candidates": [{"finishReason": "PROHIBITED_CONTENT"}]}"#,
        ))
        .unwrap_err();
        assert!(matches!(
            TransportError::classify(&failure),
            TransportError::SafetyRejected(_)
        ));
    }

    #[tokio::test]
    async fn test_unreachable_provider_is_network_failure() {
        let config = NovaConfig::builder()
            .api_key("test-key")
            .api_url("http://127.0.0.1:9")
            .build();
        let transport = GeminiTransport::new(config).unwrap();

        let failure = transport
            .generate(&GenerateRequest::new("hello"))
            .await
            .unwrap_err();
        assert!(failure.connection);
        assert!(matches!(
            TransportError::classify(&failure),
            TransportError::Network(_)
        ));
    }
}
