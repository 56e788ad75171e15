//! Configuration for the Nova companion.

use std::env;
use std::time::Duration;

use buddy_core::{AvatarTheme, BuddyError, CheckInFrequency, Tone, UserSettings};

/// Default provider base URL.
pub const DEFAULT_API_URL: &str = "https://generativelanguage.googleapis.com";

/// Default model.
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

/// Default stress monitor period.
pub const DEFAULT_STRESS_INTERVAL: Duration = Duration::from_secs(10);

/// Configuration for the Gemini transport and the companion.
#[derive(Debug, Clone)]
pub struct NovaConfig {
    /// Provider base URL.
    pub api_url: String,

    /// API key for authentication.
    pub api_key: String,

    /// Model name to use.
    pub model: String,

    /// Temperature for generation.
    pub temperature: Option<f32>,

    /// Maximum output tokens.
    pub max_output_tokens: Option<u32>,

    /// User settings the session instruction is derived from.
    pub settings: UserSettings,

    /// Stress monitor period.
    pub stress_interval: Duration,
}

impl Default for NovaConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_key: String::new(),
            model: DEFAULT_MODEL.to_string(),
            temperature: None,
            max_output_tokens: None,
            settings: UserSettings::default(),
            stress_interval: DEFAULT_STRESS_INTERVAL,
        }
    }
}

impl NovaConfig {
    /// Create configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `NOVA_API_KEY` - API key for authentication
    ///
    /// Optional environment variables:
    /// - `NOVA_API_URL` - API URL (default: https://generativelanguage.googleapis.com)
    /// - `NOVA_MODEL` - Model name (default: gemini-3-flash-preview)
    /// - `NOVA_TEMPERATURE` - Temperature (default: provider default)
    /// - `NOVA_MAX_OUTPUT_TOKENS` - Max output tokens (default: provider default)
    /// - `NOVA_TONE` - Soft, Direct or Minimal (default: Direct)
    /// - `NOVA_CHECK_IN_FREQUENCY` - High, Medium or Low (default: Medium)
    /// - `NOVA_AVATAR_THEME` - Ocean, Forest or Twilight (default: Ocean)
    /// - `NOVA_STRESS_INTERVAL_SECS` - Stress monitor period (default: 10)
    pub fn from_env() -> Result<Self, BuddyError> {
        let api_key = env::var("NOVA_API_KEY")
            .map_err(|_| BuddyError::Configuration("NOVA_API_KEY not set".to_string()))?;

        let api_url = env::var("NOVA_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let model = env::var("NOVA_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        let temperature = env::var("NOVA_TEMPERATURE")
            .ok()
            .and_then(|v| v.parse().ok());

        let max_output_tokens = env::var("NOVA_MAX_OUTPUT_TOKENS")
            .ok()
            .and_then(|v| v.parse().ok());

        let settings = UserSettings {
            tone: parse_var::<Tone>("NOVA_TONE"),
            check_in_frequency: parse_var::<CheckInFrequency>("NOVA_CHECK_IN_FREQUENCY"),
            avatar_theme: parse_var::<AvatarTheme>("NOVA_AVATAR_THEME"),
        };

        let stress_interval = env::var("NOVA_STRESS_INTERVAL_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_STRESS_INTERVAL);

        Ok(Self {
            api_url,
            api_key,
            model,
            temperature,
            max_output_tokens,
            settings,
            stress_interval,
        })
    }

    /// Create a new config builder.
    pub fn builder() -> NovaConfigBuilder {
        NovaConfigBuilder::default()
    }
}

fn parse_var<T>(name: &str) -> T
where
    T: std::str::FromStr + Default,
{
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or_default()
}

/// Builder for NovaConfig.
#[derive(Debug, Default)]
pub struct NovaConfigBuilder {
    config: NovaConfig,
}

impl NovaConfigBuilder {
    /// Set the API key.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = key.into();
        self
    }

    /// Set the API URL.
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.config.api_url = url.into();
        self
    }

    /// Set the model name.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    /// Set the temperature.
    pub fn temperature(mut self, temp: f32) -> Self {
        self.config.temperature = Some(temp);
        self
    }

    /// Set the max output tokens.
    pub fn max_output_tokens(mut self, tokens: u32) -> Self {
        self.config.max_output_tokens = Some(tokens);
        self
    }

    /// Set the user settings.
    pub fn settings(mut self, settings: UserSettings) -> Self {
        self.config.settings = settings;
        self
    }

    /// Set the tone only.
    pub fn tone(mut self, tone: Tone) -> Self {
        self.config.settings.tone = tone;
        self
    }

    /// Set the stress monitor period.
    pub fn stress_interval(mut self, interval: Duration) -> Self {
        self.config.stress_interval = interval;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> NovaConfig {
        self.config
    }
}
