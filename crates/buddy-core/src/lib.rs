//! Core trait and types for the Nova wellness companion.
//!
//! This crate provides the provider-independent pieces of the companion:
//!
//! - [`Transport`] - The trait every generative-language backend implements
//! - [`RetryScheduler`] / [`RetryPolicy`] - Bounded exponential backoff on rate limits
//! - [`classify`] / [`ClassifiedOutcome`] - Safety classification of replies and failures
//! - [`TransportError`] / [`ProviderFailure`] - Classified and raw failure types
//! - [`Transcript`] - Append-only, timestamp-monotonic conversation transcript
//! - [`MoodEntry`], [`UserSettings`], [`StressSignal`] - The data model
//!
//! # Example
//!
//! ```rust
//! use buddy_core::{async_trait, ChatRequest, GenerateRequest, ProviderFailure, Transport};
//!
//! struct Quiet;
//!
//! #[async_trait]
//! impl Transport for Quiet {
//!     async fn chat(&self, _request: &ChatRequest) -> Result<Option<String>, ProviderFailure> {
//!         Ok(Some("I'm here.".to_string()))
//!     }
//!
//!     async fn generate(&self, _request: &GenerateRequest) -> Result<Option<String>, ProviderFailure> {
//!         Ok(None)
//!     }
//!
//!     fn name(&self) -> &str {
//!         "Quiet"
//!     }
//! }
//! ```

mod classifier;
pub mod copy;
mod error;
mod mood;
mod prompt;
mod retry;
mod screening;
mod settings;
mod stress;
mod transcript;
mod transport;
mod turn;

pub use classifier::{classify, ClassifiedOutcome, FailureSignal};
pub use error::{BuddyError, ProviderFailure, TransportError};
pub use mood::{mood_score, MoodCategory, MoodEntry};
pub use prompt::{
    hash_prompt, referral_prompt, summary_prompt, system_instruction, SUMMARY_INSTRUCTION,
};
pub use retry::{RetryEvent, RetryObserver, RetryPolicy, RetryScheduler};
pub use screening::{Screening, ScreeningError, Severity, SCREENING_QUESTIONS};
pub use settings::{AvatarTheme, CheckInFrequency, ParseSettingError, Tone, UserSettings};
pub use stress::StressSignal;
pub use transcript::Transcript;
pub use transport::{ChatRequest, GenerateRequest, Transport};
pub use turn::{ConversationTurn, Role};

// Re-export async_trait for convenience
pub use async_trait::async_trait;
