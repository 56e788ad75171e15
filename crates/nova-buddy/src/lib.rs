//! Nova, a calm wellness companion.
//!
//! This crate wires the provider-independent pieces of `buddy-core` to the
//! Gemini API and to the chat screen.
//!
//! # Features
//!
//! - Gemini `generateContent` transport with safety-block detection
//! - Conversation session with rate-limit retries and calm fallbacks
//! - Therapist and referral summaries of the mood journal
//! - Background stress monitor that triggers proactive check-ins
//! - Configurable via environment variables
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use nova_buddy::{BuddyChat, ConversationSession, GeminiTransport, StressMonitor};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let transport = GeminiTransport::from_env()?;
//!     let settings = transport.config().settings.clone();
//!     let interval = transport.config().stress_interval;
//!
//!     let session = ConversationSession::new(Arc::new(transport), settings);
//!     let mut chat = BuddyChat::new(session);
//!     chat.open().await;
//!     chat.watch_stress(StressMonitor::new().with_interval(interval));
//!
//!     if let Some(reply) = chat.submit("Long day.").await {
//!         println!("{}", reply.text());
//!     }
//!     Ok(())
//! }
//! ```

mod api_types;
mod chat;
mod config;
mod gemini;
mod monitor;
mod session;
mod summary;
mod task;

pub use chat::BuddyChat;
pub use config::{NovaConfig, NovaConfigBuilder};
pub use gemini::GeminiTransport;
pub use monitor::{RandomStressSource, StressMonitor, StressSource};
pub use session::ConversationSession;
pub use summary::SummaryGenerator;
pub use task::TaskHandle;

// Re-export buddy-core types for convenience
pub use buddy_core::{
    async_trait, copy, BuddyError, ClassifiedOutcome, ConversationTurn, MoodCategory, MoodEntry,
    RetryEvent, RetryObserver, RetryPolicy, RetryScheduler, Role, Screening, Severity,
    StressSignal, Tone, Transcript, Transport, TransportError, UserSettings,
};
