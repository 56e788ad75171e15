//! Mock transport implementations for testing the Nova companion.
//!
//! This crate provides substitutes for a real provider:
//! - `ScriptedTransport` - Replays a queue of replies and failures, recording every call
//! - `EchoTransport` - Echoes the utterance or prompt back
//! - `DelayedTransport` - Wraps another transport with artificial latency
//!
//! For a real provider, use `GeminiTransport` from the `nova-buddy` crate.
//!
//! # Example
//!
//! ```rust
//! use mock_transport::{ChatRequest, ScriptedTransport, Transport};
//!
//! #[tokio::main]
//! async fn main() {
//!     let transport = ScriptedTransport::new()
//!         .then_fail("429 Too Many Requests")
//!         .then_reply("I'm listening.");
//!
//!     let request = ChatRequest::new("You are Nova.", Vec::new(), "Hello");
//!     assert!(transport.chat(&request).await.is_err());
//!     assert_eq!(transport.chat(&request).await.unwrap().as_deref(), Some("I'm listening."));
//!     assert_eq!(transport.calls(), 2);
//! }
//! ```

mod delayed;
mod echo;
mod scripted;

// Re-export buddy-core types for convenience
pub use buddy_core::{
    async_trait, ChatRequest, GenerateRequest, ProviderFailure, Transport,
};

pub use delayed::DelayedTransport;
pub use echo::EchoTransport;
pub use scripted::ScriptedTransport;
