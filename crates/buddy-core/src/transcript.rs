//! Append-only conversation transcript.
//!
//! User-initiated replies and proactive check-ins may land concurrently, so
//! appends are serialised behind a lock and each turn is stamped inside it.
//! Timestamps never go backwards even if the wall clock does.

use chrono::Utc;
use tokio::sync::RwLock;

use crate::turn::{ConversationTurn, Role};

/// The ordered turns of one chat screen.
///
/// # Example
///
/// ```rust
/// use buddy_core::{Role, Transcript};
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() {
///     let transcript = Transcript::new();
///
///     transcript.append(Role::Model, "I'm here.").await;
///     transcript.append(Role::User, "Hi").await;
///
///     let turns = transcript.snapshot().await;
///     assert_eq!(turns.len(), 2);
/// }
/// ```
#[derive(Debug, Default)]
pub struct Transcript {
    turns: RwLock<Vec<ConversationTurn>>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a turn stamped now, clamped to the last turn's timestamp.
    pub async fn append(&self, role: Role, text: impl Into<String>) -> ConversationTurn {
        let mut turns = self.turns.write().await;

        let now = Utc::now();
        let timestamp = match turns.last() {
            Some(last) if last.timestamp() > now => last.timestamp(),
            _ => now,
        };

        let turn = ConversationTurn::new(role, text, timestamp);
        turns.push(turn.clone());
        turn
    }

    /// Append `text` as the first turn if the transcript is still empty.
    pub async fn append_if_empty(&self, role: Role, text: impl Into<String>) -> Option<ConversationTurn> {
        let mut turns = self.turns.write().await;
        if !turns.is_empty() {
            return None;
        }

        let turn = ConversationTurn::new(role, text, Utc::now());
        turns.push(turn.clone());
        Some(turn)
    }

    /// Copy of all turns, oldest first.
    pub async fn snapshot(&self) -> Vec<ConversationTurn> {
        self.turns.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.turns.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.turns.read().await.is_empty()
    }
}
