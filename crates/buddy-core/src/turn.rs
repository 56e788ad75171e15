//! Conversation turns.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who authored a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

impl Role {
    /// Wire name used by chat providers.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Model => "model",
        }
    }
}

/// One message in a conversation transcript.
///
/// Turns are immutable once created; the ordered sequence in a
/// [`Transcript`](crate::Transcript) forms the session history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    role: Role,
    text: String,
    timestamp: DateTime<Utc>,
}

impl ConversationTurn {
    /// Create a turn with an explicit timestamp.
    pub fn new(role: Role, text: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            role,
            text: text.into(),
            timestamp,
        }
    }

    /// Create a user turn stamped now.
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, text, Utc::now())
    }

    /// Create a model turn stamped now.
    pub fn model(text: impl Into<String>) -> Self {
        Self::new(Role::Model, text, Utc::now())
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_wire_names() {
        assert_eq!(Role::User.as_str(), "user");
        assert_eq!(Role::Model.as_str(), "model");
        assert_eq!(serde_json::to_string(&Role::Model).unwrap(), "\"model\"");
    }

    #[test]
    fn test_constructors() {
        let turn = ConversationTurn::user("hello");
        assert_eq!(turn.role(), Role::User);
        assert_eq!(turn.text(), "hello");

        let turn = ConversationTurn::model("hi");
        assert_eq!(turn.role(), Role::Model);
    }
}
