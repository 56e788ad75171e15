//! User settings read by the Conversation Session.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A settings value that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {field}: {value:?}")]
pub struct ParseSettingError {
    pub field: &'static str,
    pub value: String,
}

/// Conversational tone interpolated into the system instruction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tone {
    Soft,
    #[default]
    Direct,
    Minimal,
}

/// How often the companion proactively checks in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckInFrequency {
    High,
    #[default]
    Medium,
    Low,
}

/// Avatar colour theme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AvatarTheme {
    #[default]
    Ocean,
    Forest,
    Twilight,
}

/// Per-user configuration. The core only reads it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSettings {
    pub tone: Tone,
    pub check_in_frequency: CheckInFrequency,
    pub avatar_theme: AvatarTheme,
}

impl UserSettings {
    /// Settings with the given tone and defaults elsewhere.
    pub fn with_tone(tone: Tone) -> Self {
        Self {
            tone,
            ..Self::default()
        }
    }
}

macro_rules! named_setting {
    ($ty:ident, $field:literal, [$($variant:ident => $name:literal),+ $(,)?]) => {
        impl $ty {
            /// Display name.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($ty::$variant => $name,)+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = ParseSettingError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let trimmed = s.trim();
                $(
                    if trimmed.eq_ignore_ascii_case($name) {
                        return Ok($ty::$variant);
                    }
                )+
                Err(ParseSettingError {
                    field: $field,
                    value: s.to_string(),
                })
            }
        }
    };
}

named_setting!(Tone, "tone", [Soft => "Soft", Direct => "Direct", Minimal => "Minimal"]);
named_setting!(CheckInFrequency, "check-in frequency", [High => "High", Medium => "Medium", Low => "Low"]);
named_setting!(AvatarTheme, "avatar theme", [Ocean => "Ocean", Forest => "Forest", Twilight => "Twilight"]);
