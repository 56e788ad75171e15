//! Mood journal entries.

use std::fmt;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Mood categories offered by the journal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoodCategory {
    Great,
    Good,
    Neutral,
    Low,
    Distressed,
}

impl MoodCategory {
    /// All categories, best first.
    pub const ALL: [MoodCategory; 5] = [
        MoodCategory::Great,
        MoodCategory::Good,
        MoodCategory::Neutral,
        MoodCategory::Low,
        MoodCategory::Distressed,
    ];

    /// Lowercase label used in prompts and storage.
    pub fn label(&self) -> &'static str {
        match self {
            MoodCategory::Great => "great",
            MoodCategory::Good => "good",
            MoodCategory::Neutral => "neutral",
            MoodCategory::Low => "low",
            MoodCategory::Distressed => "distressed",
        }
    }
}

impl fmt::Display for MoodCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Numeric score (1-10) for a mood category.
pub fn mood_score(mood: MoodCategory) -> u8 {
    match mood {
        MoodCategory::Great => 10,
        MoodCategory::Good => 8,
        MoodCategory::Neutral => 5,
        MoodCategory::Low => 3,
        MoodCategory::Distressed => 1,
    }
}

/// A journal entry.
///
/// Created by the journal UI and persisted externally. The score is always
/// derived from the category, including when loaded from storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredMoodEntry")]
pub struct MoodEntry {
    pub id: String,
    pub date: NaiveDate,
    mood: MoodCategory,
    score: u8,
    pub note: String,
}

/// Wire form of a [`MoodEntry`]. A stored score is ignored.
#[derive(Deserialize)]
struct StoredMoodEntry {
    id: String,
    date: NaiveDate,
    mood: MoodCategory,
    note: String,
}

impl From<StoredMoodEntry> for MoodEntry {
    fn from(stored: StoredMoodEntry) -> Self {
        Self {
            id: stored.id,
            date: stored.date,
            mood: stored.mood,
            score: mood_score(stored.mood),
            note: stored.note,
        }
    }
}

impl MoodEntry {
    /// Create an entry dated today with a fresh id.
    pub fn new(mood: MoodCategory, note: impl Into<String>) -> Self {
        Self::on(Local::now().date_naive(), mood, note)
    }

    /// Create an entry for a specific date with a fresh id.
    pub fn on(date: NaiveDate, mood: MoodCategory, note: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            date,
            mood,
            score: mood_score(mood),
            note: note.into(),
        }
    }

    pub fn mood(&self) -> MoodCategory {
        self.mood
    }

    pub fn score(&self) -> u8 {
        self.score
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mood_score_table() {
        assert_eq!(mood_score(MoodCategory::Great), 10);
        assert_eq!(mood_score(MoodCategory::Good), 8);
        assert_eq!(mood_score(MoodCategory::Neutral), 5);
        assert_eq!(mood_score(MoodCategory::Low), 3);
        assert_eq!(mood_score(MoodCategory::Distressed), 1);
    }

    #[test]
    fn test_scores_stay_in_range() {
        for mood in MoodCategory::ALL {
            let score = mood_score(mood);
            assert!((1..=10).contains(&score));
            assert_eq!(score, mood_score(mood));
        }
    }

    #[test]
    fn test_entry_score_follows_category() {
        let entry = MoodEntry::new(MoodCategory::Low, "long day");
        assert_eq!(entry.score(), 3);
        assert_eq!(entry.mood(), MoodCategory::Low);
        assert!(!entry.id.is_empty());
    }

    #[test]
    fn test_entries_get_distinct_ids() {
        let a = MoodEntry::new(MoodCategory::Good, "a");
        let b = MoodEntry::new(MoodCategory::Good, "b");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_entry_json_shape() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();
        let entry = MoodEntry::on(date, MoodCategory::Distressed, "rough");
        let json = serde_json::to_value(&entry).unwrap();

        assert_eq!(json["mood"], "distressed");
        assert_eq!(json["score"], 1);
        assert_eq!(json["date"], "2026-03-14");
        assert_eq!(json["note"], "rough");
    }

    #[test]
    fn test_stored_score_follows_category() {
        let entry: MoodEntry = serde_json::from_str(
            r#"{"id":"x","date":"2026-01-01","mood":"great","score":1,"note":"n"}"#,
        )
        .unwrap();
        assert_eq!(entry.mood(), MoodCategory::Great);
        assert_eq!(entry.score(), mood_score(entry.mood()));

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["score"], 10);
    }

    #[test]
    fn test_stored_entry_without_score() {
        let entry: MoodEntry = serde_json::from_str(
            r#"{"id":"y","date":"2026-01-02","mood":"low","note":"tired"}"#,
        )
        .unwrap();
        assert_eq!(entry.score(), 3);
        assert_eq!(entry.note, "tired");
    }
}
