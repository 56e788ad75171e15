//! Instruction and prompt construction.

use sha2::{Digest, Sha256};

use crate::mood::MoodEntry;
use crate::settings::UserSettings;

/// Instruction for journal summaries. Stricter than the chat instruction:
/// administrative help for a licensed professional, never clinical advice.
pub const SUMMARY_INSTRUCTION: &str = "You are a professional administrative assistant helping a patient prepare data for their human, licensed therapist. You do not provide clinical advice or therapy. You remain objective and concise.";

/// Build the chat system instruction for the given settings.
pub fn system_instruction(settings: &UserSettings) -> String {
    format!(
        "You are Nova, a calm, present, and emotionally intelligent companion.
Your tone is {tone}.
CORE RULES:
1. Avoid clichés (e.g., \"I hear you\", \"Stay strong\").
2. Use reflective listening. Validate the emotion deeply before suggesting any grounding.
3. Be direct and concise. No fluff.
4. If the user expresses intense distress, gently suggest a grounding exercise or check if they want to talk to their human therapist.
5. If self-harm is detected, immediately trigger the safety protocol by starting with \"I'm concerned about your safety right now.\"
6. Proactive: You initiate with a check-in that feels natural.",
        tone = settings.tone
    )
}

/// Build the therapist-summary prompt for a set of journal entries.
pub fn summary_prompt(entries: &[MoodEntry]) -> String {
    let lines = entries
        .iter()
        .map(|entry| {
            format!(
                "[{}] Mood: {}. Note: {}",
                entry.date.format("%Y-%m-%d"),
                entry.mood(),
                entry.note
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "I am a patient preparing for a session with a human therapist.
Below are my journal entries for the past period.
Please summarize the main emotional themes, recurring patterns, and significant events to help me explain my state to my licensed human therapist.

CRITICAL INSTRUCTION: Do not provide medical advice or therapeutic intervention.
Format as a structured summary that I can read to my doctor.

Entries:
{lines}"
    )
}

/// Build the short therapist-referral prompt.
pub fn referral_prompt(entries: &[MoodEntry]) -> Result<String, serde_json::Error> {
    let json = serde_json::to_string(entries)?;
    Ok(format!(
        "Analyze these mood entries and provide a 2-sentence summary of the user's current emotional state and primary needs for a therapist referral:\n{json}"
    ))
}

/// Compute a stable SHA-256 fingerprint for a prompt string.
pub fn hash_prompt(prompt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(prompt.as_bytes());
    let digest = hasher.finalize();
    let mut hex = String::with_capacity(digest.len() * 2);
    for byte in digest {
        hex.push_str(&format!("{:02x}", byte));
    }
    hex
}
