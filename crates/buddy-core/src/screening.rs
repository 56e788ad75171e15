//! Nine-item depression screening.
//!
//! A screening tool, not a diagnosis.

use std::fmt;

use thiserror::Error;

/// The screening questions, in order.
pub const SCREENING_QUESTIONS: [&str; 9] = [
    "Little interest or pleasure in doing things",
    "Feeling down, depressed, or hopeless",
    "Trouble falling or staying asleep, or sleeping too much",
    "Feeling tired or having little energy",
    "Poor appetite or overeating",
    "Feeling bad about yourself, or that you are a failure or have let yourself or your family down",
    "Trouble concentrating on things, such as reading the newspaper or watching television",
    "Moving or speaking so slowly that other people could have noticed, or the opposite: being so fidgety or restless that you have been moving around a lot more than usual",
    "Thoughts that you would be better off dead or of hurting yourself in some way",
];

/// Highest answer value ("Nearly every day").
const MAX_ANSWER: u8 = 3;

/// Total at or above which a professional is recommended.
const REFERRAL_THRESHOLD: u8 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScreeningError {
    #[error("expected {expected} answers, got {actual}")]
    WrongAnswerCount { expected: usize, actual: usize },

    #[error("answer {index} out of range: {value}")]
    AnswerOutOfRange { index: usize, value: u8 },
}

/// Severity band of a total score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Minimal,
    Mild,
    Moderate,
    ModeratelySevere,
    Severe,
}

impl Severity {
    pub fn from_score(score: u8) -> Self {
        match score {
            0..=4 => Severity::Minimal,
            5..=9 => Severity::Mild,
            10..=14 => Severity::Moderate,
            15..=19 => Severity::ModeratelySevere,
            _ => Severity::Severe,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Severity::Minimal => "Minimal or none",
            Severity::Mild => "Mild",
            Severity::Moderate => "Moderate",
            Severity::ModeratelySevere => "Moderately severe",
            Severity::Severe => "Severe",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A completed screening.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screening {
    answers: [u8; 9],
}

impl Screening {
    /// Score a full set of answers, each 0 ("Not at all") to 3 ("Nearly every day").
    pub fn from_answers(answers: &[u8]) -> Result<Self, ScreeningError> {
        let answers: [u8; 9] = answers
            .try_into()
            .map_err(|_| ScreeningError::WrongAnswerCount {
                expected: SCREENING_QUESTIONS.len(),
                actual: answers.len(),
            })?;

        if let Some((index, &value)) = answers
            .iter()
            .enumerate()
            .find(|&(_, &value)| value > MAX_ANSWER)
        {
            return Err(ScreeningError::AnswerOutOfRange { index, value });
        }

        Ok(Self { answers })
    }

    pub fn total(&self) -> u8 {
        self.answers.iter().sum()
    }

    pub fn severity(&self) -> Severity {
        Severity::from_score(self.total())
    }

    /// Whether the result suggests speaking with a professional.
    pub fn recommends_professional(&self) -> bool {
        self.total() >= REFERRAL_THRESHOLD
    }
}
