//! Domain model for question and answer records.
//!
//! # Responsibility
//! - Define the canonical records exposed on the wire.
//! - Own the text validation rule shared by both record kinds.
//!
//! # Invariants
//! - `text` is never empty or whitespace-only once persisted.
//! - Record ids are store-assigned and never reused.
//! - Records are immutable after creation; there is no update path.

pub mod answer;
pub mod question;

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Validation failure for user-supplied record text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordValidationError {
    /// Question text is empty or whitespace-only.
    EmptyQuestionText,
    /// Answer text is empty or whitespace-only.
    EmptyAnswerText,
}

impl Display for RecordValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyQuestionText => write!(f, "question text may not be empty"),
            Self::EmptyAnswerText => write!(f, "answer text may not be empty"),
        }
    }
}

impl Error for RecordValidationError {}

/// Accepts question text when it contains at least one non-whitespace
/// character. The stored value is never trimmed or altered.
pub fn validate_question_text(text: &str) -> Result<(), RecordValidationError> {
    if text.trim().is_empty() {
        return Err(RecordValidationError::EmptyQuestionText);
    }
    Ok(())
}

/// Same rule as [`validate_question_text`], with the answer-specific message.
pub fn validate_answer_text(text: &str) -> Result<(), RecordValidationError> {
    if text.trim().is_empty() {
        return Err(RecordValidationError::EmptyAnswerText);
    }
    Ok(())
}
