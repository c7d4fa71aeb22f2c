//! Question domain model.
//!
//! # Responsibility
//! - Define the top-level record that answers attach to.
//!
//! # Invariants
//! - `id` is assigned by the store and never reused for another question.
//! - `answers` is derived from matching `question_id` values, never stored
//!   on the question row itself.

use crate::model::answer::Answer;
use crate::model::{validate_question_text, RecordValidationError};
use serde::{Deserialize, Serialize};

/// Stable identifier for a question record.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type QuestionId = i64;

/// Canonical question record, including its derived answer collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Store-assigned id, immutable once created.
    pub id: QuestionId,
    /// User-submitted text, stored exactly as given.
    pub text: String,
    /// Epoch milliseconds, set once by the store.
    pub created_at: i64,
    /// Answers whose `question_id` equals `id`. Read-only on the wire.
    #[serde(default)]
    pub answers: Vec<Answer>,
}

impl Question {
    /// Checks invariants that must hold for any persisted question.
    pub fn validate(&self) -> Result<(), RecordValidationError> {
        validate_question_text(&self.text)
    }
}
