//! Answer domain model.
//!
//! # Invariants
//! - `question_id` always refers to a question that existed when the answer
//!   was created; cascade deletion keeps the reference from dangling.
//! - `user_id` is opaque; no identity or auth semantics are attached to it.

use crate::model::question::QuestionId;
use crate::model::{validate_answer_text, RecordValidationError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for an answer record.
pub type AnswerId = i64;

/// Canonical answer record tied to exactly one question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    /// Store-assigned id, immutable once created.
    pub id: AnswerId,
    /// Owning question. Server-assigned from the request path on create.
    pub question_id: QuestionId,
    /// Caller-supplied submitter id; mandatory, never generated here.
    pub user_id: Uuid,
    /// User-submitted text, stored exactly as given.
    pub text: String,
    /// Epoch milliseconds, set once by the store.
    pub created_at: i64,
}

impl Answer {
    /// Checks invariants that must hold for any persisted answer.
    pub fn validate(&self) -> Result<(), RecordValidationError> {
        validate_answer_text(&self.text)
    }
}
