//! Question/answer use-case service.
//!
//! # Responsibility
//! - Provide the create/fetch/delete entry points for API callers.
//! - Emit structured events on create/delete attempts and outcomes.
//!
//! # Invariants
//! - Service APIs never bypass repository validation/persistence contracts.
//! - Event emission never influences control flow.

use crate::logging::{EventLog, LogFacade};
use crate::model::answer::{Answer, AnswerId};
use crate::model::question::{Question, QuestionId};
use crate::model::RecordValidationError;
use crate::repo::qna_repo::{QnaRepository, RepoError};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Service error for question/answer use-cases.
#[derive(Debug)]
pub enum QnaServiceError {
    /// Caller supplied empty/whitespace text.
    Validation(RecordValidationError),
    /// Referenced question does not exist.
    QuestionNotFound(QuestionId),
    /// Referenced answer does not exist.
    AnswerNotFound(AnswerId),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for QnaServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::QuestionNotFound(id) => write!(f, "question not found: {id}"),
            Self::AnswerNotFound(id) => write!(f, "answer not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for QnaServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for QnaServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(err) => Self::Validation(err),
            RepoError::QuestionNotFound(id) => Self::QuestionNotFound(id),
            RepoError::AnswerNotFound(id) => Self::AnswerNotFound(id),
            other => Self::Repo(other),
        }
    }
}

/// Use-case service facade over repository implementations.
///
/// Events go through the injected [`EventLog`]; the default is the
/// process `log` facade.
pub struct QnaService<R: QnaRepository, L: EventLog = LogFacade> {
    repo: R,
    events: L,
}

impl<R: QnaRepository> QnaService<R, LogFacade> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            events: LogFacade,
        }
    }
}

impl<R: QnaRepository, L: EventLog> QnaService<R, L> {
    /// Creates a service with an explicit event sink.
    pub fn with_events(repo: R, events: L) -> Self {
        Self { repo, events }
    }

    /// Creates a new question from caller-supplied text.
    ///
    /// # Contract
    /// - `text` must contain at least one non-whitespace character.
    /// - Returns the persisted record with store-assigned `id`/`created_at`.
    pub fn create_question(
        &self,
        text: impl Into<String>,
    ) -> Result<Question, QnaServiceError> {
        let text = text.into();
        match self.repo.create_question(&text) {
            Ok(question) => {
                self.events.info(&format!(
                    "event=question_create module=service status=ok question_id={}",
                    question.id
                ));
                Ok(question)
            }
            Err(err) => Err(self.emit_failure("question_create", err)),
        }
    }

    /// Gets one question with its nested answers.
    pub fn get_question(&self, id: QuestionId) -> Result<Question, QnaServiceError> {
        self.repo
            .get_question(id)?
            .ok_or(QnaServiceError::QuestionNotFound(id))
    }

    /// Lists all questions, newest first.
    pub fn list_questions(&self) -> Result<Vec<Question>, QnaServiceError> {
        Ok(self.repo.list_questions()?)
    }

    /// Deletes one question and, atomically, all its answers.
    pub fn delete_question(&mut self, id: QuestionId) -> Result<(), QnaServiceError> {
        match self.repo.delete_question(id) {
            Ok(()) => {
                self.events.info(&format!(
                    "event=question_delete module=service status=ok question_id={id}"
                ));
                Ok(())
            }
            Err(err) => Err(self.emit_failure("question_delete", err)),
        }
    }

    /// Creates an answer for an existing question.
    ///
    /// # Contract
    /// - `question_id` must reference an existing question.
    /// - `user_id` is stored as given; there is no user registry to check.
    pub fn create_answer(
        &mut self,
        question_id: QuestionId,
        user_id: Uuid,
        text: impl Into<String>,
    ) -> Result<Answer, QnaServiceError> {
        let text = text.into();
        match self.repo.create_answer(question_id, user_id, &text) {
            Ok(answer) => {
                self.events.info(&format!(
                    "event=answer_create module=service status=ok answer_id={} question_id={}",
                    answer.id, answer.question_id
                ));
                Ok(answer)
            }
            Err(err) => Err(self.emit_failure("answer_create", err)),
        }
    }

    /// Gets one answer by id.
    pub fn get_answer(&self, id: AnswerId) -> Result<Answer, QnaServiceError> {
        self.repo
            .get_answer(id)?
            .ok_or(QnaServiceError::AnswerNotFound(id))
    }

    /// Deletes one answer; sibling answers of the same question remain.
    pub fn delete_answer(&self, id: AnswerId) -> Result<(), QnaServiceError> {
        match self.repo.delete_answer(id) {
            Ok(()) => {
                self.events.info(&format!(
                    "event=answer_delete module=service status=ok answer_id={id}"
                ));
                Ok(())
            }
            Err(err) => Err(self.emit_failure("answer_delete", err)),
        }
    }

    fn emit_failure(&self, operation: &str, err: RepoError) -> QnaServiceError {
        let err = QnaServiceError::from(err);
        match &err {
            QnaServiceError::Validation(_) => self.events.warn(&format!(
                "event={operation} module=service status=invalid error={err}"
            )),
            QnaServiceError::QuestionNotFound(_) | QnaServiceError::AnswerNotFound(_) => {
                self.events.warn(&format!(
                    "event={operation} module=service status=not_found error={err}"
                ));
            }
            QnaServiceError::Repo(_) => self.events.error(&format!(
                "event={operation} module=service status=error error={err}"
            )),
        }
        err
    }
}
