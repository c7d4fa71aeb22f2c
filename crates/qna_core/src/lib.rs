//! Core domain logic for the Q&A backend.
//! This crate is the single source of truth for business invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{
    default_log_level, init_logging, logging_status, EventLog, LogFacade, LogSink,
};
pub use model::answer::{Answer, AnswerId};
pub use model::question::{Question, QuestionId};
pub use model::{validate_answer_text, validate_question_text, RecordValidationError};
pub use repo::qna_repo::{QnaRepository, RepoError, RepoResult, SqliteQnaRepository};
pub use service::qna_service::{QnaService, QnaServiceError};

/// Minimal health-check API for the HTTP shell.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
