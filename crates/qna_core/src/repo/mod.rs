//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the record-store contract for questions and answers.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repository writes enforce text validation before SQL mutations.
//! - Repository APIs return semantic errors (`QuestionNotFound`,
//!   `AnswerNotFound`) in addition to DB transport errors.

pub mod qna_repo;
