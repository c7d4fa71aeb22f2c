//! Question/answer repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide create/fetch/delete APIs over `questions` and `answers`.
//! - Own the cascade-delete transaction for question removal.
//!
//! # Invariants
//! - Write paths validate record text before SQL mutations.
//! - Read paths reject invalid persisted state instead of masking it.
//! - Question deletion and its answer cascade commit as one transaction;
//!   no reader ever observes an orphaned answer.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::answer::{Answer, AnswerId};
use crate::model::question::{Question, QuestionId};
use crate::model::{
    validate_answer_text, validate_question_text, RecordValidationError,
};
use rusqlite::{params, Connection, Row, Transaction, TransactionBehavior};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const QUESTION_SELECT_SQL: &str = "SELECT
    id,
    text,
    created_at
FROM questions";

const ANSWER_SELECT_SQL: &str = "SELECT
    id,
    question_id,
    user_id,
    text,
    created_at
FROM answers";

const QUESTIONS_REQUIRED_COLUMNS: &[&str] = &["id", "text", "created_at"];
const ANSWERS_REQUIRED_COLUMNS: &[&str] =
    &["id", "question_id", "user_id", "text", "created_at"];

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for question/answer persistence operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(RecordValidationError),
    Db(DbError),
    QuestionNotFound(QuestionId),
    AnswerNotFound(AnswerId),
    InvalidData(String),
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::QuestionNotFound(id) => write!(f, "question not found: {id}"),
            Self::AnswerNotFound(id) => write!(f, "answer not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "repository requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "repository requires table `{table}`")
            }
            Self::MissingRequiredColumn { table, column } => write!(
                f,
                "repository requires column `{column}` in table `{table}`"
            ),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RecordValidationError> for RepoError {
    fn from(value: RecordValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Record-store contract for question/answer operations.
pub trait QnaRepository {
    /// Creates one question and returns the persisted record.
    fn create_question(&self, text: &str) -> RepoResult<Question>;
    /// Gets one question with its nested answers.
    fn get_question(&self, id: QuestionId) -> RepoResult<Option<Question>>;
    /// Lists all questions, newest first, with nested answers.
    fn list_questions(&self) -> RepoResult<Vec<Question>>;
    /// Deletes one question and all its answers in one transaction.
    fn delete_question(&mut self, id: QuestionId) -> RepoResult<()>;
    /// Creates one answer for an existing question.
    fn create_answer(
        &mut self,
        question_id: QuestionId,
        user_id: Uuid,
        text: &str,
    ) -> RepoResult<Answer>;
    /// Gets one answer by id.
    fn get_answer(&self, id: AnswerId) -> RepoResult<Option<Answer>>;
    /// Deletes one answer by id.
    fn delete_answer(&self, id: AnswerId) -> RepoResult<()>;
}

/// SQLite-backed question/answer repository.
pub struct SqliteQnaRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteQnaRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn mut Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl QnaRepository for SqliteQnaRepository<'_> {
    fn create_question(&self, text: &str) -> RepoResult<Question> {
        validate_question_text(text)?;

        self.conn
            .execute("INSERT INTO questions (text) VALUES (?1);", [text])?;
        let id = self.conn.last_insert_rowid();

        load_required_question(self.conn, id)
    }

    fn get_question(&self, id: QuestionId) -> RepoResult<Option<Question>> {
        get_question_row(self.conn, id)
    }

    fn list_questions(&self) -> RepoResult<Vec<Question>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{QUESTION_SELECT_SQL} ORDER BY created_at DESC, id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut questions = Vec::new();
        while let Some(row) = rows.next()? {
            questions.push(parse_question_row(row)?);
        }

        for question in &mut questions {
            question.answers = load_answers_for_question(self.conn, question.id)?;
        }

        Ok(questions)
    }

    fn delete_question(&mut self, id: QuestionId) -> RepoResult<()> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        if !question_exists_in_tx(&tx, id)? {
            return Err(RepoError::QuestionNotFound(id));
        }

        // Child rows first; the FK cascade would also cover this, but the
        // explicit order keeps the invariant visible in one place.
        tx.execute("DELETE FROM answers WHERE question_id = ?1;", [id])?;
        tx.execute("DELETE FROM questions WHERE id = ?1;", [id])?;

        tx.commit()?;
        Ok(())
    }

    fn create_answer(
        &mut self,
        question_id: QuestionId,
        user_id: Uuid,
        text: &str,
    ) -> RepoResult<Answer> {
        validate_answer_text(text)?;

        let id = {
            let tx = self
                .conn
                .transaction_with_behavior(TransactionBehavior::Immediate)?;

            if !question_exists_in_tx(&tx, question_id)? {
                return Err(RepoError::QuestionNotFound(question_id));
            }

            tx.execute(
                "INSERT INTO answers (question_id, user_id, text) VALUES (?1, ?2, ?3);",
                params![question_id, user_id.to_string(), text],
            )?;
            let id = tx.last_insert_rowid();
            tx.commit()?;
            id
        };

        load_required_answer(self.conn, id)
    }

    fn get_answer(&self, id: AnswerId) -> RepoResult<Option<Answer>> {
        get_answer_row(self.conn, id)
    }

    fn delete_answer(&self, id: AnswerId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM answers WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::AnswerNotFound(id));
        }

        Ok(())
    }
}

fn get_question_row(conn: &Connection, id: QuestionId) -> RepoResult<Option<Question>> {
    let mut stmt = conn.prepare(&format!("{QUESTION_SELECT_SQL} WHERE id = ?1;"))?;
    let mut rows = stmt.query([id])?;

    let mut question = match rows.next()? {
        Some(row) => parse_question_row(row)?,
        None => return Ok(None),
    };

    question.answers = load_answers_for_question(conn, question.id)?;
    Ok(Some(question))
}

fn get_answer_row(conn: &Connection, id: AnswerId) -> RepoResult<Option<Answer>> {
    let mut stmt = conn.prepare(&format!("{ANSWER_SELECT_SQL} WHERE id = ?1;"))?;
    let mut rows = stmt.query([id])?;
    if let Some(row) = rows.next()? {
        return Ok(Some(parse_answer_row(row)?));
    }
    Ok(None)
}

fn load_answers_for_question(
    conn: &Connection,
    question_id: QuestionId,
) -> RepoResult<Vec<Answer>> {
    let mut stmt =
        conn.prepare(&format!("{ANSWER_SELECT_SQL} WHERE question_id = ?1 ORDER BY id ASC;"))?;
    let mut rows = stmt.query([question_id])?;
    let mut answers = Vec::new();
    while let Some(row) = rows.next()? {
        answers.push(parse_answer_row(row)?);
    }
    Ok(answers)
}

fn load_required_question(conn: &Connection, id: QuestionId) -> RepoResult<Question> {
    get_question_row(conn, id)?.ok_or_else(|| {
        RepoError::InvalidData(format!("question {id} missing after insert"))
    })
}

fn load_required_answer(conn: &Connection, id: AnswerId) -> RepoResult<Answer> {
    get_answer_row(conn, id)?
        .ok_or_else(|| RepoError::InvalidData(format!("answer {id} missing after insert")))
}

fn parse_question_row(row: &Row<'_>) -> RepoResult<Question> {
    let question = Question {
        id: row.get("id")?,
        text: row.get("text")?,
        created_at: row.get("created_at")?,
        answers: Vec::new(),
    };
    question.validate()?;
    Ok(question)
}

fn parse_answer_row(row: &Row<'_>) -> RepoResult<Answer> {
    let user_id_text: String = row.get("user_id")?;
    let user_id = Uuid::parse_str(&user_id_text).map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid uuid value `{user_id_text}` in answers.user_id"
        ))
    })?;

    let answer = Answer {
        id: row.get("id")?,
        question_id: row.get("question_id")?,
        user_id,
        text: row.get("text")?,
        created_at: row.get("created_at")?,
    };
    answer.validate()?;
    Ok(answer)
}

fn question_exists_in_tx(tx: &Transaction<'_>, id: QuestionId) -> RepoResult<bool> {
    let exists: i64 = tx.query_row(
        "SELECT EXISTS(SELECT 1 FROM questions WHERE id = ?1);",
        [id],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let actual_version: u32 =
        conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    let expected_version = latest_version();
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    ensure_table(conn, "questions", QUESTIONS_REQUIRED_COLUMNS)?;
    ensure_table(conn, "answers", ANSWERS_REQUIRED_COLUMNS)?;
    Ok(())
}

fn ensure_table(
    conn: &Connection,
    table: &'static str,
    required_columns: &[&'static str],
) -> RepoResult<()> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    if exists != 1 {
        return Err(RepoError::MissingRequiredTable(table));
    }

    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    let mut columns = Vec::new();
    while let Some(row) = rows.next()? {
        let name: String = row.get("name")?;
        columns.push(name);
    }

    for column in required_columns {
        if !columns.iter().any(|name| name == column) {
            return Err(RepoError::MissingRequiredColumn { table, column });
        }
    }

    Ok(())
}
