use qna_core::db::open_db_in_memory;
use qna_core::{QnaRepository, RecordValidationError, RepoError, SqliteQnaRepository};
use uuid::Uuid;

const USER_A: &str = "11111111-1111-1111-1111-111111111111";
const USER_B: &str = "22222222-2222-2222-2222-222222222222";

#[test]
fn create_and_get_roundtrip() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqliteQnaRepository::try_new(&mut conn).unwrap();

    let question = repo.create_question("Q1").unwrap();
    let created = repo
        .create_answer(question.id, user(USER_A), "A1")
        .unwrap();

    assert_eq!(created.id, 1);
    assert_eq!(created.question_id, question.id);
    assert_eq!(created.user_id, user(USER_A));
    assert_eq!(created.text, "A1");
    assert!(created.created_at > 0);

    let loaded = repo.get_answer(created.id).unwrap().unwrap();
    assert_eq!(loaded, created);
}

#[test]
fn create_answer_for_missing_question_returns_not_found() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqliteQnaRepository::try_new(&mut conn).unwrap();

    let err = repo.create_answer(42, user(USER_A), "orphan").unwrap_err();
    assert!(matches!(err, RepoError::QuestionNotFound(42)));
}

#[test]
fn validation_failure_blocks_create_and_writes_nothing() {
    let mut conn = open_db_in_memory().unwrap();

    {
        let mut repo = SqliteQnaRepository::try_new(&mut conn).unwrap();
        let question = repo.create_question("Q1").unwrap();
        let err = repo
            .create_answer(question.id, user(USER_A), "   ")
            .unwrap_err();
        assert!(matches!(
            err,
            RepoError::Validation(RecordValidationError::EmptyAnswerText)
        ));
    }

    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM answers;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 0);
}

#[test]
fn question_nests_its_answers_in_creation_order() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqliteQnaRepository::try_new(&mut conn).unwrap();

    let question = repo.create_question("Q1").unwrap();
    let first = repo.create_answer(question.id, user(USER_A), "A1").unwrap();
    let second = repo.create_answer(question.id, user(USER_B), "A2").unwrap();

    let loaded = repo.get_question(question.id).unwrap().unwrap();
    assert_eq!(loaded.answers, vec![first, second]);
}

#[test]
fn delete_answer_leaves_siblings() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqliteQnaRepository::try_new(&mut conn).unwrap();

    let question = repo.create_question("Q1").unwrap();
    let first = repo.create_answer(question.id, user(USER_A), "A1").unwrap();
    let second = repo.create_answer(question.id, user(USER_B), "A2").unwrap();

    repo.delete_answer(first.id).unwrap();

    assert!(repo.get_answer(first.id).unwrap().is_none());
    let loaded = repo.get_question(question.id).unwrap().unwrap();
    assert_eq!(loaded.answers, vec![second]);
}

#[test]
fn delete_missing_answer_returns_not_found() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteQnaRepository::try_new(&mut conn).unwrap();

    let err = repo.delete_answer(9).unwrap_err();
    assert!(matches!(err, RepoError::AnswerNotFound(9)));
}

#[test]
fn deleting_question_cascades_to_all_its_answers() {
    let mut conn = open_db_in_memory().unwrap();

    let (doomed_id, kept_answer_id) = {
        let mut repo = SqliteQnaRepository::try_new(&mut conn).unwrap();
        let doomed = repo.create_question("doomed").unwrap();
        repo.create_answer(doomed.id, user(USER_A), "gone 1").unwrap();
        repo.create_answer(doomed.id, user(USER_B), "gone 2").unwrap();

        let kept = repo.create_question("kept").unwrap();
        let kept_answer = repo.create_answer(kept.id, user(USER_A), "stays").unwrap();

        repo.delete_question(doomed.id).unwrap();

        assert!(repo.get_question(doomed.id).unwrap().is_none());
        assert!(repo.get_answer(1).unwrap().is_none());
        assert!(repo.get_answer(2).unwrap().is_none());
        assert_eq!(repo.get_answer(kept_answer.id).unwrap(), Some(kept_answer.clone()));
        (doomed.id, kept_answer.id)
    };

    let orphans: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM answers WHERE question_id = ?1;",
            [doomed_id],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(orphans, 0);

    let kept_rows: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM answers WHERE id = ?1;",
            [kept_answer_id],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(kept_rows, 1);
}

#[test]
fn create_question_then_answer_then_cascade_scenario() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqliteQnaRepository::try_new(&mut conn).unwrap();

    let question = repo.create_question("Q1").unwrap();
    assert_eq!(question.id, 1);

    let answer = repo.create_answer(1, user(USER_A), "A1").unwrap();
    assert_eq!(answer.id, 1);
    assert_eq!(answer.question_id, 1);

    repo.delete_question(1).unwrap();
    assert!(repo.get_answer(1).unwrap().is_none());
}

fn user(value: &str) -> Uuid {
    Uuid::parse_str(value).unwrap()
}
