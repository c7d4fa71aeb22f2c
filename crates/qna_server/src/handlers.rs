//! Request handlers bridging warp to the domain service.
//!
//! # Invariants
//! - Handlers never hold the connection lock across an await point.
//! - Repository and service are constructed per request; no state is
//!   shared between requests beyond the store itself.

use crate::rejections::ApiError;
use qna_core::{QnaService, SqliteQnaRepository};
use rusqlite::Connection;
use serde::Deserialize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use uuid::Uuid;
use warp::http::StatusCode;
use warp::{Rejection, Reply};

/// Shared SQLite handle; one connection guarded by a mutex.
pub type Db = Arc<Mutex<Connection>>;

/// Body of `POST /api/questions`.
#[derive(Debug, Deserialize)]
pub struct CreateQuestionBody {
    pub text: String,
}

/// Body of `POST /api/questions/{id}/answers`.
///
/// `user_id` is mandatory; the server never generates one on the caller's
/// behalf.
#[derive(Debug, Deserialize)]
pub struct CreateAnswerBody {
    pub user_id: Uuid,
    pub text: String,
}

pub async fn list_questions(db: Db) -> Result<impl Reply, Rejection> {
    let mut conn = lock_db(&db);
    let repo = SqliteQnaRepository::try_new(&mut conn).map_err(ApiError::internal)?;
    let service = QnaService::new(repo);

    let questions = service.list_questions().map_err(ApiError::reject)?;
    Ok(warp::reply::json(&questions))
}

pub async fn create_question(db: Db, body: CreateQuestionBody) -> Result<impl Reply, Rejection> {
    let mut conn = lock_db(&db);
    let repo = SqliteQnaRepository::try_new(&mut conn).map_err(ApiError::internal)?;
    let service = QnaService::new(repo);

    let question = service.create_question(body.text).map_err(ApiError::reject)?;
    Ok(warp::reply::with_status(
        warp::reply::json(&question),
        StatusCode::CREATED,
    ))
}

pub async fn get_question(id: i64, db: Db) -> Result<impl Reply, Rejection> {
    let mut conn = lock_db(&db);
    let repo = SqliteQnaRepository::try_new(&mut conn).map_err(ApiError::internal)?;
    let service = QnaService::new(repo);

    let question = service.get_question(id).map_err(ApiError::reject)?;
    Ok(warp::reply::json(&question))
}

pub async fn delete_question(id: i64, db: Db) -> Result<impl Reply, Rejection> {
    let mut conn = lock_db(&db);
    let repo = SqliteQnaRepository::try_new(&mut conn).map_err(ApiError::internal)?;
    let mut service = QnaService::new(repo);

    service.delete_question(id).map_err(ApiError::reject)?;
    Ok(warp::reply::with_status(
        warp::reply(),
        StatusCode::NO_CONTENT,
    ))
}

pub async fn create_answer(
    question_id: i64,
    db: Db,
    body: CreateAnswerBody,
) -> Result<impl Reply, Rejection> {
    let mut conn = lock_db(&db);
    let repo = SqliteQnaRepository::try_new(&mut conn).map_err(ApiError::internal)?;
    let mut service = QnaService::new(repo);

    let answer = service
        .create_answer(question_id, body.user_id, body.text)
        .map_err(ApiError::reject)?;
    Ok(warp::reply::with_status(
        warp::reply::json(&answer),
        StatusCode::CREATED,
    ))
}

pub async fn get_answer(id: i64, db: Db) -> Result<impl Reply, Rejection> {
    let mut conn = lock_db(&db);
    let repo = SqliteQnaRepository::try_new(&mut conn).map_err(ApiError::internal)?;
    let service = QnaService::new(repo);

    let answer = service.get_answer(id).map_err(ApiError::reject)?;
    Ok(warp::reply::json(&answer))
}

pub async fn delete_answer(id: i64, db: Db) -> Result<impl Reply, Rejection> {
    let mut conn = lock_db(&db);
    let repo = SqliteQnaRepository::try_new(&mut conn).map_err(ApiError::internal)?;
    let service = QnaService::new(repo);

    service.delete_answer(id).map_err(ApiError::reject)?;
    Ok(warp::reply::with_status(
        warp::reply(),
        StatusCode::NO_CONTENT,
    ))
}

fn lock_db(db: &Db) -> MutexGuard<'_, Connection> {
    // A poisoned lock only means another request panicked mid-call; the
    // connection itself is still usable.
    db.lock().unwrap_or_else(PoisonError::into_inner)
}
