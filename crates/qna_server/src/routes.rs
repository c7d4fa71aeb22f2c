//! HTTP route composition.
//!
//! One filter per endpoint, combined into the full API surface. Paths and
//! verbs:
//!
//! | Method | Path |
//! |---|---|
//! | GET/POST | `/api/questions` |
//! | GET/DELETE | `/api/questions/{id}` |
//! | POST | `/api/questions/{id}/answers` |
//! | GET/DELETE | `/api/answers/{id}` |
//! | GET | `/health` |

use crate::handlers::{self, Db};
use crate::rejections;
use warp::{Filter, Rejection, Reply};

/// Builds the complete API filter over the shared store handle.
pub fn api(db: Db) -> impl Filter<Extract = impl Reply, Error = std::convert::Infallible> + Clone {
    health()
        .or(questions_list(db.clone()))
        .or(question_create(db.clone()))
        .or(question_get(db.clone()))
        .or(question_delete(db.clone()))
        .or(answer_create(db.clone()))
        .or(answer_get(db.clone()))
        .or(answer_delete(db))
        .recover(rejections::handle_rejection)
}

fn questions_list(db: Db) -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    warp::path!("api" / "questions")
        .and(warp::get())
        .and(with_db(db))
        .and_then(handlers::list_questions)
}

fn question_create(db: Db) -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    warp::path!("api" / "questions")
        .and(warp::post())
        .and(with_db(db))
        .and(warp::body::json())
        .and_then(handlers::create_question)
}

fn question_get(db: Db) -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    warp::path!("api" / "questions" / i64)
        .and(warp::get())
        .and(with_db(db))
        .and_then(handlers::get_question)
}

fn question_delete(db: Db) -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    warp::path!("api" / "questions" / i64)
        .and(warp::delete())
        .and(with_db(db))
        .and_then(handlers::delete_question)
}

fn answer_create(db: Db) -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    warp::path!("api" / "questions" / i64 / "answers")
        .and(warp::post())
        .and(with_db(db))
        .and(warp::body::json())
        .and_then(handlers::create_answer)
}

fn answer_get(db: Db) -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    warp::path!("api" / "answers" / i64)
        .and(warp::get())
        .and(with_db(db))
        .and_then(handlers::get_answer)
}

fn answer_delete(db: Db) -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    warp::path!("api" / "answers" / i64)
        .and(warp::delete())
        .and(with_db(db))
        .and_then(handlers::delete_answer)
}

fn health() -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    warp::path!("health").and(warp::get()).map(qna_core::ping)
}

fn with_db(db: Db) -> impl Filter<Extract = (Db,), Error = std::convert::Infallible> + Clone {
    warp::any().map(move || db.clone())
}
