use qna_core::db::open_db_in_memory;
use qna_server::routes;
use qna_server::Db;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

const USER_A: &str = "11111111-1111-1111-1111-111111111111";
const USER_B: &str = "22222222-2222-2222-2222-222222222222";

#[tokio::test]
async fn health_returns_pong() {
    let api = routes::api(test_db());

    let resp = warp::test::request().path("/health").reply(&api).await;
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.body(), "pong");
}

#[tokio::test]
async fn create_question_returns_created_record() {
    let api = routes::api(test_db());

    let resp = warp::test::request()
        .method("POST")
        .path("/api/questions")
        .json(&json!({"text": "What is a lifetime?"}))
        .reply(&api)
        .await;

    assert_eq!(resp.status(), 201);
    let body = json_body(&resp);
    assert_eq!(body["id"], 1);
    assert_eq!(body["text"], "What is a lifetime?");
    assert!(body["created_at"].as_i64().unwrap() > 0);
    assert_eq!(body["answers"], json!([]));
}

#[tokio::test]
async fn create_question_with_whitespace_text_is_rejected() {
    let api = routes::api(test_db());

    let resp = warp::test::request()
        .method("POST")
        .path("/api/questions")
        .json(&json!({"text": "   "}))
        .reply(&api)
        .await;

    assert_eq!(resp.status(), 400);
    assert_eq!(json_body(&resp)["error"], "question text may not be empty");

    let list = warp::test::request().path("/api/questions").reply(&api).await;
    assert_eq!(list.status(), 200);
    assert_eq!(json_body(&list), json!([]));
}

#[tokio::test]
async fn get_missing_question_returns_404() {
    let api = routes::api(test_db());

    let resp = warp::test::request().path("/api/questions/9").reply(&api).await;
    assert_eq!(resp.status(), 404);
    assert_eq!(json_body(&resp)["error"], "question not found: 9");
}

#[tokio::test]
async fn question_nests_answers_and_single_delete_keeps_siblings() {
    let db = test_db();
    let api = routes::api(db.clone());

    create_question(&db, "Q1").await;
    let first = create_answer(&db, 1, USER_A, "A1").await;
    assert_eq!(first["id"], 1);
    assert_eq!(first["question_id"], 1);
    assert_eq!(first["user_id"], USER_A);
    create_answer(&db, 1, USER_B, "A2").await;

    let question = warp::test::request().path("/api/questions/1").reply(&api).await;
    let answers = json_body(&question)["answers"].clone();
    assert_eq!(answers.as_array().unwrap().len(), 2);

    let deleted = warp::test::request()
        .method("DELETE")
        .path("/api/answers/1")
        .reply(&api)
        .await;
    assert_eq!(deleted.status(), 204);

    let question = warp::test::request().path("/api/questions/1").reply(&api).await;
    let answers = json_body(&question)["answers"].clone();
    assert_eq!(answers.as_array().unwrap().len(), 1);
    assert_eq!(answers[0]["id"], 2);

    let sibling = warp::test::request().path("/api/answers/2").reply(&api).await;
    assert_eq!(sibling.status(), 200);
}

#[tokio::test]
async fn deleting_question_cascades_to_answers() {
    let db = test_db();
    let api = routes::api(db.clone());

    create_question(&db, "Q1").await;
    let answer = create_answer(&db, 1, USER_A, "A1").await;
    assert_eq!(answer["id"], 1);

    let deleted = warp::test::request()
        .method("DELETE")
        .path("/api/questions/1")
        .reply(&api)
        .await;
    assert_eq!(deleted.status(), 204);

    let question = warp::test::request().path("/api/questions/1").reply(&api).await;
    assert_eq!(question.status(), 404);

    let orphan = warp::test::request().path("/api/answers/1").reply(&api).await;
    assert_eq!(orphan.status(), 404);
}

#[tokio::test]
async fn answer_for_missing_question_returns_404() {
    let api = routes::api(test_db());

    let resp = warp::test::request()
        .method("POST")
        .path("/api/questions/5/answers")
        .json(&json!({"user_id": USER_A, "text": "lost"}))
        .reply(&api)
        .await;

    assert_eq!(resp.status(), 404);
    assert_eq!(json_body(&resp)["error"], "question not found: 5");
}

#[tokio::test]
async fn whitespace_answer_is_rejected_and_not_created() {
    let db = test_db();
    let api = routes::api(db.clone());

    create_question(&db, "Q1").await;
    let resp = warp::test::request()
        .method("POST")
        .path("/api/questions/1/answers")
        .json(&json!({"user_id": USER_A, "text": "   "}))
        .reply(&api)
        .await;

    assert_eq!(resp.status(), 400);
    assert_eq!(json_body(&resp)["error"], "answer text may not be empty");

    let question = warp::test::request().path("/api/questions/1").reply(&api).await;
    assert_eq!(json_body(&question)["answers"], json!([]));
}

#[tokio::test]
async fn answer_without_user_id_is_rejected() {
    let db = test_db();
    let api = routes::api(db.clone());

    create_question(&db, "Q1").await;
    let resp = warp::test::request()
        .method("POST")
        .path("/api/questions/1/answers")
        .json(&json!({"text": "anonymous"}))
        .reply(&api)
        .await;

    assert_eq!(resp.status(), 400);
}

#[tokio::test]
async fn delete_missing_records_return_404() {
    let api = routes::api(test_db());

    let question = warp::test::request()
        .method("DELETE")
        .path("/api/questions/3")
        .reply(&api)
        .await;
    assert_eq!(question.status(), 404);

    let answer = warp::test::request()
        .method("DELETE")
        .path("/api/answers/3")
        .reply(&api)
        .await;
    assert_eq!(answer.status(), 404);
}

#[tokio::test]
async fn unknown_route_returns_404_with_json_body() {
    let api = routes::api(test_db());

    let resp = warp::test::request().path("/api/users").reply(&api).await;
    assert_eq!(resp.status(), 404);
    assert_eq!(json_body(&resp)["error"], "route not found");
}

#[tokio::test]
async fn question_list_includes_nested_answers() {
    let db = test_db();
    let api = routes::api(db.clone());

    create_question(&db, "Q1").await;
    create_question(&db, "Q2").await;
    create_answer(&db, 1, USER_A, "A1").await;

    let resp = warp::test::request().path("/api/questions").reply(&api).await;
    assert_eq!(resp.status(), 200);

    let listed = json_body(&resp);
    let listed = listed.as_array().unwrap();
    assert_eq!(listed.len(), 2);
    for question in listed {
        match question["id"].as_i64().unwrap() {
            1 => assert_eq!(question["answers"].as_array().unwrap().len(), 1),
            2 => assert_eq!(question["answers"], json!([])),
            other => panic!("unexpected question id {other}"),
        }
    }
}

fn test_db() -> Db {
    Arc::new(Mutex::new(open_db_in_memory().unwrap()))
}

async fn create_question(db: &Db, text: &str) -> Value {
    let api = routes::api(db.clone());
    let resp = warp::test::request()
        .method("POST")
        .path("/api/questions")
        .json(&json!({"text": text}))
        .reply(&api)
        .await;
    assert_eq!(resp.status(), 201);
    json_body(&resp)
}

async fn create_answer(db: &Db, question_id: i64, user_id: &str, text: &str) -> Value {
    let api = routes::api(db.clone());
    let resp = warp::test::request()
        .method("POST")
        .path(&format!("/api/questions/{question_id}/answers"))
        .json(&json!({"user_id": user_id, "text": text}))
        .reply(&api)
        .await;
    assert_eq!(resp.status(), 201);
    json_body(&resp)
}

fn json_body<B: AsRef<[u8]>>(resp: &warp::http::Response<B>) -> Value {
    serde_json::from_slice(resp.body().as_ref()).unwrap()
}
