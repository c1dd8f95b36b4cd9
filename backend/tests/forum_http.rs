//! End-to-end HTTP behaviour of the forum API over the in-memory store.
//!
//! Each test drives the real handlers, services and repositories through
//! `/api` routes and checks the reputation ledger after every step.

mod support;

use actix_web::http::StatusCode;
use rstest::rstest;
use serde_json::{Value, json};

use support::{answer, ask, forum_app, get_json, post_json, register, reputation};

async fn vote(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
    voter: i64,
    target: Value,
    vote_type: i64,
) -> (StatusCode, Value) {
    let mut body = json!({ "user_id": voter, "vote_type": vote_type });
    if let (Some(object), Some(target)) = (body.as_object_mut(), target.as_object()) {
        object.extend(target.clone());
    }
    post_json(app, "/api/votes", body).await
}

#[rstest]
#[actix_web::test]
async fn vote_reconciliation_moves_owner_reputation() {
    let app = forum_app().await;
    let asker = register(&app, "asker").await;
    let helper = register(&app, "helper").await;
    let voter = register(&app, "voter").await;
    let question = ask(&app, asker, "How does Pin work?").await;
    let answer_id = answer(&app, helper, question, "It fixes the address").await;
    let target = json!({ "answer_id": answer_id });

    let (status, body) = vote(&app, voter, target.clone(), 1).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["action"], "new_vote");
    assert_eq!(reputation(&app, helper).await, 10);

    let (status, body) = vote(&app, voter, target.clone(), -1).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["action"], "flip");
    assert_eq!(reputation(&app, helper).await, -2);

    let (status, body) = vote(&app, voter, target.clone(), -1).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["action"], "unvote");
    assert_eq!(reputation(&app, helper).await, 0);

    let (_, status_body) = get_json(
        &app,
        &format!("/api/votes/status?user_id={voter}&answer_id={answer_id}"),
    )
    .await;
    assert_eq!(status_body["vote_type"], Value::Null);
    assert_eq!(reputation(&app, voter).await, 0);
}

#[rstest]
#[actix_web::test]
async fn question_score_follows_votes() {
    let app = forum_app().await;
    let asker = register(&app, "asker").await;
    let first = register(&app, "first").await;
    let second = register(&app, "second").await;
    let question = ask(&app, asker, "Lifetimes?").await;
    let target = json!({ "question_id": question });

    vote(&app, first, target.clone(), 1).await;
    vote(&app, second, target.clone(), -1).await;

    let (status, body) = get_json(&app, "/api/questions").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);
    assert_eq!(body["data"][0]["score"], 0);
    assert_eq!(body["data"][0]["author"]["reputation"], 8);
}

#[rstest]
#[actix_web::test]
async fn self_votes_are_forbidden_and_write_nothing() {
    let app = forum_app().await;
    let asker = register(&app, "asker").await;
    let question = ask(&app, asker, "Mine").await;

    let (status, _) = vote(&app, asker, json!({ "question_id": question }), 1).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(reputation(&app, asker).await, 0);
    let (_, history) = get_json(&app, &format!("/api/users/{asker}/votes")).await;
    assert_eq!(history["count"], 0);
}

#[rstest]
#[actix_web::test]
async fn voting_on_missing_post_is_not_found() {
    let app = forum_app().await;
    let voter = register(&app, "voter").await;

    let (status, _) = vote(&app, voter, json!({ "answer_id": 404 }), 1).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[rstest]
#[actix_web::test]
async fn unknown_voter_is_not_found_and_writes_nothing() {
    let app = forum_app().await;
    let asker = register(&app, "asker").await;
    let question = ask(&app, asker, "Ghost votes").await;

    let (status, body) = vote(&app, 999, json!({ "question_id": question }), 1).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "not_found");
    assert_eq!(reputation(&app, asker).await, 0);
}

#[rstest]
#[actix_web::test]
async fn accepting_moves_bonus_between_authors() {
    let app = forum_app().await;
    let asker = register(&app, "asker").await;
    let alice = register(&app, "alice").await;
    let bob = register(&app, "bob").await;
    let question = ask(&app, asker, "Send vs Sync").await;
    let first = answer(&app, alice, question, "first").await;
    let second = answer(&app, bob, question, "second").await;

    let (status, body) = post_json(
        &app,
        "/api/answers/accept",
        json!({ "user_id": asker, "answer_id": first }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["previous_answer_id"], Value::Null);
    assert_eq!(reputation(&app, alice).await, 15);

    let (status, body) = post_json(
        &app,
        "/api/answers/accept",
        json!({ "user_id": asker, "answer_id": second }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["previous_answer_id"], first);
    assert_eq!(reputation(&app, alice).await, 0);
    assert_eq!(reputation(&app, bob).await, 15);

    let (_, threads) = get_json(&app, &format!("/api/answers/{question}")).await;
    let accepted: Vec<_> = threads["data"]
        .as_array()
        .expect("threads")
        .iter()
        .filter(|thread| thread["answer"]["is_accepted"] == true)
        .map(|thread| thread["answer"]["id"].clone())
        .collect();
    assert_eq!(accepted, [json!(second)]);
}

#[rstest]
#[case::stranger(false, StatusCode::FORBIDDEN)]
#[case::repeat(true, StatusCode::BAD_REQUEST)]
#[actix_web::test]
async fn rejected_acceptance_keeps_reputation(
    #[case] as_owner: bool,
    #[case] expected: StatusCode,
) {
    let app = forum_app().await;
    let asker = register(&app, "asker").await;
    let helper = register(&app, "helper").await;
    let question = ask(&app, asker, "Arc or Rc?").await;
    let answer_id = answer(&app, helper, question, "Arc across threads").await;
    post_json(
        &app,
        "/api/answers/accept",
        json!({ "user_id": asker, "answer_id": answer_id }),
    )
    .await;

    let requester = if as_owner { asker } else { helper };
    let (status, _) = post_json(
        &app,
        "/api/answers/accept",
        json!({ "user_id": requester, "answer_id": answer_id }),
    )
    .await;

    assert_eq!(status, expected);
    assert_eq!(reputation(&app, helper).await, 15);
}

#[rstest]
#[actix_web::test]
async fn registration_rejects_duplicates_without_echoing_secrets() {
    let app = forum_app().await;
    register(&app, "ada").await;

    let (status, body) = post_json(
        &app,
        "/api/users",
        json!({ "username": "ada", "email": "other@example.com", "password": "secret-enough" }),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "Username or Email already exists!");

    let (status, _) = post_json(
        &app,
        "/api/users",
        json!({ "username": "bea", "email": "bea@example.com", "password": "short" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, users) = get_json(&app, "/api/users").await;
    let listing = users.to_string();
    assert!(!listing.contains("password"));
    assert!(!listing.contains("$2b$"));
}

#[rstest]
#[actix_web::test]
async fn comments_attach_to_exactly_one_post() {
    let app = forum_app().await;
    let asker = register(&app, "asker").await;
    let helper = register(&app, "helper").await;
    let question = ask(&app, asker, "Traits?").await;
    let answer_id = answer(&app, helper, question, "Use generics").await;

    let (status, _) = post_json(
        &app,
        "/api/comments",
        json!({ "body": "both", "user_id": asker, "question_id": question, "answer_id": answer_id }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = post_json(
        &app,
        "/api/comments",
        json!({ "body": "thanks", "user_id": asker, "answer_id": answer_id }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, on_answer) = get_json(&app, &format!("/api/comments?answer_id={answer_id}")).await;
    let (_, on_question) = get_json(&app, &format!("/api/comments?question_id={question}")).await;
    assert_eq!(on_answer["count"], 1);
    assert_eq!(on_answer["data"][0]["author"]["username"], "asker");
    assert_eq!(on_question["count"], 0);

    let (_, threads) = get_json(&app, &format!("/api/answers/{question}")).await;
    assert_eq!(threads["data"][0]["comments"][0]["comment"]["body"], "thanks");
}

#[rstest]
#[actix_web::test]
async fn vote_history_lists_targets_newest_first() {
    let app = forum_app().await;
    let asker = register(&app, "asker").await;
    let helper = register(&app, "helper").await;
    let voter = register(&app, "voter").await;
    let question = ask(&app, asker, "Iterators").await;
    let answer_id = answer(&app, helper, question, "Use adapters").await;
    vote(&app, voter, json!({ "question_id": question }), 1).await;
    vote(&app, voter, json!({ "answer_id": answer_id }), -1).await;

    let (status, history) = get_json(&app, &format!("/api/users/{voter}/votes")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(history["count"], 2);
    assert_eq!(history["data"][0]["target"]["kind"], "answer");
    assert_eq!(history["data"][0]["target"]["body"], "Use adapters");
    assert_eq!(history["data"][1]["target"]["title"], "Iterators");
}

#[rstest]
#[actix_web::test]
async fn malformed_json_is_invalid_input() {
    let app = forum_app().await;
    let request = actix_web::test::TestRequest::post()
        .uri("/api/votes")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();

    let response = actix_web::test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(response.headers().contains_key("trace-id"));
}
