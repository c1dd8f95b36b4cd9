//! Shared harness for HTTP-level forum tests over the in-memory store.

use std::sync::Arc;

use actix_http::Request;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use actix_web::{App, web};
use forum_backend::Trace;
use forum_backend::inbound::http::configure_api;
use forum_backend::inbound::http::state::{HttpState, Repositories};
use forum_backend::outbound::memory::MemoryStore;
use forum_backend::outbound::security::BcryptPasswordHasher;
use serde_json::{Value, json};

/// Handler state over `store` with a single-round hasher.
pub fn state_over(store: Arc<MemoryStore>) -> HttpState {
    HttpState::from_repositories(
        Repositories {
            users: store.clone(),
            questions: store.clone(),
            answers: store.clone(),
            comments: store.clone(),
            tags: store.clone(),
            votes: store,
        },
        Arc::new(BcryptPasswordHasher::new(4)),
    )
}

/// Initialised API service over a fresh store.
pub async fn forum_app()
-> impl Service<Request, Response = ServiceResponse, Error = actix_web::Error> {
    actix_test::init_service(
        App::new()
            .app_data(web::Data::new(state_over(Arc::new(MemoryStore::new()))))
            .wrap(Trace)
            .configure(configure_api),
    )
    .await
}

async fn into_parts(response: ServiceResponse) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = actix_test::read_body(response).await;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, body)
}

pub async fn post_json<S>(app: &S, uri: &str, body: Value) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let request = actix_test::TestRequest::post()
        .uri(uri)
        .set_json(body)
        .to_request();
    into_parts(actix_test::call_service(app, request).await).await
}

pub async fn get_json<S>(app: &S, uri: &str) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let request = actix_test::TestRequest::get().uri(uri).to_request();
    into_parts(actix_test::call_service(app, request).await).await
}

/// Register `name` and return the new user id.
pub async fn register<S>(app: &S, name: &str) -> i64
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let (status, body) = post_json(
        app,
        "/api/users",
        json!({
            "username": name,
            "email": format!("{name}@example.com"),
            "password": "correct horse",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "register {name}: {body}");
    body["data"]["id"].as_i64().expect("user id")
}

pub async fn ask<S>(app: &S, user_id: i64, title: &str) -> i64
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let (status, body) = post_json(
        app,
        "/api/questions",
        json!({ "title": title, "body": "details", "user_id": user_id }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "ask: {body}");
    body["data"]["id"].as_i64().expect("question id")
}

pub async fn answer<S>(app: &S, user_id: i64, question_id: i64, text: &str) -> i64
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let (status, body) = post_json(
        app,
        "/api/answers",
        json!({ "body": text, "question_id": question_id, "user_id": user_id }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "answer: {body}");
    body["data"]["id"].as_i64().expect("answer id")
}

/// Current reputation of `user_id` from the user listing.
pub async fn reputation<S>(app: &S, user_id: i64) -> i64
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let (_, body) = get_json(app, "/api/users").await;
    body["data"]
        .as_array()
        .expect("user list")
        .iter()
        .find(|user| user["id"] == user_id)
        .and_then(|user| user["reputation"].as_i64())
        .expect("user present")
}
