//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use serde_json::Value;

use crate::Trace;
use crate::inbound::http::configure_api;
use crate::inbound::http::state::{HttpState, Repositories};
use crate::outbound::memory::MemoryStore;
use crate::outbound::security::BcryptPasswordHasher;

/// Real services over a fresh in-memory store, with a single-round hasher.
pub fn memory_state() -> HttpState {
    let store = Arc::new(MemoryStore::new());
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

/// Application exposing the API routes over `state`.
pub fn test_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .wrap(Trace)
        .configure(configure_api)
}

/// Read a JSON response body.
pub async fn read_json(response: ServiceResponse) -> Value {
    let bytes = actix_web::test::read_body(response).await;
    serde_json::from_slice(&bytes).expect("json body")
}
