//! Builds HTTP state over PostgreSQL or in-memory repositories.

use std::sync::Arc;

use actix_web::web;
use tracing::{info, warn};

use forum_backend::inbound::http::state::{HttpState, Repositories};
use forum_backend::outbound::memory::MemoryStore;
use forum_backend::outbound::persistence::{
    DbPool, DieselAnswerRepository, DieselCommentRepository, DieselQuestionRepository,
    DieselTagRepository, DieselUserRepository, DieselVoteRepository,
};
use forum_backend::outbound::security::BcryptPasswordHasher;

use super::ServerConfig;

fn diesel_state(pool: &DbPool, hasher: Arc<BcryptPasswordHasher>) -> HttpState {
    HttpState::from_repositories(
        Repositories {
            users: Arc::new(DieselUserRepository::new(pool.clone())),
            questions: Arc::new(DieselQuestionRepository::new(pool.clone())),
            answers: Arc::new(DieselAnswerRepository::new(pool.clone())),
            comments: Arc::new(DieselCommentRepository::new(pool.clone())),
            tags: Arc::new(DieselTagRepository::new(pool.clone())),
            votes: Arc::new(DieselVoteRepository::new(pool.clone())),
        },
        hasher,
    )
}

fn memory_state(hasher: Arc<BcryptPasswordHasher>) -> HttpState {
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
        hasher,
    )
}

/// Build the shared handler state from the configured store.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let hasher = Arc::new(BcryptPasswordHasher::new(config.password_cost));
    let state = match &config.db_pool {
        Some(pool) => {
            info!("using PostgreSQL repositories");
            diesel_state(pool, hasher)
        }
        None => {
            warn!("no database configured; data is kept in memory");
            memory_state(hasher)
        }
    };
    web::Data::new(state)
}
