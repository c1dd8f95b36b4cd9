//! HTTP inbound adapter exposing the forum REST endpoints.

pub mod answers;
pub mod comments;
pub mod envelope;
pub mod error;
pub mod health;
pub mod questions;
pub mod schemas;
pub mod state;
pub mod tags;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;
pub mod votes;

use actix_web::web;

pub use crate::domain::ApiResult;

/// Register the `/api` scope and its extractor error handlers.
///
/// Malformed JSON bodies and query strings surface as `invalid_input`
/// errors in the standard error payload.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(error::json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(error::query_error_handler))
        .service(
            web::scope("/api")
                .service(users::register_user)
                .service(users::list_users)
                .service(users::vote_history)
                .service(questions::create_question)
                .service(questions::list_questions)
                .service(answers::create_answer)
                .service(answers::accept_answer)
                .service(answers::list_answers)
                .service(comments::create_comment)
                .service(comments::list_comments)
                .service(tags::create_tag)
                .service(tags::list_tags)
                .service(votes::cast_vote)
                .service(votes::vote_status),
        );
}
