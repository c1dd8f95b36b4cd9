//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every forum endpoint and the schema wrappers from
//! [`crate::inbound::http::schemas`]. The document is served by Swagger UI in
//! debug builds and exported via `cargo run --bin openapi-dump`.

use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema, UserSchema};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Forum backend API",
        description = "Questions, answers, comments, tags, votes and reputation."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::register_user,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::vote_history,
        crate::inbound::http::questions::create_question,
        crate::inbound::http::questions::list_questions,
        crate::inbound::http::answers::create_answer,
        crate::inbound::http::answers::accept_answer,
        crate::inbound::http::answers::list_answers,
        crate::inbound::http::comments::create_comment,
        crate::inbound::http::comments::list_comments,
        crate::inbound::http::tags::create_tag,
        crate::inbound::http::tags::list_tags,
        crate::inbound::http::votes::cast_vote,
        crate::inbound::http::votes::vote_status,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(UserSchema, ErrorSchema, ErrorCodeSchema)),
    tags(
        (name = "users", description = "Registration, listing and vote history"),
        (name = "questions", description = "Questions with author and score"),
        (name = "answers", description = "Answers and answer acceptance"),
        (name = "comments", description = "Comments on questions and answers"),
        (name = "tags", description = "Tag catalogue"),
        (name = "votes", description = "Vote reconciliation and status"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    #[case("/api/users")]
    #[case("/api/users/{user_id}/votes")]
    #[case("/api/answers/accept")]
    #[case("/api/answers/{question_id}")]
    #[case("/api/comments")]
    #[case("/api/votes")]
    #[case("/api/votes/status")]
    #[case("/health/ready")]
    fn document_lists_path(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing {path}");
    }

    #[rstest]
    fn error_schema_has_code_and_message() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error_schema = schemas.get("Error").expect("Error schema");

        assert_object_schema_has_field(error_schema, "code");
        assert_object_schema_has_field(error_schema, "message");
    }

    #[rstest]
    fn user_schema_has_reputation() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let user_schema = schemas.get("User").expect("User schema");

        assert_object_schema_has_field(user_schema, "username");
        assert_object_schema_has_field(user_schema, "reputation");
    }
}
