//! Tags API handlers.

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::{Error, NewTag, TagValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::envelope::{created, listing};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{ErrorCode, FieldName, field_error};

/// Body for `POST /api/tags`.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
pub struct CreateTagRequest {
    pub tag_name: Option<String>,
    pub description: Option<String>,
}

fn map_tag_error(err: TagValidationError) -> Error {
    let code = match err {
        TagValidationError::MissingName => ErrorCode::MissingField,
        TagValidationError::NameTooLong { .. } => ErrorCode::TooLong,
    };
    field_error(&err.to_string(), FieldName::new("tag_name"), code)
}

/// Create a tag with a unique name.
#[utoipa::path(
    post,
    path = "/api/tags",
    request_body = CreateTagRequest,
    responses(
        (status = 201, description = "Tag created"),
        (status = 400, description = "Missing or overlong tag name", body = ErrorSchema),
        (status = 409, description = "Tag already exists", body = ErrorSchema)
    ),
    tags = ["tags"],
    operation_id = "createTag"
)]
#[post("/tags")]
pub async fn create_tag(
    state: web::Data<HttpState>,
    payload: web::Json<CreateTagRequest>,
) -> ApiResult<HttpResponse> {
    let CreateTagRequest {
        tag_name,
        description,
    } = payload.into_inner();
    let tag = NewTag::try_new(tag_name.unwrap_or_default(), description)
        .map_err(map_tag_error)?;
    let stored = state.tags.create_tag(tag).await?;
    Ok(created("Tag created successfully", stored))
}

/// List every tag.
#[utoipa::path(
    get,
    path = "/api/tags",
    responses((status = 200, description = "Tags")),
    tags = ["tags"],
    operation_id = "listTags"
)]
#[get("/tags")]
pub async fn list_tags(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    Ok(listing(state.tags_query.list_tags().await?))
}
