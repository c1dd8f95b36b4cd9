//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. Conversions into domain types re-validate
//! identifiers and vote directions, so a corrupt row surfaces as a
//! [`RowMappingError`] rather than a panic.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::domain::{
    Answer, AnswerId, AuthorSummary, Comment, CommentId, IdValidationError, InvalidVoteDirection,
    PostRef, PostRefError, Question, QuestionId, Tag, TagId, User, UserId, Vote, VoteDirection,
    VoteId,
};

use super::schema::{answers, comments, questions, tags, users, votes};

/// A stored row that does not satisfy a domain invariant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub(crate) enum RowMappingError {
    #[error(transparent)]
    Id(#[from] IdValidationError),
    #[error(transparent)]
    Direction(#[from] InvalidVoteDirection),
    #[error("invalid post reference: {0}")]
    Target(#[from] PostRefError),
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

/// Account row without the password hash.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub reputation: i64,
    pub profile_image: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = RowMappingError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: UserId::new(row.id)?,
            username: row.username,
            email: row.email,
            reputation: row.reputation,
            profile_image: row.profile_image,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
}

/// Public author columns joined into listings.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AuthorRow {
    pub id: i64,
    pub username: String,
    pub reputation: i64,
    pub profile_image: Option<String>,
}

impl TryFrom<AuthorRow> for AuthorSummary {
    type Error = RowMappingError;

    fn try_from(row: AuthorRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: UserId::new(row.id)?,
            username: row.username,
            reputation: row.reputation,
            profile_image: row.profile_image,
        })
    }
}

// ---------------------------------------------------------------------------
// Questions and answers
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = questions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct QuestionRow {
    pub id: i64,
    pub title: String,
    pub body: String,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<QuestionRow> for Question {
    type Error = RowMappingError;

    fn try_from(row: QuestionRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: QuestionId::new(row.id)?,
            title: row.title,
            body: row.body,
            user_id: UserId::new(row.user_id)?,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = questions)]
pub(crate) struct NewQuestionRow<'a> {
    pub title: &'a str,
    pub body: &'a str,
    pub user_id: i64,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = answers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AnswerRow {
    pub id: i64,
    pub question_id: i64,
    pub user_id: i64,
    pub body: String,
    pub is_accepted: bool,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<AnswerRow> for Answer {
    type Error = RowMappingError;

    fn try_from(row: AnswerRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: AnswerId::new(row.id)?,
            question_id: QuestionId::new(row.question_id)?,
            user_id: UserId::new(row.user_id)?,
            body: row.body,
            is_accepted: row.is_accepted,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = answers)]
pub(crate) struct NewAnswerRow<'a> {
    pub question_id: i64,
    pub user_id: i64,
    pub body: &'a str,
}

// ---------------------------------------------------------------------------
// Votes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = votes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct VoteRow {
    pub id: i64,
    pub user_id: i64,
    pub question_id: Option<i64>,
    pub answer_id: Option<i64>,
    pub vote_type: i32,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<VoteRow> for Vote {
    type Error = RowMappingError;

    fn try_from(row: VoteRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: VoteId::new(row.id)?,
            user_id: UserId::new(row.user_id)?,
            target: PostRef::from_parts(row.question_id, row.answer_id)?,
            direction: VoteDirection::try_from(row.vote_type)?,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = votes)]
pub(crate) struct NewVoteRow {
    pub user_id: i64,
    pub question_id: Option<i64>,
    pub answer_id: Option<i64>,
    pub vote_type: i32,
}

// ---------------------------------------------------------------------------
// Comments and tags
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = comments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CommentRow {
    pub id: i64,
    pub body: String,
    pub user_id: i64,
    pub question_id: Option<i64>,
    pub answer_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<CommentRow> for Comment {
    type Error = RowMappingError;

    fn try_from(row: CommentRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: CommentId::new(row.id)?,
            body: row.body,
            user_id: UserId::new(row.user_id)?,
            target: PostRef::from_parts(row.question_id, row.answer_id)?,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = comments)]
pub(crate) struct NewCommentRow<'a> {
    pub body: &'a str,
    pub user_id: i64,
    pub question_id: Option<i64>,
    pub answer_id: Option<i64>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tags)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct TagRow {
    pub id: i64,
    pub tag_name: String,
    pub description: Option<String>,
}

impl TryFrom<TagRow> for Tag {
    type Error = RowMappingError;

    fn try_from(row: TagRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: TagId::new(row.id)?,
            tag_name: row.tag_name,
            description: row.description,
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tags)]
pub(crate) struct NewTagRow<'a> {
    pub tag_name: &'a str,
    pub description: Option<&'a str>,
}

/// Split a post reference into the nullable `(question_id, answer_id)` pair.
pub(crate) fn target_columns(target: PostRef) -> (Option<i64>, Option<i64>) {
    match target {
        PostRef::Question(id) => (Some(id.get()), None),
        PostRef::Answer(id) => (None, Some(id.get())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn vote_row(vote_type: i32, question_id: Option<i64>, answer_id: Option<i64>) -> VoteRow {
        VoteRow {
            id: 1,
            user_id: 2,
            question_id,
            answer_id,
            vote_type,
            created_at: Utc::now(),
        }
    }

    #[rstest]
    fn valid_vote_row_maps() {
        let vote = Vote::try_from(vote_row(-1, None, Some(4))).expect("valid row");
        assert_eq!(vote.direction, VoteDirection::Down);
        assert_eq!(vote.target.answer_id().map(AnswerId::get), Some(4));
    }

    #[rstest]
    #[case(vote_row(0, Some(1), None))]
    #[case(vote_row(1, Some(1), Some(2)))]
    #[case(vote_row(1, None, None))]
    fn corrupt_vote_rows_are_rejected(#[case] row: VoteRow) {
        assert!(Vote::try_from(row).is_err());
    }

    #[rstest]
    fn target_columns_split_by_kind() {
        let answer = PostRef::Answer(AnswerId::new(9).expect("answer id"));
        assert_eq!(target_columns(answer), (None, Some(9)));
    }
}
