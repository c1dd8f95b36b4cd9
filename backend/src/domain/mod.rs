//! Domain primitives, aggregates and services.
//!
//! Purpose: Define the strongly typed forum entities, the vote and
//! acceptance rules that move reputation, and the services implementing the
//! driving ports. Nothing in here knows about HTTP or SQL; adapters reach
//! the domain only through [`ports`].
//!
//! Public surface:
//! - Error (alias to `error::Error`): transport-agnostic failure payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - Entities: `User`, `Question`, `Answer`, `Comment`, `Tag`, `Vote`.
//! - Rules: [`decide`] for votes, [`AcceptanceCandidate::plan`] for answers.
//! - Services: one per resource, each generic over its repository port.

pub mod answer;
mod answer_service;
pub mod comment;
mod comment_service;
mod content;
pub mod error;
pub mod ids;
pub mod ports;
pub mod post;
pub mod question;
mod question_service;
pub mod reputation;
pub mod tag;
mod tag_service;
pub mod trace_id;
pub mod user;
mod user_service;
pub mod vote;
mod vote_service;

pub use self::answer::{
    AcceptanceCandidate, AcceptanceChange, AcceptanceOutcome, AcceptanceRejection,
    AcceptedAnswer, Answer, AnswerThread, NewAnswer,
};
pub use self::answer_service::AnswerService;
pub use self::comment::{Comment, CommentView, NewComment};
pub use self::comment_service::CommentService;
pub use self::content::MissingFieldError;
pub use self::error::{Error, ErrorCode};
pub use self::ids::{AnswerId, CommentId, IdValidationError, QuestionId, TagId, UserId, VoteId};
pub use self::post::{PostKind, PostRef, PostRefError};
pub use self::question::{NewQuestion, Question, QuestionSummary};
pub use self::question_service::QuestionService;
pub use self::reputation::{
    ACCEPTED_ANSWER_BONUS, RECEIVED_DOWNVOTE, ReputationDelta, UPVOTE_RECEIVED,
};
pub use self::tag::{NewTag, TAG_NAME_MAX, Tag, TagValidationError};
pub use self::tag_service::TagService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    AuthorSummary, EMAIL_MAX, NewUser, PASSWORD_MIN, PasswordHash, Registration,
    RegistrationValidationError, USERNAME_MAX, User,
};
pub use self::user_service::UserService;
pub use self::vote::{
    InvalidVoteDirection, Vote, VoteAction, VoteChange, VoteDecision, VoteDirection,
    VoteHistoryEntry, VoteMutation, VoteOutcome, VoteTargetSummary, decide,
};
pub use self::vote_service::VoteService;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use forum_backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
