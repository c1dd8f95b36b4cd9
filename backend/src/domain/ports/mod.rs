//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`, [`PasswordHasher`]) are implemented by the
//! outbound adapters. Driving ports (`*Command`, `*Query`) are implemented by
//! the domain services and consumed by the inbound HTTP adapter.

mod macros;
pub(crate) use macros::define_port_error;

mod answer_repository;
mod answers_command;
mod answers_query;
mod comment_repository;
mod comments_command;
mod comments_query;
mod password_hasher;
mod question_repository;
mod questions_command;
mod questions_query;
mod tag_repository;
mod tags_command;
mod tags_query;
mod user_repository;
mod users_command;
mod users_query;
mod vote_repository;
mod votes_command;
mod votes_query;

#[cfg(test)]
pub use answer_repository::MockAnswerRepository;
pub use answer_repository::{AnswerRepository, AnswerRepositoryError, FixtureAnswerRepository};
#[cfg(test)]
pub use answers_command::MockAnswersCommand;
pub use answers_command::{AcceptAnswerRequest, AnswersCommand};
#[cfg(test)]
pub use answers_query::MockAnswersQuery;
pub use answers_query::AnswersQuery;
#[cfg(test)]
pub use comment_repository::MockCommentRepository;
pub use comment_repository::{
    CommentRepository, CommentRepositoryError, FixtureCommentRepository,
};
#[cfg(test)]
pub use comments_command::MockCommentsCommand;
pub use comments_command::CommentsCommand;
#[cfg(test)]
pub use comments_query::MockCommentsQuery;
pub use comments_query::CommentsQuery;
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use question_repository::MockQuestionRepository;
pub use question_repository::{
    FixtureQuestionRepository, QuestionRepository, QuestionRepositoryError,
};
#[cfg(test)]
pub use questions_command::MockQuestionsCommand;
pub use questions_command::QuestionsCommand;
#[cfg(test)]
pub use questions_query::MockQuestionsQuery;
pub use questions_query::QuestionsQuery;
#[cfg(test)]
pub use tag_repository::MockTagRepository;
pub use tag_repository::{FixtureTagRepository, TagRepository, TagRepositoryError};
#[cfg(test)]
pub use tags_command::MockTagsCommand;
pub use tags_command::TagsCommand;
#[cfg(test)]
pub use tags_query::MockTagsQuery;
pub use tags_query::TagsQuery;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{FixtureUserRepository, UserPersistenceError, UserRepository};
#[cfg(test)]
pub use users_command::MockUsersCommand;
pub use users_command::UsersCommand;
#[cfg(test)]
pub use users_query::MockUsersQuery;
pub use users_query::UsersQuery;
#[cfg(test)]
pub use vote_repository::MockVoteRepository;
pub use vote_repository::{FixtureVoteRepository, VoteRepository, VoteRepositoryError};
#[cfg(test)]
pub use votes_command::MockVotesCommand;
pub use votes_command::{CastVoteRequest, VotesCommand};
#[cfg(test)]
pub use votes_query::MockVotesQuery;
pub use votes_query::VotesQuery;
