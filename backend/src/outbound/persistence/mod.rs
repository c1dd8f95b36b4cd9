//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Each repository port has a Diesel adapter sharing one [`DbPool`]. Row
//! structs (`models.rs`) and table definitions (`schema.rs`) stay private to
//! this module; adapters only translate between rows and domain types.
//!
//! Writes that must be atomic (vote application, answer acceptance) run in a
//! single transaction whose statements are conditional on the state the
//! domain decision was made against.
//!
//! ```ignore
//! use forum_backend::outbound::persistence::{DbPool, DieselVoteRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/forum")).await?;
//! let votes = DieselVoteRepository::new(pool.clone());
//! ```

mod diesel_answer_repository;
mod diesel_basic_error_mapping;
mod diesel_comment_repository;
mod diesel_question_repository;
mod diesel_tag_repository;
mod diesel_user_repository;
mod diesel_vote_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_answer_repository::DieselAnswerRepository;
pub use diesel_comment_repository::DieselCommentRepository;
pub use diesel_question_repository::DieselQuestionRepository;
pub use diesel_tag_repository::DieselTagRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use diesel_vote_repository::DieselVoteRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
