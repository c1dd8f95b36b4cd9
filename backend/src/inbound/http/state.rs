//! Shared HTTP adapter state.
//!
//! Handlers receive this state via `actix_web::web::Data` and only depend on
//! driving ports, so they stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    AnswerRepository, AnswersCommand, AnswersQuery, CommentRepository, CommentsCommand,
    CommentsQuery, PasswordHasher, QuestionRepository, QuestionsCommand, QuestionsQuery,
    TagRepository, TagsCommand, TagsQuery, UserRepository, UsersCommand, UsersQuery,
    VoteRepository, VotesCommand, VotesQuery,
};
use crate::domain::{
    AnswerService, CommentService, QuestionService, TagService, UserService, VoteService,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub users: Arc<dyn UsersCommand>,
    pub users_query: Arc<dyn UsersQuery>,
    pub questions: Arc<dyn QuestionsCommand>,
    pub questions_query: Arc<dyn QuestionsQuery>,
    pub answers: Arc<dyn AnswersCommand>,
    pub answers_query: Arc<dyn AnswersQuery>,
    pub comments: Arc<dyn CommentsCommand>,
    pub comments_query: Arc<dyn CommentsQuery>,
    pub tags: Arc<dyn TagsCommand>,
    pub tags_query: Arc<dyn TagsQuery>,
    pub votes: Arc<dyn VotesCommand>,
    pub votes_query: Arc<dyn VotesQuery>,
}

/// Driven adapters backing every domain service.
pub struct Repositories<U, Q, A, C, T, V> {
    pub users: Arc<U>,
    pub questions: Arc<Q>,
    pub answers: Arc<A>,
    pub comments: Arc<C>,
    pub tags: Arc<T>,
    pub votes: Arc<V>,
}

impl HttpState {
    /// Wire the domain services over the given repositories.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use forum_backend::inbound::http::state::{HttpState, Repositories};
    /// use forum_backend::outbound::memory::MemoryStore;
    /// use forum_backend::outbound::security::BcryptPasswordHasher;
    ///
    /// let store = Arc::new(MemoryStore::new());
    /// let state = HttpState::from_repositories(
    ///     Repositories {
    ///         users: store.clone(),
    ///         questions: store.clone(),
    ///         answers: store.clone(),
    ///         comments: store.clone(),
    ///         tags: store.clone(),
    ///         votes: store,
    ///     },
    ///     Arc::new(BcryptPasswordHasher::default()),
    /// );
    /// let _votes = state.votes.clone();
    /// ```
    pub fn from_repositories<U, Q, A, C, T, V, H>(
        repos: Repositories<U, Q, A, C, T, V>,
        hasher: Arc<H>,
    ) -> Self
    where
        U: UserRepository + 'static,
        Q: QuestionRepository + 'static,
        A: AnswerRepository + 'static,
        C: CommentRepository + 'static,
        T: TagRepository + 'static,
        V: VoteRepository + 'static,
        H: PasswordHasher + 'static,
    {
        let users = Arc::new(UserService::new(repos.users, hasher));
        let questions = Arc::new(QuestionService::new(repos.questions));
        let answers = Arc::new(AnswerService::new(repos.answers));
        let comments = Arc::new(CommentService::new(repos.comments));
        let tags = Arc::new(TagService::new(repos.tags));
        let votes = Arc::new(VoteService::new(repos.votes));
        Self {
            users: users.clone(),
            users_query: users,
            questions: questions.clone(),
            questions_query: questions,
            answers: answers.clone(),
            answers_query: answers,
            comments: comments.clone(),
            comments_query: comments,
            tags: tags.clone(),
            tags_query: tags,
            votes: votes.clone(),
            votes_query: votes,
        }
    }
}
