//! Tables and operations of the in-memory store.
//!
//! Every operation checks its preconditions before touching any table, so a
//! refused call leaves the state unchanged.

use std::collections::BTreeMap;

use chrono::Utc;

use super::StoreError;
use crate::domain::{
    AcceptanceCandidate, AcceptanceChange, AcceptedAnswer, Answer, AnswerId, AnswerThread,
    AuthorSummary, Comment, CommentId, CommentView, IdValidationError, NewAnswer, NewComment,
    NewQuestion, NewTag, NewUser, PostRef, Question, QuestionId, QuestionSummary,
    ReputationDelta, Tag, TagId, User, UserId, Vote, VoteChange, VoteHistoryEntry, VoteId,
    VoteMutation, VoteTargetSummary,
};

#[derive(Debug, Default)]
struct Sequence(i64);

impl Sequence {
    fn next<T>(&mut self) -> Result<T, StoreError>
    where
        T: TryFrom<i64, Error = IdValidationError>,
    {
        self.0 += 1;
        T::try_from(self.0).map_err(|err| StoreError::Corrupt(err.to_string()))
    }
}

#[derive(Debug, Default)]
pub(super) struct State {
    users: BTreeMap<UserId, User>,
    questions: BTreeMap<QuestionId, Question>,
    answers: BTreeMap<AnswerId, Answer>,
    comments: BTreeMap<CommentId, Comment>,
    tags: BTreeMap<TagId, Tag>,
    votes: BTreeMap<VoteId, Vote>,
    user_ids: Sequence,
    question_ids: Sequence,
    answer_ids: Sequence,
    comment_ids: Sequence,
    tag_ids: Sequence,
    vote_ids: Sequence,
}

fn missing(entity: &str) -> StoreError {
    StoreError::MissingReference(format!("{entity} not found"))
}

impl State {
    // -- users -----------------------------------------------------------

    pub(super) fn insert_user(&mut self, new_user: &NewUser) -> Result<User, StoreError> {
        let taken = self
            .users
            .values()
            .any(|user| user.username == new_user.username || user.email == new_user.email);
        if taken {
            return Err(StoreError::Duplicate(format!(
                "username {} or email already registered",
                new_user.username
            )));
        }
        let user = User {
            id: self.user_ids.next()?,
            username: new_user.username.clone(),
            email: new_user.email.clone(),
            reputation: 0,
            profile_image: None,
            created_at: Utc::now(),
        };
        self.users.insert(user.id, user.clone());
        Ok(user)
    }

    pub(super) fn users(&self) -> Vec<User> {
        self.users.values().cloned().collect()
    }

    fn author(&self, id: UserId) -> Result<AuthorSummary, StoreError> {
        self.users
            .get(&id)
            .map(AuthorSummary::from)
            .ok_or_else(|| StoreError::Corrupt(format!("user {id} referenced but missing")))
    }

    fn require_user(&self, id: UserId) -> Result<(), StoreError> {
        if self.users.contains_key(&id) {
            Ok(())
        } else {
            Err(missing("user"))
        }
    }

    fn adjust_reputation(&mut self, id: UserId, delta: ReputationDelta) -> Result<(), StoreError> {
        let user = self
            .users
            .get_mut(&id)
            .ok_or_else(|| StoreError::Corrupt(format!("user {id} referenced but missing")))?;
        user.reputation += delta.get();
        Ok(())
    }

    // -- posts -----------------------------------------------------------

    pub(super) fn post_owner(&self, target: PostRef) -> Option<UserId> {
        match target {
            PostRef::Question(id) => self.questions.get(&id).map(|question| question.user_id),
            PostRef::Answer(id) => self.answers.get(&id).map(|answer| answer.user_id),
        }
    }

    fn score(&self, target: PostRef) -> i64 {
        self.votes
            .values()
            .filter(|vote| vote.target == target)
            .map(|vote| i64::from(vote.direction))
            .sum()
    }

    pub(super) fn insert_question(&mut self, new: &NewQuestion) -> Result<Question, StoreError> {
        self.require_user(new.author())?;
        let question = Question {
            id: self.question_ids.next()?,
            title: new.title().to_owned(),
            body: new.body().to_owned(),
            user_id: new.author(),
            created_at: Utc::now(),
        };
        self.questions.insert(question.id, question.clone());
        Ok(question)
    }

    pub(super) fn question_summaries(&self) -> Result<Vec<QuestionSummary>, StoreError> {
        self.questions
            .values()
            .rev()
            .map(|question| {
                Ok(QuestionSummary {
                    author: self.author(question.user_id)?,
                    score: self.score(PostRef::Question(question.id)),
                    question: question.clone(),
                })
            })
            .collect()
    }

    pub(super) fn insert_answer(&mut self, new: &NewAnswer) -> Result<Answer, StoreError> {
        if !self.questions.contains_key(&new.question_id()) {
            return Err(missing("question"));
        }
        self.require_user(new.author())?;
        let answer = Answer {
            id: self.answer_ids.next()?,
            question_id: new.question_id(),
            user_id: new.author(),
            body: new.body().to_owned(),
            is_accepted: false,
            created_at: Utc::now(),
        };
        self.answers.insert(answer.id, answer.clone());
        Ok(answer)
    }

    pub(super) fn answer_threads(
        &self,
        question_id: QuestionId,
    ) -> Result<Vec<AnswerThread>, StoreError> {
        self.answers
            .values()
            .rev()
            .filter(|answer| answer.question_id == question_id)
            .map(|answer| {
                let target = PostRef::Answer(answer.id);
                Ok(AnswerThread {
                    author: self.author(answer.user_id)?,
                    vote_count: self.score(target),
                    comments: self.comment_views(target)?,
                    answer: answer.clone(),
                })
            })
            .collect()
    }

    fn accepted_answer(&self, question_id: QuestionId) -> Option<AcceptedAnswer> {
        self.answers
            .values()
            .find(|answer| answer.question_id == question_id && answer.is_accepted)
            .map(|answer| AcceptedAnswer {
                answer_id: answer.id,
                author: answer.user_id,
            })
    }

    pub(super) fn acceptance_candidate(
        &self,
        answer_id: AnswerId,
    ) -> Result<Option<AcceptanceCandidate>, StoreError> {
        let Some(answer) = self.answers.get(&answer_id) else {
            return Ok(None);
        };
        let question = self.questions.get(&answer.question_id).ok_or_else(|| {
            StoreError::Corrupt(format!("answer {answer_id} has no question"))
        })?;
        Ok(Some(AcceptanceCandidate {
            answer_id,
            answer_author: answer.user_id,
            question_id: question.id,
            question_owner: question.user_id,
            is_accepted: answer.is_accepted,
            currently_accepted: self.accepted_answer(question.id),
        }))
    }

    pub(super) fn apply_acceptance(&mut self, change: &AcceptanceChange) -> Result<(), StoreError> {
        let target = self
            .answers
            .get(&change.accepted.answer_id)
            .ok_or_else(|| StoreError::Conflict("answer disappeared".into()))?;
        if target.is_accepted || target.question_id != change.question_id {
            return Err(StoreError::Conflict("answer already accepted".into()));
        }
        if self.accepted_answer(change.question_id) != change.previous {
            return Err(StoreError::Conflict(
                "accepted answer changed since it was read".into(),
            ));
        }
        let authors_present = self.users.contains_key(&change.accepted.author)
            && change
                .previous
                .is_none_or(|previous| self.users.contains_key(&previous.author));
        if !authors_present {
            return Err(StoreError::Corrupt("answer author missing".into()));
        }

        if let Some(previous) = change.previous {
            if let Some(answer) = self.answers.get_mut(&previous.answer_id) {
                answer.is_accepted = false;
            }
            self.adjust_reputation(previous.author, -change.bonus)?;
        }
        if let Some(answer) = self.answers.get_mut(&change.accepted.answer_id) {
            answer.is_accepted = true;
        }
        self.adjust_reputation(change.accepted.author, change.bonus)
    }

    // -- comments --------------------------------------------------------

    pub(super) fn insert_comment(&mut self, new: &NewComment) -> Result<Comment, StoreError> {
        let target = new.target();
        if self.post_owner(target).is_none() {
            return Err(missing(target.kind().as_str()));
        }
        self.require_user(new.author())?;
        let comment = Comment {
            id: self.comment_ids.next()?,
            body: new.body().to_owned(),
            user_id: new.author(),
            target,
            created_at: Utc::now(),
        };
        self.comments.insert(comment.id, comment.clone());
        Ok(comment)
    }

    pub(super) fn comment_views(&self, target: PostRef) -> Result<Vec<CommentView>, StoreError> {
        self.comments
            .values()
            .filter(|comment| comment.target == target)
            .map(|comment| {
                Ok(CommentView {
                    author: self.author(comment.user_id)?,
                    comment: comment.clone(),
                })
            })
            .collect()
    }

    // -- tags ------------------------------------------------------------

    pub(super) fn insert_tag(&mut self, new: &NewTag) -> Result<Tag, StoreError> {
        if self.tags.values().any(|tag| tag.tag_name == new.tag_name()) {
            return Err(StoreError::Duplicate(new.tag_name().to_owned()));
        }
        let tag = Tag {
            id: self.tag_ids.next()?,
            tag_name: new.tag_name().to_owned(),
            description: new.description().map(str::to_owned),
        };
        self.tags.insert(tag.id, tag.clone());
        Ok(tag)
    }

    pub(super) fn tags(&self) -> Vec<Tag> {
        self.tags.values().cloned().collect()
    }

    // -- votes -----------------------------------------------------------

    pub(super) fn find_vote(&self, voter: UserId, target: PostRef) -> Option<Vote> {
        self.votes
            .values()
            .find(|vote| vote.user_id == voter && vote.target == target)
            .cloned()
    }

    pub(super) fn apply_vote(&mut self, mutation: &VoteMutation) -> Result<(), StoreError> {
        if !self.users.contains_key(&mutation.owner) {
            return Err(StoreError::Corrupt(format!(
                "post owner {} missing",
                mutation.owner
            )));
        }
        match mutation.change {
            VoteChange::Create {
                voter,
                target,
                direction,
            } => {
                if self.find_vote(voter, target).is_some() {
                    return Err(StoreError::Conflict(format!(
                        "user {voter} already voted on {target}"
                    )));
                }
                if self.post_owner(target) != Some(mutation.owner) {
                    return Err(StoreError::Conflict(format!("{target} changed owner")));
                }
                self.require_user(voter)?;
                let vote = Vote {
                    id: self.vote_ids.next()?,
                    user_id: voter,
                    target,
                    direction,
                    created_at: Utc::now(),
                };
                self.votes.insert(vote.id, vote);
            }
            VoteChange::Update { vote_id, from, to } => {
                let vote = self
                    .votes
                    .get_mut(&vote_id)
                    .filter(|vote| vote.direction == from)
                    .ok_or_else(|| StoreError::Conflict(format!("vote {vote_id} changed")))?;
                vote.direction = to;
            }
            VoteChange::Delete { vote_id, direction } => {
                let unchanged = self
                    .votes
                    .get(&vote_id)
                    .is_some_and(|vote| vote.direction == direction);
                if !unchanged {
                    return Err(StoreError::Conflict(format!("vote {vote_id} changed")));
                }
                self.votes.remove(&vote_id);
            }
        }
        self.adjust_reputation(mutation.owner, mutation.owner_delta)
    }

    pub(super) fn vote_history(&self, voter: UserId) -> Result<Vec<VoteHistoryEntry>, StoreError> {
        self.votes
            .values()
            .rev()
            .filter(|vote| vote.user_id == voter)
            .map(|vote| {
                let target = match vote.target {
                    PostRef::Question(question_id) => VoteTargetSummary::Question {
                        question_id,
                        title: self
                            .questions
                            .get(&question_id)
                            .map(|question| question.title.clone())
                            .ok_or_else(|| missing("question"))?,
                    },
                    PostRef::Answer(answer_id) => VoteTargetSummary::Answer {
                        answer_id,
                        body: self
                            .answers
                            .get(&answer_id)
                            .map(|answer| answer.body.clone())
                            .ok_or_else(|| missing("answer"))?,
                    },
                };
                Ok(VoteHistoryEntry {
                    vote: vote.clone(),
                    target,
                })
            })
            .collect()
    }
}
