//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. When a
//! migration changes the schema, regenerate them with `diesel print-schema`
//! or update them by hand.

diesel::table! {
    /// Registered accounts. `username` and `email` are unique.
    users (id) {
        id -> Int8,
        username -> Varchar,
        email -> Varchar,
        /// Encoded salted hash; never leaves the persistence layer.
        password_hash -> Text,
        /// Only vote reconciliation and answer acceptance write this column.
        reputation -> Int8,
        profile_image -> Nullable<Text>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    questions (id) {
        id -> Int8,
        title -> Text,
        body -> Text,
        user_id -> Int8,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Answers. A partial unique index allows one accepted answer per question.
    answers (id) {
        id -> Int8,
        question_id -> Int8,
        user_id -> Int8,
        body -> Text,
        is_accepted -> Bool,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Votes. Exactly one of `question_id`/`answer_id` is set, `vote_type`
    /// is `1` or `-1`, and each voter holds one vote per post.
    votes (id) {
        id -> Int8,
        user_id -> Int8,
        question_id -> Nullable<Int8>,
        answer_id -> Nullable<Int8>,
        vote_type -> Int4,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Comments. Exactly one of `question_id`/`answer_id` is set.
    comments (id) {
        id -> Int8,
        body -> Text,
        user_id -> Int8,
        question_id -> Nullable<Int8>,
        answer_id -> Nullable<Int8>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    tags (id) {
        id -> Int8,
        tag_name -> Varchar,
        description -> Nullable<Text>,
    }
}

diesel::joinable!(questions -> users (user_id));
diesel::joinable!(answers -> questions (question_id));
diesel::joinable!(answers -> users (user_id));
diesel::joinable!(votes -> users (user_id));
diesel::joinable!(comments -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(users, questions, answers, votes, comments, tags);
