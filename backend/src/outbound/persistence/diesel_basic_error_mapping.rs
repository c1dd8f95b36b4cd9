//! Shared Diesel error mapping for the forum repositories.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::{debug, warn};

use super::pool::PoolError;

/// Map pool errors into a repository-specific connection error constructor.
pub fn map_basic_pool_error<E, C>(error: PoolError, connection: C) -> E
where
    C: FnOnce(String) -> E,
{
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    connection(message)
}

/// Map common Diesel error variants into query/connection constructors.
///
/// `NotFound`, query-builder failures and unclassified database errors map
/// to query errors; a closed connection maps to a connection error.
pub fn map_basic_diesel_error<E, Q, C>(error: DieselError, query: Q, connection: C) -> E
where
    Q: Fn(&'static str) -> E,
    C: Fn(&'static str) -> E,
{
    log_diesel_error(&error);

    match error {
        DieselError::NotFound => query("record not found"),
        DieselError::QueryBuilderError(_) => query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            connection("database connection error")
        }
        DieselError::DatabaseError(_, _) => query("database error"),
        _ => query("database error"),
    }
}

fn log_diesel_error(error: &DieselError) {
    match error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(error),
            "diesel operation failed"
        ),
    }
}

/// A constraint the database refused a write on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ConstraintViolation {
    Unique { constraint: Option<String> },
    ForeignKey { constraint: Option<String> },
}

/// Classify unique and foreign-key violations; other errors yield `None`.
pub(crate) fn constraint_violation(error: &DieselError) -> Option<ConstraintViolation> {
    let DieselError::DatabaseError(kind, info) = error else {
        return None;
    };
    let constraint = info.constraint_name().map(str::to_owned);
    match kind {
        DatabaseErrorKind::UniqueViolation => Some(ConstraintViolation::Unique { constraint }),
        DatabaseErrorKind::ForeignKeyViolation => {
            Some(ConstraintViolation::ForeignKey { constraint })
        }
        _ => None,
    }
}

/// Message for a foreign-key violation, keyed on the violated constraint.
///
/// Foreign keys use PostgreSQL's default `<table>_<column>_fkey` names.
pub(crate) fn missing_reference_message(constraint: Option<&str>) -> &'static str {
    match constraint {
        Some(name) if name.ends_with("_user_id_fkey") => "user not found",
        Some(name) if name.ends_with("_question_id_fkey") => "question not found",
        Some(name) if name.ends_with("_answer_id_fkey") => "answer not found",
        other => {
            warn!(
                constraint_name = ?other,
                "unrecognised foreign key violation"
            );
            "referenced record not found"
        }
    }
}

/// Error type for guarded multi-statement writes run in a transaction.
///
/// A `Conflict` aborts the transaction so none of its statements persist.
#[derive(Debug)]
pub(crate) enum GuardedWriteError {
    Diesel(DieselError),
    Conflict(&'static str),
}

impl From<DieselError> for GuardedWriteError {
    fn from(error: DieselError) -> Self {
        Self::Diesel(error)
    }
}

/// Require that a conditional `UPDATE`/`DELETE` touched exactly one row.
pub(crate) fn expect_single_row(
    affected: usize,
    conflict: &'static str,
) -> Result<(), GuardedWriteError> {
    if affected == 1 {
        Ok(())
    } else {
        Err(GuardedWriteError::Conflict(conflict))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[derive(Debug, PartialEq, Eq)]
    enum TestError {
        Query(&'static str),
        Connection(String),
    }

    #[rstest]
    #[case(Some("questions_user_id_fkey"), "user not found")]
    #[case(Some("answers_question_id_fkey"), "question not found")]
    #[case(Some("comments_answer_id_fkey"), "answer not found")]
    #[case(Some("something_else"), "referenced record not found")]
    #[case(None, "referenced record not found")]
    fn foreign_keys_name_the_missing_row(
        #[case] constraint: Option<&str>,
        #[case] expected: &str,
    ) {
        assert_eq!(missing_reference_message(constraint), expected);
    }

    #[rstest]
    fn not_found_maps_to_query() {
        let mapped: TestError =
            map_basic_diesel_error(DieselError::NotFound, TestError::Query, |message| {
                TestError::Connection(message.to_owned())
            });
        assert_eq!(mapped, TestError::Query("record not found"));
    }

    #[rstest]
    fn pool_errors_map_to_connection() {
        let mapped: TestError =
            map_basic_pool_error(PoolError::checkout("timed out"), TestError::Connection);
        assert_eq!(mapped, TestError::Connection("timed out".into()));
    }

    #[rstest]
    fn non_database_errors_are_not_violations() {
        assert_eq!(constraint_violation(&DieselError::NotFound), None);
    }

    #[rstest]
    #[case(1, true)]
    #[case(0, false)]
    fn single_row_guard(#[case] affected: usize, #[case] ok: bool) {
        assert_eq!(expect_single_row(affected, "stale").is_ok(), ok);
    }
}
