//! Classification of Diesel failures shared by every repository.
//!
//! Repositories turn the classification into their own port error; only
//! they know which constraint names mean what.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

/// What a failed Diesel call means to a repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum DieselFailure {
    UniqueViolation { constraint: Option<String> },
    ForeignKeyViolation { constraint: Option<String> },
    Connection(&'static str),
    Query(&'static str),
}

impl DieselFailure {
    /// Whether this is a unique violation of constraint `name`.
    pub(crate) fn is_unique(&self, name: &str) -> bool {
        matches!(self, Self::UniqueViolation { constraint: Some(c) } if c == name)
    }

    pub(crate) fn is_foreign_key(&self, name: &str) -> bool {
        matches!(self, Self::ForeignKeyViolation { constraint: Some(c) } if c == name)
    }
}

/// Classify a Diesel error, logging the database message at debug level.
pub(crate) fn classify(error: DieselError) -> DieselFailure {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(
                ?kind,
                message = info.message(),
                constraint = info.constraint_name(),
                "diesel operation failed"
            );
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => DieselFailure::Query("record not found"),
        DieselError::QueryBuilderError(_) => DieselFailure::Query("database query error"),
        DieselError::DatabaseError(kind, info) => {
            let constraint = info.constraint_name().map(str::to_owned);
            match kind {
                DatabaseErrorKind::UniqueViolation => {
                    DieselFailure::UniqueViolation { constraint }
                }
                DatabaseErrorKind::ForeignKeyViolation => {
                    DieselFailure::ForeignKeyViolation { constraint }
                }
                DatabaseErrorKind::ClosedConnection => {
                    DieselFailure::Connection("database connection error")
                }
                _ => DieselFailure::Query("database error"),
            }
        }
        _ => DieselFailure::Query("database error"),
    }
}

/// Message for a failure no repository recognises specifically.
pub(crate) fn describe(failure: &DieselFailure) -> &'static str {
    match failure {
        DieselFailure::UniqueViolation { .. } => "unique constraint violated",
        DieselFailure::ForeignKeyViolation { .. } => "foreign key violated",
        DieselFailure::Connection(message) | DieselFailure::Query(message) => *message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use diesel::result::DatabaseErrorInformation;
    use rstest::rstest;

    struct Info {
        constraint: Option<&'static str>,
    }

    impl DatabaseErrorInformation for Info {
        fn message(&self) -> &str {
            "constraint violated"
        }
        fn details(&self) -> Option<&str> {
            None
        }
        fn hint(&self) -> Option<&str> {
            None
        }
        fn table_name(&self) -> Option<&str> {
            None
        }
        fn column_name(&self) -> Option<&str> {
            None
        }
        fn constraint_name(&self) -> Option<&str> {
            self.constraint
        }
        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    fn database_error(kind: DatabaseErrorKind, constraint: Option<&'static str>) -> DieselError {
        DieselError::DatabaseError(kind, Box::new(Info { constraint }))
    }

    #[rstest]
    fn unique_violation_keeps_constraint_name() {
        let failure = classify(database_error(
            DatabaseErrorKind::UniqueViolation,
            Some("students_email_key"),
        ));
        assert!(failure.is_unique("students_email_key"));
        assert!(!failure.is_unique("admins_username_key"));
        assert!(!failure.is_foreign_key("students_email_key"));
    }

    #[rstest]
    fn foreign_key_violation_keeps_constraint_name() {
        let failure = classify(database_error(
            DatabaseErrorKind::ForeignKeyViolation,
            Some("registrations_event_id_fkey"),
        ));
        assert!(failure.is_foreign_key("registrations_event_id_fkey"));
    }

    #[rstest]
    #[case(database_error(DatabaseErrorKind::ClosedConnection, None), DieselFailure::Connection("database connection error"))]
    #[case(database_error(DatabaseErrorKind::CheckViolation, None), DieselFailure::Query("database error"))]
    #[case(DieselError::NotFound, DieselFailure::Query("record not found"))]
    fn other_failures_collapse(#[case] error: DieselError, #[case] expected: DieselFailure) {
        assert_eq!(classify(error), expected);
    }

    #[rstest]
    fn unnamed_violation_matches_no_constraint() {
        let failure = classify(database_error(DatabaseErrorKind::UniqueViolation, None));
        assert!(!failure.is_unique("students_email_key"));
        assert_eq!(describe(&failure), "unique constraint violated");
    }
}
