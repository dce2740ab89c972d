//! Domain-level error types.
//!
//! These errors are presentation agnostic. The CLI, or any other front end,
//! decides how to show them; [`crate::domain::Notice`] offers the stock
//! user-facing wording.

use serde::Serialize;

use super::apartment::ApartmentId;
use super::draft::DraftValidationError;
use super::ports::ApartmentRepositoryError;

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The draft failed validation.
    InvalidRequest,
    /// The record does not exist.
    NotFound,
    /// The document store could not be reached.
    ServiceUnavailable,
    /// Another mutating operation is still in flight.
    Conflict,
    /// The document store failed the request.
    InternalError,
}

/// Failure of a session or store operation.
///
/// In every case the in-memory record list keeps its last-known-good value.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// The draft is incomplete or its rent is not a usable number.
    #[error("invalid apartment draft: {0}")]
    Validation(#[from] DraftValidationError),
    /// The document store failed the operation.
    #[error(transparent)]
    Repository(#[from] ApartmentRepositoryError),
    /// The record is not part of the loaded list.
    #[error("apartment {0} is not loaded")]
    UnknownApartment(ApartmentId),
    /// A mutating operation was requested while another was in flight.
    #[error("another apartment operation is already in progress")]
    Busy,
}

impl DomainError {
    /// Stable machine-readable error code.
    ///
    /// # Examples
    /// ```
    /// use apartments::domain::{DomainError, ErrorCode};
    ///
    /// assert_eq!(DomainError::Busy.code(), ErrorCode::Conflict);
    /// ```
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Validation(_) => ErrorCode::InvalidRequest,
            Self::UnknownApartment(_)
            | Self::Repository(ApartmentRepositoryError::NotFound { .. }) => ErrorCode::NotFound,
            Self::Repository(ApartmentRepositoryError::Connection { .. }) => {
                ErrorCode::ServiceUnavailable
            }
            Self::Repository(
                ApartmentRepositoryError::Query { .. } | ApartmentRepositoryError::Decode { .. },
            ) => ErrorCode::InternalError,
            Self::Busy => ErrorCode::Conflict,
        }
    }

    /// Whether the failure came from the document store.
    pub fn is_repository(&self) -> bool {
        matches!(self, Self::Repository(_))
    }
}

#[cfg(test)]
mod tests {
    //! Error code mapping.

    use rstest::rstest;

    use super::*;
    use crate::domain::DraftField;

    #[rstest]
    #[case(
        DomainError::from(DraftValidationError::EmptyField { field: DraftField::NumApp }),
        ErrorCode::InvalidRequest
    )]
    #[case(
        DomainError::from(ApartmentRepositoryError::not_found("x")),
        ErrorCode::NotFound
    )]
    #[case(
        DomainError::from(ApartmentRepositoryError::connection("offline")),
        ErrorCode::ServiceUnavailable
    )]
    #[case(
        DomainError::from(ApartmentRepositoryError::query("denied")),
        ErrorCode::InternalError
    )]
    #[case(
        DomainError::from(ApartmentRepositoryError::decode("bad loyer")),
        ErrorCode::InternalError
    )]
    #[case(DomainError::Busy, ErrorCode::Conflict)]
    fn codes_follow_failure_category(#[case] error: DomainError, #[case] expected: ErrorCode) {
        assert_eq!(error.code(), expected);
    }

    #[rstest]
    fn repository_failures_are_flagged() {
        assert!(DomainError::from(ApartmentRepositoryError::query("boom")).is_repository());
        assert!(!DomainError::Busy.is_repository());
    }
}
