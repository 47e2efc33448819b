//! Lists service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ListsServiceError {
    /// The product does not exist or has been soft-deleted.
    #[error("related resource not found")]
    InvalidReference,

    /// A removal targeted a line that is not in the list.
    #[error("list entry not found")]
    MissingEntry,

    #[error("quantity is required for this list")]
    MissingQuantity,

    #[error("quantity must be a positive integer")]
    InvalidQuantity,

    #[error("list entry already exists")]
    AlreadyExists,

    #[error("not found")]
    NotFound,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for ListsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}
