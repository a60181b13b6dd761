//! Offers service errors.

use offerdesk::validate::ValidationError;
use sqlx::{Error, error::ErrorKind};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OffersServiceError {
    #[error("offer already exists")]
    AlreadyExists,

    #[error("offer not found")]
    NotFound,

    #[error("related resource not found")]
    InvalidReference,

    /// A NOT NULL constraint failed; carries the database message.
    #[error("missing required data: {0}")]
    MissingRequiredData(String),

    /// A CHECK constraint failed; carries the database message.
    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("offer failed validation with {} error(s)", .0.len())]
    Validation(Vec<ValidationError>),

    #[error("storage error: {0}")]
    Sql(#[source] Error),
}

impl From<Error> for OffersServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        let Some(database_error) = error.as_database_error() else {
            return Self::Sql(error);
        };

        let message = || database_error.message().to_string();

        match database_error.kind() {
            ErrorKind::UniqueViolation => Self::AlreadyExists,
            ErrorKind::ForeignKeyViolation => Self::InvalidReference,
            ErrorKind::NotNullViolation => Self::MissingRequiredData(message()),
            ErrorKind::CheckViolation => Self::InvalidData(message()),
            ErrorKind::Other | _ => Self::Sql(error),
        }
    }
}
