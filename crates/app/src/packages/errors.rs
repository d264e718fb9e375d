//! Package Errors

use sqlx::error::{DatabaseError, ErrorKind};
use thiserror::Error;

/// Errors surfaced by the packages repository.
///
/// Classification is by database error *kind*, never by matching message
/// text.
#[derive(Debug, Error)]
pub enum PackagesRepositoryError {
    #[error("package code already exists")]
    AlreadyExists,

    #[error("invalid data")]
    InvalidData,

    #[error("package not found")]
    NotFound,

    #[error("storage error")]
    Sql(#[source] sqlx::Error),
}

impl From<sqlx::Error> for PackagesRepositoryError {
    fn from(error: sqlx::Error) -> Self {
        if matches!(error, sqlx::Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::CheckViolation | ErrorKind::NotNullViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}

/// Errors surfaced by the packages service.
#[derive(Debug, Error)]
pub enum PackagesServiceError {
    #[error("package code must not be empty")]
    EmptyCode,

    #[error("package code exceeds {0} characters")]
    CodeTooLong(usize),

    #[error("latitude out of range [-90, 90]")]
    InvalidLatitude,

    #[error("longitude out of range [-180, 180]")]
    InvalidLongitude,

    #[error("package code already exists")]
    AlreadyExists,

    #[error("invalid data")]
    InvalidData,

    #[error("package not found")]
    NotFound,

    #[error("storage error")]
    Sql(#[source] sqlx::Error),
}

impl From<PackagesRepositoryError> for PackagesServiceError {
    fn from(error: PackagesRepositoryError) -> Self {
        match error {
            PackagesRepositoryError::AlreadyExists => Self::AlreadyExists,
            PackagesRepositoryError::InvalidData => Self::InvalidData,
            PackagesRepositoryError::NotFound => Self::NotFound,
            PackagesRepositoryError::Sql(source) => Self::Sql(source),
        }
    }
}
