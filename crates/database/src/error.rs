use sea_orm::{DbErr, SqlErr};
use thiserror::Error;
use uuid::Uuid;

pub type DataResult<T> = Result<T, DataError>;

/// Errors raised by the persistence and service layer.
///
/// `NotFound` and `Integrity` originate at the storage boundary;
/// `AlreadyExists` and `IllegalState` are business-rule checks performed
/// before touching the store. All variants are fail-fast.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: Uuid },

    #[error("{entity} with {field} '{value}' already exists")]
    AlreadyExists {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("{0}")]
    IllegalState(String),

    #[error("integrity violation: {0}")]
    Integrity(String),

    #[error("database error: {0}")]
    Db(#[from] DbErr),
}

impl DataError {
    pub fn not_found(entity: &'static str, id: Uuid) -> Self {
        DataError::NotFound { entity, id }
    }

    /// Translates constraint violations surfacing from a write into
    /// `Integrity`, e.g. a unique-email race that slipped past the
    /// service-level pre-check.
    pub fn from_write(err: DbErr, entity: &'static str, field: &'static str, value: &str) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => DataError::Integrity(format!(
                "{entity} {field} '{value}' violates a unique constraint"
            )),
            Some(SqlErr::ForeignKeyConstraintViolation(_)) => DataError::Integrity(format!(
                "{entity} {field} '{value}' violates a foreign key constraint"
            )),
            _ => DataError::Db(err),
        }
    }
}
