use sqlx::error::ErrorKind;
use thiserror::Error;
use tracing::error;
use uuid::Uuid;
use validator::ValidationErrors;

use crate::models::EntityKind;

/// Failures surfaced by a [`Store`](crate::store::Store).
///
/// "Not found" on a lookup is not an error: `find_one` returns `Ok(None)`.
/// `NotFound` is reserved for writes that target a missing row.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Constraint violation on {kind}: {message}")]
    Constraint { kind: EntityKind, message: String },

    #[error("Store unreachable: {0}")]
    Connectivity(String),

    #[error("{kind} record {id} not found")]
    NotFound { kind: EntityKind, id: Uuid },

    #[error("Database error: {0}")]
    Database(sqlx::Error),

    #[error("Migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

impl StoreError {
    /// Wraps input validation failures as a constraint violation on `kind`.
    pub fn invalid(kind: EntityKind, errors: ValidationErrors) -> Self {
        StoreError::Constraint {
            kind,
            message: errors.to_string(),
        }
    }

    /// Classifies a sqlx error raised while operating on `kind`.
    pub fn from_sqlx(kind: EntityKind, err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            match db_err.kind() {
                ErrorKind::UniqueViolation
                | ErrorKind::ForeignKeyViolation
                | ErrorKind::NotNullViolation
                | ErrorKind::CheckViolation => {
                    return StoreError::Constraint {
                        kind,
                        message: db_err.message().to_string(),
                    };
                }
                _ => {}
            }
        }
        StoreError::from(err)
    }

    pub fn is_constraint(&self) -> bool {
        matches!(self, StoreError::Constraint { .. })
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed => {
                error!("Connectivity error: {err}");
                StoreError::Connectivity(err.to_string())
            }
            other => StoreError::Database(other),
        }
    }
}
