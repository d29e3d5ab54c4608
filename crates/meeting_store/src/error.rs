//! Meeting store error types.

use entities::ValidationError;
use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Entity not found.
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// A unique column already holds the value.
    #[error("{entity_type} with this {field} already exists")]
    AlreadyExists {
        entity_type: &'static str,
        field: String,
    },

    /// Input rejected before reaching the database.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// A write was attempted through a read-only unit of work.
    #[error("Write attempted in a read-only unit of work")]
    ReadOnly,

    /// Schema migration failed.
    #[error("Migration error: {0}")]
    Migration(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl StoreError {
    /// Creates a not found error.
    pub fn not_found(entity_type: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity_type,
            id: id.to_string(),
        }
    }

    /// Creates an already exists error.
    pub fn already_exists(entity_type: &'static str, field: impl Into<String>) -> Self {
        Self::AlreadyExists {
            entity_type,
            field: field.into(),
        }
    }

    /// Converts a failed insert or update into [`StoreError::AlreadyExists`]
    /// when it violated a unique constraint.
    pub(crate) fn from_write(entity_type: &'static str, err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                // SQLite reports "UNIQUE constraint failed: users.email"
                let field = db_err
                    .message()
                    .rsplit('.')
                    .next()
                    .unwrap_or("value")
                    .trim()
                    .to_string();
                return Self::already_exists(entity_type, field);
            }
        }
        Self::Database(err)
    }

    /// Returns true if this is a not found error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
