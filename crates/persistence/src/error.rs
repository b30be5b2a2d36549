use domain::DomainError;
use thiserror::Error;

/// Errors that can occur when interacting with a repository.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// No entity with the given id exists.
    #[error("{entity} not found")]
    NotFound { entity: &'static str, id: String },

    /// An entity with the given id already exists.
    #[error("{entity} already exists: {id}")]
    AlreadyExists { entity: &'static str, id: String },

    /// A stored record cannot be turned back into an entity.
    #[error("Invalid {entity} record {id}: {reason}")]
    InvalidRecord {
        entity: &'static str,
        id: String,
        reason: String,
    },

    /// A stored record violates a domain rule.
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// A database error occurred.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A database migration error occurred.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;
