//! Database-specific error types and conversions.

use curio_core::error::CurioError;

/// Database-layer error type.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("SurrealDB error: {0}")]
    Surreal(#[from] surrealdb::Error),

    #[error("Query failed: {0}")]
    Query(String),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Record not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    #[error("Unique index violated: {entity}")]
    UniqueIndex { entity: String },

    #[error("Stored value could not be decoded: {0}")]
    Decode(String),
}

impl From<DbError> for CurioError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => CurioError::NotFound { entity, id },
            DbError::UniqueIndex { entity } => CurioError::AlreadyExists { entity },
            DbError::Decode(msg) => CurioError::Internal(msg),
            other => CurioError::Database(other.to_string()),
        }
    }
}

/// Classify a statement-level failure: violations of the named unique
/// index become [`DbError::UniqueIndex`], everything else is a plain
/// query failure. SurrealDB reports index violations only through the
/// error text, so the index name is the dispatch key.
pub(crate) fn classify_index_error(e: surrealdb::Error, index: &str, entity: &str) -> DbError {
    let msg = e.to_string();
    if msg.contains(index) {
        DbError::UniqueIndex {
            entity: entity.into(),
        }
    } else {
        DbError::Query(msg)
    }
}

/// Whether an error is a transient commit conflict between concurrent
/// writers. Such statements can simply be issued again.
pub(crate) fn is_retryable_conflict(e: &surrealdb::Error) -> bool {
    let msg = e.to_string();
    msg.contains("can be retried") || msg.to_lowercase().contains("conflict")
}
