//! Error types for the Curio system.

use thiserror::Error;

use crate::lifecycle::Transition;
use crate::models::product::ProductStatus;

#[derive(Debug, Error)]
pub enum CurioError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    #[error("Entity already exists: {entity}")]
    AlreadyExists { entity: String },

    #[error("Authentication failed: {reason}")]
    AuthenticationFailed { reason: String },

    #[error("Forbidden: {reason}")]
    Forbidden { reason: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    /// Lifecycle guard failure. Carries the status the product was
    /// actually in and the operation that was attempted, so the caller
    /// can render a precise message. The product is left unmodified.
    #[error("Invalid transition: cannot {attempted} a product with status {current}")]
    InvalidTransition {
        current: ProductStatus,
        attempted: Transition,
    },

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type CurioResult<T> = Result<T, CurioError>;
