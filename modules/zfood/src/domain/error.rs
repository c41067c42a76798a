use thiserror::Error;

use crate::domain::validation::ValidationFailure;

/// Domain-specific errors using thiserror
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Validation failed: {0}")]
    Validation(ValidationFailure),

    #[error("Database error: {message}")]
    Database { message: String },
}

impl DomainError {
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn validation(failure: ValidationFailure) -> Self {
        Self::Validation(failure)
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }
}

impl From<ValidationFailure> for DomainError {
    fn from(failure: ValidationFailure) -> Self {
        match failure {
            ValidationFailure::NotFound { entity, id } => Self::NotFound { entity, id },
            ValidationFailure::Unavailable { message } => Self::Database { message },
            other => Self::Validation(other),
        }
    }
}
