//! Single-purpose validators, one per operation, plus their factories.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::error::DomainError;
use crate::domain::model::PageRequest;

pub mod restaurant;
pub mod user;
pub mod visit;

pub use restaurant::{DefaultRestaurantValidatorFactory, RestaurantValidatorFactory};
pub use user::{DefaultUserValidatorFactory, UserValidatorFactory};
pub use visit::{DefaultVisitValidatorFactory, VisitLookups, VisitValidatorFactory};

/// The single cause of a failed validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationFailure {
    #[error("Value cannot be null or blank. (Parameter '{name}')")]
    MissingArgument { name: String },

    #[error("{field}: {message}")]
    InvalidField { field: String, message: String },

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("{entity} with {field} '{value}' already exists")]
    Duplicate {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Invalid page request: {message}")]
    InvalidPage { message: String },

    /// A lookup needed by the validator could not be performed.
    #[error("Validation lookup failed: {message}")]
    Unavailable { message: String },
}

impl ValidationFailure {
    pub fn missing_argument(name: impl Into<String>) -> Self {
        Self::MissingArgument { name: name.into() }
    }

    pub fn invalid_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidField {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn duplicate(entity: &'static str, field: &'static str, value: impl Into<String>) -> Self {
        Self::Duplicate {
            entity,
            field,
            value: value.into(),
        }
    }

    pub fn invalid_page(message: impl Into<String>) -> Self {
        Self::InvalidPage {
            message: message.into(),
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Field the failure is about, when there is one.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::MissingArgument { name } => Some(name),
            Self::InvalidField { field, .. } => Some(field),
            Self::Duplicate { field, .. } => Some(field),
            _ => None,
        }
    }
}

pub type ValidatorResult = Result<(), ValidationFailure>;

/// Inspects one input and reports success or a typed failure.
#[async_trait]
pub trait Validator<T: ?Sized + Sync>: Send + Sync {
    async fn validate(&self, input: &T) -> ValidatorResult;

    /// Same as [`Validator::validate`] but in the domain error space.
    async fn ensure_valid(&self, input: &T) -> Result<(), DomainError> {
        self.validate(input).await.map_err(DomainError::from)
    }
}

/// Boxed validator as handed out by the factories.
pub type BoxValidator<T> = Box<dyn Validator<T>>;

pub(crate) fn require_id(id: &str) -> ValidatorResult {
    require_field("id", id)
}

pub(crate) fn require_field(name: &str, value: &str) -> ValidatorResult {
    if value.trim().is_empty() {
        return Err(ValidationFailure::missing_argument(name));
    }
    Ok(())
}

pub(crate) fn max_length(field: &str, value: &str, max: usize) -> ValidatorResult {
    let len = value.chars().count();
    if len > max {
        return Err(ValidationFailure::invalid_field(
            field,
            format!("too long: {len} characters (max: {max})"),
        ));
    }
    Ok(())
}

/// Lookup errors inside validators become `Unavailable`.
pub(crate) fn lookup<T>(result: anyhow::Result<T>) -> Result<T, ValidationFailure> {
    result.map_err(|e| ValidationFailure::unavailable(format!("{e:#}")))
}

/// Delete-by-id validation: the id must be non-blank. Existence is not checked.
#[derive(Debug, Default, Clone, Copy)]
pub struct DeleteEntityValidator;

#[async_trait]
impl Validator<str> for DeleteEntityValidator {
    async fn validate(&self, id: &str) -> ValidatorResult {
        require_id(id)
    }
}

/// Pagination bounds: `skip >= 0` and `1 <= take <= max_take`.
#[derive(Debug, Clone, Copy)]
pub struct SearchEntityValidator {
    pub max_take: u32,
}

impl SearchEntityValidator {
    pub fn new(max_take: u32) -> Self {
        Self { max_take }
    }
}

#[async_trait]
impl Validator<PageRequest> for SearchEntityValidator {
    async fn validate(&self, page: &PageRequest) -> ValidatorResult {
        if page.skip < 0 {
            return Err(ValidationFailure::invalid_page(format!(
                "skip must be >= 0, got {}",
                page.skip
            )));
        }
        if page.take < 1 || page.take > i64::from(self.max_take) {
            return Err(ValidationFailure::invalid_page(format!(
                "take must be between 1 and {}, got {}",
                self.max_take, page.take
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(skip: i64, take: i64) -> PageRequest {
        PageRequest {
            skip,
            take,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn delete_validator_rejects_blank_ids_only() {
        let v = DeleteEntityValidator;
        for id in ["", " ", "\t\n"] {
            assert_eq!(
                v.validate(id).await,
                Err(ValidationFailure::missing_argument("id"))
            );
        }
        assert!(v.validate("does-not-exist").await.is_ok());
    }

    #[tokio::test]
    async fn missing_argument_message_names_the_parameter() {
        let err = DeleteEntityValidator.validate("  ").await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Value cannot be null or blank. (Parameter 'id')"
        );
    }

    #[tokio::test]
    async fn search_validator_bounds() {
        let v = SearchEntityValidator::new(100);
        assert!(v.validate(&page(0, 1)).await.is_ok());
        assert!(v.validate(&page(5, 100)).await.is_ok());
        assert!(matches!(
            v.validate(&page(-1, 10)).await,
            Err(ValidationFailure::InvalidPage { .. })
        ));
        assert!(v.validate(&page(0, 0)).await.is_err());
        assert!(v.validate(&page(0, 101)).await.is_err());
    }

    #[tokio::test]
    async fn ensure_valid_maps_into_domain_error() {
        let err = DeleteEntityValidator.ensure_valid("").await.unwrap_err();
        assert!(matches!(
            err,
            DomainError::Validation(ValidationFailure::MissingArgument { .. })
        ));
    }

    #[test]
    fn max_length_counts_chars() {
        assert!(max_length("name", "ééé", 3).is_ok());
        assert!(max_length("name", "éééé", 3).is_err());
    }
}
