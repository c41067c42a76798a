use std::sync::Arc;

use async_trait::async_trait;
use validator::ValidateEmail;

use super::{
    lookup, max_length, require_field, require_id, BoxValidator, DeleteEntityValidator,
    SearchEntityValidator, ValidationFailure, Validator, ValidatorResult,
};
use crate::domain::model::{CreateUserRequest, PageRequest, UpdateUserRequest};
use crate::domain::repo::UserRepository;

pub const MAX_NAME_LENGTH: usize = 200;

pub trait UserValidatorFactory: Send + Sync {
    fn creation_validator(&self) -> BoxValidator<CreateUserRequest>;
    fn update_validator(&self) -> BoxValidator<UpdateUserRequest>;
    fn delete_validator(&self) -> BoxValidator<str>;
    fn search_validator(&self) -> BoxValidator<PageRequest>;
}

#[derive(Clone)]
pub struct DefaultUserValidatorFactory {
    repo: Arc<dyn UserRepository>,
    max_page_size: u32,
}

impl DefaultUserValidatorFactory {
    pub fn new(repo: Arc<dyn UserRepository>, max_page_size: u32) -> Self {
        Self {
            repo,
            max_page_size,
        }
    }
}

impl UserValidatorFactory for DefaultUserValidatorFactory {
    fn creation_validator(&self) -> BoxValidator<CreateUserRequest> {
        Box::new(CreateUserValidator {
            repo: self.repo.clone(),
        })
    }

    fn update_validator(&self) -> BoxValidator<UpdateUserRequest> {
        Box::new(UpdateUserValidator {
            repo: self.repo.clone(),
        })
    }

    fn delete_validator(&self) -> BoxValidator<str> {
        Box::new(DeleteEntityValidator)
    }

    fn search_validator(&self) -> BoxValidator<PageRequest> {
        Box::new(SearchEntityValidator::new(self.max_page_size))
    }
}

fn check_fields(name: &str, email: &str, provider: &str, provider_id: &str) -> ValidatorResult {
    require_field("name", name)?;
    require_field("email", email)?;
    require_field("provider", provider)?;
    require_field("provider_id", provider_id)?;
    max_length("name", name, MAX_NAME_LENGTH)?;
    if !email.validate_email() {
        return Err(ValidationFailure::invalid_field(
            "email",
            format!("'{email}' is not a valid email address"),
        ));
    }
    Ok(())
}

pub struct CreateUserValidator {
    repo: Arc<dyn UserRepository>,
}

#[async_trait]
impl Validator<CreateUserRequest> for CreateUserValidator {
    async fn validate(&self, req: &CreateUserRequest) -> ValidatorResult {
        check_fields(&req.name, &req.email, &req.provider, &req.provider_id)?;
        if lookup(self.repo.email_exists(&req.email, None).await)? {
            return Err(ValidationFailure::duplicate(
                "User",
                "email",
                req.email.clone(),
            ));
        }
        Ok(())
    }
}

pub struct UpdateUserValidator {
    repo: Arc<dyn UserRepository>,
}

#[async_trait]
impl Validator<UpdateUserRequest> for UpdateUserValidator {
    async fn validate(&self, req: &UpdateUserRequest) -> ValidatorResult {
        require_id(&req.id)?;
        check_fields(&req.name, &req.email, &req.provider, &req.provider_id)?;
        if lookup(self.repo.find_by_id(&req.id).await)?.is_none() {
            return Err(ValidationFailure::not_found("User", req.id.clone()));
        }
        if lookup(self.repo.email_exists(&req.email, Some(&req.id)).await)? {
            return Err(ValidationFailure::duplicate(
                "User",
                "email",
                req.email.clone(),
            ));
        }
        Ok(())
    }
}
