use std::sync::Arc;

use async_trait::async_trait;

use super::{
    lookup, max_length, require_field, require_id, BoxValidator, DeleteEntityValidator,
    SearchEntityValidator, ValidationFailure, Validator, ValidatorResult,
};
use crate::domain::model::{CreateRestaurantRequest, PageRequest, UpdateRestaurantRequest};
use crate::domain::repo::RestaurantRepository;

pub const MAX_NAME_LENGTH: usize = 200;
pub const MAX_ADDRESS_LENGTH: usize = 500;

/// Hands out the validator for each restaurant operation.
pub trait RestaurantValidatorFactory: Send + Sync {
    fn creation_validator(&self) -> BoxValidator<CreateRestaurantRequest>;
    fn update_validator(&self) -> BoxValidator<UpdateRestaurantRequest>;
    fn delete_validator(&self) -> BoxValidator<str>;
    fn search_validator(&self) -> BoxValidator<PageRequest>;
}

#[derive(Clone)]
pub struct DefaultRestaurantValidatorFactory {
    repo: Arc<dyn RestaurantRepository>,
    max_page_size: u32,
}

impl DefaultRestaurantValidatorFactory {
    pub fn new(repo: Arc<dyn RestaurantRepository>, max_page_size: u32) -> Self {
        Self {
            repo,
            max_page_size,
        }
    }
}

impl RestaurantValidatorFactory for DefaultRestaurantValidatorFactory {
    fn creation_validator(&self) -> BoxValidator<CreateRestaurantRequest> {
        Box::new(CreateRestaurantValidator {
            repo: self.repo.clone(),
        })
    }

    fn update_validator(&self) -> BoxValidator<UpdateRestaurantRequest> {
        Box::new(UpdateRestaurantValidator {
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

fn check_fields(name: &str, address: &str) -> ValidatorResult {
    require_field("name", name)?;
    require_field("address", address)?;
    max_length("name", name, MAX_NAME_LENGTH)?;
    max_length("address", address, MAX_ADDRESS_LENGTH)
}

pub struct CreateRestaurantValidator {
    repo: Arc<dyn RestaurantRepository>,
}

#[async_trait]
impl Validator<CreateRestaurantRequest> for CreateRestaurantValidator {
    async fn validate(&self, req: &CreateRestaurantRequest) -> ValidatorResult {
        check_fields(&req.name, &req.address)?;
        if lookup(self.repo.name_exists(&req.name, None).await)? {
            return Err(ValidationFailure::duplicate(
                "Restaurant",
                "name",
                req.name.clone(),
            ));
        }
        Ok(())
    }
}

pub struct UpdateRestaurantValidator {
    repo: Arc<dyn RestaurantRepository>,
}

#[async_trait]
impl Validator<UpdateRestaurantRequest> for UpdateRestaurantValidator {
    async fn validate(&self, req: &UpdateRestaurantRequest) -> ValidatorResult {
        require_id(&req.id)?;
        check_fields(&req.name, &req.address)?;
        if lookup(self.repo.find_by_id(&req.id).await)?.is_none() {
            return Err(ValidationFailure::not_found("Restaurant", req.id.clone()));
        }
        if lookup(self.repo.name_exists(&req.name, Some(&req.id)).await)? {
            return Err(ValidationFailure::duplicate(
                "Restaurant",
                "name",
                req.name.clone(),
            ));
        }
        Ok(())
    }
}
