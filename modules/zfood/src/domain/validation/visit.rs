use std::sync::Arc;

use async_trait::async_trait;

use super::{
    lookup, max_length, require_field, require_id, BoxValidator, DeleteEntityValidator,
    SearchEntityValidator, ValidationFailure, Validator, ValidatorResult,
};
use crate::domain::model::{CreateVisitRequest, PageRequest, UpdateVisitRequest};
use crate::domain::repo::{RestaurantRepository, UserRepository, VisitRepository};

pub const MAX_COMMENT_LENGTH: usize = 1000;
pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;

pub trait VisitValidatorFactory: Send + Sync {
    fn creation_validator(&self) -> BoxValidator<CreateVisitRequest>;
    fn update_validator(&self) -> BoxValidator<UpdateVisitRequest>;
    fn delete_validator(&self) -> BoxValidator<str>;
    fn search_validator(&self) -> BoxValidator<PageRequest>;
}

/// Repositories a visit validator consults.
#[derive(Clone)]
pub struct VisitLookups {
    pub visits: Arc<dyn VisitRepository>,
    pub restaurants: Arc<dyn RestaurantRepository>,
    pub users: Arc<dyn UserRepository>,
}

#[derive(Clone)]
pub struct DefaultVisitValidatorFactory {
    lookups: VisitLookups,
    max_page_size: u32,
}

impl DefaultVisitValidatorFactory {
    pub fn new(lookups: VisitLookups, max_page_size: u32) -> Self {
        Self {
            lookups,
            max_page_size,
        }
    }
}

impl VisitValidatorFactory for DefaultVisitValidatorFactory {
    fn creation_validator(&self) -> BoxValidator<CreateVisitRequest> {
        Box::new(CreateVisitValidator {
            lookups: self.lookups.clone(),
        })
    }

    fn update_validator(&self) -> BoxValidator<UpdateVisitRequest> {
        Box::new(UpdateVisitValidator {
            lookups: self.lookups.clone(),
        })
    }

    fn delete_validator(&self) -> BoxValidator<str> {
        Box::new(DeleteEntityValidator)
    }

    fn search_validator(&self) -> BoxValidator<PageRequest> {
        Box::new(SearchEntityValidator::new(self.max_page_size))
    }
}

fn check_fields(
    restaurant_id: &str,
    user_id: &str,
    rating: Option<i32>,
    comment: Option<&str>,
) -> ValidatorResult {
    require_field("restaurant_id", restaurant_id)?;
    require_field("user_id", user_id)?;
    if let Some(rating) = rating {
        if !(MIN_RATING..=MAX_RATING).contains(&rating) {
            return Err(ValidationFailure::invalid_field(
                "rating",
                format!("must be between {MIN_RATING} and {MAX_RATING}, got {rating}"),
            ));
        }
    }
    if let Some(comment) = comment {
        max_length("comment", comment, MAX_COMMENT_LENGTH)?;
    }
    Ok(())
}

impl VisitLookups {
    async fn check_references(&self, restaurant_id: &str, user_id: &str) -> ValidatorResult {
        if lookup(self.restaurants.find_by_id(restaurant_id).await)?.is_none() {
            return Err(ValidationFailure::invalid_field(
                "restaurant_id",
                format!("restaurant '{restaurant_id}' does not exist"),
            ));
        }
        if lookup(self.users.find_by_id(user_id).await)?.is_none() {
            return Err(ValidationFailure::invalid_field(
                "user_id",
                format!("user '{user_id}' does not exist"),
            ));
        }
        Ok(())
    }
}

pub struct CreateVisitValidator {
    lookups: VisitLookups,
}

#[async_trait]
impl Validator<CreateVisitRequest> for CreateVisitValidator {
    async fn validate(&self, req: &CreateVisitRequest) -> ValidatorResult {
        check_fields(
            &req.restaurant_id,
            &req.user_id,
            req.rating,
            req.comment.as_deref(),
        )?;
        self.lookups
            .check_references(&req.restaurant_id, &req.user_id)
            .await
    }
}

pub struct UpdateVisitValidator {
    lookups: VisitLookups,
}

#[async_trait]
impl Validator<UpdateVisitRequest> for UpdateVisitValidator {
    async fn validate(&self, req: &UpdateVisitRequest) -> ValidatorResult {
        require_id(&req.id)?;
        check_fields(
            &req.restaurant_id,
            &req.user_id,
            req.rating,
            req.comment.as_deref(),
        )?;
        if lookup(self.lookups.visits.find_by_id(&req.id).await)?.is_none() {
            return Err(ValidationFailure::not_found("Visit", req.id.clone()));
        }
        self.lookups
            .check_references(&req.restaurant_id, &req.user_id)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_and_comment_rules() {
        assert!(check_fields("r", "u", None, None).is_ok());
        assert!(check_fields("r", "u", Some(1), Some("fine")).is_ok());
        assert!(check_fields("r", "u", Some(5), None).is_ok());
        assert!(check_fields("r", "u", Some(0), None).is_err());
        assert!(check_fields("r", "u", Some(6), None).is_err());

        let long = "x".repeat(MAX_COMMENT_LENGTH + 1);
        assert!(check_fields("r", "u", None, Some(&long)).is_err());

        assert_eq!(
            check_fields(" ", "u", None, None),
            Err(ValidationFailure::missing_argument("restaurant_id"))
        );
    }
}
