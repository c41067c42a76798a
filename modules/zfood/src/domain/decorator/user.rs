use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::error::DomainError;
use crate::domain::model::{CreateUserRequest, Page, PageRequest, UpdateUserRequest, User};
use crate::domain::service::UserService;
use crate::domain::validation::UserValidatorFactory;

pub struct UserValidatorDecorator<S> {
    inner: S,
    validators: Arc<dyn UserValidatorFactory>,
}

impl<S: UserService> UserValidatorDecorator<S> {
    pub fn new(inner: S, validators: Arc<dyn UserValidatorFactory>) -> Self {
        Self { inner, validators }
    }
}

#[async_trait]
impl<S: UserService> UserService for UserValidatorDecorator<S> {
    async fn create(&self, req: CreateUserRequest) -> Result<User, DomainError> {
        self.validators
            .creation_validator()
            .ensure_valid(&req)
            .await
            .inspect_err(|e| debug!(error = %e, "User creation rejected"))?;
        self.inner.create(req).await
    }

    async fn update(&self, req: UpdateUserRequest) -> Result<(), DomainError> {
        self.validators
            .update_validator()
            .ensure_valid(&req)
            .await
            .inspect_err(|e| debug!(error = %e, "User update rejected"))?;
        self.inner.update(req).await
    }

    async fn delete(&self, id: &str) -> Result<(), DomainError> {
        self.validators.delete_validator().ensure_valid(id).await?;
        self.inner.delete(id).await
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>, DomainError> {
        self.inner.find_by_id(id).await
    }

    async fn get(&self, page: PageRequest) -> Result<Page<User>, DomainError> {
        self.validators.search_validator().ensure_valid(&page).await?;
        self.inner.get(page).await
    }
}
