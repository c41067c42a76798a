use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::error::DomainError;
use crate::domain::model::{CreateVisitRequest, Page, PageRequest, UpdateVisitRequest, Visit};
use crate::domain::service::VisitService;
use crate::domain::validation::VisitValidatorFactory;

pub struct VisitValidatorDecorator<S> {
    inner: S,
    validators: Arc<dyn VisitValidatorFactory>,
}

impl<S: VisitService> VisitValidatorDecorator<S> {
    pub fn new(inner: S, validators: Arc<dyn VisitValidatorFactory>) -> Self {
        Self { inner, validators }
    }
}

#[async_trait]
impl<S: VisitService> VisitService for VisitValidatorDecorator<S> {
    async fn create(&self, req: CreateVisitRequest) -> Result<Visit, DomainError> {
        self.validators
            .creation_validator()
            .ensure_valid(&req)
            .await
            .inspect_err(|e| debug!(error = %e, "Visit creation rejected"))?;
        self.inner.create(req).await
    }

    async fn update(&self, req: UpdateVisitRequest) -> Result<(), DomainError> {
        self.validators
            .update_validator()
            .ensure_valid(&req)
            .await
            .inspect_err(|e| debug!(error = %e, "Visit update rejected"))?;
        self.inner.update(req).await
    }

    async fn delete(&self, id: &str) -> Result<(), DomainError> {
        self.validators.delete_validator().ensure_valid(id).await?;
        self.inner.delete(id).await
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Visit>, DomainError> {
        self.inner.find_by_id(id).await
    }

    async fn get(&self, page: PageRequest) -> Result<Page<Visit>, DomainError> {
        self.validators.search_validator().ensure_valid(&page).await?;
        self.inner.get(page).await
    }
}
