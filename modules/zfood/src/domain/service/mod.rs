//! Service traits and their undecorated domain implementations.
//!
//! Handlers talk to these traits; in the wired module every trait object is a
//! validation decorator around the domain service.

use async_trait::async_trait;

use crate::domain::error::DomainError;
use crate::domain::repo::UniqueViolation;
use crate::domain::validation::ValidationFailure;
use crate::domain::model::{
    CreateRestaurantRequest, CreateUserRequest, CreateVisitRequest, Page, PageRequest, Restaurant,
    UpdateRestaurantRequest, UpdateUserRequest, UpdateVisitRequest, User, Visit,
};

mod restaurant;
mod user;
mod visit;

pub use restaurant::RestaurantDomainService;
pub use user::UserDomainService;
pub use visit::VisitDomainService;

#[async_trait]
pub trait RestaurantService: Send + Sync {
    async fn create(&self, req: CreateRestaurantRequest) -> Result<Restaurant, DomainError>;
    async fn update(&self, req: UpdateRestaurantRequest) -> Result<(), DomainError>;
    async fn delete(&self, id: &str) -> Result<(), DomainError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Restaurant>, DomainError>;
    async fn get(&self, page: PageRequest) -> Result<Page<Restaurant>, DomainError>;
}

#[async_trait]
pub trait UserService: Send + Sync {
    async fn create(&self, req: CreateUserRequest) -> Result<User, DomainError>;
    async fn update(&self, req: UpdateUserRequest) -> Result<(), DomainError>;
    async fn delete(&self, id: &str) -> Result<(), DomainError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, DomainError>;
    async fn get(&self, page: PageRequest) -> Result<Page<User>, DomainError>;
}

#[async_trait]
pub trait VisitService: Send + Sync {
    async fn create(&self, req: CreateVisitRequest) -> Result<Visit, DomainError>;
    async fn update(&self, req: UpdateVisitRequest) -> Result<(), DomainError>;
    async fn delete(&self, id: &str) -> Result<(), DomainError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Visit>, DomainError>;
    async fn get(&self, page: PageRequest) -> Result<Page<Visit>, DomainError>;
}

pub(crate) fn db_err(e: anyhow::Error) -> DomainError {
    DomainError::database(format!("{e:#}"))
}

/// Like [`db_err`], but a write that lost a race on a unique index is a duplicate.
pub(crate) fn write_err<'a>(
    entity: &'static str,
    field: &'static str,
    value: &'a str,
) -> impl FnOnce(anyhow::Error) -> DomainError + 'a {
    move |e| {
        if e.chain().any(|cause| cause.is::<UniqueViolation>()) {
            ValidationFailure::duplicate(entity, field, value).into()
        } else {
            db_err(e)
        }
    }
}

/// Paging bounds as unsigned values; negatives clamp to zero.
pub(crate) fn bounds(page: &PageRequest) -> (u64, u64) {
    (
        u64::try_from(page.skip).unwrap_or(0),
        u64::try_from(page.take).unwrap_or(0),
    )
}
