use async_trait::async_trait;

use crate::domain::model::{NewVisit, Restaurant, User, Visit};

/// Raised by repository writes rejected by a unique index; services report it
/// as a duplicate rather than a storage failure.
#[derive(Debug, thiserror::Error)]
#[error("unique constraint violated: {0}")]
pub struct UniqueViolation(pub String);

/// Port for restaurant persistence.
/// Object-safe and async-friendly via `async_trait`.
#[async_trait]
pub trait RestaurantRepository: Send + Sync {
    /// Load a restaurant by id.
    async fn find_by_id(&self, id: &str) -> anyhow::Result<Option<Restaurant>>;
    /// Page-sized slice ordered by id; `query` filters by name prefix before paging.
    async fn get(&self, skip: u64, take: u64, query: Option<&str>)
        -> anyhow::Result<Vec<Restaurant>>;
    /// Total number of rows, ignoring paging and filters.
    async fn get_total_count(&self) -> anyhow::Result<u64>;
    /// Whether `name` is used by a restaurant other than `except_id`.
    async fn name_exists(&self, name: &str, except_id: Option<&str>) -> anyhow::Result<bool>;
    /// Insert a fully-formed restaurant.
    ///
    /// Service computes id/timestamps; repo persists.
    async fn create_restaurant(&self, restaurant: Restaurant) -> anyhow::Result<()>;
    /// Replace the mutable columns of `restaurant.id`. Returns true if a row was updated.
    async fn update_restaurant(&self, restaurant: &Restaurant) -> anyhow::Result<bool>;
    /// Delete by id. Returns true if a row was deleted.
    async fn delete_restaurant(&self, id: &str) -> anyhow::Result<bool>;
}

/// Port for user persistence.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> anyhow::Result<Option<User>>;
    /// Page-sized slice ordered by id; `query` filters by name prefix before paging.
    async fn get(&self, skip: u64, take: u64, query: Option<&str>) -> anyhow::Result<Vec<User>>;
    async fn get_total_count(&self) -> anyhow::Result<u64>;
    /// Whether `email` is used by a user other than `except_id`.
    async fn email_exists(&self, email: &str, except_id: Option<&str>) -> anyhow::Result<bool>;
    async fn create_user(&self, user: User) -> anyhow::Result<()>;
    /// Returns true if a row was updated.
    async fn update_user(&self, user: &User) -> anyhow::Result<bool>;
    /// Returns true if a row was deleted.
    async fn delete_user(&self, id: &str) -> anyhow::Result<bool>;
}

/// Port for visit persistence. Every visit read carries its restaurant and user.
#[async_trait]
pub trait VisitRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> anyhow::Result<Option<Visit>>;
    /// Page-sized slice ordered by id; `query` filters by id prefix before paging.
    async fn get(&self, skip: u64, take: u64, query: Option<&str>) -> anyhow::Result<Vec<Visit>>;
    async fn get_total_count(&self) -> anyhow::Result<u64>;
    /// Insert, then re-read with relations.
    async fn create_visit(&self, visit: NewVisit) -> anyhow::Result<Visit>;
    /// Replace the mutable columns of `visit.id`. Returns true if a row was updated.
    async fn update_visit(&self, visit: &NewVisit) -> anyhow::Result<bool>;
    /// Returns true if a row was deleted. A missing id is not an error.
    async fn delete_visit(&self, id: &str) -> anyhow::Result<bool>;
}
