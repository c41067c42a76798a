use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use super::{bounds, db_err, write_err, UserService};
use crate::domain::error::DomainError;
use crate::domain::model::{CreateUserRequest, Page, PageRequest, UpdateUserRequest, User};
use crate::domain::repo::UserRepository;

#[derive(Clone)]
pub struct UserDomainService {
    repo: Arc<dyn UserRepository>,
}

impl UserDomainService {
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl UserService for UserDomainService {
    #[instrument(
        name = "zfood.service.create_user",
        skip(self, req),
        fields(email = %req.email, provider = %req.provider)
    )]
    async fn create(&self, req: CreateUserRequest) -> Result<User, DomainError> {
        info!("Creating new user");

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4().to_string(),
            name: req.name,
            email: req.email,
            provider: req.provider,
            provider_id: req.provider_id,
            created_at: now,
            updated_at: now,
        };

        self.repo
            .create_user(user.clone())
            .await
            .map_err(write_err("User", "email", &user.email))?;

        info!("Successfully created user with id={}", user.id);
        Ok(user)
    }

    #[instrument(name = "zfood.service.update_user", skip(self, req), fields(user_id = %req.id))]
    async fn update(&self, req: UpdateUserRequest) -> Result<(), DomainError> {
        info!("Updating user");

        let current = self
            .repo
            .find_by_id(&req.id)
            .await
            .map_err(db_err)?
            .ok_or_else(|| DomainError::not_found("User", req.id.clone()))?;

        let user = User {
            id: req.id,
            name: req.name,
            email: req.email,
            provider: req.provider,
            provider_id: req.provider_id,
            created_at: current.created_at,
            updated_at: Utc::now(),
        };

        let updated = self
            .repo
            .update_user(&user)
            .await
            .map_err(write_err("User", "email", &user.email))?;
        if !updated {
            return Err(DomainError::not_found("User", user.id));
        }

        info!("Successfully updated user");
        Ok(())
    }

    #[instrument(name = "zfood.service.delete_user", skip(self), fields(user_id = %id))]
    async fn delete(&self, id: &str) -> Result<(), DomainError> {
        info!("Deleting user");
        let deleted = self.repo.delete_user(id).await.map_err(db_err)?;
        debug!(deleted, "Delete finished");
        Ok(())
    }

    #[instrument(name = "zfood.service.find_user", skip(self), fields(user_id = %id))]
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, DomainError> {
        debug!("Getting user by id");
        self.repo.find_by_id(id).await.map_err(db_err)
    }

    #[instrument(name = "zfood.service.list_users", skip(self, page), fields(skip = page.skip, take = page.take))]
    async fn get(&self, page: PageRequest) -> Result<Page<User>, DomainError> {
        debug!("Listing users");

        let (skip, take) = bounds(&page);
        let items = self
            .repo
            .get(skip, take, page.filter())
            .await
            .map_err(db_err)?;
        let total = match page.count {
            true => Some(self.repo.get_total_count().await.map_err(db_err)?),
            false => None,
        };

        debug!("Successfully listed {} users", items.len());
        Ok(Page {
            items,
            skip,
            take,
            total,
        })
    }
}
