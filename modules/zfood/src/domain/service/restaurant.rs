use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use super::{bounds, db_err, write_err, RestaurantService};
use crate::domain::error::DomainError;
use crate::domain::model::{
    CreateRestaurantRequest, Page, PageRequest, Restaurant, UpdateRestaurantRequest,
};
use crate::domain::repo::RestaurantRepository;

/// Restaurant operations without validation.
/// Depends only on the repository port, not on infra types.
#[derive(Clone)]
pub struct RestaurantDomainService {
    repo: Arc<dyn RestaurantRepository>,
}

impl RestaurantDomainService {
    pub fn new(repo: Arc<dyn RestaurantRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl RestaurantService for RestaurantDomainService {
    #[instrument(
        name = "zfood.service.create_restaurant",
        skip(self, req),
        fields(name = %req.name)
    )]
    async fn create(&self, req: CreateRestaurantRequest) -> Result<Restaurant, DomainError> {
        info!("Creating restaurant");

        let now = Utc::now();
        let restaurant = Restaurant {
            id: Uuid::new_v4().to_string(),
            name: req.name,
            address: req.address,
            phone: req.phone,
            created_at: now,
            updated_at: now,
        };

        self.repo
            .create_restaurant(restaurant.clone())
            .await
            .map_err(write_err("Restaurant", "name", &restaurant.name))?;

        info!("Successfully created restaurant with id={}", restaurant.id);
        Ok(restaurant)
    }

    #[instrument(
        name = "zfood.service.update_restaurant",
        skip(self, req),
        fields(restaurant_id = %req.id)
    )]
    async fn update(&self, req: UpdateRestaurantRequest) -> Result<(), DomainError> {
        info!("Updating restaurant");

        let current = self
            .repo
            .find_by_id(&req.id)
            .await
            .map_err(db_err)?
            .ok_or_else(|| DomainError::not_found("Restaurant", req.id.clone()))?;

        let restaurant = Restaurant {
            id: req.id,
            name: req.name,
            address: req.address,
            phone: req.phone,
            created_at: current.created_at,
            updated_at: Utc::now(),
        };

        let updated = self
            .repo
            .update_restaurant(&restaurant)
            .await
            .map_err(write_err("Restaurant", "name", &restaurant.name))?;
        if !updated {
            return Err(DomainError::not_found("Restaurant", restaurant.id));
        }

        info!("Successfully updated restaurant");
        Ok(())
    }

    #[instrument(name = "zfood.service.delete_restaurant", skip(self), fields(restaurant_id = %id))]
    async fn delete(&self, id: &str) -> Result<(), DomainError> {
        info!("Deleting restaurant");

        let deleted = self.repo.delete_restaurant(id).await.map_err(db_err)?;
        if deleted {
            info!("Successfully deleted restaurant");
        } else {
            debug!("No restaurant to delete");
        }
        Ok(())
    }

    #[instrument(name = "zfood.service.find_restaurant", skip(self), fields(restaurant_id = %id))]
    async fn find_by_id(&self, id: &str) -> Result<Option<Restaurant>, DomainError> {
        debug!("Getting restaurant by id");
        self.repo.find_by_id(id).await.map_err(db_err)
    }

    #[instrument(name = "zfood.service.list_restaurants", skip(self, page), fields(skip = page.skip, take = page.take))]
    async fn get(&self, page: PageRequest) -> Result<Page<Restaurant>, DomainError> {
        debug!("Listing restaurants");

        let (skip, take) = bounds(&page);
        let items = self
            .repo
            .get(skip, take, page.filter())
            .await
            .map_err(db_err)?;
        let total = if page.count {
            Some(self.repo.get_total_count().await.map_err(db_err)?)
        } else {
            None
        };

        debug!("Successfully listed {} restaurants", items.len());
        Ok(Page {
            items,
            skip,
            take,
            total,
        })
    }
}
