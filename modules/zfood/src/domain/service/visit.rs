use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use super::{bounds, db_err, VisitService};
use crate::domain::error::DomainError;
use crate::domain::model::{
    CreateVisitRequest, NewVisit, Page, PageRequest, UpdateVisitRequest, Visit,
};
use crate::domain::repo::VisitRepository;

#[derive(Clone)]
pub struct VisitDomainService {
    repo: Arc<dyn VisitRepository>,
}

impl VisitDomainService {
    pub fn new(repo: Arc<dyn VisitRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl VisitService for VisitDomainService {
    #[instrument(
        name = "zfood.service.create_visit",
        skip(self, req),
        fields(restaurant_id = %req.restaurant_id, user_id = %req.user_id)
    )]
    async fn create(&self, req: CreateVisitRequest) -> Result<Visit, DomainError> {
        info!("Creating visit");

        let record = NewVisit {
            id: Uuid::new_v4().to_string(),
            restaurant_id: req.restaurant_id,
            user_id: req.user_id,
            visited_at: req.visited_at.unwrap_or_else(Utc::now),
            rating: req.rating,
            comment: req.comment,
        };

        let visit = self.repo.create_visit(record).await.map_err(db_err)?;

        info!("Successfully created visit with id={}", visit.id);
        Ok(visit)
    }

    #[instrument(name = "zfood.service.update_visit", skip(self, req), fields(visit_id = %req.id))]
    async fn update(&self, req: UpdateVisitRequest) -> Result<(), DomainError> {
        info!("Updating visit");

        let record = NewVisit {
            id: req.id,
            restaurant_id: req.restaurant_id,
            user_id: req.user_id,
            visited_at: req.visited_at,
            rating: req.rating,
            comment: req.comment,
        };

        if !self.repo.update_visit(&record).await.map_err(db_err)? {
            return Err(DomainError::not_found("Visit", record.id));
        }

        info!("Successfully updated visit");
        Ok(())
    }

    #[instrument(name = "zfood.service.delete_visit", skip(self), fields(visit_id = %id))]
    async fn delete(&self, id: &str) -> Result<(), DomainError> {
        info!("Deleting visit");
        let deleted = self.repo.delete_visit(id).await.map_err(db_err)?;
        debug!(deleted, "Delete finished");
        Ok(())
    }

    #[instrument(name = "zfood.service.find_visit", skip(self), fields(visit_id = %id))]
    async fn find_by_id(&self, id: &str) -> Result<Option<Visit>, DomainError> {
        debug!("Getting visit by id");
        self.repo.find_by_id(id).await.map_err(db_err)
    }

    #[instrument(name = "zfood.service.list_visits", skip(self, page), fields(skip = page.skip, take = page.take))]
    async fn get(&self, page: PageRequest) -> Result<Page<Visit>, DomainError> {
        debug!("Listing visits");

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

        debug!("Successfully listed {} visits", items.len());
        Ok(Page {
            items,
            skip,
            take,
            total,
        })
    }
}
