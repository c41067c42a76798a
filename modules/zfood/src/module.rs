use std::sync::Arc;

use axum::Router;
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tracing::info;

use crate::api::rest::routes::{register_routes, Paging, Services};
use crate::config::ZFoodConfig;
use crate::domain::decorator::{
    RestaurantValidatorDecorator, UserValidatorDecorator, VisitValidatorDecorator,
};
use crate::domain::repo::{RestaurantRepository, UserRepository, VisitRepository};
use crate::domain::service::{RestaurantDomainService, UserDomainService, VisitDomainService};
use crate::domain::validation::{
    DefaultRestaurantValidatorFactory, DefaultUserValidatorFactory, DefaultVisitValidatorFactory,
    VisitLookups,
};
use crate::infra::storage::{
    Migrator, SeaOrmRestaurantRepository, SeaOrmUserRepository, SeaOrmVisitRepository,
};

/// The wired zfood module: repositories, validated services and REST routes.
#[derive(Clone)]
pub struct ZFood {
    services: Services,
    config: ZFoodConfig,
}

impl ZFood {
    /// Apply pending schema migrations.
    pub async fn migrate(conn: &DatabaseConnection) -> anyhow::Result<()> {
        info!("zfood: running migrations");
        Migrator::up(conn, None).await?;
        info!("zfood: migrations completed");
        Ok(())
    }

    /// Wire repositories into domain services and wrap each in its validation decorator.
    pub fn new(conn: DatabaseConnection, config: ZFoodConfig) -> Self {
        let restaurants: Arc<dyn RestaurantRepository> =
            Arc::new(SeaOrmRestaurantRepository::new(conn.clone()));
        let users: Arc<dyn UserRepository> = Arc::new(SeaOrmUserRepository::new(conn.clone()));
        let visits: Arc<dyn VisitRepository> = Arc::new(SeaOrmVisitRepository::new(conn));

        let max = config.max_page_size;
        let services = Services {
            restaurants: Arc::new(RestaurantValidatorDecorator::new(
                RestaurantDomainService::new(restaurants.clone()),
                Arc::new(DefaultRestaurantValidatorFactory::new(
                    restaurants.clone(),
                    max,
                )),
            )),
            users: Arc::new(UserValidatorDecorator::new(
                UserDomainService::new(users.clone()),
                Arc::new(DefaultUserValidatorFactory::new(users.clone(), max)),
            )),
            visits: Arc::new(VisitValidatorDecorator::new(
                VisitDomainService::new(visits.clone()),
                Arc::new(DefaultVisitValidatorFactory::new(
                    VisitLookups {
                        visits,
                        restaurants,
                        users,
                    },
                    max,
                )),
            )),
        };

        info!(
            default_page_size = config.default_page_size,
            max_page_size = config.max_page_size,
            "zfood: services wired"
        );
        Self { services, config }
    }

    pub fn services(&self) -> &Services {
        &self.services
    }

    /// REST routes for restaurants, visits and users plus `/openapi.json`.
    pub fn router(&self) -> Router {
        register_routes(
            Router::new(),
            self.services.clone(),
            Paging {
                default_take: self
                    .config
                    .default_page_size
                    .min(self.config.max_page_size),
            },
        )
    }
}
