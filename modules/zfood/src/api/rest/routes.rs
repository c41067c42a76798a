use std::sync::Arc;

use axum::{routing::get, Extension, Json, Router};
use utoipa::OpenApi;

use super::handlers::{restaurants, users, visits};
use super::openapi::ApiDoc;
use crate::domain::service::{RestaurantService, UserService, VisitService};

/// Paging defaults applied by list handlers.
#[derive(Debug, Clone, Copy)]
pub struct Paging {
    pub default_take: u32,
}

/// The decorated services the handlers call.
#[derive(Clone)]
pub struct Services {
    pub restaurants: Arc<dyn RestaurantService>,
    pub visits: Arc<dyn VisitService>,
    pub users: Arc<dyn UserService>,
}

/// Register every zfood route on `router`, plus `/openapi.json`.
pub fn register_routes(router: Router, services: Services, paging: Paging) -> Router {
    let restaurants = Router::new()
        .route(
            "/restaurants",
            get(restaurants::list_restaurants).post(restaurants::create_restaurant),
        )
        .route(
            "/restaurants/{id}",
            get(restaurants::get_restaurant)
                .put(restaurants::update_restaurant)
                .delete(restaurants::delete_restaurant),
        )
        .layer(Extension(services.restaurants));

    let visits = Router::new()
        .route(
            "/visits",
            get(visits::list_visits).post(visits::create_visit),
        )
        .route(
            "/visits/{id}",
            get(visits::get_visit)
                .put(visits::update_visit)
                .delete(visits::delete_visit),
        )
        .layer(Extension(services.visits));

    let users = Router::new()
        .route("/users", get(users::list_users).post(users::create_user))
        .route(
            "/users/{id}",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .layer(Extension(services.users));

    router
        .merge(restaurants)
        .merge(visits)
        .merge(users)
        .route(
            "/openapi.json",
            get(|| async { Json(ApiDoc::openapi()) }),
        )
        .layer(Extension(paging))
}
