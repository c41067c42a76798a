use std::sync::Arc;

use axum::{
    extract::Path,
    http::{header, StatusCode},
    response::IntoResponse,
    Extension, Json,
};
use tracing::{info, warn};

use crate::api::rest::dto::{ListQuery, RestaurantDto, RestaurantPageDto, RestaurantRequestDto};
use crate::api::rest::error::map_domain_error;
use crate::api::rest::extract::{Instance, ProblemQuery, ValidatedJson};
use crate::api::rest::problem::{Problem, ProblemResponse};
use crate::api::rest::routes::Paging;
use crate::domain::error::DomainError;
use crate::domain::service::RestaurantService;

type Svc = Extension<Arc<dyn RestaurantService>>;

/// List restaurants ordered by id; `query` matches a name prefix
#[utoipa::path(
    get,
    path = "/restaurants",
    tag = "restaurants",
    params(ListQuery),
    responses(
        (status = 200, body = RestaurantPageDto),
        (status = 400, body = Problem, content_type = "application/problem+json"),
    )
)]
pub async fn list_restaurants(
    Extension(svc): Svc,
    Extension(paging): Extension<Paging>,
    ProblemQuery(query): ProblemQuery<ListQuery>,
    instance: Instance,
) -> Result<Json<RestaurantPageDto>, ProblemResponse> {
    info!("Listing restaurants with query: {:?}", query);

    let page = svc
        .get(query.into_page_request(paging.default_take))
        .await
        .map_err(|e| map_domain_error(&e, &instance))?;
    Ok(Json(page.into()))
}

/// Get a restaurant by id
#[utoipa::path(
    get,
    path = "/restaurants/{id}",
    tag = "restaurants",
    params(("id" = String, Path, description = "Restaurant id")),
    responses(
        (status = 200, body = RestaurantDto),
        (status = 404, body = Problem, content_type = "application/problem+json"),
    )
)]
pub async fn get_restaurant(
    Extension(svc): Svc,
    Path(id): Path<String>,
    instance: Instance,
) -> Result<Json<RestaurantDto>, ProblemResponse> {
    info!("Getting restaurant with id: {}", id);

    match svc.find_by_id(&id).await {
        Ok(Some(restaurant)) => Ok(Json(restaurant.into())),
        Ok(None) => Err(map_domain_error(
            &DomainError::not_found("Restaurant", id),
            &instance,
        )),
        Err(e) => Err(map_domain_error(&e, &instance)),
    }
}

/// Create a restaurant
#[utoipa::path(
    post,
    path = "/restaurants",
    tag = "restaurants",
    request_body = RestaurantRequestDto,
    responses(
        (status = 201, body = RestaurantDto),
        (status = 400, body = Problem, content_type = "application/problem+json"),
    )
)]
pub async fn create_restaurant(
    Extension(svc): Svc,
    instance: Instance,
    ValidatedJson(body): ValidatedJson<RestaurantRequestDto>,
) -> Result<impl IntoResponse, ProblemResponse> {
    info!("Creating restaurant: {:?}", body);

    match svc.create(body.into()).await {
        Ok(restaurant) => {
            let location = format!("/restaurants/{}", restaurant.id);
            Ok((
                StatusCode::CREATED,
                [(header::LOCATION, location)],
                Json(RestaurantDto::from(restaurant)),
            ))
        }
        Err(e) => {
            warn!("Failed to create restaurant: {}", e);
            Err(map_domain_error(&e, &instance))
        }
    }
}

/// Replace a restaurant
#[utoipa::path(
    put,
    path = "/restaurants/{id}",
    tag = "restaurants",
    params(("id" = String, Path, description = "Restaurant id")),
    request_body = RestaurantRequestDto,
    responses(
        (status = 204),
        (status = 400, body = Problem, content_type = "application/problem+json"),
        (status = 404, body = Problem, content_type = "application/problem+json"),
    )
)]
pub async fn update_restaurant(
    Extension(svc): Svc,
    Path(id): Path<String>,
    instance: Instance,
    ValidatedJson(body): ValidatedJson<RestaurantRequestDto>,
) -> Result<StatusCode, ProblemResponse> {
    info!("Updating restaurant {}", id);

    svc.update(body.into_update(id))
        .await
        .map(|()| StatusCode::NO_CONTENT)
        .map_err(|e| map_domain_error(&e, &instance))
}

/// Delete a restaurant; deleting a missing id succeeds
#[utoipa::path(
    delete,
    path = "/restaurants/{id}",
    tag = "restaurants",
    params(("id" = String, Path, description = "Restaurant id")),
    responses(
        (status = 204),
        (status = 400, body = Problem, content_type = "application/problem+json"),
    )
)]
pub async fn delete_restaurant(
    Extension(svc): Svc,
    Path(id): Path<String>,
    instance: Instance,
) -> Result<StatusCode, ProblemResponse> {
    info!("Deleting restaurant: {}", id);

    svc.delete(&id)
        .await
        .map(|()| StatusCode::NO_CONTENT)
        .map_err(|e| map_domain_error(&e, &instance))
}
