use std::sync::Arc;

use axum::{
    extract::Path,
    http::{header, StatusCode},
    response::IntoResponse,
    Extension, Json,
};
use tracing::{info, warn};

use crate::api::rest::dto::{CreateVisitDto, ListQuery, UpdateVisitDto, VisitDto, VisitPageDto};
use crate::api::rest::error::map_domain_error;
use crate::api::rest::extract::{Instance, ProblemQuery, ValidatedJson};
use crate::api::rest::problem::{Problem, ProblemResponse};
use crate::api::rest::routes::Paging;
use crate::domain::error::DomainError;
use crate::domain::service::VisitService;

type Svc = Extension<Arc<dyn VisitService>>;

/// List visits with their restaurant and user; `query` matches an id prefix
#[utoipa::path(
    get,
    path = "/visits",
    tag = "visits",
    params(ListQuery),
    responses(
        (status = 200, body = VisitPageDto),
        (status = 400, body = Problem, content_type = "application/problem+json"),
    )
)]
pub async fn list_visits(
    Extension(svc): Svc,
    Extension(paging): Extension<Paging>,
    ProblemQuery(query): ProblemQuery<ListQuery>,
    instance: Instance,
) -> Result<Json<VisitPageDto>, ProblemResponse> {
    info!("Listing visits with query: {:?}", query);

    let page = svc
        .get(query.into_page_request(paging.default_take))
        .await
        .map_err(|e| map_domain_error(&e, &instance))?;
    Ok(Json(page.into()))
}

/// Get a visit by id
#[utoipa::path(
    get,
    path = "/visits/{id}",
    tag = "visits",
    params(("id" = String, Path, description = "Visit id")),
    responses(
        (status = 200, body = VisitDto),
        (status = 404, body = Problem, content_type = "application/problem+json"),
    )
)]
pub async fn get_visit(
    Extension(svc): Svc,
    Path(id): Path<String>,
    instance: Instance,
) -> Result<Json<VisitDto>, ProblemResponse> {
    info!("Getting visit with id: {}", id);

    match svc.find_by_id(&id).await {
        Ok(Some(visit)) => Ok(Json(visit.into())),
        Ok(None) => Err(map_domain_error(
            &DomainError::not_found("Visit", id),
            &instance,
        )),
        Err(e) => Err(map_domain_error(&e, &instance)),
    }
}

/// Record a visit. `visited_at` defaults to now
#[utoipa::path(
    post,
    path = "/visits",
    tag = "visits",
    request_body = CreateVisitDto,
    responses(
        (status = 201, body = VisitDto),
        (status = 400, body = Problem, content_type = "application/problem+json"),
    )
)]
pub async fn create_visit(
    Extension(svc): Svc,
    instance: Instance,
    ValidatedJson(body): ValidatedJson<CreateVisitDto>,
) -> Result<impl IntoResponse, ProblemResponse> {
    info!("Creating visit: {:?}", body);

    match svc.create(body.into()).await {
        Ok(visit) => {
            let location = format!("/visits/{}", visit.id);
            Ok((
                StatusCode::CREATED,
                [(header::LOCATION, location)],
                Json(VisitDto::from(visit)),
            ))
        }
        Err(e) => {
            warn!("Failed to create visit: {}", e);
            Err(map_domain_error(&e, &instance))
        }
    }
}

/// Replace a visit
#[utoipa::path(
    put,
    path = "/visits/{id}",
    tag = "visits",
    params(("id" = String, Path, description = "Visit id")),
    request_body = UpdateVisitDto,
    responses(
        (status = 204),
        (status = 400, body = Problem, content_type = "application/problem+json"),
        (status = 404, body = Problem, content_type = "application/problem+json"),
    )
)]
pub async fn update_visit(
    Extension(svc): Svc,
    Path(id): Path<String>,
    instance: Instance,
    ValidatedJson(body): ValidatedJson<UpdateVisitDto>,
) -> Result<StatusCode, ProblemResponse> {
    info!("Updating visit {}", id);

    svc.update(body.into_update(id))
        .await
        .map(|()| StatusCode::NO_CONTENT)
        .map_err(|e| map_domain_error(&e, &instance))
}

/// Delete a visit; deleting a missing id succeeds
#[utoipa::path(
    delete,
    path = "/visits/{id}",
    tag = "visits",
    params(("id" = String, Path, description = "Visit id")),
    responses(
        (status = 204),
        (status = 400, body = Problem, content_type = "application/problem+json"),
    )
)]
pub async fn delete_visit(
    Extension(svc): Svc,
    Path(id): Path<String>,
    instance: Instance,
) -> Result<StatusCode, ProblemResponse> {
    info!("Deleting visit: {}", id);

    svc.delete(&id)
        .await
        .map(|()| StatusCode::NO_CONTENT)
        .map_err(|e| map_domain_error(&e, &instance))
}
