use std::sync::Arc;

use axum::{
    extract::Path,
    http::{header, StatusCode},
    response::IntoResponse,
    Extension, Json,
};
use tracing::{info, warn};

use crate::api::rest::dto::{CreateUserRequestDto, ListQuery, UserDto, UserPageDto};
use crate::api::rest::error::map_domain_error;
use crate::api::rest::extract::{Instance, ProblemQuery, ValidatedJson};
use crate::api::rest::problem::{Problem, ProblemResponse};
use crate::api::rest::routes::Paging;
use crate::domain::error::DomainError;
use crate::domain::service::UserService;

type Svc = Extension<Arc<dyn UserService>>;

/// List users, ordered by id
#[utoipa::path(
    get,
    path = "/users",
    tag = "users",
    params(ListQuery),
    responses(
        (status = 200, body = UserPageDto),
        (status = 400, body = Problem, content_type = "application/problem+json"),
    )
)]
pub async fn list_users(
    Extension(svc): Svc,
    Extension(paging): Extension<Paging>,
    ProblemQuery(query): ProblemQuery<ListQuery>,
    instance: Instance,
) -> Result<Json<UserPageDto>, ProblemResponse> {
    info!("Listing users with query: {:?}", query);

    let page = svc
        .get(query.into_page_request(paging.default_take))
        .await
        .map_err(|e| map_domain_error(&e, &instance))?;
    Ok(Json(page.into()))
}

/// Get a user by id
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "users",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 200, body = UserDto),
        (status = 404, body = Problem, content_type = "application/problem+json"),
    )
)]
pub async fn get_user(
    Extension(svc): Svc,
    Path(id): Path<String>,
    instance: Instance,
) -> Result<Json<UserDto>, ProblemResponse> {
    info!("Getting user with id: {}", id);

    match svc.find_by_id(&id).await {
        Ok(Some(user)) => Ok(Json(user.into())),
        Ok(None) => Err(map_domain_error(
            &DomainError::not_found("User", id),
            &instance,
        )),
        Err(e) => Err(map_domain_error(&e, &instance)),
    }
}

/// Register a user. The body binds only when all fields are present and the email is well formed
#[utoipa::path(
    post,
    path = "/users",
    tag = "users",
    request_body = CreateUserRequestDto,
    responses(
        (status = 201, body = UserDto),
        (status = 400, body = Problem, content_type = "application/problem+json"),
    )
)]
pub async fn create_user(
    Extension(svc): Svc,
    instance: Instance,
    ValidatedJson(body): ValidatedJson<CreateUserRequestDto>,
) -> Result<impl IntoResponse, ProblemResponse> {
    info!("Creating user: {:?}", body);

    match svc.create(body.into()).await {
        Ok(user) => {
            let location = format!("/users/{}", user.id);
            Ok((
                StatusCode::CREATED,
                [(header::LOCATION, location)],
                Json(UserDto::from(user)),
            ))
        }
        Err(e) => {
            warn!("Failed to create user: {}", e);
            Err(map_domain_error(&e, &instance))
        }
    }
}

/// Replace a user
#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "users",
    params(("id" = String, Path, description = "User id")),
    request_body = CreateUserRequestDto,
    responses(
        (status = 204),
        (status = 400, body = Problem, content_type = "application/problem+json"),
        (status = 404, body = Problem, content_type = "application/problem+json"),
    )
)]
pub async fn update_user(
    Extension(svc): Svc,
    Path(id): Path<String>,
    instance: Instance,
    ValidatedJson(body): ValidatedJson<CreateUserRequestDto>,
) -> Result<StatusCode, ProblemResponse> {
    info!("Updating user {}", id);

    svc.update(body.into_update(id))
        .await
        .map(|()| StatusCode::NO_CONTENT)
        .map_err(|e| map_domain_error(&e, &instance))
}

/// Delete a user; deleting a missing id succeeds
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "users",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 204),
        (status = 400, body = Problem, content_type = "application/problem+json"),
    )
)]
pub async fn delete_user(
    Extension(svc): Svc,
    Path(id): Path<String>,
    instance: Instance,
) -> Result<StatusCode, ProblemResponse> {
    info!("Deleting user: {}", id);

    svc.delete(&id)
        .await
        .map(|()| StatusCode::NO_CONTENT)
        .map_err(|e| map_domain_error(&e, &instance))
}
