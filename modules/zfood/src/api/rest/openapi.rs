use utoipa::OpenApi;

use super::dto::{
    CreateUserRequestDto, CreateVisitDto, RestaurantDto, RestaurantPageDto, RestaurantRequestDto,
    UpdateVisitDto, UserDto, UserPageDto, VisitDto, VisitPageDto,
};
use super::handlers::{restaurants, users, visits};
use super::problem::{FieldViolation, Problem};

#[derive(OpenApi)]
#[openapi(
    info(title = "ZFood API", description = "Restaurants, visits and users"),
    paths(
        restaurants::list_restaurants,
        restaurants::get_restaurant,
        restaurants::create_restaurant,
        restaurants::update_restaurant,
        restaurants::delete_restaurant,
        visits::list_visits,
        visits::get_visit,
        visits::create_visit,
        visits::update_visit,
        visits::delete_visit,
        users::list_users,
        users::get_user,
        users::create_user,
        users::update_user,
        users::delete_user,
    ),
    components(schemas(
        RestaurantDto,
        RestaurantRequestDto,
        RestaurantPageDto,
        VisitDto,
        CreateVisitDto,
        UpdateVisitDto,
        VisitPageDto,
        UserDto,
        CreateUserRequestDto,
        UserPageDto,
        Problem,
        FieldViolation,
    )),
    tags(
        (name = "restaurants"),
        (name = "visits"),
        (name = "users"),
    )
)]
pub struct ApiDoc;
