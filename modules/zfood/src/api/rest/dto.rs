use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

use crate::domain::model::{
    CreateRestaurantRequest, CreateUserRequest, CreateVisitRequest, Page, PageRequest, Restaurant,
    UpdateRestaurantRequest, UpdateUserRequest, UpdateVisitRequest, User, Visit,
};

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("must not be blank".into()));
    }
    Ok(())
}

/// Query parameters shared by every list endpoint.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// Page size; defaults to the configured page size.
    pub take: Option<i64>,
    /// Number of entities to skip; defaults to 0.
    pub skip: Option<i64>,
    /// Also return the total number of entities.
    pub count: Option<bool>,
    /// Prefix filter.
    pub query: Option<String>,
}

impl ListQuery {
    pub fn into_page_request(self, default_take: u32) -> PageRequest {
        PageRequest {
            skip: self.skip.unwrap_or(0),
            take: self.take.unwrap_or(i64::from(default_take)),
            count: self.count.unwrap_or(false),
            query: self.query,
        }
    }
}

// ---- restaurants ----

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RestaurantDto {
    pub id: String,
    pub name: String,
    pub address: String,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body for both creating and replacing a restaurant.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct RestaurantRequestDto {
    #[validate(custom(function = "not_blank"), length(max = 200))]
    pub name: String,
    #[validate(custom(function = "not_blank"), length(max = 500))]
    pub address: String,
    #[serde(default)]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RestaurantPageDto {
    pub items: Vec<RestaurantDto>,
    pub skip: u64,
    pub take: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
}

impl From<Restaurant> for RestaurantDto {
    fn from(r: Restaurant) -> Self {
        Self {
            id: r.id,
            name: r.name,
            address: r.address,
            phone: r.phone,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

impl From<Page<Restaurant>> for RestaurantPageDto {
    fn from(page: Page<Restaurant>) -> Self {
        let page = page.map_items(RestaurantDto::from);
        Self {
            items: page.items,
            skip: page.skip,
            take: page.take,
            total: page.total,
        }
    }
}

impl From<RestaurantRequestDto> for CreateRestaurantRequest {
    fn from(dto: RestaurantRequestDto) -> Self {
        Self {
            name: dto.name,
            address: dto.address,
            phone: dto.phone,
        }
    }
}

impl RestaurantRequestDto {
    pub fn into_update(self, id: String) -> UpdateRestaurantRequest {
        UpdateRestaurantRequest {
            id,
            name: self.name,
            address: self.address,
            phone: self.phone,
        }
    }
}

// ---- users ----

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserDto {
    pub id: String,
    pub name: String,
    pub email: String,
    pub provider: String,
    pub provider_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body for both creating and replacing a user. All fields are required.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct CreateUserRequestDto {
    #[validate(custom(function = "not_blank"), length(max = 200))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(custom(function = "not_blank"))]
    pub provider: String,
    #[validate(custom(function = "not_blank"))]
    pub provider_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserPageDto {
    pub items: Vec<UserDto>,
    pub skip: u64,
    pub take: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
}

impl From<User> for UserDto {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            name: u.name,
            email: u.email,
            provider: u.provider,
            provider_id: u.provider_id,
            created_at: u.created_at,
            updated_at: u.updated_at,
        }
    }
}

impl From<Page<User>> for UserPageDto {
    fn from(page: Page<User>) -> Self {
        let page = page.map_items(UserDto::from);
        Self {
            items: page.items,
            skip: page.skip,
            take: page.take,
            total: page.total,
        }
    }
}

impl From<CreateUserRequestDto> for CreateUserRequest {
    fn from(dto: CreateUserRequestDto) -> Self {
        Self {
            name: dto.name,
            email: dto.email,
            provider: dto.provider,
            provider_id: dto.provider_id,
        }
    }
}

impl CreateUserRequestDto {
    pub fn into_update(self, id: String) -> UpdateUserRequest {
        UpdateUserRequest {
            id,
            name: self.name,
            email: self.email,
            provider: self.provider,
            provider_id: self.provider_id,
        }
    }
}

// ---- visits ----

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VisitDto {
    pub id: String,
    pub restaurant: RestaurantDto,
    pub user: UserDto,
    pub visited_at: DateTime<Utc>,
    pub rating: Option<i32>,
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct CreateVisitDto {
    #[validate(custom(function = "not_blank"))]
    pub restaurant_id: String,
    #[validate(custom(function = "not_blank"))]
    pub user_id: String,
    /// Defaults to now.
    #[serde(default)]
    pub visited_at: Option<DateTime<Utc>>,
    #[serde(default)]
    #[validate(range(min = 1, max = 5))]
    pub rating: Option<i32>,
    #[serde(default)]
    #[validate(length(max = 1000))]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct UpdateVisitDto {
    #[validate(custom(function = "not_blank"))]
    pub restaurant_id: String,
    #[validate(custom(function = "not_blank"))]
    pub user_id: String,
    pub visited_at: DateTime<Utc>,
    #[serde(default)]
    #[validate(range(min = 1, max = 5))]
    pub rating: Option<i32>,
    #[serde(default)]
    #[validate(length(max = 1000))]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VisitPageDto {
    pub items: Vec<VisitDto>,
    pub skip: u64,
    pub take: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
}

impl From<Visit> for VisitDto {
    fn from(v: Visit) -> Self {
        Self {
            id: v.id,
            restaurant: v.restaurant.into(),
            user: v.user.into(),
            visited_at: v.visited_at,
            rating: v.rating,
            comment: v.comment,
        }
    }
}

impl From<Page<Visit>> for VisitPageDto {
    fn from(page: Page<Visit>) -> Self {
        let page = page.map_items(VisitDto::from);
        Self {
            items: page.items,
            skip: page.skip,
            take: page.take,
            total: page.total,
        }
    }
}

impl From<CreateVisitDto> for CreateVisitRequest {
    fn from(dto: CreateVisitDto) -> Self {
        Self {
            restaurant_id: dto.restaurant_id,
            user_id: dto.user_id,
            visited_at: dto.visited_at,
            rating: dto.rating,
            comment: dto.comment,
        }
    }
}

impl UpdateVisitDto {
    pub fn into_update(self, id: String) -> UpdateVisitRequest {
        UpdateVisitRequest {
            id,
            restaurant_id: self.restaurant_id,
            user_id: self.user_id,
            visited_at: self.visited_at,
            rating: self.rating,
            comment: self.comment,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_dto(email: &str) -> CreateUserRequestDto {
        CreateUserRequestDto {
            name: "Ann".into(),
            email: email.into(),
            provider: "github".into(),
            provider_id: "42".into(),
        }
    }

    #[test]
    fn list_query_defaults() {
        let page = ListQuery::default().into_page_request(50);
        assert_eq!(
            page,
            PageRequest {
                skip: 0,
                take: 50,
                count: false,
                query: None
            }
        );
    }

    #[test]
    fn user_email_must_be_well_formed() {
        assert!(user_dto("ann@example.com").validate().is_ok());
        let errors = user_dto("not-an-email").validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
    }

    #[test]
    fn blank_strings_are_rejected() {
        let mut dto = user_dto("ann@example.com");
        dto.provider = "   ".into();
        let errors = dto.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("provider"));

        let visit = CreateVisitDto {
            restaurant_id: "r".into(),
            user_id: "u".into(),
            visited_at: None,
            rating: Some(9),
            comment: None,
        };
        assert!(visit.validate().unwrap_err().field_errors().contains_key("rating"));
    }
}
