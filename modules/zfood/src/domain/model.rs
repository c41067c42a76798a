use chrono::{DateTime, Utc};

/// A restaurant as the domain sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Restaurant {
    pub id: String,
    pub name: String,
    pub address: String,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateRestaurantRequest {
    pub name: String,
    pub address: String,
    pub phone: Option<String>,
}

/// Full replacement of a restaurant's mutable fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateRestaurantRequest {
    pub id: String,
    pub name: String,
    pub address: String,
    pub phone: Option<String>,
}

/// A user registered through an external identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub provider: String,
    pub provider_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub provider: String,
    pub provider_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateUserRequest {
    pub id: String,
    pub name: String,
    pub email: String,
    pub provider: String,
    pub provider_id: String,
}

/// A visit with its restaurant and user loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Visit {
    pub id: String,
    pub restaurant: Restaurant,
    pub user: User,
    pub visited_at: DateTime<Utc>,
    pub rating: Option<i32>,
    pub comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateVisitRequest {
    pub restaurant_id: String,
    pub user_id: String,
    /// Defaults to the creation time when absent.
    pub visited_at: Option<DateTime<Utc>>,
    pub rating: Option<i32>,
    pub comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateVisitRequest {
    pub id: String,
    pub restaurant_id: String,
    pub user_id: String,
    pub visited_at: DateTime<Utc>,
    pub rating: Option<i32>,
    pub comment: Option<String>,
}

/// Row-level visit data as persisted (foreign keys, no relations).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVisit {
    pub id: String,
    pub restaurant_id: String,
    pub user_id: String,
    pub visited_at: DateTime<Utc>,
    pub rating: Option<i32>,
    pub comment: Option<String>,
}

/// Offset pagination request. `skip`/`take` are signed so that out-of-range
/// input reaches the search validator instead of failing deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageRequest {
    pub skip: i64,
    pub take: i64,
    /// Compute the total number of entities.
    pub count: bool,
    /// Prefix filter; blank means no filter.
    pub query: Option<String>,
}

impl PageRequest {
    /// Normalized filter: `None` for missing or blank queries.
    pub fn filter(&self) -> Option<&str> {
        self.query.as_deref().filter(|q| !q.trim().is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub skip: u64,
    pub take: u64,
    /// Present only when the request asked for a count.
    pub total: Option<u64>,
}

impl<T> Page<T> {
    /// Map items while preserving paging info (domain → DTO convenience).
    pub fn map_items<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            skip: self.skip,
            take: self.take,
            total: self.total,
        }
    }
}
