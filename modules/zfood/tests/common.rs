//! Shared fixtures: a migrated in-memory SQLite database and seed helpers.
#![allow(dead_code)]

use chrono::Utc;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use zfood::domain::model::{NewVisit, Restaurant, User};
use zfood::domain::repo::{RestaurantRepository, UserRepository};
use zfood::infra::storage::{SeaOrmRestaurantRepository, SeaOrmUserRepository};
use zfood::ZFood;

/// Fresh database per test with the real migration applied.
pub async fn test_db() -> DatabaseConnection {
    let handle = db::DbHandle::connect("sqlite::memory:", db::ConnectOpts::default())
        .await
        .expect("Failed to connect to test database");
    let conn = handle.sea();
    ZFood::migrate(&conn)
        .await
        .expect("Failed to run migrations");
    conn
}

pub async fn seed_restaurant(conn: &DatabaseConnection, name: &str) -> Restaurant {
    let now = Utc::now();
    let restaurant = Restaurant {
        id: Uuid::new_v4().to_string(),
        name: name.to_string(),
        address: "1 Main St".to_string(),
        phone: Some("+1 555 0100".to_string()),
        created_at: now,
        updated_at: now,
    };
    SeaOrmRestaurantRepository::new(conn.clone())
        .create_restaurant(restaurant.clone())
        .await
        .expect("seed restaurant");
    restaurant
}

pub async fn seed_user(conn: &DatabaseConnection, email: &str) -> User {
    let now = Utc::now();
    let user = User {
        id: Uuid::new_v4().to_string(),
        name: "Test User".to_string(),
        email: email.to_string(),
        provider: "github".to_string(),
        provider_id: Uuid::new_v4().to_string(),
        created_at: now,
        updated_at: now,
    };
    SeaOrmUserRepository::new(conn.clone())
        .create_user(user.clone())
        .await
        .expect("seed user");
    user
}

pub fn new_visit(id: &str, restaurant: &Restaurant, user: &User) -> NewVisit {
    NewVisit {
        id: id.to_string(),
        restaurant_id: restaurant.id.clone(),
        user_id: user.id.clone(),
        visited_at: Utc::now(),
        rating: Some(4),
        comment: Some("good".to_string()),
    }
}
