//! SeaORM repositories against a migrated in-memory SQLite database.

mod common;

use anyhow::Result;
use chrono::{Duration, Utc};

use common::{new_visit, seed_restaurant, seed_user, test_db};
use zfood::domain::repo::{RestaurantRepository, UserRepository, VisitRepository};
use zfood::infra::storage::{
    SeaOrmRestaurantRepository, SeaOrmUserRepository, SeaOrmVisitRepository,
};

#[tokio::test]
async fn created_visit_is_read_back_with_relations() -> Result<()> {
    let conn = test_db().await;
    let restaurant = seed_restaurant(&conn, "Chez Test").await;
    let user = seed_user(&conn, "ann@example.com").await;
    let repo = SeaOrmVisitRepository::new(conn.clone());

    let created = repo.create_visit(new_visit("v-1", &restaurant, &user)).await?;
    assert_eq!(created.restaurant.name, "Chez Test");
    assert_eq!(created.user.email, "ann@example.com");

    let fetched = repo.find_by_id("v-1").await?.expect("visit exists");
    assert_eq!(fetched.restaurant.id, restaurant.id);
    assert_eq!(fetched.restaurant.address, restaurant.address);
    assert_eq!(fetched.user.id, user.id);
    assert_eq!(fetched.user.provider, "github");
    assert_eq!(fetched.rating, Some(4));
    Ok(())
}

#[tokio::test]
async fn paging_and_total_count() -> Result<()> {
    let conn = test_db().await;
    let restaurant = seed_restaurant(&conn, "Paging").await;
    let user = seed_user(&conn, "pager@example.com").await;
    let repo = SeaOrmVisitRepository::new(conn.clone());

    for i in 0..25 {
        repo.create_visit(new_visit(&format!("v-{i:02}"), &restaurant, &user))
            .await?;
    }

    let first = repo.get(0, 10, None).await?;
    assert_eq!(first.len(), 10);
    assert_eq!(first[0].id, "v-00");
    assert_eq!(repo.get_total_count().await?, 25);

    let last = repo.get(20, 10, None).await?;
    let ids: Vec<_> = last.iter().map(|v| v.id.as_str()).collect();
    assert_eq!(ids, ["v-20", "v-21", "v-22", "v-23", "v-24"]);
    assert!(last.iter().all(|v| v.restaurant.name == "Paging"));
    Ok(())
}

#[tokio::test]
async fn query_filters_visits_by_id_prefix_before_paging() -> Result<()> {
    let conn = test_db().await;
    let restaurant = seed_restaurant(&conn, "Prefix").await;
    let user = seed_user(&conn, "prefix@example.com").await;
    let repo = SeaOrmVisitRepository::new(conn.clone());

    for i in 0..6 {
        repo.create_visit(new_visit(&format!("lunch-{i}"), &restaurant, &user))
            .await?;
        repo.create_visit(new_visit(&format!("dinner-{i}"), &restaurant, &user))
            .await?;
    }

    let lunches = repo.get(0, 100, Some("lunch-")).await?;
    assert_eq!(lunches.len(), 6);
    assert!(lunches.iter().all(|v| v.id.starts_with("lunch-")));

    let skipped = repo.get(4, 100, Some("lunch-")).await?;
    assert_eq!(skipped.len(), 2);

    // Total ignores the filter.
    assert_eq!(repo.get_total_count().await?, 12);
    Ok(())
}

#[tokio::test]
async fn deleting_missing_visit_is_not_an_error() -> Result<()> {
    let conn = test_db().await;
    let restaurant = seed_restaurant(&conn, "Delete").await;
    let user = seed_user(&conn, "delete@example.com").await;
    let repo = SeaOrmVisitRepository::new(conn.clone());
    repo.create_visit(new_visit("keep", &restaurant, &user))
        .await?;

    assert!(!repo.delete_visit("missing").await?);
    assert_eq!(repo.get_total_count().await?, 1);

    assert!(repo.delete_visit("keep").await?);
    assert_eq!(repo.get_total_count().await?, 0);
    Ok(())
}

#[tokio::test]
async fn update_visit_replaces_columns() -> Result<()> {
    let conn = test_db().await;
    let first = seed_restaurant(&conn, "First").await;
    let second = seed_restaurant(&conn, "Second").await;
    let user = seed_user(&conn, "mover@example.com").await;
    let repo = SeaOrmVisitRepository::new(conn.clone());
    repo.create_visit(new_visit("v", &first, &user)).await?;

    let mut record = new_visit("v", &second, &user);
    record.rating = None;
    record.comment = None;
    record.visited_at = Utc::now() - Duration::days(1);
    assert!(repo.update_visit(&record).await?);

    let visit = repo.find_by_id("v").await?.expect("visit exists");
    assert_eq!(visit.restaurant.name, "Second");
    assert_eq!(visit.rating, None);
    assert_eq!(visit.comment, None);

    record.id = "nope".into();
    assert!(!repo.update_visit(&record).await?);
    Ok(())
}

#[tokio::test]
async fn deleting_a_restaurant_cascades_to_visits() -> Result<()> {
    let conn = test_db().await;
    let restaurant = seed_restaurant(&conn, "Closing").await;
    let user = seed_user(&conn, "regular@example.com").await;
    let visits = SeaOrmVisitRepository::new(conn.clone());
    visits
        .create_visit(new_visit("v", &restaurant, &user))
        .await?;

    let restaurants = SeaOrmRestaurantRepository::new(conn.clone());
    assert!(restaurants.delete_restaurant(&restaurant.id).await?);
    assert_eq!(visits.get_total_count().await?, 0);
    Ok(())
}

#[tokio::test]
async fn restaurant_and_user_lookups() -> Result<()> {
    let conn = test_db().await;
    let pizza = seed_restaurant(&conn, "Pizza Place").await;
    seed_restaurant(&conn, "Pasta Place").await;
    seed_restaurant(&conn, "Sushi Bar").await;
    let restaurants = SeaOrmRestaurantRepository::new(conn.clone());

    assert_eq!(restaurants.get(0, 10, Some("P")).await?.len(), 2);
    assert!(restaurants.name_exists("Pizza Place", None).await?);
    assert!(!restaurants
        .name_exists("Pizza Place", Some(&pizza.id))
        .await?);

    let ann = seed_user(&conn, "ann@example.com").await;
    let users = SeaOrmUserRepository::new(conn.clone());
    assert!(users.email_exists("ann@example.com", None).await?);
    assert!(!users.email_exists("ann@example.com", Some(&ann.id)).await?);
    assert!(!users.email_exists("bob@example.com", None).await?);
    assert_eq!(users.get_total_count().await?, 1);
    Ok(())
}

#[tokio::test]
async fn prefix_query_matches_like_wildcards_literally() -> Result<()> {
    let conn = test_db().await;
    let restaurant = seed_restaurant(&conn, "100% Burger").await;
    seed_restaurant(&conn, "1000 Noodles").await;
    let user = seed_user(&conn, "wild@example.com").await;
    let repo = SeaOrmVisitRepository::new(conn.clone());
    for id in ["abc", "xyz", "a_c", "50%off"] {
        repo.create_visit(new_visit(id, &restaurant, &user)).await?;
    }

    let ids = |visits: Vec<zfood::domain::model::Visit>| -> Vec<String> {
        visits.into_iter().map(|v| v.id).collect()
    };
    assert_eq!(ids(repo.get(0, 10, Some("a_")).await?), ["a_c"]);
    assert!(repo.get(0, 10, Some("%")).await?.is_empty());
    assert_eq!(ids(repo.get(0, 10, Some("50%")).await?), ["50%off"]);
    assert_eq!(ids(repo.get(0, 10, Some("a")).await?), ["a_c", "abc"]);

    let restaurants = SeaOrmRestaurantRepository::new(conn.clone());
    assert!(restaurants.get(0, 10, Some("%")).await?.is_empty());
    let burgers = restaurants.get(0, 10, Some("100%")).await?;
    assert_eq!(burgers.len(), 1);
    assert_eq!(burgers[0].name, "100% Burger");

    let users = SeaOrmUserRepository::new(conn.clone());
    assert!(users.get(0, 10, Some("_")).await?.is_empty());
    Ok(())
}
