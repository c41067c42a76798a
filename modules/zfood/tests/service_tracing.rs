//! The domain services emit their spans and log lines.

mod common;

use std::sync::Arc;

use tracing_test::traced_test;

use common::{seed_restaurant, seed_user, test_db};
use zfood::domain::error::DomainError;
use zfood::domain::model::{CreateVisitRequest, PageRequest, UpdateVisitRequest};
use zfood::domain::service::{VisitDomainService, VisitService};
use zfood::infra::storage::SeaOrmVisitRepository;

#[traced_test]
#[tokio::test]
async fn create_visit_emits_spans() {
    let conn = test_db().await;
    let restaurant = seed_restaurant(&conn, "Traced").await;
    let user = seed_user(&conn, "traced@example.com").await;
    let service = VisitDomainService::new(Arc::new(SeaOrmVisitRepository::new(conn)));

    let visit = service
        .create(CreateVisitRequest {
            restaurant_id: restaurant.id,
            user_id: user.id,
            visited_at: None,
            rating: Some(5),
            comment: None,
        })
        .await
        .unwrap();

    assert!(logs_contain("zfood.service.create_visit"));
    assert!(logs_contain(&format!(
        "Successfully created visit with id={}",
        visit.id
    )));
}

#[traced_test]
#[tokio::test]
async fn get_counts_only_when_asked() {
    let conn = test_db().await;
    let service = VisitDomainService::new(Arc::new(SeaOrmVisitRepository::new(conn)));

    let page = service
        .get(PageRequest {
            skip: 0,
            take: 10,
            count: false,
            query: None,
        })
        .await
        .unwrap();
    assert_eq!(page.total, None);

    let page = service
        .get(PageRequest {
            skip: 0,
            take: 10,
            count: true,
            query: None,
        })
        .await
        .unwrap();
    assert_eq!(page.total, Some(0));
    assert!(logs_contain("zfood.service.list_visits"));
}

#[traced_test]
#[tokio::test]
async fn update_of_missing_visit_is_not_found() {
    let conn = test_db().await;
    let restaurant = seed_restaurant(&conn, "Missing").await;
    let user = seed_user(&conn, "missing@example.com").await;
    let service = VisitDomainService::new(Arc::new(SeaOrmVisitRepository::new(conn)));

    let err = service
        .update(UpdateVisitRequest {
            id: "missing".into(),
            restaurant_id: restaurant.id,
            user_id: user.id,
            visited_at: chrono::Utc::now(),
            rating: None,
            comment: None,
        })
        .await
        .unwrap_err();
    assert_eq!(err, DomainError::not_found("Visit", "missing"));
    assert!(logs_contain("zfood.service.update_visit"));
}
