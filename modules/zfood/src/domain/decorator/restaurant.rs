use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::error::DomainError;
use crate::domain::model::{
    CreateRestaurantRequest, Page, PageRequest, Restaurant, UpdateRestaurantRequest,
};
use crate::domain::service::RestaurantService;
use crate::domain::validation::RestaurantValidatorFactory;

pub struct RestaurantValidatorDecorator<S> {
    inner: S,
    validators: Arc<dyn RestaurantValidatorFactory>,
}

impl<S: RestaurantService> RestaurantValidatorDecorator<S> {
    pub fn new(inner: S, validators: Arc<dyn RestaurantValidatorFactory>) -> Self {
        Self { inner, validators }
    }
}

#[async_trait]
impl<S: RestaurantService> RestaurantService for RestaurantValidatorDecorator<S> {
    async fn create(&self, req: CreateRestaurantRequest) -> Result<Restaurant, DomainError> {
        self.validators
            .creation_validator()
            .ensure_valid(&req)
            .await
            .inspect_err(|e| debug!(error = %e, "Restaurant creation rejected"))?;
        self.inner.create(req).await
    }

    async fn update(&self, req: UpdateRestaurantRequest) -> Result<(), DomainError> {
        self.validators
            .update_validator()
            .ensure_valid(&req)
            .await
            .inspect_err(|e| debug!(error = %e, "Restaurant update rejected"))?;
        self.inner.update(req).await
    }

    async fn delete(&self, id: &str) -> Result<(), DomainError> {
        self.validators.delete_validator().ensure_valid(id).await?;
        self.inner.delete(id).await
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Restaurant>, DomainError> {
        self.inner.find_by_id(id).await
    }

    async fn get(&self, page: PageRequest) -> Result<Page<Restaurant>, DomainError> {
        self.validators.search_validator().ensure_valid(&page).await?;
        self.inner.get(page).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use super::*;
    use crate::domain::validation::{
        BoxValidator, DeleteEntityValidator, SearchEntityValidator, ValidationFailure, Validator,
        ValidatorResult,
    };

    #[derive(Default)]
    struct SpyService {
        calls: AtomicUsize,
        deleted: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl RestaurantService for Arc<SpyService> {
        async fn create(&self, req: CreateRestaurantRequest) -> Result<Restaurant, DomainError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let now = chrono::Utc::now();
            Ok(Restaurant {
                id: "r-1".into(),
                name: req.name,
                address: req.address,
                phone: req.phone,
                created_at: now,
                updated_at: now,
            })
        }

        async fn update(&self, _req: UpdateRestaurantRequest) -> Result<(), DomainError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        async fn delete(&self, id: &str) -> Result<(), DomainError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.deleted.lock().unwrap().push(id.to_owned());
            Ok(())
        }

        async fn find_by_id(&self, _id: &str) -> Result<Option<Restaurant>, DomainError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(None)
        }

        async fn get(&self, page: PageRequest) -> Result<Page<Restaurant>, DomainError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Page {
                items: vec![],
                skip: page.skip as u64,
                take: page.take as u64,
                total: None,
            })
        }
    }

    struct Reject;

    #[async_trait]
    impl<T: ?Sized + Sync> Validator<T> for Reject {
        async fn validate(&self, _input: &T) -> ValidatorResult {
            Err(ValidationFailure::duplicate("Restaurant", "name", "taken"))
        }
    }

    #[derive(Default)]
    struct SpyFactory {
        requests: AtomicUsize,
    }

    impl RestaurantValidatorFactory for SpyFactory {
        fn creation_validator(&self) -> BoxValidator<CreateRestaurantRequest> {
            self.requests.fetch_add(1, Ordering::SeqCst);
            Box::new(Reject)
        }

        fn update_validator(&self) -> BoxValidator<UpdateRestaurantRequest> {
            self.requests.fetch_add(1, Ordering::SeqCst);
            Box::new(Reject)
        }

        fn delete_validator(&self) -> BoxValidator<str> {
            self.requests.fetch_add(1, Ordering::SeqCst);
            Box::new(DeleteEntityValidator)
        }

        fn search_validator(&self) -> BoxValidator<PageRequest> {
            self.requests.fetch_add(1, Ordering::SeqCst);
            Box::new(SearchEntityValidator::new(100))
        }
    }

    fn decorated() -> (
        RestaurantValidatorDecorator<Arc<SpyService>>,
        Arc<SpyService>,
        Arc<SpyFactory>,
    ) {
        let service = Arc::new(SpyService::default());
        let factory = Arc::new(SpyFactory::default());
        let decorator = RestaurantValidatorDecorator::new(service.clone(), factory.clone());
        (decorator, service, factory)
    }

    #[tokio::test]
    async fn delete_with_blank_id_never_reaches_the_service() {
        for id in ["", " ", "   ", "\t\n"] {
            let (decorator, service, _) = decorated();
            let err = decorator.delete(id).await.unwrap_err();
            assert_eq!(
                err,
                DomainError::Validation(ValidationFailure::missing_argument("id"))
            );
            assert_eq!(service.calls.load(Ordering::SeqCst), 0);
        }
    }

    #[tokio::test]
    async fn delete_with_id_delegates_exactly_once() {
        for id in ["r-1", "6f1c7b2e-9d3a-4f0e-8a55-2b7f3c9d1e04", " padded "] {
            let (decorator, service, _) = decorated();
            decorator.delete(id).await.unwrap();
            assert_eq!(service.calls.load(Ordering::SeqCst), 1);
            assert_eq!(*service.deleted.lock().unwrap(), vec![id.to_owned()]);
        }
    }

    #[tokio::test]
    async fn find_by_id_skips_the_factory() {
        let (decorator, service, factory) = decorated();
        assert!(decorator.find_by_id("r-1").await.unwrap().is_none());
        assert_eq!(factory.requests.load(Ordering::SeqCst), 0);
        assert_eq!(service.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn rejected_create_and_update_are_not_delegated() {
        let (decorator, service, factory) = decorated();
        let err = decorator
            .create(CreateRestaurantRequest {
                name: "taken".into(),
                address: "1 Main St".into(),
                phone: None,
            })
            .await
            .unwrap_err();
        assert_eq!(
            err,
            DomainError::Validation(ValidationFailure::duplicate("Restaurant", "name", "taken"))
        );

        decorator
            .update(UpdateRestaurantRequest {
                id: "r-1".into(),
                name: "taken".into(),
                address: "1 Main St".into(),
                phone: None,
            })
            .await
            .unwrap_err();

        assert_eq!(factory.requests.load(Ordering::SeqCst), 2);
        assert_eq!(service.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn get_validates_paging_first() {
        let (decorator, service, _) = decorated();
        let too_big = PageRequest {
            skip: 0,
            take: 101,
            ..Default::default()
        };
        assert!(decorator.get(too_big).await.is_err());
        assert_eq!(service.calls.load(Ordering::SeqCst), 0);

        let page = decorator
            .get(PageRequest {
                skip: 5,
                take: 10,
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!((page.skip, page.take), (5, 10));
        assert_eq!(service.calls.load(Ordering::SeqCst), 1);
    }
}
