//! User service - persistence use cases over the user repository.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::User;
use crate::errors::{AppResult, OptionExt};
use crate::infra::UserRepository;
use crate::types::Paginator;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User service trait for dependency injection.
///
/// Lookups that find nothing fail with `AppError::NotFound`.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserService: Send + Sync {
    async fn get_by_id(&self, id: i64) -> AppResult<User>;

    async fn get_by_email(&self, email: &str) -> AppResult<User>;

    /// One page of users; totals are written back into `paginator`.
    async fn get_all(&self, paginator: &mut Paginator) -> AppResult<Vec<User>>;

    async fn create(&self, user: User) -> AppResult<User>;

    async fn update(&self, user: User) -> AppResult<User>;

    /// Create or update depending on whether `user` already has an id
    async fn save(&self, user: User) -> AppResult<User>;

    /// Soft delete
    async fn delete(&self, user: &User) -> AppResult<()>;
}

/// Concrete implementation of UserService.
pub struct UserManager {
    repo: Arc<dyn UserRepository>,
}

impl UserManager {
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn get_by_id(&self, id: i64) -> AppResult<User> {
        self.repo.get_by_id(id).await?.ok_or_not_found()
    }

    async fn get_by_email(&self, email: &str) -> AppResult<User> {
        self.repo.get_by_email(email).await?.ok_or_not_found()
    }

    async fn get_all(&self, paginator: &mut Paginator) -> AppResult<Vec<User>> {
        self.repo.get_all(paginator).await
    }

    async fn create(&self, user: User) -> AppResult<User> {
        self.repo.create(user).await
    }

    async fn update(&self, user: User) -> AppResult<User> {
        self.repo.update(user).await
    }

    async fn save(&self, user: User) -> AppResult<User> {
        if user.is_persisted() {
            self.update(user).await
        } else {
            self.create(user).await
        }
    }

    async fn delete(&self, user: &User) -> AppResult<()> {
        self.repo.delete(user).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;
    use crate::infra::MockUserRepository;
    use mockall::predicate::eq;

    fn create_test_user(id: i64) -> User {
        User {
            id,
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            is_active: true,
            ..Default::default()
        }
    }

    fn service(repo: MockUserRepository) -> UserManager {
        UserManager::new(Arc::new(repo))
    }

    #[tokio::test]
    async fn test_get_by_id_success() {
        let mut repo = MockUserRepository::new();
        repo.expect_get_by_id()
            .with(eq(7))
            .returning(|id| Ok(Some(create_test_user(id))));

        let user = service(repo).get_by_id(7).await.unwrap();
        assert_eq!(user.id, 7);
    }

    #[tokio::test]
    async fn test_get_by_id_not_found() {
        let mut repo = MockUserRepository::new();
        repo.expect_get_by_id().returning(|_| Ok(None));

        let result = service(repo).get_by_id(42).await;
        assert!(matches!(result, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn test_get_by_email_not_found() {
        let mut repo = MockUserRepository::new();
        repo.expect_get_by_email()
            .withf(|email| email == "nobody@example.com")
            .returning(|_| Ok(None));

        let result = service(repo).get_by_email("nobody@example.com").await;
        assert!(matches!(result, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn test_get_all_passes_paginator_through() {
        let mut repo = MockUserRepository::new();
        repo.expect_get_all().returning(|p| {
            p.set_totals(2, 12);
            Ok(vec![create_test_user(1), create_test_user(2)])
        });

        let mut paginator = Paginator::new(1, 10, "", "", "");
        let users = service(repo).get_all(&mut paginator).await.unwrap();

        assert_eq!(users.len(), 2);
        assert_eq!(paginator.total_entries_size(), 12);
        assert_eq!(paginator.total_pages(), 2);
    }

    #[tokio::test]
    async fn test_save_new_user_creates() {
        let mut repo = MockUserRepository::new();
        repo.expect_create()
            .times(1)
            .returning(|mut u| {
                u.id = 1;
                Ok(u)
            });
        repo.expect_update().never();

        let saved = service(repo).save(create_test_user(0)).await.unwrap();
        assert_eq!(saved.id, 1);
    }

    #[tokio::test]
    async fn test_save_existing_user_updates() {
        let mut repo = MockUserRepository::new();
        repo.expect_update().times(1).returning(Ok);
        repo.expect_create().never();

        let saved = service(repo).save(create_test_user(5)).await.unwrap();
        assert_eq!(saved.id, 5);
    }

    #[tokio::test]
    async fn test_update_propagates_not_found() {
        let mut repo = MockUserRepository::new();
        repo.expect_update().returning(|_| Err(AppError::NotFound));

        let result = service(repo).update(create_test_user(9)).await;
        assert!(matches!(result, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn test_delete_success() {
        let mut repo = MockUserRepository::new();
        repo.expect_delete()
            .withf(|u| u.id == 3)
            .times(1)
            .returning(|_| Ok(()));

        assert!(service(repo).delete(&create_test_user(3)).await.is_ok());
    }
}
