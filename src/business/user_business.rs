//! User business rules: partial field merging on top of the user service.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{User, UserFields};
use crate::errors::AppResult;
use crate::services::UserService;
use crate::types::Paginator;

/// Use cases exposed to the HTTP layer.
#[async_trait]
pub trait UserBusiness: Send + Sync {
    async fn get_by_id(&self, id: i64) -> AppResult<User>;

    async fn get_by_email(&self, email: &str) -> AppResult<User>;

    async fn get_all(&self, paginator: &mut Paginator) -> AppResult<Vec<User>>;

    /// Persist a blank user carrying only the provided fields
    async fn create(&self, fields: UserFields) -> AppResult<User>;

    /// Load the user, merge the provided fields and persist
    async fn update(&self, id: i64, fields: UserFields) -> AppResult<User>;

    /// Soft delete an existing user
    async fn delete(&self, id: i64) -> AppResult<()>;
}

pub struct UserRegistry {
    users: Arc<dyn UserService>,
}

impl UserRegistry {
    pub fn new(users: Arc<dyn UserService>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl UserBusiness for UserRegistry {
    async fn get_by_id(&self, id: i64) -> AppResult<User> {
        self.users.get_by_id(id).await
    }

    async fn get_by_email(&self, email: &str) -> AppResult<User> {
        self.users.get_by_email(email).await
    }

    async fn get_all(&self, paginator: &mut Paginator) -> AppResult<Vec<User>> {
        self.users.get_all(paginator).await
    }

    async fn create(&self, fields: UserFields) -> AppResult<User> {
        let mut user = User::default();
        fields.apply_to(&mut user);

        let user = self.users.create(user).await?;
        tracing::info!(user_id = user.id, "User created");
        Ok(user)
    }

    async fn update(&self, id: i64, fields: UserFields) -> AppResult<User> {
        let mut user = self.users.get_by_id(id).await?;
        fields.apply_to(&mut user);

        self.users.update(user).await
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        let user = self.users.get_by_id(id).await?;
        self.users.delete(&user).await?;
        tracing::info!(user_id = id, "User deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;
    use crate::services::MockUserService;
    use mockall::predicate::eq;

    fn stored_user(id: i64) -> User {
        User {
            id,
            first_name: "A".to_string(),
            last_name: "B".to_string(),
            email: "a.b@example.com".to_string(),
            ..Default::default()
        }
    }

    fn registry(service: MockUserService) -> UserRegistry {
        UserRegistry::new(Arc::new(service))
    }

    #[tokio::test]
    async fn test_create_starts_from_blank_record() {
        let mut service = MockUserService::new();
        service
            .expect_create()
            .withf(|u| {
                u.id == 0
                    && u.first_name == "Grace"
                    && u.last_name.is_empty()
                    && u.email == "grace@example.com"
            })
            .times(1)
            .returning(|mut u| {
                u.id = 11;
                Ok(u)
            });

        let fields = UserFields {
            first_name: Some("Grace".to_string()),
            email: Some("grace@example.com".to_string()),
            ..Default::default()
        };
        let user = registry(service).create(fields).await.unwrap();

        assert_eq!(user.id, 11);
        assert_eq!(user.first_name, "Grace");
    }

    #[tokio::test]
    async fn test_get_by_email_delegates() {
        let mut service = MockUserService::new();
        service
            .expect_get_by_email()
            .withf(|email| email == "a.b@example.com")
            .returning(|_| Ok(stored_user(3)));

        let user = registry(service).get_by_email("a.b@example.com").await.unwrap();
        assert_eq!(user.id, 3);
    }

    #[tokio::test]
    async fn test_update_merges_only_provided_fields() {
        let mut service = MockUserService::new();
        service
            .expect_get_by_id()
            .with(eq(4))
            .returning(|id| Ok(stored_user(id)));
        service.expect_update().times(1).returning(Ok);

        let fields = UserFields {
            last_name: Some("C".to_string()),
            ..Default::default()
        };
        let user = registry(service).update(4, fields).await.unwrap();

        assert_eq!(user.first_name, "A");
        assert_eq!(user.last_name, "C");
        assert_eq!(user.email, "a.b@example.com");
    }

    #[tokio::test]
    async fn test_update_missing_user_is_not_found() {
        let mut service = MockUserService::new();
        service
            .expect_get_by_id()
            .returning(|_| Err(AppError::NotFound));
        service.expect_update().never();

        let result = registry(service).update(99, UserFields::default()).await;
        assert!(matches!(result, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn test_delete_loads_then_deletes() {
        let mut service = MockUserService::new();
        service
            .expect_get_by_id()
            .with(eq(8))
            .returning(|id| Ok(stored_user(id)));
        service
            .expect_delete()
            .withf(|u| u.id == 8)
            .times(1)
            .returning(|_| Ok(()));

        assert!(registry(service).delete(8).await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_missing_user_skips_delete() {
        let mut service = MockUserService::new();
        service
            .expect_get_by_id()
            .returning(|_| Err(AppError::NotFound));
        service.expect_delete().never();

        let result = registry(service).delete(1).await;
        assert!(matches!(result, Err(AppError::NotFound)));
    }
}
