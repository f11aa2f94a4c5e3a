use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::error::{UserError, UserResult};
use crate::models::{CreateUser, NewUser, User};
use crate::repository::UserRepository;

pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    #[instrument(skip(self, input))]
    pub async fn create_user(&self, input: CreateUser) -> UserResult<User> {
        let new_user = NewUser::try_from(input).map_err(|e| {
            info!(error = %e, "Rejected user with missing fields");
            UserError::Validation
        })?;

        self.repository.create(new_user).await.inspect_err(|e| {
            if matches!(e, UserError::DuplicateEmail(_)) {
                warn!(error = %e, "Duplicate user email");
            } else {
                tracing::error!(error = %e, "Failed to store user");
            }
        })
    }

    /// An empty store is reported as [`UserError::NoneFound`].
    #[instrument(skip(self))]
    pub async fn list_users(&self) -> UserResult<Vec<User>> {
        let users = self.repository.find_all().await?;
        if users.is_empty() {
            return Err(UserError::NoneFound);
        }
        Ok(users)
    }
}

impl<R: UserRepository> Clone for UserService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockUserRepository;

    fn input(name: &str, email: &str) -> CreateUser {
        CreateUser {
            name: Some(name.into()),
            email: Some(email.into()),
        }
    }

    #[tokio::test]
    async fn test_create_user_stores_valid_input() {
        let mut repo = MockUserRepository::new();
        repo.expect_create()
            .withf(|user| user.name == "Ada" && user.email == "ada@example.com")
            .times(1)
            .returning(|user| Ok(User::new(user)));

        let user = UserService::new(repo)
            .create_user(input("Ada", "ada@example.com"))
            .await
            .unwrap();

        assert_eq!(user.email, "ada@example.com");
    }

    #[tokio::test]
    async fn test_create_user_rejects_missing_email() {
        let mut repo = MockUserRepository::new();
        repo.expect_create().never();

        let err = UserService::new(repo)
            .create_user(CreateUser {
                name: Some("Ada".into()),
                email: None,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, UserError::Validation));
    }

    #[tokio::test]
    async fn test_duplicate_email_is_passed_through() {
        let mut repo = MockUserRepository::new();
        repo.expect_create()
            .returning(|user| Err(UserError::DuplicateEmail(user.email)));

        let err = UserService::new(repo)
            .create_user(input("Ada", "ada@example.com"))
            .await
            .unwrap_err();

        assert!(matches!(err, UserError::DuplicateEmail(email) if email == "ada@example.com"));
    }

    #[tokio::test]
    async fn test_list_users_empty_is_none_found() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_all().returning(|| Ok(vec![]));

        let err = UserService::new(repo).list_users().await.unwrap_err();
        assert!(matches!(err, UserError::NoneFound));
    }
}
