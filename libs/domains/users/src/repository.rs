use async_trait::async_trait;

use crate::error::UserResult;
use crate::models::{NewUser, User};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Inserts a user, failing with `DuplicateEmail` if the email is taken.
    async fn create(&self, user: NewUser) -> UserResult<User>;

    async fn find_all(&self) -> UserResult<Vec<User>>;
}
