//! MongoDB implementation of UserRepository

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{Collection, Database, IndexModel, bson::doc, options::IndexOptions};
use tracing::instrument;

use crate::error::{UserError, UserResult, is_duplicate_key};
use crate::models::{NewUser, User};
use crate::repository::UserRepository;

pub const COLLECTION: &str = "users";

pub struct MongoUserRepository {
    collection: Collection<User>,
}

impl MongoUserRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection::<User>(COLLECTION),
        }
    }

    /// Creates the unique index on `email`. Safe to call on every startup.
    #[instrument(skip(self))]
    pub async fn create_indexes(&self) -> UserResult<()> {
        let index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("email_unique".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(index).await?;
        tracing::info!(collection = COLLECTION, "User indexes ensured");
        Ok(())
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    #[instrument(skip(self, user), fields(email = %user.email))]
    async fn create(&self, user: NewUser) -> UserResult<User> {
        let user = User::new(user);

        self.collection.insert_one(&user).await.map_err(|e| {
            if is_duplicate_key(&e) {
                UserError::DuplicateEmail(user.email.clone())
            } else {
                e.into()
            }
        })?;

        tracing::info!(user_id = %user.id, "User stored");
        Ok(user)
    }

    #[instrument(skip(self))]
    async fn find_all(&self) -> UserResult<Vec<User>> {
        let cursor = self.collection.find(doc! {}).await?;
        let users: Vec<User> = cursor.try_collect().await?;
        Ok(users)
    }
}
