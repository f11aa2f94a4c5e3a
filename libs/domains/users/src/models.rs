use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// User entity as stored in the `users` collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct User {
    /// Generated on insert, stored as `_id`
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    pub name: String,
    /// Unique across all users
    pub email: String,
}

impl User {
    pub fn new(input: NewUser) -> Self {
        Self {
            id: Uuid::now_v7(),
            name: input.name,
            email: input.email,
        }
    }
}

/// Request body for `POST /users`.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct CreateUser {
    #[validate(required, length(min = 1))]
    #[schema(example = "Ada Lovelace")]
    pub name: Option<String>,
    #[validate(required, length(min = 1))]
    #[schema(example = "ada@example.com")]
    pub email: Option<String>,
}

/// A user that passed validation and has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
}

impl TryFrom<CreateUser> for NewUser {
    type Error = validator::ValidationErrors;

    fn try_from(input: CreateUser) -> Result<Self, Self::Error> {
        input.validate()?;

        match (input.name, input.email) {
            (Some(name), Some(email)) => Ok(Self { name, email }),
            // validate() already rejected absent fields
            _ => Err(validator::ValidationErrors::new()),
        }
    }
}
