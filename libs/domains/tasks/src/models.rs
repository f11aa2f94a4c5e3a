use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

/// Task entity as stored in the `tasks` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Assigned on save, stored as `_id`
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    pub title: String,
    pub description: String,
    /// Owning user, opaque to this service
    pub user_id: String,
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Stamps a validated task with a fresh id and creation time.
    pub fn new(input: NewTask) -> Self {
        Self {
            id: Uuid::now_v7(),
            title: input.title,
            description: input.description,
            user_id: input.user_id,
            created_at: Utc::now(),
        }
    }
}

/// Request body for `POST /tasks`.
///
/// Fields are optional so that an absent field is reported as missing
/// instead of failing deserialization.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTask {
    #[validate(required, length(min = 1))]
    #[schema(example = "Buy milk")]
    pub title: Option<String>,
    #[validate(required, length(min = 1))]
    #[schema(example = "2%")]
    pub description: Option<String>,
    #[validate(required, length(min = 1))]
    #[schema(example = "u123")]
    pub user_id: Option<String>,
}

/// A task that passed validation and has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct NewTask {
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(length(min = 1))]
    pub description: String,
    #[validate(length(min = 1))]
    pub user_id: String,
}

/// Rust field name and wire name of every required task field, in order.
const REQUIRED_FIELDS: [(&str, &str); 3] = [
    ("title", "title"),
    ("description", "description"),
    ("user_id", "userId"),
];

/// Wire names of the fields that failed validation, in declaration order.
pub fn invalid_fields(errors: &ValidationErrors) -> Vec<&'static str> {
    let field_errors = errors.field_errors();
    REQUIRED_FIELDS
        .iter()
        .filter(|(field, _)| field_errors.contains_key(*field))
        .map(|(_, wire)| *wire)
        .collect()
}

/// "Missing required field(s): title, userId"
pub fn missing_fields_message(fields: &[&str]) -> String {
    format!("Missing required field(s): {}", fields.join(", "))
}

impl TryFrom<CreateTask> for NewTask {
    type Error = Vec<&'static str>;

    fn try_from(input: CreateTask) -> Result<Self, Self::Error> {
        input.validate().map_err(|e| invalid_fields(&e))?;

        match (input.title, input.description, input.user_id) {
            (Some(title), Some(description), Some(user_id)) => Ok(Self {
                title,
                description,
                user_id,
            }),
            _ => Err(REQUIRED_FIELDS.iter().map(|(_, wire)| *wire).collect()),
        }
    }
}

/// Published on the task-created queue after a task is stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskCreatedEvent {
    pub task_id: Uuid,
    pub user_id: String,
    pub title: String,
}

impl From<&Task> for TaskCreatedEvent {
    fn from(task: &Task) -> Self {
        Self {
            task_id: task.id,
            user_id: task.user_id.clone(),
            title: task.title.clone(),
        }
    }
}
