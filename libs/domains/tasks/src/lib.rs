//! Tasks Domain
//!
//! Task records in MongoDB, with a task-created event published to a durable
//! queue after every successful insert.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← POST/GET /tasks
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← validate → persist → publish
//! └──┬───────┬──┘
//!    │       │
//! ┌──▼───┐ ┌─▼──────────────┐
//! │ Repo │ │ EventPublisher │
//! └──────┘ └────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_tasks::{MongoTaskRepository, TaskService, handlers};
//! use messaging::EventPublisher;
//!
//! let publisher = Arc::new(EventPublisher::new("task_created"));
//! let service = TaskService::new(MongoTaskRepository::new(&db), publisher);
//! let router = Router::new().nest("/tasks", handlers::router(service));
//! ```

pub mod error;
pub mod events;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

pub use error::{TaskError, TaskResult};
pub use events::TaskEventPublisher;
pub use handlers::ApiDoc;
pub use models::{CreateTask, NewTask, Task, TaskCreatedEvent};
pub use repository::TaskRepository;
pub use self::mongodb::MongoTaskRepository;
pub use service::{TaskCreation, TaskService};
