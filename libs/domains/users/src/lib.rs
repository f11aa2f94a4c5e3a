//! Users Domain
//!
//! Minimal user records in MongoDB: create and list, with email unique
//! across users.
//!
//! ```rust,ignore
//! use domain_users::{MongoUserRepository, UserService, handlers};
//!
//! let repository = MongoUserRepository::new(&db);
//! repository.create_indexes().await?;
//! let router = Router::new().nest("/users", handlers::router(UserService::new(repository)));
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

pub use error::{UserError, UserResult};
pub use handlers::ApiDoc;
pub use models::{CreateUser, NewUser, User};
pub use repository::UserRepository;
pub use self::mongodb::MongoUserRepository;
pub use service::UserService;
