//! Shared test utilities for domain testing
//!
//! - `TestMongo`: MongoDB container with automatic cleanup (feature: "mongo")
//! - `TestNats`: NATS container with JetStream (feature: "nats")
//! - `TestDataBuilder`: deterministic test data (always available)
//!
//! Container helpers need a Docker daemon, so tests using them are marked
//! `#[ignore]` and run with `cargo test -- --ignored`.
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { workspace = true, features = ["nats"] }
//! ```

#[cfg(feature = "mongo")]
mod mongo;

#[cfg(feature = "nats")]
mod nats;

#[cfg(feature = "mongo")]
pub use mongo::TestMongo;

#[cfg(feature = "nats")]
pub use nats::TestNats;

/// Builder for test data with deterministic randomization
///
/// Seeded from the test name so that parallel tests sharing one database
/// never collide on unique fields.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Create from test name (generates seed from test name hash)
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::from_test_name("test_create_task");
    /// ```
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Opaque owner id for task records
    pub fn user_id(&self) -> String {
        format!("u{}", self.seed)
    }

    /// Unique email for user records
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::new(7);
    /// assert_eq!(builder.email("ada"), "ada-7@example.test");
    /// ```
    pub fn email(&self, local: &str) -> String {
        format!("{}-{}@example.test", local, self.seed)
    }

    /// Database name unique to this test
    pub fn database_name(&self) -> String {
        format!("test_{}_{}", self.seed, uuid::Uuid::now_v7().simple())
    }
}
