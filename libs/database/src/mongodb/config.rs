#[cfg(feature = "config")]
use core_config::{ConfigError, FromEnv, env_parse};

use mongodb::{Client, Database};

/// MongoDB connection settings.
///
/// When `database` is `None` the database named in the connection string's
/// path is used, falling back to `"default"`.
///
/// # Example
///
/// ```ignore
/// use database::mongodb::MongoConfig;
///
/// // Database taken from the URI path
/// let config = MongoConfig::new("mongodb://mongo:27017/users");
///
/// // Explicit database
/// let config = MongoConfig::new("mongodb://localhost:27017").with_database("tasks");
///
/// // From environment variables (requires `config` feature)
/// let config = MongoConfig::from_env()?;
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MongoConfig {
    /// Format: mongodb://[username:password@]host[:port][/database][?options]
    pub url: String,

    /// Database override
    pub database: Option<String>,

    /// Reported in server logs
    pub app_name: Option<String>,

    pub max_pool_size: u32,
    pub min_pool_size: u32,
    pub connect_timeout_secs: u64,
    pub server_selection_timeout_secs: u64,
}

/// Used when neither an override nor the URI names a database.
pub const FALLBACK_DATABASE: &str = "default";

impl MongoConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            database: None,
            app_name: None,
            max_pool_size: 100,
            min_pool_size: 5,
            connect_timeout_secs: 10,
            server_selection_timeout_secs: 30,
        }
    }

    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = Some(database.into());
        self
    }

    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = Some(app_name.into());
        self
    }

    /// Picks the database: explicit override, then the URI path, then
    /// [`FALLBACK_DATABASE`].
    pub fn select_database(&self, client: &Client) -> Database {
        match &self.database {
            Some(name) => client.database(name),
            None => client
                .default_database()
                .unwrap_or_else(|| client.database(FALLBACK_DATABASE)),
        }
    }

    /// Like [`FromEnv::from_env`], but with a fallback connection string
    /// when neither `MONGO_URI` nor `MONGODB_URL` is set.
    #[cfg(feature = "config")]
    pub fn from_env_with_default_url(default_url: &str) -> Result<Self, ConfigError> {
        let url = url_from_env().unwrap_or_else(|| default_url.to_string());
        Self::from_env_with_url(url)
    }

    #[cfg(feature = "config")]
    fn from_env_with_url(url: String) -> Result<Self, ConfigError> {
        let defaults = Self::new(url);

        Ok(Self {
            database: std::env::var("MONGODB_DATABASE")
                .ok()
                .filter(|name| !name.trim().is_empty()),
            app_name: std::env::var("MONGODB_APP_NAME").ok(),
            max_pool_size: env_parse("MONGODB_MAX_POOL_SIZE", defaults.max_pool_size)?,
            min_pool_size: env_parse("MONGODB_MIN_POOL_SIZE", defaults.min_pool_size)?,
            connect_timeout_secs: env_parse(
                "MONGODB_CONNECT_TIMEOUT_SECS",
                defaults.connect_timeout_secs,
            )?,
            server_selection_timeout_secs: env_parse(
                "MONGODB_SERVER_SELECTION_TIMEOUT_SECS",
                defaults.server_selection_timeout_secs,
            )?,
            ..defaults
        })
    }
}

impl Default for MongoConfig {
    fn default() -> Self {
        Self::new("mongodb://localhost:27017")
    }
}

#[cfg(feature = "config")]
fn url_from_env() -> Option<String> {
    let non_blank = |key: &str| std::env::var(key).ok().filter(|url| !url.trim().is_empty());
    non_blank("MONGO_URI").or_else(|| non_blank("MONGODB_URL"))
}

/// Environment variables:
/// - `MONGO_URI` or `MONGODB_URL` (required) - connection string
/// - `MONGODB_DATABASE` (optional) - overrides the database in the URI
/// - `MONGODB_APP_NAME` (optional)
/// - `MONGODB_MAX_POOL_SIZE` (default: 100)
/// - `MONGODB_MIN_POOL_SIZE` (default: 5)
/// - `MONGODB_CONNECT_TIMEOUT_SECS` (default: 10)
/// - `MONGODB_SERVER_SELECTION_TIMEOUT_SECS` (default: 30)
#[cfg(feature = "config")]
impl FromEnv for MongoConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let url = url_from_env()
            .ok_or_else(|| ConfigError::MissingEnvVar("MONGO_URI or MONGODB_URL".to_string()))?;
        Self::from_env_with_url(url)
    }
}
