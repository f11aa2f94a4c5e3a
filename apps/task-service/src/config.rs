use core_config::{AppInfo, FromEnv, app_info, server::ServerConfig};
use database::mongodb::MongoConfig;
use messaging::{NatsConfig, PublisherConfig};

pub use core_config::Environment;

const DEFAULT_PORT: u16 = 3002;

/// Task service configuration, composed from the shared config components.
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub server: ServerConfig,
    pub mongodb: MongoConfig,
    pub nats: NatsConfig,
    pub publisher: PublisherConfig,
    pub environment: Environment,
}

impl Config {
    /// # Errors
    /// Fails when `MONGO_URI`/`MONGODB_URL` is unset or a numeric variable
    /// does not parse.
    pub fn from_env() -> eyre::Result<Self> {
        let app = app_info!();

        Ok(Self {
            app,
            server: ServerConfig::from_env_with_port(DEFAULT_PORT)?,
            mongodb: MongoConfig::from_env()?.with_app_name(app.name),
            nats: NatsConfig::from_env()?.with_client_name(app.name),
            publisher: PublisherConfig::from_env()?,
            environment: Environment::from_env(),
        })
    }
}
