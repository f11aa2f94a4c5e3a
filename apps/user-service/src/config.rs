use core_config::{AppInfo, app_info, server::ServerConfig};
use database::mongodb::MongoConfig;

pub use core_config::Environment;

const DEFAULT_PORT: u16 = 3005;
const DEFAULT_MONGO_URI: &str = "mongodb://mongo:27017/users";

#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub server: ServerConfig,
    pub mongodb: MongoConfig,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let app = app_info!();

        Ok(Self {
            app,
            server: ServerConfig::from_env_with_port(DEFAULT_PORT)?,
            mongodb: MongoConfig::from_env_with_default_url(DEFAULT_MONGO_URI)?
                .with_app_name(app.name),
            environment: Environment::from_env(),
        })
    }
}
