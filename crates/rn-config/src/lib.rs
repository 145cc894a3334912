//! # rn-config
//!
//! Layered settings: built-in defaults, then `config/rusty-news.toml` if it
//! exists, then `RUSTY_NEWS__*` environment variables (`__` separates
//! sections, e.g. `RUSTY_NEWS__DATABASE__URL`). A `.env` file is loaded into
//! the environment first.

use config::{Config, Environment, File};
use secrecy::SecretString;
use serde::Deserialize;
use thiserror::Error;

const ENV_PREFIX: &str = "RUSTY_NEWS";
const CONFIG_FILE: &str = "config/rusty-news";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to load settings: {0}")]
    Load(#[from] config::ConfigError),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub log: LogSettings,
    pub cors: CorsSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl ServerSettings {
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    /// Postgres connection string; required, no default
    pub url: SecretString,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogSettings {
    /// `EnvFilter` directive, overridden by `RUST_LOG` when set
    pub filter: String,
    pub json: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CorsSettings {
    /// Empty means any origin
    pub allowed_origins: Vec<String>,
}

impl Settings {
    /// Loads `.env`, the optional config file and the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!(path = %path.display(), "loaded .env");
        }
        Self::from_env(Environment::with_prefix(ENV_PREFIX))
    }

    fn from_env(env: Environment) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 9090)?
            .set_default("database.max_connections", 5)?
            .set_default("log.filter", "info")?
            .set_default("log.json", false)?
            .set_default("cors.allowed_origins", Vec::<String>::new())?
            .add_source(File::with_name(CONFIG_FILE).required(false))
            .add_source(
                env.prefix_separator("__")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("cors.allowed_origins"),
            )
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }
}
