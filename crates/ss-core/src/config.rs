//! Configuration types and loading
//!
//! Values are layered: built-in defaults, then an optional `skillsphere.toml`,
//! then `SKILLSPHERE__*` environment variables, then the plain `HOST`, `PORT`
//! and `DATA_DIR` variables.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main application configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Directory holding one CSV file per table
    pub data_dir: PathBuf,
    /// Fail reads on rows whose field count differs from the header
    pub strict_rows: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: DEFAULT_HOST.to_string(),
                port: DEFAULT_PORT,
            },
            storage: StorageConfig {
                data_dir: PathBuf::from(DEFAULT_DATA_DIR),
                strict_rows: false,
            },
            logging: LoggingConfig { json: false },
        }
    }
}

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_DATA_DIR: &str = "data";
const CONFIG_FILE_STEM: &str = "skillsphere";
const ENV_PREFIX: &str = "SKILLSPHERE";

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },
    #[error("Config source error: {0}")]
    Source(#[from] config::ConfigError),
}

impl AppConfig {
    /// Load from `skillsphere.toml` in the working directory (if present) and the environment
    pub fn load() -> Result<Self, ConfigError> {
        let builder = Self::defaults()?
            .add_source(config::File::with_name(CONFIG_FILE_STEM).required(false));
        Self::finish(builder)
    }

    /// Load from an explicit configuration file and the environment
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let builder = Self::defaults()?.add_source(config::File::from(path));
        Self::finish(builder)
    }

    fn defaults() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        let builder = config::Config::builder()
            .set_default("server.host", DEFAULT_HOST)?
            .set_default("server.port", i64::from(DEFAULT_PORT))?
            .set_default("storage.data_dir", DEFAULT_DATA_DIR)?
            .set_default("storage.strict_rows", false)?
            .set_default("logging.json", false)?;
        Ok(builder)
    }

    fn finish(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, ConfigError> {
        let mut config: AppConfig = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        config.apply_plain_env()?;
        Ok(config)
    }

    /// Conventional unprefixed variables win over everything else
    fn apply_plain_env(&mut self) -> Result<(), ConfigError> {
        if let Ok(host) = std::env::var("HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("PORT") {
            self.server.port = port.parse().map_err(|_| ConfigError::InvalidValue {
                key: "PORT".into(),
                message: format!("'{}' is not a valid port", port),
            })?;
        }
        if let Ok(dir) = std::env::var("DATA_DIR") {
            self.storage.data_dir = PathBuf::from(dir);
        }
        Ok(())
    }

    /// Get the server address
    pub fn server_addr(&self) -> std::net::SocketAddr {
        use std::net::SocketAddr;
        let ip: std::net::IpAddr = self.server.host.parse().unwrap_or([0, 0, 0, 0].into());
        SocketAddr::new(ip, self.server.port)
    }
}
