//! API configuration
//!
//! Loaded from `APP_*` environment variables, e.g. `APP_PORT=8080` or
//! `APP_STORAGE=memory`. Unset keys keep their [`Default`] value.

use serde::Deserialize;

use core_kernel::{CoreError, Timezone};
use domain_quote::notify::DEFAULT_FROM_ADDRESS;
use domain_quote::Locale;

/// Where the catalog, rate table and orders live
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// PostgreSQL through `infra_db`
    #[default]
    Postgres,
    /// In-memory adapters seeded with sample reference data
    Memory,
}

/// API configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Database URL, used when `storage` is `postgres`
    pub database_url: String,
    /// Log level
    pub log_level: String,
    /// Storage backend
    pub storage: StorageBackend,
    /// IANA timezone that decides "today" for the age check
    pub timezone: String,
    /// Locale of validation messages
    pub locale: String,
    /// Send a receipt mail after each completed order
    pub notify_on_order: bool,
    /// Sender address of receipt mail
    pub mail_from: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            database_url: "postgres://localhost/quote_wizard".to_string(),
            log_level: "info".to_string(),
            storage: StorageBackend::Postgres,
            timezone: "Asia/Tokyo".to_string(),
            locale: "ja-JP".to_string(),
            notify_on_order: false,
            mail_from: DEFAULT_FROM_ADDRESS.to_string(),
        }
    }
}

impl ApiConfig {
    /// Loads configuration from environment
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::with_prefix("APP"))
            .build()?
            .try_deserialize()
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Parses the configured timezone
    pub fn timezone(&self) -> Result<Timezone, CoreError> {
        self.timezone
            .parse()
            .map_err(|_| CoreError::configuration(format!("unknown timezone: {}", self.timezone)))
    }

    /// Parses the configured message locale
    pub fn locale(&self) -> Result<Locale, CoreError> {
        self.locale.parse().map_err(CoreError::configuration)
    }
}
