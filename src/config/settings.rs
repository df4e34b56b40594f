//! Application settings and configuration structures.

use std::time::Duration;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Root configuration structure containing all application settings.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Server configuration (host, port)
    pub server: ServerSettings,

    /// Upstream collaborator services
    pub services: UpstreamSettings,

    /// CORS configuration
    pub cors: CorsSettings,

    /// Current environment (development, staging, production)
    pub environment: String,
}

/// Server binding configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// Host address to bind to (e.g., "0.0.0.0")
    pub host: String,

    /// Port number to listen on
    pub port: u16,
}

/// Addresses of the services the gateway orchestrates.
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamSettings {
    /// Library catalog service
    pub library: ServiceSettings,

    /// Rating service
    pub rating: ServiceSettings,

    /// Reservation service
    pub reservation: ServiceSettings,
}

/// Connection settings for one collaborator service.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceSettings {
    /// Base URL, e.g. "http://library:8060"
    pub base_url: String,

    /// TCP connect timeout in milliseconds
    pub connect_timeout_ms: u64,

    /// Whole-request timeout in milliseconds
    pub request_timeout_ms: u64,
}

/// CORS configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CorsSettings {
    /// Allowed origins (comma-separated in env)
    pub allowed_origins: Vec<String>,
}

impl Settings {
    /// Load settings from environment variables and configuration files.
    ///
    /// The loading order is:
    /// 1. config/default.toml (base configuration)
    /// 2. config/{RUN_ENV}.toml (environment-specific overrides)
    /// 3. Environment variables (highest priority)
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if configuration cannot be loaded or parsed,
    /// or if a service URL is not an absolute http(s) URL.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        // Determine the running environment
        let environment = std::env::var("RUN_ENV").unwrap_or_else(|_| "development".into());

        Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("services.library.base_url", "http://localhost:8060")?
            .set_default("services.rating.base_url", "http://localhost:8050")?
            .set_default("services.reservation.base_url", "http://localhost:8070")?
            .set_default("services.library.connect_timeout_ms", 2000_i64)?
            .set_default("services.rating.connect_timeout_ms", 2000_i64)?
            .set_default("services.reservation.connect_timeout_ms", 2000_i64)?
            .set_default("services.library.request_timeout_ms", 10000_i64)?
            .set_default("services.rating.request_timeout_ms", 10000_i64)?
            .set_default("services.reservation.request_timeout_ms", 10000_i64)?
            .set_default("cors.allowed_origins", vec!["http://localhost:3000"])?
            // Load from config files
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Load from environment variables
            // APP__SERVICES__RATING__BASE_URL=http://rating:8050 -> services.rating.base_url
            .add_source(
                Environment::default()
                    .prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            // Map simple environment variables
            .set_override_option("server.host", std::env::var("SERVER_HOST").ok())?
            .set_override_option("server.port", std::env::var("SERVER_PORT").ok())?
            .set_override_option(
                "services.library.base_url",
                std::env::var("LIBRARY_SERVICE_URL").ok(),
            )?
            .set_override_option(
                "services.rating.base_url",
                std::env::var("RATING_SERVICE_URL").ok(),
            )?
            .set_override_option(
                "services.reservation.base_url",
                std::env::var("RESERVATION_SERVICE_URL").ok(),
            )?
            .build()?
            .try_deserialize()
            .and_then(|settings: Self| {
                settings.services.validate()?;
                Ok(settings)
            })
    }

    /// Get the full server address as a string.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl UpstreamSettings {
    /// Reject base URLs that the HTTP clients could not use.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, service) in [
            ("library", &self.library),
            ("rating", &self.rating),
            ("reservation", &self.reservation),
        ] {
            let url = reqwest::Url::parse(&service.base_url).map_err(|e| {
                ConfigError::Message(format!(
                    "services.{}.base_url is not a valid URL ({}): {}",
                    name, service.base_url, e
                ))
            })?;

            if !matches!(url.scheme(), "http" | "https") {
                return Err(ConfigError::Message(format!(
                    "services.{}.base_url must use http or https, got {}",
                    name,
                    url.scheme()
                )));
            }
        }
        Ok(())
    }
}

impl ServiceSettings {
    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}
