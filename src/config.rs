//! Application configuration loaded from environment variables.

use axum::http::HeaderValue;
use serde::Deserialize;
use strum::Display;

/// Page store backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum StoreBackend {
    /// MongoDB reachable at `MONGODB_CONNECT_URI`.
    #[default]
    Mongo,
    /// Volatile in-process map.
    Memory,
}

/// Allowed CORS origins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsOrigins {
    /// Any origin (`*`).
    Any,
    /// An explicit origin list.
    List(Vec<HeaderValue>),
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === Store ===
    /// MongoDB connection string.
    #[serde(default)]
    pub mongodb_connect_uri: Option<String>,

    /// Database name override.
    #[serde(default)]
    pub mongodb_database: Option<String>,

    /// Collection holding page documents.
    #[serde(default = "default_collection")]
    pub mongodb_collection: String,

    /// Which store backs the service.
    #[serde(default)]
    pub store_backend: StoreBackend,

    // === Server Configuration ===
    /// HTTP listen port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// `*` or a comma-separated list of allowed origins.
    #[serde(default = "default_cors_origin")]
    pub cors_origin: String,

    /// Serve Prometheus metrics on `/metrics`.
    #[serde(default = "default_true")]
    pub metrics_enabled: bool,
}

fn default_collection() -> String {
    "pages".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_cors_origin() -> String {
    "*".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mongodb_connect_uri: None,
            mongodb_database: None,
            mongodb_collection: default_collection(),
            store_backend: StoreBackend::default(),
            port: default_port(),
            cors_origin: default_cors_origin(),
            metrics_enabled: default_true(),
        }
    }
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env()
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> Result<(), String> {
        if self.store_backend == StoreBackend::Mongo {
            let uri = self.mongodb_connect_uri.as_deref().unwrap_or_default();
            if uri.trim().is_empty() {
                return Err("MONGODB_CONNECT_URI is required".to_string());
            }
            if !uri.starts_with("mongodb://") && !uri.starts_with("mongodb+srv://") {
                return Err(
                    "MONGODB_CONNECT_URI must start with mongodb:// or mongodb+srv://".to_string(),
                );
            }
        }

        if self.mongodb_collection.trim().is_empty() {
            return Err("MONGODB_COLLECTION must not be empty".to_string());
        }

        self.cors_origins()?;

        Ok(())
    }

    /// Explicit database name, if configured.
    pub fn database_name(&self) -> Option<&str> {
        self.mongodb_database
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }

    /// Parse `cors_origin`.
    pub fn cors_origins(&self) -> Result<CorsOrigins, String> {
        let raw = self.cors_origin.trim();
        if raw == "*" {
            return Ok(CorsOrigins::Any);
        }

        let origins = raw
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(|origin| {
                HeaderValue::from_str(origin)
                    .map_err(|_| format!("CORS_ORIGIN contains an invalid origin: {origin}"))
            })
            .collect::<Result<Vec<_>, _>>()?;

        if origins.is_empty() {
            return Err("CORS_ORIGIN must be * or a list of origins".to_string());
        }
        Ok(CorsOrigins::List(origins))
    }
}
