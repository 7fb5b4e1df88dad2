//! Server configuration.
//!
//! [`Settings`] is read from environment variables (see
//! [`Settings::from_env`]); the binary seeds the environment from a `.env`
//! file first when one is present. Every variable is optional:
//!
//! - `DATABASE_URL`: flow database, `sqlite:///<path>`, `sqlite://:memory:`
//!   or `memory://` (default: `sqlite:///./krok_nodes.db`)
//! - `GRAPH_DB_PATH`: legacy graph database file (default: `graph_db.sqlite`)
//! - `API_V1_STR`: prefix for the flow/node routes (default: `/api/v1`)
//! - `PROJECT_NAME`: reported by `GET /` (default: `Krok Nodes API`)
//! - `BACKEND_CORS_ORIGINS`: comma-separated list or JSON array of allowed
//!   origins (default: the two local dev servers)
//! - `SECRET_KEY`, `ACCESS_TOKEN_EXPIRE_MINUTES`: reserved for
//!   authentication, currently unused
//! - `HOST`, `PORT`: listen address (default: `0.0.0.0:8000`)

use axum::http::HeaderValue;
use thiserror::Error;

/// Errors raised while reading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },

    #[error("unsupported DATABASE_URL '{0}': expected sqlite:///<path>, sqlite://:memory: or memory://")]
    UnsupportedDatabaseUrl(String),
}

/// Where the flow store keeps its data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseUrl {
    /// SQLite database file.
    SqliteFile(String),
    /// SQLite database held in memory for the life of the process.
    SqliteMemory,
    /// Plain in-memory maps, no SQLite involved.
    Memory,
}

impl DatabaseUrl {
    /// Parses a database URL: `sqlite:///relative.db`,
    /// `sqlite:////absolute.db`, `sqlite://:memory:`, or `memory://`.
    pub fn parse(url: &str) -> Result<Self, ConfigError> {
        let url = url.trim();
        if url == "memory://" {
            return Ok(DatabaseUrl::Memory);
        }
        let Some(rest) = url.strip_prefix("sqlite://") else {
            return Err(ConfigError::UnsupportedDatabaseUrl(url.to_string()));
        };
        match rest {
            "" | ":memory:" | "/:memory:" => Ok(DatabaseUrl::SqliteMemory),
            _ => match rest.strip_prefix('/') {
                Some(path) if !path.is_empty() => Ok(DatabaseUrl::SqliteFile(path.to_string())),
                _ => Err(ConfigError::UnsupportedDatabaseUrl(url.to_string())),
            },
        }
    }
}

/// Runtime settings for the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub database: DatabaseUrl,
    pub graph_db_path: String,
    /// Normalized: empty, or starting with `/` and without a trailing `/`.
    pub api_prefix: String,
    pub project_name: String,
    pub cors_origins: Vec<String>,
    pub secret_key: String,
    pub access_token_expire_minutes: u64,
    pub host: String,
    pub port: u16,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            database: DatabaseUrl::SqliteFile("./krok_nodes.db".to_string()),
            graph_db_path: "graph_db.sqlite".to_string(),
            api_prefix: "/api/v1".to_string(),
            project_name: "Krok Nodes API".to_string(),
            cors_origins: vec![
                "http://localhost:3000".to_string(),
                "http://localhost:5173".to_string(),
            ],
            secret_key: "your-secret-key-here".to_string(),
            access_token_expire_minutes: 60 * 24 * 8,
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

impl Settings {
    /// Reads settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through `lookup`, falling back to defaults for unset
    /// keys.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Settings::default();

        if let Some(url) = lookup("DATABASE_URL") {
            settings.database = DatabaseUrl::parse(&url)?;
        }
        if let Some(path) = lookup("GRAPH_DB_PATH") {
            settings.graph_db_path = path;
        }
        if let Some(prefix) = lookup("API_V1_STR") {
            settings.api_prefix = normalize_prefix(&prefix)?;
        }
        if let Some(name) = lookup("PROJECT_NAME") {
            settings.project_name = name;
        }
        if let Some(origins) = lookup("BACKEND_CORS_ORIGINS") {
            settings.cors_origins = parse_origins(&origins)?;
        }
        if let Some(key) = lookup("SECRET_KEY") {
            settings.secret_key = key;
        }
        if let Some(minutes) = lookup("ACCESS_TOKEN_EXPIRE_MINUTES") {
            settings.access_token_expire_minutes =
                parse_number("ACCESS_TOKEN_EXPIRE_MINUTES", &minutes)?;
        }
        if let Some(host) = lookup("HOST") {
            settings.host = host;
        }
        if let Some(port) = lookup("PORT") {
            settings.port = parse_number("PORT", &port)?;
        }

        Ok(settings)
    }

    /// The `host:port` pair to bind.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_number<T: std::str::FromStr>(key: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        key,
        reason: e.to_string(),
    })
}

fn normalize_prefix(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Ok(String::new());
    }
    if !trimmed.starts_with('/') {
        return Err(ConfigError::Invalid {
            key: "API_V1_STR",
            reason: format!("'{raw}' must start with '/'"),
        });
    }
    Ok(trimmed.to_string())
}

fn parse_origins(raw: &str) -> Result<Vec<String>, ConfigError> {
    let raw = raw.trim();
    let origins: Vec<String> = if raw.starts_with('[') {
        serde_json::from_str(raw).map_err(|e| ConfigError::Invalid {
            key: "BACKEND_CORS_ORIGINS",
            reason: e.to_string(),
        })?
    } else {
        raw.split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(String::from)
            .collect()
    };

    for origin in &origins {
        if HeaderValue::from_str(origin).is_err() {
            return Err(ConfigError::Invalid {
                key: "BACKEND_CORS_ORIGINS",
                reason: format!("'{origin}' is not a valid header value"),
            });
        }
    }
    Ok(origins)
}
