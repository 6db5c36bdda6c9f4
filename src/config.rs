//! Configuration loader for the `fieldops-reports` backend service.
//!
//! This module centralizes all runtime configuration values and their defaults,
//! loading from environment variables (with optional `.env` file support
//! provided by the caller). By consolidating configuration logic here, we
//! avoid scattering `env::var` calls throughout the codebase.
//!
use std::env;

use anyhow::{anyhow, bail, Result};

/// Parse an optional integer environment variable with a default value.
macro_rules! parse_env_u32 {
    ($var_name:expr, $default:expr) => {
        env::var($var_name)
            .ok()
            .map(|v| v.parse::<u32>())
            .transpose()
            .map_err(|e| anyhow!("Invalid {}: {}", $var_name, e))?
            .unwrap_or($default)
    };
}

/// Parse a required string environment variable.
macro_rules! require_env {
    ($var_name:expr) => {
        env::var($var_name)
            .map_err(|_| anyhow!("{} must be set in .env or environment", $var_name))?
    };
}

/// Where report documents are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    /// Process-local maps; everything is lost on exit.
    Memory,
}

/// Strongly typed application configuration.
///
/// All fields are immutable after loading, ensuring a consistent configuration
/// snapshot for the lifetime of the application.
#[derive(Debug, Clone)]
pub struct Config {
    // ---
    pub store_backend: StoreBackend,

    /// PostgreSQL connection string. Always set for the postgres backend.
    pub db_url: Option<String>,

    /// Maximum number of database connections in the pool.
    pub db_pool_max: u32,

    /// Schema holding the job, customer, asset and report tables.
    pub db_schema: String,

    /// TCP port the HTTP server binds on all interfaces.
    pub listen_port: u16,
}

/// Load configuration from environment variables with defaults.
///
/// Required:
/// - `DATABASE_URL` – PostgreSQL connection string (postgres backend only)
///
/// Optional:
/// - `STORE_BACKEND` – `postgres` or `memory` (default: postgres)
/// - `DB_POOL_MAX` – max DB connections (default: 5)
/// - `DB_SCHEMA` – schema name (default: neta_ops)
/// - `LISTEN_PORT` – HTTP port (default: 8080)
///
/// Returns an error if any required variable is missing or invalid.
pub fn load_from_env() -> Result<Config> {
    // ---
    let store_backend = match env::var("STORE_BACKEND").as_deref() {
        Ok("postgres") | Err(_) => StoreBackend::Postgres,
        Ok("memory") => StoreBackend::Memory,
        Ok(other) => bail!("Invalid STORE_BACKEND: {other} (expected postgres or memory)"),
    };

    let db_url = match store_backend {
        StoreBackend::Postgres => Some(require_env!("DATABASE_URL")),
        StoreBackend::Memory => env::var("DATABASE_URL").ok(),
    };

    let db_pool_max = parse_env_u32!("DB_POOL_MAX", 5);
    let db_schema = env::var("DB_SCHEMA").unwrap_or_else(|_| "neta_ops".to_string());
    validate_identifier(&db_schema).map_err(|e| anyhow!("Invalid DB_SCHEMA: {e}"))?;

    let listen_port = u16::try_from(parse_env_u32!("LISTEN_PORT", 8080))
        .map_err(|e| anyhow!("Invalid LISTEN_PORT: {}", e))?;

    Ok(Config {
        store_backend,
        db_url,
        db_pool_max,
        db_schema,
        listen_port,
    })
}

/// Accept a bare lowercase SQL identifier, since the schema name is spliced
/// into statements.
pub fn validate_identifier(name: &str) -> Result<()> {
    // ---
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        bail!("identifier is empty");
    };
    if !(first.is_ascii_lowercase() || first == '_') {
        bail!("'{name}' must start with a lowercase letter or underscore");
    }
    if !chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_') {
        bail!("'{name}' may only contain lowercase letters, digits and underscores");
    }
    Ok(())
}

/// Replace the password in a connection string with `****`.
pub fn mask_db_url(db_url: &str) -> String {
    // ---
    if let Some(at_pos) = db_url.rfind('@') {
        if let Some(colon_pos) = db_url[..at_pos].rfind(':') {
            return format!("{}:****{}", &db_url[..colon_pos], &db_url[at_pos..]);
        }
    }
    db_url.to_string()
}

impl Config {
    /// Log the loaded configuration for debugging purposes.
    ///
    /// Masks sensitive information like database passwords while showing
    /// all configuration values that were loaded.
    pub fn log_config(&self) {
        // ---
        let masked_db_url = self
            .db_url
            .as_deref()
            .map(mask_db_url)
            .unwrap_or_else(|| "(unset)".to_string());

        tracing::info!("Configuration loaded:");
        tracing::info!("  STORE_BACKEND  : {:?}", self.store_backend);
        tracing::info!("  DATABASE_URL   : {}", masked_db_url);
        tracing::info!("  DB_POOL_MAX    : {}", self.db_pool_max);
        tracing::info!("  DB_SCHEMA      : {}", self.db_schema);
        tracing::info!("  LISTEN_PORT    : {}", self.listen_port);
    }
}
