//! Configuration management for the auth service
//!
//! All settings are read from environment variables once at startup into a
//! typed `Settings` value, which is then passed explicitly to the components
//! that need it. Nothing reads the environment at request time.
//!
//! The session signing secret is required: startup fails loudly when it is
//! absent, and there is no built-in fallback secret.

use anyhow::{Context, Result};
use std::env;

use session_core::DEFAULT_SESSION_TTL_SECS;

/// Application settings
#[derive(Debug, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub session: SessionSettings,
    pub auth: AuthSettings,
}

impl Settings {
    /// Load settings from environment variables (.env file in development).
    pub fn load() -> Result<Self> {
        if cfg!(debug_assertions) {
            dotenvy::dotenv().ok();
        }

        Ok(Settings {
            server: ServerSettings::from_env()?,
            database: DatabaseSettings::from_env()?,
            session: SessionSettings::from_env()?,
            auth: AuthSettings::from_env()?,
        })
    }
}

/// HTTP server settings
#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl ServerSettings {
    fn from_env() -> Result<Self> {
        Ok(Self {
            host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("Invalid SERVER_PORT")?,
        })
    }
}

/// Database connection settings
#[derive(Debug, Clone)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout: u64,
}

impl DatabaseSettings {
    fn from_env() -> Result<Self> {
        Ok(Self {
            url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .context("Invalid DATABASE_MAX_CONNECTIONS")?,
            acquire_timeout: env::var("DATABASE_ACQUIRE_TIMEOUT")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .context("Invalid DATABASE_ACQUIRE_TIMEOUT")?,
        })
    }
}

/// Session token settings
#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub signing_secret: String,
    pub ttl_secs: i64,
}

impl SessionSettings {
    fn from_env() -> Result<Self> {
        Ok(Self {
            signing_secret: env::var("SESSION_SIGNING_SECRET").context(
                "SESSION_SIGNING_SECRET must be set; the service refuses to start with a built-in secret",
            )?,
            ttl_secs: env::var("SESSION_TTL_SECS")
                .unwrap_or_else(|_| DEFAULT_SESSION_TTL_SECS.to_string())
                .parse()
                .context("Invalid SESSION_TTL_SECS")?,
        })
    }
}

/// Identity resolution settings
#[derive(Debug, Clone)]
pub struct AuthSettings {
    /// Per-call timeout for identity store reads and writes, in seconds.
    pub store_timeout_secs: u64,
    /// Migration shim: accept the legacy doctor default passwords for doctor
    /// rows that carry no password hash. Off unless explicitly enabled;
    /// remove once every doctor row has a hash.
    pub legacy_doctor_logins: bool,
}

impl AuthSettings {
    fn from_env() -> Result<Self> {
        Ok(Self {
            store_timeout_secs: env::var("STORE_TIMEOUT_SECS")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .context("Invalid STORE_TIMEOUT_SECS")?,
            legacy_doctor_logins: env::var("LEGACY_DOCTOR_LOGINS")
                .unwrap_or_else(|_| "false".to_string())
                .parse()
                .context("Invalid LEGACY_DOCTOR_LOGINS")?,
        })
    }
}
