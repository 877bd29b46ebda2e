//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `BEYOND_DATABASE_URL` - `PostgreSQL` connection string
//!
//! ## Optional
//! - `BEYOND_HOST` - Bind address (default: 0.0.0.0)
//! - `BEYOND_PORT` - Listen port (default: 5000)
//! - `BEYOND_MAX_BODY_BYTES` - Request body limit (default: 10 MiB, sized
//!   for listings carrying inline base64 images)

use std::net::{IpAddr, SocketAddr};

use secrecy::SecretString;
use thiserror::Error;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: &str = "5000";
const DEFAULT_MAX_BODY_BYTES: &str = "10485760";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Server application configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Maximum accepted request body size in bytes
    pub max_body_bytes: usize,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// Separated from [`Self::from_env`] so tests can supply variables
    /// without mutating the process environment.
    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = get("BEYOND_DATABASE_URL")
            .ok_or_else(|| ConfigError::MissingEnvVar("BEYOND_DATABASE_URL".to_owned()))?;

        let host = get("BEYOND_HOST")
            .unwrap_or_else(|| DEFAULT_HOST.to_owned())
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("BEYOND_HOST".to_owned(), e.to_string()))?;

        let port = get("BEYOND_PORT")
            .unwrap_or_else(|| DEFAULT_PORT.to_owned())
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("BEYOND_PORT".to_owned(), e.to_string()))?;

        let max_body_bytes = get("BEYOND_MAX_BODY_BYTES")
            .unwrap_or_else(|| DEFAULT_MAX_BODY_BYTES.to_owned())
            .parse::<usize>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("BEYOND_MAX_BODY_BYTES".to_owned(), e.to_string())
            })?;

        Ok(Self {
            database_url: SecretString::from(database_url),
            host,
            port,
            max_body_bytes,
        })
    }

    /// Socket address to bind the listener to.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn lookup<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |name| {
            vars.iter()
                .find(|(k, _)| *k == name)
                .map(|(_, v)| (*v).to_owned())
        }
    }

    #[test]
    fn test_defaults() {
        let config =
            ServerConfig::from_lookup(lookup(&[("BEYOND_DATABASE_URL", "postgres://x")])).unwrap();
        assert_eq!(config.port, 5000);
        assert_eq!(config.host.to_string(), "0.0.0.0");
        assert_eq!(config.max_body_bytes, 10 * 1024 * 1024);
    }

    #[test]
    fn test_missing_database_url() {
        let err = ServerConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(name) if name == "BEYOND_DATABASE_URL"));
    }

    #[test]
    fn test_invalid_port() {
        let err = ServerConfig::from_lookup(lookup(&[
            ("BEYOND_DATABASE_URL", "postgres://x"),
            ("BEYOND_PORT", "not-a-port"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(name, _) if name == "BEYOND_PORT"));
    }

    #[test]
    fn test_socket_addr() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("BEYOND_DATABASE_URL", "postgres://x"),
            ("BEYOND_HOST", "127.0.0.1"),
            ("BEYOND_PORT", "8080"),
        ]))
        .unwrap();
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:8080");
    }
}
