//! Application configuration
//!
//! Centralized configuration management with environment variable support
//! and sensible defaults.

use std::env;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,
    /// Dataset configuration
    pub database: DatabaseConfig,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port to bind the server to
    pub port: u16,
    /// Host address to bind to
    pub host: String,
}

/// Dataset configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Path to the pre-populated SQLite dataset file
    pub path: String,
    /// Upper bound on pooled read-only connections
    pub max_connections: u32,
}

impl Config {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig {
                port: env::var("PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(8080),
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            },
            database: DatabaseConfig {
                path: env::var("F1_DB_PATH").unwrap_or_else(|_| "data/f1.db".to_string()),
                max_connections: env::var("DB_MAX_CONNECTIONS")
                    .ok()
                    .and_then(|n| n.parse().ok())
                    .filter(|n| *n > 0)
                    .unwrap_or(5),
            },
        }
    }

    /// Get the server address as a string
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        for key in ["PORT", "HOST", "F1_DB_PATH", "DB_MAX_CONNECTIONS"] {
            env::remove_var(key);
        }
    }

    #[test]
    #[serial]
    fn test_defaults() {
        clear_env();
        let config = Config::from_env();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.database.path, "data/f1.db");
        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.server_addr(), "0.0.0.0:8080");
    }

    #[test]
    #[serial]
    fn test_env_overrides() {
        clear_env();
        env::set_var("PORT", "3000");
        env::set_var("HOST", "127.0.0.1");
        env::set_var("F1_DB_PATH", "/srv/f1/f1.db");
        env::set_var("DB_MAX_CONNECTIONS", "12");

        let config = Config::from_env();
        assert_eq!(config.server_addr(), "127.0.0.1:3000");
        assert_eq!(config.database.path, "/srv/f1/f1.db");
        assert_eq!(config.database.max_connections, 12);
        clear_env();
    }

    #[test]
    #[serial]
    fn test_invalid_numbers_fall_back() {
        clear_env();
        env::set_var("PORT", "not-a-port");
        env::set_var("DB_MAX_CONNECTIONS", "0");

        let config = Config::from_env();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.database.max_connections, 5);
        clear_env();
    }
}
