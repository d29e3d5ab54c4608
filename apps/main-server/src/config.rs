//! Server configuration.

use std::env;

use crate::services::activity_sweeper::DEFAULT_SWEEP_INTERVAL_SECS;

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Database URL.
    pub database_url: String,
    /// Maximum number of pooled database connections.
    pub db_max_connections: u32,
    /// Seconds between activity sweeps. Zero disables the sweeper.
    pub sweep_interval_secs: u64,
    /// Log level.
    pub log_level: String,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        let port = match env::var("MEETING_SERVER_PORT") {
            Ok(v) => v.parse().map_err(|_| {
                anyhow::anyhow!("MEETING_SERVER_PORT must be a port number, got {v:?}")
            })?,
            Err(_) => 8080,
        };

        let db_max_connections = match env::var("MEETING_DB_MAX_CONNECTIONS") {
            Ok(v) => v.parse().map_err(|_| {
                anyhow::anyhow!("MEETING_DB_MAX_CONNECTIONS must be a positive integer, got {v:?}")
            })?,
            Err(_) => 5,
        };
        if db_max_connections == 0 {
            anyhow::bail!("MEETING_DB_MAX_CONNECTIONS must be at least 1");
        }

        let sweep_interval_secs = match env::var("MEETING_SWEEP_INTERVAL_SECS") {
            Ok(v) => v.parse().map_err(|_| {
                anyhow::anyhow!("MEETING_SWEEP_INTERVAL_SECS must be whole seconds, got {v:?}")
            })?,
            Err(_) => DEFAULT_SWEEP_INTERVAL_SECS,
        };

        Ok(Self {
            host: env::var("MEETING_SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port,
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:meeting.db?mode=rwc".to_string()),
            db_max_connections,
            sweep_interval_secs,
            log_level: env::var("MEETING_LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// Returns the server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Returns true if the background activity sweeper should run.
    pub fn sweeper_enabled(&self) -> bool {
        self.sweep_interval_secs > 0
    }
}
