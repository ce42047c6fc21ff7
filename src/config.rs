//! Server configuration

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_path: String,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            database_path: "./forum.db".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let host = std::env::var("FORUM_HOST").unwrap_or(defaults.host);
        let port = std::env::var("FORUM_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.port);
        let database_path = std::env::var("FORUM_DATABASE_PATH").unwrap_or(defaults.database_path);
        let log_level = std::env::var("FORUM_LOG_LEVEL").unwrap_or(defaults.log_level);

        Self {
            host,
            port,
            database_path,
            log_level,
        }
    }

    /// Socket address string for the HTTP listener
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
