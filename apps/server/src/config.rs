//! Layered configuration for the server binaries.
//!
//! Values come from an optional `config.toml` in the working directory,
//! overridden by `KLINIKA__`-prefixed environment variables
//! (e.g. `KLINIKA__DATABASE__URL`, `KLINIKA__SERVER__PORT`). A `.env` file is
//! loaded first so local development needs no exported shell state.

use serde::Deserialize;
use std::net::{IpAddr, SocketAddr};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Allowed CORS origins; empty means no CORS headers are emitted.
    pub cors_origins: Vec<String>,
    /// Maximum accepted request body size in bytes.
    pub max_request_body_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            cors_origins: Vec::new(),
            max_request_body_size: 1024 * 1024,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: String,
    pub pool_min_size: u32,
    pub pool_max_size: u32,
    pub pool_timeout_seconds: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            pool_min_size: 1,
            pool_max_size: 10,
            pool_timeout_seconds: 30,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// HMAC secret for signing access tokens.
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
    /// Initial password assigned to newly created staff accounts.
    pub default_staff_password: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            token_ttl_hours: 24,
            default_staff_password: String::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub json: bool,
    pub file_enabled: bool,
    pub file_directory: String,
    pub file_prefix: String,
    /// One of `daily`, `hourly`, `minutely`, `never`.
    pub file_rotation: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file_enabled: false,
            file_directory: "logs".to_string(),
            file_prefix: "klinika".to_string(),
            file_rotation: "daily".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            auth: AuthConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file and environment.
    pub fn load() -> anyhow::Result<Self> {
        // Best effort; absence of a .env file is normal in production.
        dotenvy::dotenv().ok();

        let settings = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(
                config::Environment::with_prefix("KLINIKA")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("server.cors_origins")
                    .try_parsing(true),
            )
            .build()?;

        let config = settings.try_deserialize::<Config>()?;
        Ok(config)
    }

    /// Reject configurations the server cannot safely start with.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.database.url.is_empty() {
            return Err("database.url must be set (KLINIKA__DATABASE__URL)".to_string());
        }
        if self.auth.jwt_secret.is_empty() {
            return Err("auth.jwt_secret must be set (KLINIKA__AUTH__JWT_SECRET)".to_string());
        }
        if self.auth.token_ttl_hours <= 0 {
            return Err("auth.token_ttl_hours must be positive".to_string());
        }
        if self.database.pool_max_size == 0 {
            return Err("database.pool_max_size must be at least 1".to_string());
        }
        Ok(())
    }

    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let ip: IpAddr = self
            .server
            .host
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid server.host '{}': {e}", self.server.host))?;
        Ok(SocketAddr::new(ip, self.server.port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> Config {
        let mut config = Config::default();
        config.database.url = "postgres://localhost/klinika".to_string();
        config.auth.jwt_secret = "test-secret".to_string();
        config
    }

    #[test]
    fn validate_requires_database_url_and_secret() {
        let config = Config::default();
        assert!(config.validate().is_err());

        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn socket_addr_combines_host_and_port() {
        let mut config = valid_config();
        config.server.host = "127.0.0.1".to_string();
        config.server.port = 9090;
        assert_eq!(config.socket_addr().unwrap().to_string(), "127.0.0.1:9090");
    }

    #[test]
    fn socket_addr_rejects_garbage_host() {
        let mut config = valid_config();
        config.server.host = "not-an-ip".to_string();
        assert!(config.socket_addr().is_err());
    }
}
