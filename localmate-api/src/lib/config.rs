use std::env;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    pub password: PasswordConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    #[serde(default = "default_expiration_minutes")]
    pub expiration_minutes: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PasswordConfig {
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
}

fn default_expiration_minutes() -> i64 {
    auth::jwt::DEFAULT_TOKEN_TTL_MINUTES
}

fn default_bcrypt_cost() -> u32 {
    12
}

/// Longest accepted token lifetime: one year.
const MAX_EXPIRATION_MINUTES: i64 = 365 * 24 * 60;

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (LOCALMATE__JWT__SECRET, LOCALMATE__SERVER__HTTP_PORT, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    ///
    /// `jwt.secret` only has a placeholder in `config/development.toml`; every
    /// other run mode must supply it through the environment.
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());
        Self::load_from("config", &run_mode)
    }

    fn load_from(directory: &str, run_mode: &str) -> Result<Self, ConfigError> {
        let configuration = ConfigBuilder::builder()
            // Start with default configuration
            .add_source(File::with_name(&format!("{}/default", directory)).required(false))
            // Layer on environment-specific configuration
            .add_source(File::with_name(&format!("{}/{}", directory, run_mode)).required(false))
            // Example: LOCALMATE__DATABASE__URL=sqlite://... overrides database.url
            .add_source(Environment::with_prefix("LOCALMATE").separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt.secret.is_empty() {
            return Err(ConfigError::Message("jwt.secret must not be empty".into()));
        }
        if self.jwt.secret.len() < 32 {
            tracing::warn!(
                secret_bytes = self.jwt.secret.len(),
                "JWT secret is shorter than 32 bytes"
            );
        }
        if self.jwt.expiration_minutes <= 0 {
            return Err(ConfigError::Message(
                "jwt.expiration_minutes must be positive".into(),
            ));
        }
        if self.jwt.expiration_minutes > MAX_EXPIRATION_MINUTES {
            return Err(ConfigError::Message(format!(
                "jwt.expiration_minutes must not exceed {}",
                MAX_EXPIRATION_MINUTES
            )));
        }
        Ok(())
    }
}
