use std::env;
use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use auth::Authenticator;
use auth::JwtHandler;
use config::builder::DefaultState;
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
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseDriver {
    Postgres,
    Memory,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub driver: DatabaseDriver,
    pub url: Option<String>,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    5
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum JwtAlgorithm {
    #[serde(rename = "HS256")]
    Hs256,
    #[serde(rename = "RS256")]
    Rs256,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub algorithm: JwtAlgorithm,
    pub secret: Option<String>,
    pub private_key_path: Option<PathBuf>,
    pub public_key_path: Option<PathBuf>,
    pub expiration_hours: i64,
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, SERVER__HTTP_PORT, JWT__SECRET, etc.)
    /// 2. Environment-specific config file (config/{RUN_MODE}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        Self::build(
            ConfigBuilder::builder()
                .add_source(File::with_name("config/default").required(false))
                .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
                // Example: DATABASE__URL=postgres://... overrides database.url
                .add_source(Environment::default().separator("__")),
        )
    }

    /// Deserialize and check a prepared set of sources.
    pub fn build(
        builder: config::builder::ConfigBuilder<DefaultState>,
    ) -> Result<Self, ConfigError> {
        let config: Config = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.database.driver == DatabaseDriver::Postgres && self.database.url.is_none() {
            return Err(ConfigError::Message(
                "database.url is required for the postgres driver".to_string(),
            ));
        }

        if self.jwt.expiration_hours <= 0 {
            return Err(ConfigError::Message(
                "jwt.expiration_hours must be positive".to_string(),
            ));
        }

        match self.jwt.algorithm {
            JwtAlgorithm::Hs256 if self.jwt.secret.as_deref().map_or(true, str::is_empty) => Err(
                ConfigError::Message("jwt.secret is required for HS256".to_string()),
            ),
            JwtAlgorithm::Rs256
                if self.jwt.private_key_path.is_none() || self.jwt.public_key_path.is_none() =>
            {
                Err(ConfigError::Message(
                    "jwt.private_key_path and jwt.public_key_path are required for RS256"
                        .to_string(),
                ))
            }
            _ => Ok(()),
        }
    }
}

impl JwtConfig {
    /// Build the token signer, reading PEM keys from disk for RS256.
    pub fn jwt_handler(&self) -> anyhow::Result<JwtHandler> {
        match self.algorithm {
            JwtAlgorithm::Hs256 => {
                let secret = self
                    .secret
                    .as_deref()
                    .context("jwt.secret is required for HS256")?;
                Ok(JwtHandler::hs256(secret.as_bytes()))
            }
            JwtAlgorithm::Rs256 => {
                let private_path = self
                    .private_key_path
                    .as_ref()
                    .context("jwt.private_key_path is required for RS256")?;
                let public_path = self
                    .public_key_path
                    .as_ref()
                    .context("jwt.public_key_path is required for RS256")?;

                let private_pem = fs::read(private_path).with_context(|| {
                    format!("failed to read private key {}", private_path.display())
                })?;
                let public_pem = fs::read(public_path).with_context(|| {
                    format!("failed to read public key {}", public_path.display())
                })?;

                Ok(JwtHandler::rs256(&private_pem, &public_pem)?)
            }
        }
    }

    pub fn authenticator(&self) -> anyhow::Result<Authenticator> {
        Ok(Authenticator::new(
            self.jwt_handler()?,
            chrono::Duration::hours(self.expiration_hours),
        ))
    }
}
