use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode};
use sqlx::ConnectOptions;
use std::str::FromStr;

#[derive(Deserialize, Clone)]
pub struct AppConfig {
    pub cipet_server_config: CipetWebServer,
    pub database: DatabaseConfig,
    pub uploads: UploadConfig,
    pub compression: CompressionConfig,
    pub session: SessionConfig,
    pub discord: DiscordConfig,
    pub gemini: GeminiConfig,
}

impl AppConfig {
    pub fn new() -> Result<Self, config::ConfigError> {
        let base_path = std::env::current_dir()
            .map_err(|e| config::ConfigError::Message(format!("Failed to find the current dir: {}", e)))?;
        let config_dir = base_path.join("src/core/configurations");

        let app_environment: Environment = std::env::var("CIPET_APP_ENVIRONMENT")
            .unwrap_or_else(|_| "local".into())
            .try_into()
            .map_err(config::ConfigError::Message)?;

        let configurations = config::Config::builder()
            .add_source(config::File::from(config_dir.join("base")).required(true))
            .add_source(
                config::File::from(config_dir.join(app_environment.as_str())).required(true),
            )
            // e.g. `CIPET__DISCORD__WEBHOOK_URL=https://...` sets `discord.webhook_url`
            .add_source(
                config::Environment::with_prefix("CIPET")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?;

        configurations.try_deserialize()
    }
}

#[derive(Deserialize, Clone)]
pub struct CipetWebServer {
    pub port: u16,
    pub host: String,
}

#[derive(Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

impl DatabaseConfig {
    pub fn connect(&self) -> Result<SqliteConnectOptions, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(&self.url)?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal);

        Ok(options.log_statements(tracing::log::LevelFilter::Trace))
    }
}

#[derive(Deserialize, Clone)]
pub struct UploadConfig {
    pub directory: String,
    pub max_file_size: usize,
}

#[derive(Deserialize, Clone, Debug)]
pub struct CompressionConfig {
    pub max_width: u32,
    pub max_height: u32,
    pub target_bytes: u64,
    pub initial_quality: u8,
    pub min_quality: u8,
    pub quality_step: u8,
}

impl Default for CompressionConfig {
    fn default() -> Self {
        Self {
            max_width: 1920,
            max_height: 1080,
            target_bytes: 100 * 1024,
            initial_quality: 80,
            min_quality: 30,
            quality_step: 10,
        }
    }
}

#[derive(Deserialize, Clone)]
pub struct SessionConfig {
    pub cookie_name: String,
    pub ttl_hours: i64,
    pub secure_cookie: bool,
}

#[derive(Deserialize, Clone)]
pub struct DiscordConfig {
    pub webhook_url: Option<Secret<String>>,
    pub timeout_seconds: u64,
}

impl DiscordConfig {
    /// The configured webhook URL, treating an empty value as absent.
    pub fn webhook_url(&self) -> Option<&Secret<String>> {
        self.webhook_url
            .as_ref()
            .filter(|url| !url.expose_secret().trim().is_empty())
    }
}

#[derive(Deserialize, Clone)]
pub struct GeminiConfig {
    pub api_key: Option<Secret<String>>,
    pub base_url: String,
    pub model: String,
    pub timeout_seconds: u64,
}

impl GeminiConfig {
    pub fn api_key(&self) -> Option<&Secret<String>> {
        self.api_key
            .as_ref()
            .filter(|key| !key.expose_secret().trim().is_empty())
    }
}

pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{} is not supported environment. Use either `local` or `production` ",
                other
            )),
        }
    }
}
