//! Configuration module
//!
//! This module provides configuration structures for the watermark service:
//! HTTP server settings, upload limits, scratch storage and processing deadlines.
//! Values come from the process environment (optionally seeded from a `.env` file).

use std::env;
use std::path::PathBuf;

// Common constants
const SERVER_PORT: u16 = 3000;
const MAX_FILE_SIZE_MB: usize = 20;
const REQUEST_TIMEOUT_SECS: u64 = 30;
const HTTP_CONCURRENCY_LIMIT: usize = 64;

/// Log output format for the tracing subscriber
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

impl LogFormat {
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "json" => LogFormat::Json,
            _ => LogFormat::Compact,
        }
    }
}

/// HTTP-level configuration
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub http_concurrency_limit: usize,
    pub environment: String,
    pub log_format: LogFormat,
}

/// Watermark service configuration
#[derive(Clone, Debug)]
pub struct WatermarkServiceConfig {
    pub base: BaseConfig,
    /// Parent directory for per-request scratch directories. `None` uses the system temp dir.
    pub temp_dir: Option<PathBuf>,
    /// Maximum size of each uploaded part (`image`, `watermark`)
    pub max_file_size_bytes: usize,
    /// Deadline for decode + composite + encode of a single request
    pub request_timeout_secs: u64,
}

impl WatermarkServiceConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = lookup("ENVIRONMENT")
            .or_else(|| lookup("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let cors_origins_str = lookup("CORS_ORIGINS").unwrap_or_else(|| "*".to_string());
        let cors_origins: Vec<String> = cors_origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let max_file_size_mb = lookup("MAX_FILE_SIZE_MB")
            .and_then(|s| s.parse::<usize>().ok())
            .unwrap_or(MAX_FILE_SIZE_MB);

        let base = BaseConfig {
            server_port: lookup("PORT")
                .unwrap_or_else(|| SERVER_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            cors_origins,
            http_concurrency_limit: lookup("HTTP_CONCURRENCY_LIMIT")
                .and_then(|s| s.parse().ok())
                .unwrap_or(HTTP_CONCURRENCY_LIMIT),
            environment,
            log_format: lookup("LOG_FORMAT")
                .map(|s| LogFormat::parse(&s))
                .unwrap_or_default(),
        };

        let config = WatermarkServiceConfig {
            base,
            temp_dir: lookup("TEMP_DIR")
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .map(PathBuf::from),
            max_file_size_bytes: max_file_size_mb * 1024 * 1024,
            request_timeout_secs: lookup("REQUEST_TIMEOUT_SECS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(REQUEST_TIMEOUT_SECS),
        };

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.max_file_size_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_FILE_SIZE_MB must be greater than 0"));
        }
        if self.request_timeout_secs == 0 {
            return Err(anyhow::anyhow!(
                "REQUEST_TIMEOUT_SECS must be greater than 0"
            ));
        }
        if self.base.http_concurrency_limit == 0 {
            return Err(anyhow::anyhow!(
                "HTTP_CONCURRENCY_LIMIT must be greater than 0"
            ));
        }
        if let Some(ref dir) = self.temp_dir {
            if !dir.is_dir() {
                return Err(anyhow::anyhow!(
                    "TEMP_DIR does not exist or is not a directory"
                ));
            }
        }
        Ok(())
    }
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config(pub Box<WatermarkServiceConfig>);

impl Config {
    fn inner(&self) -> &WatermarkServiceConfig {
        &self.0
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        let config = WatermarkServiceConfig::from_env()?;
        Ok(Config(Box::new(config)))
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        self.inner().validate()
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let environment = self.inner().base.environment.to_lowercase();
        environment == "production" || environment == "prod"
    }

    pub fn server_port(&self) -> u16 {
        self.inner().base.server_port
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.inner().base.cors_origins
    }

    pub fn http_concurrency_limit(&self) -> usize {
        self.inner().base.http_concurrency_limit
    }

    pub fn environment(&self) -> &str {
        &self.inner().base.environment
    }

    pub fn log_format(&self) -> LogFormat {
        self.inner().base.log_format
    }

    pub fn temp_dir(&self) -> PathBuf {
        self.inner()
            .temp_dir
            .clone()
            .unwrap_or_else(env::temp_dir)
    }

    pub fn max_file_size_bytes(&self) -> usize {
        self.inner().max_file_size_bytes
    }

    pub fn request_timeout_secs(&self) -> u64 {
        self.inner().request_timeout_secs
    }
}

impl From<WatermarkServiceConfig> for Config {
    fn from(config: WatermarkServiceConfig) -> Self {
        Config(Box::new(config))
    }
}
