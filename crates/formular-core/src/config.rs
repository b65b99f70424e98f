//! Configuration module
//!
//! Environment-driven configuration for the API service: server, database,
//! storage and template settings. Values come from environment variables with
//! sensible development defaults; `.env` loading is the caller's concern
//! (the API binary runs `dotenvy::dotenv().ok()` before `Config::from_env`).

use std::env;

use crate::constants::{
    DEFAULT_BUCKET, DEFAULT_MAX_UPLOAD_SIZE, DEFAULT_TEMPLATE_DIR, SIGNED_URL_EXPIRY_SECS,
};
use crate::storage_types::StorageBackend;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 20;
const DEFAULT_DB_TIMEOUT_SECS: u64 = 30;

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    server_port: u16,
    cors_origins: Vec<String>,
    environment: String,
    database_url: String,
    db_max_connections: u32,
    db_timeout_seconds: u64,
    storage_backend: Option<StorageBackend>,
    s3_bucket: String,
    s3_region: Option<String>,
    s3_endpoint: Option<String>,
    local_storage_path: Option<String>,
    local_storage_base_url: Option<String>,
    template_dir: String,
    signed_url_expiry_secs: u64,
    max_upload_size_bytes: usize,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, anyhow::Error> {
        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins_str = env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string());
        let cors_origins = cors_origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let storage_backend = match env::var("STORAGE_BACKEND") {
            Ok(raw) => Some(
                raw.parse::<StorageBackend>()
                    .map_err(|e| anyhow::anyhow!("STORAGE_BACKEND: {}", e))?,
            ),
            Err(_) => None,
        };

        Ok(Config {
            server_port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            cors_origins,
            environment,
            database_url: env::var("DATABASE_URL")
                .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?,
            db_max_connections: env::var("DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_DB_MAX_CONNECTIONS),
            db_timeout_seconds: env::var("DB_TIMEOUT_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_DB_TIMEOUT_SECS),
            storage_backend,
            s3_bucket: env::var("S3_BUCKET").unwrap_or_else(|_| DEFAULT_BUCKET.to_string()),
            s3_region: env::var("S3_REGION")
                .or_else(|_| env::var("AWS_REGION"))
                .ok(),
            s3_endpoint: env::var("S3_ENDPOINT").ok(),
            local_storage_path: env::var("LOCAL_STORAGE_PATH").ok(),
            local_storage_base_url: env::var("LOCAL_STORAGE_BASE_URL").ok(),
            template_dir: env::var("TEMPLATE_DIR")
                .unwrap_or_else(|_| DEFAULT_TEMPLATE_DIR.to_string()),
            signed_url_expiry_secs: env::var("SIGNED_URL_EXPIRY_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(SIGNED_URL_EXPIRY_SECS),
            max_upload_size_bytes: env::var("MAX_UPLOAD_SIZE_MB")
                .ok()
                .and_then(|v| v.parse::<usize>().ok())
                .map(|mb| mb * 1024 * 1024)
                .unwrap_or(DEFAULT_MAX_UPLOAD_SIZE),
        })
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn server_port(&self) -> u16 {
        self.server_port
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.cors_origins
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections
    }

    pub fn db_timeout_seconds(&self) -> u64 {
        self.db_timeout_seconds
    }

    pub fn storage_backend(&self) -> Option<StorageBackend> {
        self.storage_backend
    }

    pub fn s3_bucket(&self) -> &str {
        &self.s3_bucket
    }

    pub fn s3_region(&self) -> Option<&str> {
        self.s3_region.as_deref()
    }

    pub fn s3_endpoint(&self) -> Option<&str> {
        self.s3_endpoint.as_deref()
    }

    pub fn local_storage_path(&self) -> Option<&str> {
        self.local_storage_path.as_deref()
    }

    pub fn local_storage_base_url(&self) -> Option<&str> {
        self.local_storage_base_url.as_deref()
    }

    pub fn template_dir(&self) -> &str {
        &self.template_dir
    }

    pub fn signed_url_expiry_secs(&self) -> u64 {
        self.signed_url_expiry_secs
    }

    pub fn max_upload_size_bytes(&self) -> usize {
        self.max_upload_size_bytes
    }
}
