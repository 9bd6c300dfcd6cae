use showroom_storage::S3Config;

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except secrets have defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Lifetime of signed asset URLs in seconds (default: `3600`).
    pub asset_url_ttl_secs: u64,
    /// `Cache-Control` max-age for public manifest responses (default: `300`).
    pub manifest_cache_secs: u64,
    /// Base URL of the developer portal, used to build magic-link URLs.
    pub portal_base_url: String,
    /// JWT token configuration (secret, expiry durations).
    pub jwt: JwtConfig,
    /// Object storage settings.
    pub storage: S3Config,
    /// SMTP settings for magic-link delivery. `None` logs links instead.
    pub smtp: Option<SmtpConfig>,
}

/// SMTP relay settings for outbound magic-link mail.
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub username: String,
    pub password: String,
    /// `From` address for outbound mail.
    pub from_address: String,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                   |
    /// |-------------------------|---------------------------|
    /// | `HOST`                  | `0.0.0.0`                 |
    /// | `PORT`                  | `3000`                    |
    /// | `CORS_ORIGINS`          | `http://localhost:5173`   |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`                      |
    /// | `ASSET_URL_TTL_SECS`    | `3600`                    |
    /// | `MANIFEST_CACHE_SECS`   | `300`                     |
    /// | `PORTAL_BASE_URL`       | `http://localhost:5173`   |
    /// | `S3_BUCKET`             | `showroom-assets`         |
    /// | `S3_REGION`             | `us-east-1`               |
    /// | `S3_ENDPOINT`           | -- (AWS when unset)       |
    /// | `S3_PUBLIC_BASE_URL`    | -- (no public URLs)       |
    /// | `SMTP_HOST` et al.      | -- (links logged instead) |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let asset_url_ttl_secs: u64 = std::env::var("ASSET_URL_TTL_SECS")
            .unwrap_or_else(|_| "3600".into())
            .parse()
            .expect("ASSET_URL_TTL_SECS must be a valid u64");

        let manifest_cache_secs: u64 = std::env::var("MANIFEST_CACHE_SECS")
            .unwrap_or_else(|_| "300".into())
            .parse()
            .expect("MANIFEST_CACHE_SECS must be a valid u64");

        let portal_base_url = std::env::var("PORTAL_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:5173".into());

        let storage = S3Config {
            bucket: std::env::var("S3_BUCKET").unwrap_or_else(|_| "showroom-assets".into()),
            region: std::env::var("S3_REGION").unwrap_or_else(|_| "us-east-1".into()),
            endpoint: std::env::var("S3_ENDPOINT").ok(),
            public_base_url: std::env::var("S3_PUBLIC_BASE_URL").ok(),
        };

        let smtp = match (
            std::env::var("SMTP_HOST"),
            std::env::var("SMTP_USERNAME"),
            std::env::var("SMTP_PASSWORD"),
            std::env::var("SMTP_FROM"),
        ) {
            (Ok(host), Ok(username), Ok(password), Ok(from_address)) => Some(SmtpConfig {
                host,
                username,
                password,
                from_address,
            }),
            _ => None,
        };

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            asset_url_ttl_secs,
            manifest_cache_secs,
            portal_base_url,
            jwt: JwtConfig::from_env(),
            storage,
            smtp,
        }
    }
}
