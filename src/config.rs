use std::env;
use anyhow::{bail, Context, Result};

use crate::cors::{self, CorsConfig};

#[derive(Debug, Clone)]
pub struct Config {
    pub service_port: u16,
    pub service_host: String,
    pub cors: CorsConfig,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup, so parsing can be tested
    /// without touching the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let service_port = lookup("SERVICE_PORT")
            .unwrap_or_else(|| "8000".to_string())
            .parse::<u16>()
            .context("SERVICE_PORT must be a valid port number (0-65535)")?;

        let service_host = lookup("SERVICE_HOST")
            .unwrap_or_else(|| "0.0.0.0".to_string());

        let defaults = CorsConfig::default();

        let allowed_origins = match lookup("CORS_ALLOWED_ORIGINS") {
            Some(raw) => cors::parse_origins(&raw)
                .context("CORS_ALLOWED_ORIGINS must be '*' or a comma-separated list of origins")?,
            None => defaults.allowed_origins,
        };

        let allow_credentials = match lookup("CORS_ALLOW_CREDENTIALS") {
            Some(raw) => parse_bool(&raw)
                .context("CORS_ALLOW_CREDENTIALS must be one of true, false, 1, 0")?,
            None => defaults.allow_credentials,
        };

        let allowed_methods = match lookup("CORS_ALLOWED_METHODS") {
            Some(raw) => cors::parse_methods(&raw)
                .context("CORS_ALLOWED_METHODS must be '*' or a comma-separated list of methods")?,
            None => defaults.allowed_methods,
        };

        let allowed_headers = match lookup("CORS_ALLOWED_HEADERS") {
            Some(raw) => cors::parse_headers(&raw)
                .context("CORS_ALLOWED_HEADERS must be '*' or a comma-separated list of header names")?,
            None => defaults.allowed_headers,
        };

        Ok(Config {
            service_port,
            service_host,
            cors: CorsConfig {
                allowed_origins,
                allow_credentials,
                allowed_methods,
                allowed_headers,
            },
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.service_host, self.service_port)
    }

    pub fn log_startup(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Service listening on: {}", self.addr());
        tracing::info!("  CORS origins: {}", self.cors.allowed_origins);
        tracing::info!("  CORS methods: {}", self.cors.allowed_methods);
        tracing::info!("  CORS headers: {}", self.cors.allowed_headers);
        tracing::info!("  CORS credentials: {}", self.cors.allow_credentials);

        if self.cors.allows_any_origin() {
            tracing::warn!("CORS accepts any origin; set CORS_ALLOWED_ORIGINS to an allow-list before deploying");
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            service_port: 8000,
            service_host: "0.0.0.0".to_string(),
            cors: CorsConfig::default(),
        }
    }
}

fn parse_bool(raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        other => bail!("invalid boolean '{}'", other),
    }
}
