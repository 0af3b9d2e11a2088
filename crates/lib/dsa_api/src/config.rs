//! API server configuration.

use std::path::PathBuf;

use axum::http::HeaderValue;
use thiserror::Error;

/// Origins allowed to call the API from a browser when none are configured.
pub const DEFAULT_ALLOWED_ORIGINS: &[&str] = &[
    "http://localhost:3000",
    "http://localhost:5173",
    "http://127.0.0.1:5173",
    "https://dsa-snowy.vercel.app",
    "https://dsa-harrison-ezes-projects.vercel.app",
    "https://dsa-git-main-harrison-ezes-projects.vercel.app",
];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid CORS origin: {0:?}")]
    InvalidOrigin(String),
}

/// Configuration for the API server.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Address to bind the HTTP listener (e.g. "0.0.0.0:8000").
    pub bind_addr: String,
    /// Grants dataset file.
    pub dataset_path: PathBuf,
    /// CORS allow-list. Credentials are allowed for these origins only.
    pub allowed_origins: Vec<HeaderValue>,
}

impl ApiConfig {
    pub fn new(
        host: &str,
        port: u16,
        dataset_path: impl Into<PathBuf>,
        allowed_origins: &[String],
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            bind_addr: bind_addr(host, port),
            dataset_path: dataset_path.into(),
            allowed_origins: parse_origins(allowed_origins)?,
        })
    }
}

/// `host:port`, bracketing IPv6 hosts.
pub fn bind_addr(host: &str, port: u16) -> String {
    if host.contains(':') && !host.starts_with('[') {
        format!("[{host}]:{port}")
    } else {
        format!("{host}:{port}")
    }
}

/// Parse origins into header values. Blank entries are skipped.
pub fn parse_origins(origins: &[String]) -> Result<Vec<HeaderValue>, ConfigError> {
    origins
        .iter()
        .map(|o| o.trim())
        .filter(|o| !o.is_empty())
        .map(|o| {
            let origin = o.trim_end_matches('/');
            if origin == "*" {
                return Err(ConfigError::InvalidOrigin(o.to_string()));
            }
            HeaderValue::from_str(origin).map_err(|_| ConfigError::InvalidOrigin(o.to_string()))
        })
        .collect()
}
