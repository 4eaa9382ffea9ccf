//! Server configuration read from the environment (and `.env`).

use anyhow::Context;
use std::env;
use std::time::Duration;

const DEFAULT_ORIGINS: &[&str] = &[
    "http://localhost:5173",
    "http://localhost:3000",
    "http://localhost:8080",
    "http://127.0.0.1:8080",
];

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub allowed_origins: Vec<String>,
    pub template_cache_capacity: u64,
    /// `None` keeps templates until evicted by capacity.
    pub template_cache_ttl: Option<Duration>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            allowed_origins: DEFAULT_ORIGINS.iter().map(|o| o.to_string()).collect(),
            template_cache_capacity: 1000,
            template_cache_ttl: None,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from any variable source; unset variables keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(host) = lookup("INFORMES_HOST") {
            config.host = host;
        }
        if let Some(port) = lookup("INFORMES_PORT") {
            config.port = port
                .trim()
                .parse()
                .with_context(|| format!("INFORMES_PORT must be a port number, got '{port}'"))?;
        }
        if let Some(origins) = lookup("INFORMES_ALLOWED_ORIGINS") {
            config.allowed_origins = origins
                .split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(str::to_string)
                .collect();
        }
        if let Some(capacity) = lookup("TEMPLATE_CACHE_CAPACITY") {
            config.template_cache_capacity = capacity.trim().parse().with_context(|| {
                format!("TEMPLATE_CACHE_CAPACITY must be a positive integer, got '{capacity}'")
            })?;
        }
        if let Some(ttl) = lookup("TEMPLATE_CACHE_TTL_SECS") {
            let secs: u64 = ttl.trim().parse().with_context(|| {
                format!("TEMPLATE_CACHE_TTL_SECS must be a number of seconds, got '{ttl}'")
            })?;
            config.template_cache_ttl = Some(Duration::from_secs(secs));
        }

        Ok(config)
    }

    pub fn bind_address(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}
