//! HTTP server and CORS configuration

use serde::{Deserialize, Serialize};

use super::{env_opt, env_or};

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Bind host
    pub host: String,

    /// Bind port
    pub port: u16,

    /// Worker threads (0 lets actix pick one per core)
    #[serde(default)]
    pub workers: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: String::from("127.0.0.1"),
            port: 8080,
            workers: 0,
        }
    }
}

impl ServerConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            workers: 0,
        }
    }

    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: env_opt("SERVER_HOST").unwrap_or(defaults.host),
            port: env_or("SERVER_PORT", defaults.port),
            workers: env_or("SERVER_WORKERS", defaults.workers),
        }
    }

    /// Address string suitable for `HttpServer::bind`
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// CORS configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CorsConfig {
    /// Allowed origins; empty means any origin is accepted
    #[serde(default)]
    pub allowed_origins: Vec<String>,

    /// Preflight cache duration in seconds
    #[serde(default = "default_max_age")]
    pub max_age: usize,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: Vec::new(),
            max_age: default_max_age(),
        }
    }
}

impl CorsConfig {
    /// Create from environment variables (`CORS_ALLOWED_ORIGINS` is comma separated)
    pub fn from_env() -> Self {
        let allowed_origins = env_opt("CORS_ALLOWED_ORIGINS")
            .map(|origins| {
                origins
                    .split(',')
                    .map(|origin| origin.trim().to_string())
                    .filter(|origin| !origin.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        Self {
            allowed_origins,
            max_age: env_or("CORS_MAX_AGE", default_max_age()),
        }
    }

    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.is_empty()
    }
}

fn default_max_age() -> usize {
    3600
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_address() {
        let config = ServerConfig::new("0.0.0.0", 9000);
        assert_eq!(config.bind_address(), "0.0.0.0:9000");
    }

    #[test]
    fn test_default_cors_allows_any_origin() {
        assert!(CorsConfig::default().allows_any_origin());
    }
}
