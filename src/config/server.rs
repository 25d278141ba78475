//! HTTP server configuration

use serde::{Deserialize, Serialize};

/// Port used when neither the config file nor `PORT` sets one
pub const DEFAULT_PORT: u16 = 3001;

/// HTTP API server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Interface to bind (e.g., "0.0.0.0")
    pub host: String,
    /// Listen port, overridden by the `PORT` environment variable
    pub port: u16,
    /// Enable CORS (useful for browser-based clients)
    pub cors_enabled: bool,
}

impl HttpConfig {
    /// Listen address in "host:port" form
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            cors_enabled: false,
        }
    }
}
