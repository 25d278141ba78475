//! Configuration for webscrap

mod logging;
mod scraping;
mod server;

pub use logging::{LogFormat, LogLevel, LoggingConfig};
pub use scraping::{KeywordConfig, ScrapingConfig, StoreConfig};
pub use server::{HttpConfig, DEFAULT_PORT};

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::types::MAX_KEYWORDS;

/// Default user agent for page fetches
pub const DEFAULT_USER_AGENT: &str = "webscrap/0.1 (+https://github.com/webscrap)";

/// Environment variable overriding the HTTP listen port
pub const PORT_ENV: &str = "PORT";

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP API server configuration
    #[serde(default)]
    pub http: HttpConfig,
    /// Fetch and extraction configuration
    #[serde(default)]
    pub scraping: ScrapingConfig,
    /// Keyword extraction configuration
    #[serde(default)]
    pub keywords: KeywordConfig,
    /// Website store configuration
    #[serde(default)]
    pub store: StoreConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file and validate it.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read config file '{}': {}", path.display(), e))?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config file '{}': {}", path.display(), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path` if it exists, otherwise start from defaults
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Apply overrides from the process environment
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_env_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides using `lookup` to read variables
    pub fn apply_env_from<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup(PORT_ENV) {
            let port = port.trim();
            self.http.port = port
                .parse()
                .map_err(|_| anyhow::anyhow!("{} must be a port number, got '{}'", PORT_ENV, port))?;
        }
        self.validate()
    }

    /// Serialize to TOML, as written by `webscrap init`
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Validate all configuration fields.
    ///
    /// Collects all validation errors and reports them together.
    pub fn validate(&self) -> Result<()> {
        let mut errors: Vec<String> = Vec::new();

        if self.http.port == 0 {
            errors.push("HTTP listen port must be between 1 and 65535, got 0".to_string());
        }
        if self.http.host.trim().is_empty() {
            errors.push("HTTP host must not be empty".to_string());
        }

        if self.scraping.user_agent.trim().is_empty() {
            errors.push("user_agent must not be empty".to_string());
        }
        if self.scraping.timeout_secs == Some(0) {
            errors.push("timeout_secs must be positive when set".to_string());
        }
        if self.scraping.max_content_size == 0 {
            errors.push("max_content_size must be positive".to_string());
        }
        if self.scraping.max_description_chars == 0 {
            errors.push("max_description_chars must be positive".to_string());
        }

        if self.keywords.max_keywords > MAX_KEYWORDS {
            errors.push(format!("max_keywords must be <= {}", MAX_KEYWORDS));
        }

        if self.store.path.as_os_str().is_empty() {
            errors.push("store path must not be empty".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            anyhow::bail!(
                "Configuration validation failed:\n  - {}",
                errors.join("\n  - ")
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn default_config_passes_validation() {
        let cfg = Config::default();
        assert!(cfg.validate().is_ok(), "default config should be valid");
        assert_eq!(cfg.http.port, DEFAULT_PORT);
        assert_eq!(cfg.keywords.max_keywords, MAX_KEYWORDS);
        assert_eq!(cfg.scraping.max_description_chars, 160);
        assert!(cfg.scraping.timeout_secs.is_none());
    }

    #[test]
    fn validate_rejects_port_zero() {
        let mut cfg = Config::default();
        cfg.http.port = 0;
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("HTTP listen port must be between 1 and 65535"));
    }

    #[test]
    fn validate_rejects_too_many_keywords() {
        let mut cfg = Config::default();
        cfg.keywords.max_keywords = 11;
        assert!(cfg.validate().unwrap_err().to_string().contains("max_keywords"));
    }

    #[test]
    fn validate_collects_multiple_errors() {
        let mut cfg = Config::default();
        cfg.scraping.user_agent = String::new();
        cfg.scraping.timeout_secs = Some(0);
        cfg.store.path = PathBuf::new();

        let msg = cfg.validate().unwrap_err().to_string();
        assert!(msg.contains("user_agent"));
        assert!(msg.contains("timeout_secs"));
        assert!(msg.contains("store path"));
    }

    #[test]
    fn port_env_overrides_config() {
        let mut cfg = Config::default();
        cfg.apply_env_from(|key| (key == PORT_ENV).then(|| "8088".to_string()))
            .unwrap();
        assert_eq!(cfg.http.port, 8088);
        assert_eq!(cfg.http.listen_addr(), "0.0.0.0:8088");
    }

    #[test]
    fn missing_port_env_keeps_default() {
        let mut cfg = Config::default();
        cfg.apply_env_from(|_| None).unwrap();
        assert_eq!(cfg.http.port, DEFAULT_PORT);
    }

    #[test]
    fn invalid_port_env_is_an_error() {
        let mut cfg = Config::default();
        assert!(cfg
            .apply_env_from(|_| Some("not-a-port".to_string()))
            .is_err());
        assert!(cfg.apply_env_from(|_| Some("0".to_string())).is_err());
    }

    #[test]
    fn load_partial_file_fills_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("webscrap.toml");
        std::fs::write(
            &path,
            "[http]\nport = 9000\n\n[keywords]\nextra_stopwords = [\"lorem\"]\n",
        )
        .unwrap();

        let cfg = Config::load(&path).unwrap();
        assert_eq!(cfg.http.port, 9000);
        assert_eq!(cfg.http.host, "0.0.0.0");
        assert_eq!(cfg.keywords.extra_stopwords, vec!["lorem"]);
        assert_eq!(cfg.keywords.max_keywords, MAX_KEYWORDS);
        assert!(cfg.keywords.extractor().is_stopword("lorem"));
    }

    #[test]
    fn load_or_default_without_file() {
        let tmp = tempfile::tempdir().unwrap();
        let cfg = Config::load_or_default(&tmp.path().join("missing.toml")).unwrap();
        assert_eq!(cfg.http.port, DEFAULT_PORT);
    }

    #[test]
    fn default_config_round_trips_through_toml() {
        let toml = Config::default().to_toml().unwrap();
        let parsed: Config = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.http.port, DEFAULT_PORT);
        assert_eq!(parsed.store.path, PathBuf::from("data/websites.json"));
    }

    #[test]
    fn scraping_config_converts_to_runtime_settings() {
        let mut cfg = ScrapingConfig::default();
        cfg.timeout_secs = Some(5);
        let fetch = cfg.fetch_config();
        assert_eq!(fetch.timeout, Some(std::time::Duration::from_secs(5)));
        assert_eq!(fetch.user_agent, DEFAULT_USER_AGENT);
        assert_eq!(cfg.extractor_config().max_description_chars, 160);
    }
}
