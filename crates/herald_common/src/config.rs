//! Configuration management for herald.
//!
//! Loads settings from /etc/herald/config.toml or uses defaults.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

/// Config file path
pub const CONFIG_PATH: &str = "/etc/herald/config.toml";

/// Fallback config file path
pub const DEFAULT_CONFIG_PATH: &str = "/var/lib/herald/config.toml";

/// Environment override for the config file path
pub const CONFIG_ENV: &str = "HERALD_CONFIG";

/// HTTP listener configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address the slash-command listener binds to
    #[serde(default = "default_listen")]
    pub listen: String,
}

fn default_listen() -> String {
    "127.0.0.1:7866".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
        }
    }
}

/// Outbound HTTP client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Per-request timeout in seconds; the only bound on a status check
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_timeout() -> u64 {
    10
}

fn default_user_agent() -> String {
    format!("heraldd/{}", env!("CARGO_PKG_VERSION"))
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

/// A service published through a hosted status page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusPageConfig {
    /// Short name used in `status <name>`
    pub name: String,
    /// Record title
    pub title: String,
    /// Page to scrape, also shown above the record
    pub url: String,
}

impl StatusPageConfig {
    fn new(name: &str, title: &str, url: &str) -> Self {
        Self {
            name: name.to_string(),
            title: title.to_string(),
            url: url.to_string(),
        }
    }
}

/// Status plugin configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusConfig {
    /// First word of every status command
    #[serde(default = "default_trigger")]
    pub trigger: String,

    /// Argument that selects the multi-service board report
    #[serde(default = "default_board_keyword")]
    pub board_keyword: String,

    #[serde(default = "default_board_url")]
    pub board_url: String,

    /// Up/down oracle queried as `<oracle>/<domain>.json`
    #[serde(default = "default_domain_oracle")]
    pub domain_oracle: String,

    #[serde(default = "default_github_url")]
    pub github_url: String,

    /// Link shown above the GitHub record
    #[serde(default = "default_github_link")]
    pub github_link: String,

    #[serde(default = "default_pages")]
    pub pages: Vec<StatusPageConfig>,
}

fn default_trigger() -> String {
    "status".to_string()
}

fn default_board_keyword() -> String {
    "aws".to_string()
}

fn default_board_url() -> String {
    "http://status.aws.amazon.com".to_string()
}

fn default_domain_oracle() -> String {
    "https://isitup.org".to_string()
}

fn default_github_url() -> String {
    "https://status.github.com/api/last-message.json".to_string()
}

fn default_github_link() -> String {
    "http://status.github.com".to_string()
}

fn default_pages() -> Vec<StatusPageConfig> {
    vec![
        StatusPageConfig::new("bitbucket", "Bitbucket", "http://status.bitbucket.org"),
        StatusPageConfig::new("npmjs", "NPM", "http://status.npmjs.org"),
        StatusPageConfig::new("disqus", "Disqus", "http://status.disqus.com"),
        StatusPageConfig::new("cloudflare", "Cloudflare", "http://cloudflarestatus.com"),
    ]
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            trigger: default_trigger(),
            board_keyword: default_board_keyword(),
            board_url: default_board_url(),
            domain_oracle: default_domain_oracle(),
            github_url: default_github_url(),
            github_link: default_github_link(),
            pages: default_pages(),
        }
    }
}

/// Full herald configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeraldConfig {
    /// Fallback log filter when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub http: HttpConfig,

    #[serde(default)]
    pub status: StatusConfig,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for HeraldConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            server: ServerConfig::default(),
            http: HttpConfig::default(),
            status: StatusConfig::default(),
        }
    }
}

impl HeraldConfig {
    /// Discover the config file path
    ///
    /// Priority:
    /// 1. Explicit --config flag
    /// 2. $HERALD_CONFIG
    /// 3. /etc/herald/config.toml
    /// 4. /var/lib/herald/config.toml
    pub fn discover_path(explicit: Option<&Path>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(path.to_path_buf());
        }

        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return Some(PathBuf::from(path));
        }

        [CONFIG_PATH, DEFAULT_CONFIG_PATH]
            .iter()
            .map(PathBuf::from)
            .find(|p| p.exists())
    }

    /// Load config; defaults when no file is found, error when one is broken
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match Self::discover_path(explicit) {
            Some(path) => Self::load_from_path(&path),
            None => {
                info!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Load config from specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config: HeraldConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = HeraldConfig::default();
        assert_eq!(config.server.listen, "127.0.0.1:7866");
        assert_eq!(config.http.timeout(), Duration::from_secs(10));
        assert_eq!(config.status.trigger, "status");
        assert_eq!(config.status.board_keyword, "aws");
        assert_eq!(config.status.pages.len(), 4);
        assert!(config.http.user_agent.starts_with("heraldd/"));
    }

    #[test]
    fn test_parse_toml() {
        let toml_str = r#"
log_level = "debug"

[http]
timeout_secs = 3

[status]
trigger = "health"

[[status.pages]]
name = "linear"
title = "Linear"
url = "https://linearstatus.com"
"#;
        let config: HeraldConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.http.timeout_secs, 3);
        assert_eq!(config.status.trigger, "health");
        assert_eq!(config.status.pages.len(), 1);
        assert_eq!(config.status.pages[0].title, "Linear");
        // Defaults for missing fields
        assert_eq!(config.status.board_keyword, "aws");
        assert_eq!(config.server.listen, "127.0.0.1:7866");
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config: HeraldConfig = toml::from_str("").unwrap();
        assert_eq!(config.status.pages, HeraldConfig::default().status.pages);
    }

    #[test]
    fn test_explicit_path_wins() {
        let path = Path::new("/nonexistent/herald.toml");
        assert_eq!(HeraldConfig::discover_path(Some(path)), Some(path.to_path_buf()));
    }
}
