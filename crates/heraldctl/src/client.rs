//! Daemon client - sends commands to heraldd over HTTP

use crate::errors::ClientError;
use herald_common::slack::SlackResponse;
use std::time::Duration;

/// Environment override for the daemon URL
pub const DAEMON_URL_ENV: &str = "HERALDD_URL";

/// Default daemon URL
pub const DEFAULT_DAEMON_URL: &str = "http://127.0.0.1:7866";

/// Client for a running heraldd
pub struct DaemonClient {
    base_url: String,
    http: reqwest::Client,
}

impl DaemonClient {
    /// Discover the daemon URL with fallback chain
    ///
    /// Priority:
    /// 1. Explicit --url flag
    /// 2. $HERALDD_URL
    /// 3. http://127.0.0.1:7866
    pub fn discover_url(explicit: Option<&str>) -> String {
        if let Some(url) = explicit {
            return url.to_string();
        }

        if let Ok(url) = std::env::var(DAEMON_URL_ENV) {
            return url;
        }

        DEFAULT_DAEMON_URL.to_string()
    }

    /// Status checks run on the daemon side, so allow for the slowest one
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| ClientError::Unavailable {
                url: base_url.to_string(),
                message: e.to_string(),
            })?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send one command the way the chat service would
    pub async fn ask(&self, text: &str) -> Result<SlackResponse, ClientError> {
        let url = format!("{}/", self.base_url);
        let response = self
            .http
            .post(&url)
            .form(&[("text", text)])
            .send()
            .await
            .map_err(|e| self.unavailable(e))?;

        if !response.status().is_success() {
            return Err(ClientError::InvalidResponse(format!(
                "HTTP {}",
                response.status()
            )));
        }

        response
            .json::<SlackResponse>()
            .await
            .map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }

    /// Daemon health document
    pub async fn health(&self) -> Result<serde_json::Value, ClientError> {
        let url = format!("{}/health", self.base_url);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| self.unavailable(e))?;

        if !response.status().is_success() {
            return Err(ClientError::InvalidResponse(format!(
                "HTTP {}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }

    fn unavailable(&self, error: reqwest::Error) -> ClientError {
        ClientError::Unavailable {
            url: self.base_url.clone(),
            message: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_url_wins() {
        assert_eq!(
            DaemonClient::discover_url(Some("http://bot.internal:9000")),
            "http://bot.internal:9000"
        );
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let client = DaemonClient::new("http://127.0.0.1:7866/").unwrap();
        assert_eq!(client.base_url(), "http://127.0.0.1:7866");
    }
}
