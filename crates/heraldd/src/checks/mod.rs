//! Status check adapters
//!
//! One adapter per upstream service. Adapters never panic on odd upstream
//! responses: transport problems become `PluginError::UpstreamTransport`,
//! missing fields become `PluginError::Parse`.

mod board;
mod domain;
pub mod fake;
mod last_message;
mod status_page;

pub use board::{parse_board, AwsBoardCheck};
pub use domain::{domain_record, normalize_domain, IsItUpCheck};
pub use last_message::{last_message_record, LastMessageCheck};
pub use status_page::{parse_status_page, StatusPageCheck};

use anyhow::{Context, Result};
use async_trait::async_trait;
use herald_common::config::{HttpConfig, StatusConfig};
use herald_common::{PluginError, ResultRecord};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// A check against one fixed upstream service
#[async_trait]
pub trait StatusCheck: Send + Sync {
    /// Short name used in `status <name>`
    fn name(&self) -> &str;

    fn title(&self) -> &str;

    /// Status page link shown above the record
    fn link(&self) -> Option<&str>;

    async fn check(&self) -> Result<ResultRecord, PluginError>;

    /// Title and link only, severity unset
    fn blank_record(&self) -> ResultRecord {
        let record = ResultRecord::new(self.title());
        match self.link() {
            Some(link) => record.with_context(link),
            None => record,
        }
    }
}

/// Reachability probe keyed by domain
#[async_trait]
pub trait DomainCheck: Send + Sync {
    async fn check_domain(&self, domain: &str) -> Result<ResultRecord, PluginError>;
}

/// Status board with many sub-services; first record is the summary
#[async_trait]
pub trait BoardCheck: Send + Sync {
    async fn check_board(&self) -> Result<Vec<ResultRecord>, PluginError>;
}

/// Registry of named checks, built once and shared read-only
#[derive(Clone, Default)]
pub struct CheckRegistry {
    checks: BTreeMap<String, Arc<dyn StatusCheck>>,
}

impl CheckRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the registry for the configured services
    pub fn from_config(config: &StatusConfig, client: &reqwest::Client) -> Self {
        let mut registry = Self::new();

        registry.register(Arc::new(LastMessageCheck::new(
            "github",
            "GitHub",
            &config.github_link,
            &config.github_url,
            client.clone(),
        )));

        for page in &config.pages {
            registry.register(Arc::new(StatusPageCheck::new(
                &page.name,
                &page.title,
                &page.url,
                client.clone(),
            )));
        }

        registry
    }

    /// Register a check; a duplicate name replaces the earlier check
    pub fn register(&mut self, check: Arc<dyn StatusCheck>) {
        let name = check.name().to_string();
        if self.checks.insert(name.clone(), check).is_some() {
            warn!("Status check '{}' registered twice, keeping the last one", name);
        } else {
            debug!("Registered status check: {}", name);
        }
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn StatusCheck>> {
        self.checks.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.checks.contains_key(name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.checks.keys().map(String::as_str).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<dyn StatusCheck>)> {
        self.checks.iter().map(|(name, check)| (name.as_str(), check))
    }

    pub fn len(&self) -> usize {
        self.checks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }
}

/// Shared outbound client; its timeout bounds every check
pub fn build_client(config: &HttpConfig) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(config.timeout())
        .user_agent(config.user_agent.as_str())
        .build()
        .context("Failed to build HTTP client")
}

/// GET a page and return its body; non-2xx is a transport error
pub(crate) async fn fetch_text(
    client: &reqwest::Client,
    service: &str,
    url: &str,
) -> Result<String, PluginError> {
    debug!("Fetching {} status: {}", service, url);

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| PluginError::transport(service, e))?;

    if !response.status().is_success() {
        return Err(PluginError::transport(
            service,
            format!("HTTP {}", response.status()),
        ));
    }

    response
        .text()
        .await
        .map_err(|e| PluginError::transport(service, e))
}

/// GET a JSON document; undecodable bodies are parse errors
pub(crate) async fn fetch_json<T: serde::de::DeserializeOwned>(
    client: &reqwest::Client,
    service: &str,
    url: &str,
) -> Result<T, PluginError> {
    let body = fetch_text(client, service, url).await?;
    serde_json::from_str(&body).map_err(|e| PluginError::parse(service, e))
}
