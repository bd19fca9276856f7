//! Status plugin - routes `status ...` commands to the checks
//!
//! Routing, first match wins:
//! 1. `status`            -> every registered check, concurrently
//! 2. `status aws`        -> the AWS board report
//! 3. `status <service>`  -> that one check
//!    `status <domain>`   -> is-it-up probe for the domain
//! 4. anything else       -> NoMatch, the host tries the next plugin

use crate::checks::{
    normalize_domain, AwsBoardCheck, BoardCheck, CheckRegistry, DomainCheck, IsItUpCheck,
};
use crate::fanout;
use async_trait::async_trait;
use herald_common::config::StatusConfig;
use herald_common::{Command, Plugin, PluginError, ResponseEnvelope};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info};

pub const RESULTS_HEADLINE: &str = "Status results:";
pub const WEBSITE_HEADLINE: &str = "The website is:";

/// Where a status command goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusRoute {
    AllServices,
    Board,
    Service(String),
    Domain(String),
    NoMatch,
}

impl std::fmt::Display for StatusRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AllServices => write!(f, "all_services"),
            Self::Board => write!(f, "board"),
            Self::Service(name) => write!(f, "service:{}", name),
            Self::Domain(domain) => write!(f, "domain:{}", domain),
            Self::NoMatch => write!(f, "no_match"),
        }
    }
}

pub struct StatusPlugin {
    trigger: String,
    board_keyword: String,
    registry: Arc<CheckRegistry>,
    domains: Arc<dyn DomainCheck>,
    board: Arc<dyn BoardCheck>,
}

impl StatusPlugin {
    pub fn new(
        trigger: &str,
        board_keyword: &str,
        registry: Arc<CheckRegistry>,
        domains: Arc<dyn DomainCheck>,
        board: Arc<dyn BoardCheck>,
    ) -> Self {
        Self {
            trigger: trigger.to_string(),
            board_keyword: board_keyword.to_string(),
            registry,
            domains,
            board,
        }
    }

    /// Wire the real checks from configuration
    pub fn from_config(config: &StatusConfig, client: &reqwest::Client) -> Self {
        let registry = CheckRegistry::from_config(config, client);
        info!(
            "Status plugin ready with {} checks: {}",
            registry.len(),
            registry.names().join(", ")
        );

        Self::new(
            &config.trigger,
            &config.board_keyword,
            Arc::new(registry),
            Arc::new(IsItUpCheck::new(&config.domain_oracle, client.clone())),
            Arc::new(AwsBoardCheck::new(&config.board_url, client.clone())),
        )
    }

    pub fn registry(&self) -> &CheckRegistry {
        &self.registry
    }

    /// Classify a command
    pub fn route(&self, command: &Command) -> StatusRoute {
        if command.trigger() != self.trigger {
            return StatusRoute::NoMatch;
        }

        if command.args().is_empty() {
            return StatusRoute::AllServices;
        }

        let remainder = command.remainder();
        if remainder == self.board_keyword {
            return StatusRoute::Board;
        }

        if self.registry.contains(&remainder) {
            return StatusRoute::Service(remainder);
        }

        let domain = normalize_domain(&remainder);
        if domain.is_empty() {
            return StatusRoute::NoMatch;
        }
        StatusRoute::Domain(domain)
    }
}

#[async_trait]
impl Plugin for StatusPlugin {
    fn name(&self) -> &str {
        "status"
    }

    fn description(&self) -> &str {
        "Provides status reports for various services"
    }

    fn describe(&self) -> BTreeMap<String, String> {
        let mut entries = BTreeMap::new();
        entries.insert(
            self.trigger.clone(),
            "Check the status of various services".to_string(),
        );
        entries.insert(
            format!("{} {}", self.trigger, self.board_keyword),
            format!(
                "Give an extensive status report on {}",
                self.board_keyword.to_uppercase()
            ),
        );
        entries.insert(
            format!("{} [service]", self.trigger),
            format!(
                "Check the status of a specific service ({})",
                self.registry.names().join(", ")
            ),
        );
        entries.insert(
            format!("{} [url]", self.trigger),
            "Checks if a website is up".to_string(),
        );
        entries
    }

    async fn work(&self, command: &Command) -> Result<ResponseEnvelope, PluginError> {
        let route = self.route(command);
        debug!("Status route for '{}': {}", command, route);

        let mut envelope = ResponseEnvelope::new();
        match route {
            StatusRoute::AllServices => {
                for record in fanout::check_all(&self.registry).await {
                    envelope.push(record);
                }
                envelope.set_headline(RESULTS_HEADLINE);
                envelope.set_public();
            }
            StatusRoute::Board => {
                for record in self.board.check_board().await? {
                    envelope.push(record);
                }
                envelope.set_headline(RESULTS_HEADLINE);
                envelope.set_public();
            }
            StatusRoute::Service(name) => {
                let check = self.registry.get(&name).ok_or(PluginError::NoMatch)?;
                envelope.push(check.check().await?);
                envelope.set_headline(RESULTS_HEADLINE);
                envelope.set_public();
            }
            StatusRoute::Domain(domain) => {
                envelope.push(self.domains.check_domain(&domain).await?);
                envelope.set_headline(WEBSITE_HEADLINE);
                envelope.set_public();
            }
            StatusRoute::NoMatch => {}
        }

        if envelope.is_empty() {
            return Err(PluginError::NoMatch);
        }
        Ok(envelope)
    }
}
