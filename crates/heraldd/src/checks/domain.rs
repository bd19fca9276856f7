//! "Is it up" domain probe

use super::{fetch_json, DomainCheck};
use async_trait::async_trait;
use herald_common::{PluginError, ResultRecord, Severity};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct IsItUpResponse {
    status_code: i64,
}

/// Queries `<oracle>/<domain>.json`
pub struct IsItUpCheck {
    oracle: String,
    client: reqwest::Client,
}

impl IsItUpCheck {
    pub fn new(oracle: &str, client: reqwest::Client) -> Self {
        Self {
            oracle: oracle.trim_end_matches('/').to_string(),
            client,
        }
    }

    fn url(&self, domain: &str) -> String {
        format!("{}/{}.json", self.oracle, domain)
    }
}

#[async_trait]
impl DomainCheck for IsItUpCheck {
    async fn check_domain(&self, domain: &str) -> Result<ResultRecord, PluginError> {
        let response: IsItUpResponse = fetch_json(&self.client, domain, &self.url(domain)).await?;
        domain_record(domain, response.status_code)
    }
}

/// 1 is up, 2 is down, anything else means the oracle did not know the domain
pub fn domain_record(domain: &str, code: i64) -> Result<ResultRecord, PluginError> {
    let record = ResultRecord::new(domain);
    match code {
        1 => Ok(record.with_body(":thumbsup:").with_severity(Severity::Good)),
        2 => Ok(record.with_body(":thumbsdown:").with_severity(Severity::Danger)),
        _ => Err(PluginError::InvalidDomain(domain.to_string())),
    }
}

/// Strip chat link markup, scheme, path, query and fragment: `<http://a.com/x|a.com>` -> `a.com`
pub fn normalize_domain(raw: &str) -> String {
    let raw = raw.trim().trim_start_matches('<').trim_end_matches('>');
    let raw = raw.rsplit('|').next().unwrap_or(raw);
    let raw = raw
        .trim_start_matches("https://")
        .trim_start_matches("http://");
    raw.split(['/', '?', '#'])
        .next()
        .unwrap_or(raw)
        .trim()
        .to_string()
}
