//! JSON "last message" status API (GitHub)

use super::{fetch_json, StatusCheck};
use async_trait::async_trait;
use herald_common::{PluginError, ResultRecord, Severity};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct LastMessage {
    status: String,
    body: String,
}

pub struct LastMessageCheck {
    name: String,
    title: String,
    link: String,
    url: String,
    client: reqwest::Client,
}

impl LastMessageCheck {
    pub fn new(name: &str, title: &str, link: &str, url: &str, client: reqwest::Client) -> Self {
        Self {
            name: name.to_string(),
            title: title.to_string(),
            link: link.to_string(),
            url: url.to_string(),
            client,
        }
    }
}

#[async_trait]
impl StatusCheck for LastMessageCheck {
    fn name(&self) -> &str {
        &self.name
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn link(&self) -> Option<&str> {
        Some(&self.link)
    }

    async fn check(&self) -> Result<ResultRecord, PluginError> {
        let message: LastMessage = fetch_json(&self.client, &self.title, &self.url).await?;
        Ok(last_message_record(self.blank_record(), &message.status, &message.body))
    }
}

/// `good`, `minor` and `major` map to the three severities; anything else stays unset
pub fn last_message_record(record: ResultRecord, status: &str, body: &str) -> ResultRecord {
    let severity = match status {
        "good" => Severity::Good,
        "minor" => Severity::Warning,
        "major" => Severity::Danger,
        _ => Severity::Unset,
    };
    record.with_body(body).with_severity(severity)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let base = ResultRecord::new("GitHub");
        assert_eq!(
            last_message_record(base.clone(), "good", "ok").severity,
            Severity::Good
        );
        assert_eq!(
            last_message_record(base.clone(), "minor", "slow").severity,
            Severity::Warning
        );
        assert_eq!(
            last_message_record(base.clone(), "major", "down").severity,
            Severity::Danger
        );

        let record = last_message_record(base, "maintenance", "Scheduled work");
        assert_eq!(record.severity, Severity::Unset);
        assert_eq!(record.body, "Scheduled work");
    }
}
