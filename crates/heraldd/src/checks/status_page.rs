//! Hosted status page adapter
//!
//! Several providers publish their status through the same page template:
//! a `div.page-status` container whose class carries the overall state
//! (`status-none`, `status-yellow`, anything else is worse) and a
//! `span.status` with the human readable summary.

use super::{fetch_text, StatusCheck};
use async_trait::async_trait;
use herald_common::{PluginError, ResultRecord, Severity};
use scraper::{Html, Selector};

pub struct StatusPageCheck {
    name: String,
    title: String,
    url: String,
    client: reqwest::Client,
}

impl StatusPageCheck {
    pub fn new(name: &str, title: &str, url: &str, client: reqwest::Client) -> Self {
        Self {
            name: name.to_string(),
            title: title.to_string(),
            url: url.to_string(),
            client,
        }
    }
}

#[async_trait]
impl StatusCheck for StatusPageCheck {
    fn name(&self) -> &str {
        &self.name
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn link(&self) -> Option<&str> {
        Some(&self.url)
    }

    async fn check(&self) -> Result<ResultRecord, PluginError> {
        let html = fetch_text(&self.client, &self.title, &self.url).await?;
        let (severity, summary) =
            parse_status_page(&html).map_err(|e| PluginError::parse(&self.title, e))?;

        Ok(self
            .blank_record()
            .with_body(summary)
            .with_severity(severity))
    }
}

/// Extract severity and summary text from a status page
pub fn parse_status_page(html: &str) -> Result<(Severity, String), String> {
    let document = Html::parse_document(html);

    let container_selector = Selector::parse("div.page-status").map_err(|e| e.to_string())?;
    let status_selector = Selector::parse("span.status").map_err(|e| e.to_string())?;

    let container = document
        .select(&container_selector)
        .next()
        .ok_or_else(|| "No page-status container found".to_string())?;

    let summary = container
        .select(&status_selector)
        .flat_map(|el| el.text())
        .collect::<Vec<_>>()
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    let has_class = |class: &str| container.value().classes().any(|c| c == class);
    let severity = if has_class("status-none") {
        Severity::Good
    } else if has_class("status-yellow") {
        Severity::Warning
    } else {
        Severity::Danger
    };

    Ok((severity, summary))
}
