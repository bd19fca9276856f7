//! AWS service health board
//!
//! One page lists every service with its current message. Rows that are not
//! "operating normally" become their own records; the first record is a
//! summary computed from the resolved and unresolved counts.

use super::{fetch_text, BoardCheck};
use async_trait::async_trait;
use herald_common::{PluginError, ResultRecord, Severity};
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

const NORMAL_MESSAGE: &str = "Service is operating normally";
const RESOLVED_MARKER: &str = "[RESOLVED]";

pub struct AwsBoardCheck {
    url: String,
    client: reqwest::Client,
}

impl AwsBoardCheck {
    pub fn new(url: &str, client: reqwest::Client) -> Self {
        Self {
            url: url.to_string(),
            client,
        }
    }
}

#[async_trait]
impl BoardCheck for AwsBoardCheck {
    async fn check_board(&self) -> Result<Vec<ResultRecord>, PluginError> {
        let html = fetch_text(&self.client, "AWS", &self.url).await?;
        let summary = ResultRecord::new("AWS").with_context(&self.url);
        parse_board(&html, summary).map_err(|e| PluginError::parse("AWS", e))
    }
}

/// Turn the board page into `[summary, abnormal services...]`
pub fn parse_board(html: &str, summary: ResultRecord) -> Result<Vec<ResultRecord>, String> {
    let document = Html::parse_document(html);

    let block_selector = Selector::parse("div#current_events_block").map_err(|e| e.to_string())?;
    let row_selector = Selector::parse("table tr").map_err(|e| e.to_string())?;
    let cell_selector = Selector::parse("td").map_err(|e| e.to_string())?;

    let block = document
        .select(&block_selector)
        .next()
        .ok_or_else(|| "No current events block found".to_string())?;

    // Placeholder until the counts are known
    let mut records = vec![summary];
    let mut resolved = 0usize;
    let mut problems = 0usize;
    let mut service_rows = 0usize;

    for row in block.select(&row_selector) {
        let cells: Vec<ElementRef> = row.select(&cell_selector).collect();
        if cells.len() < 3 {
            continue;
        }
        service_rows += 1;

        let message = cells.get(2).map(cell_text).unwrap_or_default();
        let message = message.trim_matches(|c: char| c == ' ' || c == '\n');
        if message.is_empty() || message == NORMAL_MESSAGE {
            continue;
        }

        let service = cells
            .get(1)
            .map(cell_text)
            .unwrap_or_default()
            .trim()
            .to_string();
        let body = tidy_message(message);

        let severity = if body.starts_with(RESOLVED_MARKER) {
            resolved += 1;
            Severity::Warning
        } else {
            problems += 1;
            Severity::Danger
        };
        debug!("AWS board: {} is {}", service, severity);

        records.push(ResultRecord::new(service).with_body(body).with_severity(severity));
    }

    if service_rows == 0 {
        return Err("No service rows in current events block".to_string());
    }

    let (severity, body) = if problems > 0 {
        let mut body = format!("Nr of issues: {}", problems);
        if resolved > 0 {
            body.push_str(&format!("\nNr of resolved issues: {}", resolved));
        }
        (Severity::Danger, body)
    } else if resolved > 0 {
        (Severity::Warning, format!("Nr of resolved issues: {}", resolved))
    } else {
        (Severity::Good, "Everything is operating normally".to_string())
    };
    records[0] = records[0].clone().with_body(body).with_severity(severity);

    Ok(records)
}

fn cell_text(cell: &ElementRef) -> String {
    cell.text().collect()
}

/// Drop the "more" link filler and put each sentence on its own line
fn tidy_message(message: &str) -> String {
    message
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && *line != "more")
        .collect::<Vec<_>>()
        .join("\n")
        .replace(". ", ".\n")
}
