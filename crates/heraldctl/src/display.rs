//! Terminal rendering of chat replies
//!
//! One bullet per attachment, colored by severity:
//! green good, yellow warning, red danger, plain when unset.

use herald_common::slack::{SlackAttachment, SlackResponse};
use herald_common::Severity;
use owo_colors::OwoColorize;

fn bullet(severity: Severity, color: bool) -> String {
    let marker = match severity {
        Severity::Good => "[OK]",
        Severity::Warning => "[WARN]",
        Severity::Danger => "[FAIL]",
        Severity::Unset => "[--]",
    };

    if !color {
        return marker.to_string();
    }

    match severity {
        Severity::Good => marker.bright_green().to_string(),
        Severity::Warning => marker.yellow().to_string(),
        Severity::Danger => marker.bright_red().to_string(),
        Severity::Unset => marker.dimmed().to_string(),
    }
}

fn render_attachment(attachment: &SlackAttachment, color: bool) -> String {
    let severity = Severity::from_color(&attachment.color);
    let title = if color {
        attachment.title.bold().to_string()
    } else {
        attachment.title.clone()
    };

    let mut out = format!("{} {}", bullet(severity, color), title);
    if let Some(pretext) = &attachment.pretext {
        let pretext = if color {
            pretext.cyan().to_string()
        } else {
            pretext.clone()
        };
        out.push_str(&format!(" ({})", pretext));
    }
    out.push('\n');

    for line in attachment.text.lines().filter(|l| !l.trim().is_empty()) {
        out.push_str("    ");
        out.push_str(line);
        out.push('\n');
    }
    out
}

/// Render a reply for the terminal
pub fn render(response: &SlackResponse, color: bool) -> String {
    let mut out = String::new();
    if !response.text.is_empty() {
        out.push_str(&response.text);
        out.push('\n');
    }
    if !response.attachments.is_empty() {
        out.push('\n');
    }
    for attachment in &response.attachments {
        out.push_str(&render_attachment(attachment, color));
    }
    out
}
