//! Chat wire format
//!
//! Slash-command replies as the chat service expects them. Only the transport
//! (heraldd's HTTP listener) and the client (heraldctl) touch this; plugins
//! work with `ResponseEnvelope`.

use crate::types::{ResponseEnvelope, ResultRecord, Severity, Visibility};
use serde::{Deserialize, Serialize};

/// Inbound slash-command fields; only `text` is used
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SlashCommand {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub channel_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlackAttachment {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pretext: Option<String>,
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlackResponse {
    pub text: String,
    pub response_type: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<SlackAttachment>,
}

impl SlackResponse {
    pub fn is_public(&self) -> bool {
        self.response_type == "in_channel"
    }
}

impl From<&ResultRecord> for SlackAttachment {
    fn from(record: &ResultRecord) -> Self {
        Self {
            title: record.title.clone(),
            pretext: record.preceding_context.clone(),
            text: record.body.clone(),
            color: record.severity.color().to_string(),
        }
    }
}

impl From<&SlackAttachment> for ResultRecord {
    fn from(attachment: &SlackAttachment) -> Self {
        Self {
            title: attachment.title.clone(),
            preceding_context: attachment.pretext.clone(),
            body: attachment.text.clone(),
            severity: Severity::from_color(&attachment.color),
        }
    }
}

impl From<&ResponseEnvelope> for SlackResponse {
    fn from(envelope: &ResponseEnvelope) -> Self {
        let response_type = match envelope.visibility {
            Visibility::Public => "in_channel",
            Visibility::Private => "ephemeral",
        };
        Self {
            text: envelope.headline.clone(),
            response_type: response_type.to_string(),
            attachments: envelope.records.iter().map(SlackAttachment::from).collect(),
        }
    }
}
