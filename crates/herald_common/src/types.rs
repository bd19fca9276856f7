//! Reply model shared by every plugin
//!
//! A command comes in as text, a plugin answers with a `ResponseEnvelope`
//! holding one `ResultRecord` per checked service.

use serde::{Deserialize, Serialize};

/// Coarse health signal attached to a record
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Good,
    Warning,
    Danger,
    #[default]
    Unset,
}

impl Severity {
    /// Chat attachment color for this severity (empty when unset)
    pub fn color(&self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Warning => "warning",
            Self::Danger => "danger",
            Self::Unset => "",
        }
    }

    /// Inverse of [`Severity::color`]; unknown colors are `Unset`
    pub fn from_color(color: &str) -> Self {
        match color {
            "good" => Self::Good,
            "warning" => Self::Warning,
            "danger" => Self::Danger,
            _ => Self::Unset,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Good => "good",
            Self::Warning => "warning",
            Self::Danger => "danger",
            Self::Unset => "unset",
        };
        write!(f, "{}", s)
    }
}

/// Current state of one service or sub-service
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRecord {
    pub title: String,
    /// Shown above the record, usually the status page link
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preceding_context: Option<String>,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub severity: Severity,
}

impl ResultRecord {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.preceding_context = Some(context.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

/// Who gets to see the reply
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// Only the caller
    #[default]
    Private,
    /// Everybody in the channel
    Public,
}

/// Aggregate reply handed back to the transport
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    pub headline: String,
    pub records: Vec<ResultRecord>,
    pub visibility: Visibility,
}

impl ResponseEnvelope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record; records keep the order they were finalized in
    pub fn push(&mut self, record: ResultRecord) {
        self.records.push(record);
    }

    pub fn set_headline(&mut self, headline: impl Into<String>) {
        self.headline = headline.into();
    }

    pub fn set_public(&mut self) {
        self.visibility = Visibility::Public;
    }

    pub fn set_private(&mut self) {
        self.visibility = Visibility::Private;
    }

    /// Nothing was added and no headline was set
    pub fn is_empty(&self) -> bool {
        self.headline.is_empty() && self.records.is_empty()
    }
}

/// A text command split into its trigger word and argument tokens
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    trigger: String,
    args: Vec<String>,
}

impl Command {
    /// Tokenize on whitespace; the first token is the trigger
    pub fn parse(text: &str) -> Self {
        let mut tokens = text.split_whitespace().map(str::to_string);
        let trigger = tokens.next().unwrap_or_default();
        Self {
            trigger,
            args: tokens.collect(),
        }
    }

    pub fn trigger(&self) -> &str {
        &self.trigger
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Arguments joined back with single spaces
    pub fn remainder(&self) -> String {
        self.args.join(" ")
    }

    pub fn is_empty(&self) -> bool {
        self.trigger.is_empty()
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.args.is_empty() {
            write!(f, "{}", self.trigger)
        } else {
            write!(f, "{} {}", self.trigger, self.remainder())
        }
    }
}
