//! Error kinds for plugins and the plugin host

use thiserror::Error;

/// Plugin errors
#[derive(Debug, Error)]
pub enum PluginError {
    /// The command was not addressed to this plugin; the host tries the next one
    #[error("Nothing found")]
    NoMatch,

    /// Outbound call failed (network, non-2xx status, unreadable body)
    #[error("{service} unreachable: {message}")]
    UpstreamTransport { service: String, message: String },

    /// The up/down oracle did not recognize the domain
    #[error("{0} is not a valid domain")]
    InvalidDomain(String),

    /// Upstream answered but the expected fields were missing
    #[error("Could not parse {service} response: {message}")]
    Parse { service: String, message: String },
}

impl PluginError {
    pub fn transport(service: impl Into<String>, message: impl ToString) -> Self {
        Self::UpstreamTransport {
            service: service.into(),
            message: message.to_string(),
        }
    }

    pub fn parse(service: impl Into<String>, message: impl ToString) -> Self {
        Self::Parse {
            service: service.into(),
            message: message.to_string(),
        }
    }

    pub fn is_no_match(&self) -> bool {
        matches!(self, Self::NoMatch)
    }

    /// Transport and parse failures propagate the same way
    pub fn is_upstream(&self) -> bool {
        matches!(self, Self::UpstreamTransport { .. } | Self::Parse { .. })
    }
}

/// Plugin host errors
#[derive(Debug, Error)]
pub enum HostError {
    /// Every registered plugin answered NoMatch
    #[error("No plugin understood the command")]
    NotUnderstood,

    #[error("Plugin {plugin} failed: {source}")]
    Plugin {
        plugin: String,
        #[source]
        source: PluginError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_match_is_distinguishable() {
        assert!(PluginError::NoMatch.is_no_match());
        assert!(!PluginError::InvalidDomain("nope".into()).is_no_match());
    }

    #[test]
    fn test_upstream_kinds() {
        assert!(PluginError::transport("GitHub", "connection refused").is_upstream());
        assert!(PluginError::parse("AWS", "missing table").is_upstream());
        assert!(!PluginError::InvalidDomain("x".into()).is_upstream());
    }

    #[test]
    fn test_messages() {
        let err = PluginError::InvalidDomain("example.invalid".into());
        assert_eq!(err.to_string(), "example.invalid is not a valid domain");

        let err = HostError::Plugin {
            plugin: "status".into(),
            source: PluginError::transport("NPM", "HTTP 503"),
        };
        assert_eq!(err.to_string(), "Plugin status failed: NPM unreachable: HTTP 503");
    }
}
