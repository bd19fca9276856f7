//! Plugin host - routes a text command to the first plugin that claims it

use crate::error::{HostError, PluginError};
use crate::plugin::{Plugin, PluginDescriptor};
use crate::types::{Command, ResponseEnvelope, ResultRecord, Severity};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Reply when no plugin claimed the command
pub const NOT_UNDERSTOOD: &str = "I'm sorry, I don't understand. Try \"help\" to see what I can do.";

/// Reply headline when a plugin failed
pub const FAILURE_HEADLINE: &str = "Something went wrong while handling your request.";

/// Ordered set of plugins
#[derive(Clone, Default)]
pub struct PluginHost {
    plugins: Vec<Arc<dyn Plugin>>,
}

impl PluginHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a plugin; earlier registrations are tried first
    pub fn register(&mut self, plugin: Arc<dyn Plugin>) {
        debug!("Registered plugin: {}", plugin.name());
        self.plugins.push(plugin);
    }

    pub fn count(&self) -> usize {
        self.plugins.len()
    }

    pub fn descriptors(&self) -> Vec<PluginDescriptor> {
        self.plugins.iter().map(|p| p.descriptor()).collect()
    }

    /// Dispatch a command to the first plugin that does not answer NoMatch
    pub async fn dispatch(&self, text: &str) -> Result<ResponseEnvelope, HostError> {
        let command = Command::parse(text);

        for plugin in &self.plugins {
            match plugin.work(&command).await {
                Ok(envelope) => {
                    info!("Command '{}' handled by {}", command, plugin.name());
                    return Ok(envelope);
                }
                Err(PluginError::NoMatch) => continue,
                Err(source) => {
                    return Err(HostError::Plugin {
                        plugin: plugin.name().to_string(),
                        source,
                    });
                }
            }
        }

        Err(HostError::NotUnderstood)
    }

    /// Like [`PluginHost::dispatch`] but failures become a private reply
    pub async fn respond(&self, text: &str) -> ResponseEnvelope {
        match self.dispatch(text).await {
            Ok(envelope) => envelope,
            Err(HostError::NotUnderstood) => {
                debug!("No plugin matched '{}'", text);
                let mut envelope = ResponseEnvelope::new();
                envelope.set_headline(NOT_UNDERSTOOD);
                envelope
            }
            Err(HostError::Plugin { plugin, source }) => {
                warn!("Plugin {} failed on '{}': {}", plugin, text, source);
                let mut envelope = ResponseEnvelope::new();
                envelope.set_headline(FAILURE_HEADLINE);
                envelope.push(
                    ResultRecord::new(plugin)
                        .with_body(source.to_string())
                        .with_severity(Severity::Danger),
                );
                envelope
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Visibility;
    use async_trait::async_trait;
    use std::collections::BTreeMap;

    struct EchoPlugin;

    #[async_trait]
    impl Plugin for EchoPlugin {
        fn name(&self) -> &str {
            "echo"
        }

        fn description(&self) -> &str {
            "Repeats what you say"
        }

        fn describe(&self) -> BTreeMap<String, String> {
            BTreeMap::from([("echo [text]".to_string(), "Repeat the text".to_string())])
        }

        async fn work(&self, command: &Command) -> Result<ResponseEnvelope, PluginError> {
            if command.trigger() != "echo" {
                return Err(PluginError::NoMatch);
            }
            let mut envelope = ResponseEnvelope::new();
            envelope.set_headline(command.remainder());
            envelope.set_public();
            Ok(envelope)
        }
    }

    struct BrokenPlugin;

    #[async_trait]
    impl Plugin for BrokenPlugin {
        fn name(&self) -> &str {
            "broken"
        }

        fn description(&self) -> &str {
            "Always fails on 'broken'"
        }

        fn describe(&self) -> BTreeMap<String, String> {
            BTreeMap::new()
        }

        async fn work(&self, command: &Command) -> Result<ResponseEnvelope, PluginError> {
            if command.trigger() != "broken" {
                return Err(PluginError::NoMatch);
            }
            Err(PluginError::transport("Upstream", "HTTP 502"))
        }
    }

    fn host() -> PluginHost {
        let mut host = PluginHost::new();
        host.register(Arc::new(BrokenPlugin));
        host.register(Arc::new(EchoPlugin));
        host
    }

    #[tokio::test]
    async fn test_no_match_falls_through() {
        let envelope = host().dispatch("echo hello world").await.unwrap();
        assert_eq!(envelope.headline, "hello world");
        assert_eq!(envelope.visibility, Visibility::Public);
    }

    #[tokio::test]
    async fn test_real_error_stops_dispatch() {
        let err = host().dispatch("broken").await.unwrap_err();
        match err {
            HostError::Plugin { plugin, source } => {
                assert_eq!(plugin, "broken");
                assert!(source.is_upstream());
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_not_understood() {
        let err = host().dispatch("dance").await.unwrap_err();
        assert!(matches!(err, HostError::NotUnderstood));
    }

    #[tokio::test]
    async fn test_respond_renders_failures() {
        let host = host();

        let envelope = host.respond("dance").await;
        assert_eq!(envelope.headline, NOT_UNDERSTOOD);
        assert_eq!(envelope.visibility, Visibility::Private);
        assert!(envelope.records.is_empty());

        let envelope = host.respond("broken").await;
        assert_eq!(envelope.headline, FAILURE_HEADLINE);
        assert_eq!(envelope.records.len(), 1);
        assert_eq!(envelope.records[0].severity, Severity::Danger);
        assert!(envelope.records[0].body.contains("HTTP 502"));
    }

    #[test]
    fn test_descriptors_in_registration_order() {
        let descriptors = host().descriptors();
        let names: Vec<_> = descriptors.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["broken", "echo"]);
        assert!(descriptors[1].help_entries.contains_key("echo [text]"));
    }
}
