//! Help plugin - lists what every registered plugin answers to

use async_trait::async_trait;
use herald_common::{Command, Plugin, PluginDescriptor, PluginError, ResponseEnvelope, ResultRecord};
use std::collections::BTreeMap;

pub const HELP_HEADLINE: &str = "Available commands:";

pub struct HelpPlugin {
    others: Vec<PluginDescriptor>,
}

impl HelpPlugin {
    /// `others` are the descriptors of the plugins registered before this one
    pub fn new(others: Vec<PluginDescriptor>) -> Self {
        Self { others }
    }
}

fn descriptor_record(descriptor: &PluginDescriptor) -> ResultRecord {
    let body = descriptor
        .help_entries
        .iter()
        .map(|(trigger, help)| format!("{}: {}", trigger, help))
        .collect::<Vec<_>>()
        .join("\n");
    ResultRecord::new(&descriptor.name)
        .with_context(&descriptor.description)
        .with_body(body)
}

#[async_trait]
impl Plugin for HelpPlugin {
    fn name(&self) -> &str {
        "help"
    }

    fn description(&self) -> &str {
        "Lists the commands I understand"
    }

    fn describe(&self) -> BTreeMap<String, String> {
        BTreeMap::from([("help".to_string(), "Show this overview".to_string())])
    }

    async fn work(&self, command: &Command) -> Result<ResponseEnvelope, PluginError> {
        if command.trigger() != "help" || !command.args().is_empty() {
            return Err(PluginError::NoMatch);
        }

        let mut envelope = ResponseEnvelope::new();
        envelope.set_headline(HELP_HEADLINE);
        for descriptor in &self.others {
            envelope.push(descriptor_record(descriptor));
        }
        envelope.push(descriptor_record(&self.descriptor()));
        Ok(envelope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use herald_common::Visibility;

    fn status_descriptor() -> PluginDescriptor {
        PluginDescriptor {
            name: "status".to_string(),
            description: "Provides status reports for various services".to_string(),
            help_entries: BTreeMap::from([
                ("status".to_string(), "Check the status of various services".to_string()),
                ("status [url]".to_string(), "Checks if a website is up".to_string()),
            ]),
        }
    }

    #[tokio::test]
    async fn test_help_lists_plugins() {
        let plugin = HelpPlugin::new(vec![status_descriptor()]);
        let envelope = plugin.work(&Command::parse("help")).await.unwrap();

        assert_eq!(envelope.headline, HELP_HEADLINE);
        assert_eq!(envelope.visibility, Visibility::Private);
        assert_eq!(envelope.records.len(), 2);
        assert_eq!(envelope.records[0].title, "status");
        assert_eq!(
            envelope.records[0].body,
            "status: Check the status of various services\nstatus [url]: Checks if a website is up"
        );
        assert_eq!(envelope.records[1].title, "help");
    }

    #[tokio::test]
    async fn test_other_commands_do_not_match() {
        let plugin = HelpPlugin::new(vec![]);
        for text in ["status", "help me", "helpful", ""] {
            let err = plugin.work(&Command::parse(text)).await.unwrap_err();
            assert!(err.is_no_match());
        }
    }
}
