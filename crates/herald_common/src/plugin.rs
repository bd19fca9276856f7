//! Plugin contract
//!
//! Every capability the bot offers implements [`Plugin`]. The host tries each
//! registered plugin in turn and uses the first answer that is not
//! [`PluginError::NoMatch`].

use crate::error::PluginError;
use crate::types::{Command, ResponseEnvelope};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Static description of a plugin, used for help rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginDescriptor {
    pub name: String,
    pub description: String,
    /// Trigger pattern -> explanation
    pub help_entries: BTreeMap<String, String>,
}

#[async_trait]
pub trait Plugin: Send + Sync {
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    /// Trigger patterns this plugin answers to, with help text
    fn describe(&self) -> BTreeMap<String, String>;

    /// Handle a command; `Err(PluginError::NoMatch)` if it is not for us
    async fn work(&self, command: &Command) -> Result<ResponseEnvelope, PluginError>;

    fn descriptor(&self) -> PluginDescriptor {
        PluginDescriptor {
            name: self.name().to_string(),
            description: self.description().to_string(),
            help_entries: self.describe(),
        }
    }
}
