//! Herald Common - Shared types for the herald status bot
//!
//! Holds the reply model, the plugin contract and its host, configuration,
//! and the chat wire format used between heraldd and heraldctl.

pub mod config;
pub mod error;
pub mod host;
pub mod plugin;
pub mod slack;
pub mod types;

pub use config::HeraldConfig;
pub use error::{HostError, PluginError};
pub use host::PluginHost;
pub use plugin::{Plugin, PluginDescriptor};
pub use types::*;
