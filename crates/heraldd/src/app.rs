//! Plugin host assembly

use crate::checks::build_client;
use crate::help::HelpPlugin;
use crate::status::StatusPlugin;
use anyhow::Result;
use herald_common::{HeraldConfig, PluginHost};
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

/// Load the config, logging to `writer` at `RUST_LOG` or info
///
/// The configured log level is only known once the file is read, so loading
/// runs under its own short-lived subscriber.
pub fn load_config<W>(explicit: Option<&Path>, writer: W) -> Result<HeraldConfig>
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .finish();
    tracing::subscriber::with_default(subscriber, || HeraldConfig::load(explicit))
}

/// Register every plugin; help goes last so it can describe the others
pub fn build_host(config: &HeraldConfig) -> Result<PluginHost> {
    let client = build_client(&config.http)?;

    let mut host = PluginHost::new();
    host.register(Arc::new(StatusPlugin::from_config(&config.status, &client)));
    host.register(Arc::new(HelpPlugin::new(host.descriptors())));

    Ok(host)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Mutex;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_config_load_is_logged() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "log_level = \"debug\"\n").unwrap();

        let captured = Captured::default();
        let sink = captured.clone();
        let config = load_config(Some(&path), move || sink.clone()).unwrap();
        assert_eq!(config.log_level, "debug");

        let logs = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(logs.contains("Loaded config from"));
        assert!(logs.contains("config.toml"));
    }

    #[test]
    fn test_broken_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "log_level = [").unwrap();

        assert!(load_config(Some(&path), std::io::sink).is_err());
    }

    #[test]
    fn test_default_host() {
        let host = build_host(&HeraldConfig::default()).unwrap();
        assert_eq!(host.count(), 2);
        let names: Vec<String> = host.descriptors().into_iter().map(|d| d.name).collect();
        assert_eq!(names, vec!["status", "help"]);
    }

    #[tokio::test]
    async fn test_help_describes_status() {
        let host = build_host(&HeraldConfig::default()).unwrap();
        let envelope = host.dispatch("help").await.unwrap();
        assert_eq!(envelope.records[0].title, "status");
        assert!(envelope.records[0].body.contains("status aws"));
    }
}
