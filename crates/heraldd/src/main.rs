//! Herald Daemon - chat status bot
//!
//! Serves slash-commands over HTTP, or answers a single command from the
//! command line.

use anyhow::Result;
use clap::{Parser, Subcommand};
use herald_common::slack::SlackResponse;
use heraldd::app::{build_host, load_config};
use heraldd::server::{self, AppState};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "heraldd")]
#[command(about = "Herald - status reports for the services you depend on", long_about = None)]
#[command(version)]
struct Cli {
    /// Config file (defaults to $HERALD_CONFIG or /etc/herald/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve slash-commands over HTTP
    Serve {
        /// Listen address, overrides the config file
        #[arg(long)]
        listen: Option<String>,
    },

    /// Answer one command and print the chat JSON reply
    Ask {
        /// Command words, e.g. `status github`
        #[arg(required = true)]
        words: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref(), std::io::stderr)?;

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let host = build_host(&config)?;

    match cli.command {
        Commands::Serve { listen } => {
            info!("Herald Daemon v{} starting", env!("CARGO_PKG_VERSION"));
            let listen = listen.unwrap_or_else(|| config.server.listen.clone());
            server::run(AppState::new(host), &listen).await
        }
        Commands::Ask { words } => {
            let envelope = host.respond(&words.join(" ")).await;
            println!(
                "{}",
                serde_json::to_string_pretty(&SlackResponse::from(&envelope))?
            );
            Ok(())
        }
    }
}
