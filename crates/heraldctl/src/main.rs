//! Herald Control - CLI client for the herald status bot
//!
//! Sends a command to heraldd as the chat service would and prints the reply.

use clap::{Parser, Subcommand};
use heraldctl::client::DaemonClient;
use heraldctl::display;
use heraldctl::errors::{ClientError, EXIT_SUCCESS};

#[derive(Parser)]
#[command(name = "heraldctl")]
#[command(about = "Herald Control - ask the status bot from a terminal", long_about = None)]
#[command(version)]
struct Cli {
    /// Daemon URL (defaults to $HERALDD_URL or http://127.0.0.1:7866)
    #[arg(long, global = true)]
    url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Send a command, e.g. `heraldctl ask status github`
    Ask {
        #[arg(required = true)]
        words: Vec<String>,

        /// Print the raw chat JSON reply
        #[arg(long)]
        json: bool,
    },

    /// Show daemon health
    Health,
}

async fn run(cli: Cli) -> Result<(), ClientError> {
    let url = DaemonClient::discover_url(cli.url.as_deref());
    let client = DaemonClient::new(&url)?;

    match cli.command {
        Commands::Ask { words, json } => {
            let reply = client.ask(&words.join(" ")).await?;
            if json {
                let pretty = serde_json::to_string_pretty(&reply)
                    .map_err(|e| ClientError::InvalidResponse(e.to_string()))?;
                println!("{}", pretty);
            } else {
                print!("{}", display::render(&reply, console::colors_enabled()));
            }
        }
        Commands::Health => {
            let health = client.health().await?;
            println!(
                "heraldd {} at {}: {} ({} plugins, up {}s)",
                health["version"].as_str().unwrap_or("unknown"),
                client.base_url(),
                health["status"].as_str().unwrap_or("unknown"),
                health["plugins"],
                health["uptime_secs"],
            );
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let code = match run(cli).await {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            e.exit_code()
        }
    };

    if code != EXIT_SUCCESS {
        std::process::exit(code);
    }
}
